//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Start the catalog service and load templates before binding
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request},
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::catalog::{CatalogHandle, CatalogService};
use crate::config::{CatalogConfig, SessionConfig};
use crate::http::handlers;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::observability::metrics;
use crate::render::{RenderError, Renderer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogHandle,
    pub renderer: Arc<Renderer>,
    pub session: Arc<SessionConfig>,
}

impl AppState {
    /// Load templates and start the catalog service.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &CatalogConfig) -> Result<Self, RenderError> {
        let renderer = Renderer::from_config(&config.render)?;
        let catalog = CatalogService::new(config.catalog.build_catalog())
            .spawn(config.catalog.channel_depth);

        tracing::info!(
            products = config.catalog.seed.len(),
            channel_depth = config.catalog.channel_depth,
            "Catalog service started"
        );

        Ok(Self {
            catalog,
            renderer: Arc::new(renderer),
            session: Arc::new(config.session.clone()),
        })
    }
}

/// HTTP server for the product catalog.
pub struct HttpServer {
    router: Router,
    config: CatalogConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if any template cannot be loaded.
    pub fn new(config: CatalogConfig) -> Result<Self, RenderError> {
        let state = AppState::new(&config)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &CatalogConfig, state: AppState) -> Router {
        let x_request_id = HeaderName::from_static(X_REQUEST_ID);

        let mut router = Router::new()
            .route("/", get(handlers::index))
            .route("/health", get(handlers::health))
            .route("/product-list", get(handlers::product_list))
            .route("/product-list/search", post(handlers::search))
            .route(
                "/add-product",
                get(handlers::show_add_form).post(handlers::create_product),
            )
            .route(
                "/product/{id}/edit",
                get(handlers::show_edit_form).post(handlers::update_product),
            )
            .route(
                "/product/{id}/delete",
                get(handlers::show_delete_form).post(handlers::delete_product),
            )
            .route_layer(middleware::from_fn(metrics::track_metrics))
            .with_state(state);

        if let Some(dir) = &config.render.static_dir {
            router = router.nest_service("/static", ServeDir::new(dir));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::new(x_request_id))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Router with all routes and middleware, for driving the app without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until a
    /// shutdown message arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}
