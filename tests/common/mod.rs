//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use product_catalog::config::CatalogConfig;
use product_catalog::{HttpServer, Shutdown};

/// Start a catalog server on `addr` with default config.
pub async fn start_server(addr: SocketAddr) -> Shutdown {
    let mut config = CatalogConfig::default();
    config.listener.bind_address = addr.to_string();
    start_server_with(config).await
}

/// Start a catalog server with the given config. Trigger the returned
/// handle to stop it.
pub async fn start_server_with(config: CatalogConfig) -> Shutdown {
    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}

/// Client that never follows redirects and keeps cookies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .no_proxy()
        .build()
        .unwrap()
}
