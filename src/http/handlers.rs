//! Route handlers.
//!
//! Each handler decodes its request, sends one command to the catalog
//! service, and renders the returned page with the template its route calls
//! for. Validation failures come back as [`CatalogError::ValidationFailed`]
//! and are re-rendered as the submitted form with status 422.

use axum::{
    extract::{Path, State},
    http::{header::LOCATION, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;

use crate::catalog::{CatalogError, PageView, ProductForm};
use crate::http::request::{cookie_value, request_id, RenderMode};
use crate::http::response::{html, patch_main, replace_url, with_search_cookie, HttpError, LIST_PATH};
use crate::http::server::AppState;
use crate::render::Template;

type HandlerResult = Result<Response, HttpError>;

/// Search form body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search: String,
}

fn render(state: &AppState, status: StatusCode, template: Template, view: &PageView) -> HandlerResult {
    let body = state.renderer.render(template, view)?;
    Ok(html(status, body))
}

/// Re-render a rejected form, or pass any other error through.
fn form_rejected(state: &AppState, template: Template, err: CatalogError) -> HandlerResult {
    match err {
        CatalogError::ValidationFailed(view) => {
            tracing::debug!(errors = %view.form.error_summary(), "Form rejected");
            render(state, StatusCode::UNPROCESSABLE_ENTITY, template, &view)
        }
        other => Err(other.into()),
    }
}

/// `GET /`
pub async fn index() -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(LOCATION, LIST_PATH)]).into_response()
}

/// `GET /product-list`
pub async fn product_list(
    State(state): State<AppState>,
    mode: RenderMode,
    headers: HeaderMap,
) -> HandlerResult {
    let search_text = cookie_value(&headers, &state.session.search_cookie);
    let view = state.catalog.list(search_text).await?;

    let template = match mode {
        RenderMode::FullPage => Template::Page,
        RenderMode::FragmentPatch => Template::ProductList,
    };
    render(&state, StatusCode::OK, template, &view)
}

/// `GET /add-product`
pub async fn show_add_form(State(state): State<AppState>, mode: RenderMode) -> HandlerResult {
    if !mode.is_enhanced() {
        return Ok(Redirect::temporary(LIST_PATH).into_response());
    }

    let view = state.catalog.show_add_form().await?;
    render(&state, StatusCode::OK, Template::AddProduct, &view)
}

/// `GET /product/{id}/edit`
pub async fn show_edit_form(
    State(state): State<AppState>,
    mode: RenderMode,
    Path(id): Path<String>,
) -> HandlerResult {
    if !mode.is_enhanced() {
        return Ok(Redirect::temporary(LIST_PATH).into_response());
    }

    let view = state.catalog.show_edit_form(id).await?;
    render(&state, StatusCode::OK, Template::EditProduct, &view)
}

/// `GET /product/{id}/delete`
pub async fn show_delete_form(
    State(state): State<AppState>,
    mode: RenderMode,
    Path(id): Path<String>,
) -> HandlerResult {
    if !mode.is_enhanced() {
        return Ok(Redirect::temporary(LIST_PATH).into_response());
    }

    let view = state.catalog.show_delete_form(id).await?;
    render(&state, StatusCode::OK, Template::DeleteProduct, &view)
}

/// `POST /product-list/search`
pub async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> HandlerResult {
    let view = state.catalog.search(form.search).await?;
    let response = render(&state, StatusCode::OK, Template::ProductResults, &view)?;
    Ok(with_search_cookie(response, &state.session, &view.search_text))
}

/// `POST /add-product`
pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ProductForm>,
) -> HandlerResult {
    match state.catalog.create(form).await {
        Ok(view) => {
            tracing::debug!(request_id = %request_id(&headers), products = view.product_count, "Create accepted");
            let response = render(&state, StatusCode::OK, Template::ProductList, &view)?;
            Ok(patch_main(response))
        }
        Err(e) => form_rejected(&state, Template::AddProduct, e),
    }
}

/// `POST /product/{id}/edit`
pub async fn update_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> HandlerResult {
    match state.catalog.update(id.as_str(), form).await {
        Ok(view) => {
            tracing::debug!(request_id = %request_id(&headers), id = %id, "Update accepted");
            let response = render(&state, StatusCode::OK, Template::ProductList, &view)?;
            Ok(patch_main(response))
        }
        Err(e) => form_rejected(&state, Template::EditProduct, e),
    }
}

/// `POST /product/{id}/delete`
pub async fn delete_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> HandlerResult {
    let view = state.catalog.delete(id.as_str()).await?;
    tracing::debug!(request_id = %request_id(&headers), id = %id, "Delete accepted");

    let response = render(&state, StatusCode::OK, Template::ProductList, &view)?;
    Ok(replace_url(response))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> HandlerResult {
    let view = state.catalog.snapshot().await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "products": view.product_count,
    }))
    .into_response())
}
