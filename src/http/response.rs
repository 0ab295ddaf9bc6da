//! Response building.
//!
//! # Responsibilities
//! - Wrap rendered HTML with the right status
//! - Attach htmx response directives after successful mutations
//! - Build the search cookie
//! - Map catalog and render errors to client-visible responses
//!
//! # Design Decisions
//! - Id errors are plain text with the validator's status
//! - Render failures are logged and surface as a bare 500

use axum::{
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use cookie::{time::Duration, Cookie, SameSite};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::SessionConfig;
use crate::render::RenderError;

/// Canonical list location.
pub const LIST_PATH: &str = "/product-list";

pub const HX_REPLACE_URL: &str = "hx-replace-url";
pub const HX_RETARGET: &str = "hx-retarget";
pub const HX_RESWAP: &str = "hx-reswap";

/// Region every list re-render lands in.
pub const MAIN_TARGET: &str = "#main";
pub const MAIN_SWAP: &str = "innerHTML";

/// Errors a handler can end with.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::Catalog(e) => e.into_response(),
            HttpError::Render(e) => e.into_response(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Template rendering failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

/// HTML response with `status`.
pub fn html(status: StatusCode, body: String) -> Response {
    (status, Html(body)).into_response()
}

/// Tell the client to show the list URL and swap the response into `#main`.
pub fn patch_main(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(HX_REPLACE_URL, HeaderValue::from_static(LIST_PATH));
    headers.insert(HX_RETARGET, HeaderValue::from_static(MAIN_TARGET));
    headers.insert(HX_RESWAP, HeaderValue::from_static(MAIN_SWAP));
    response
}

/// Tell the client to show the list URL.
pub fn replace_url(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(HX_REPLACE_URL, HeaderValue::from_static(LIST_PATH));
    response
}

/// Attach the search cookie carrying `search_text`.
pub fn with_search_cookie(mut response: Response, session: &SessionConfig, search_text: &str) -> Response {
    match search_cookie(session, search_text) {
        Some(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        None => tracing::warn!(cookie = %session.search_cookie, "Could not encode search cookie"),
    }
    response
}

/// `Set-Cookie` value persisting the search text.
pub fn search_cookie(session: &SessionConfig, search_text: &str) -> Option<HeaderValue> {
    let cookie = Cookie::build((session.search_cookie.clone(), search_text.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(session.cookie_max_age_secs))
        .build();

    HeaderValue::from_str(&cookie.encoded().to_string()).ok()
}
