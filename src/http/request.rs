//! Request inspection.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Decide once per request whether the client can apply partial patches
//! - Read the persisted search text from the request cookies

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap, HeaderValue, Request},
};
use cookie::Cookie;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header set by htmx on every request it issues.
pub const HX_REQUEST: &str = "hx-request";

/// Header set by htmx when it needs a full page to restore history.
pub const HX_HISTORY_RESTORE_REQUEST: &str = "hx-history-restore-request";

pub const X_REQUEST_ID: &str = "x-request-id";

/// Whether the client wants a whole document or a fragment to patch in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    FullPage,
    FragmentPatch,
}

impl RenderMode {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let is_set = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        };

        if is_set(HX_REQUEST) && !is_set(HX_HISTORY_RESTORE_REQUEST) {
            RenderMode::FragmentPatch
        } else {
            RenderMode::FullPage
        }
    }

    pub fn is_enhanced(self) -> bool {
        self == RenderMode::FragmentPatch
    }
}

impl<S> FromRequestParts<S> for RenderMode
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RenderMode::from_headers(&parts.headers))
    }
}

/// Request ID generator for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Decoded value of the cookie called `name`, if the client sent one.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(Cookie::split_parse_encoded)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// Request ID assigned by the middleware stack, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.append(*k, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn test_render_mode() {
        assert_eq!(RenderMode::from_headers(&HeaderMap::new()), RenderMode::FullPage);
        assert_eq!(
            RenderMode::from_headers(&headers(&[("hx-request", "true")])),
            RenderMode::FragmentPatch
        );
        assert_eq!(
            RenderMode::from_headers(&headers(&[("hx-request", "false")])),
            RenderMode::FullPage
        );
        // History restore needs the whole document
        assert_eq!(
            RenderMode::from_headers(&headers(&[
                ("hx-request", "true"),
                ("hx-history-restore-request", "true"),
            ])),
            RenderMode::FullPage
        );
    }

    #[test]
    fn test_cookie_value() {
        let map = headers(&[
            ("cookie", "theme=dark; search_text=hand%20saw"),
            ("cookie", "other=1"),
        ]);
        assert_eq!(cookie_value(&map, "search_text"), Some("hand saw".to_string()));
        assert_eq!(cookie_value(&map, "other"), Some("1".to_string()));
        assert_eq!(cookie_value(&map, "missing"), None);
    }

    #[test]
    fn test_empty_cookie_is_present() {
        let map = headers(&[("cookie", "search_text=")]);
        assert_eq!(cookie_value(&map, "search_text"), Some(String::new()));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let mut maker = UuidRequestId;
        let req = Request::new(());
        let a = maker.make_request_id(&req).unwrap();
        let b = maker.make_request_id(&req).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
