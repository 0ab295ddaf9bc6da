//! Catalog error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

use crate::catalog::page::PageView;

/// Errors produced by catalog transitions.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product id is not an integer.
    #[error("Invalid product id: {0}")]
    InvalidId(String),

    /// No product carries the requested id.
    #[error("Product {0} not found")]
    NotFound(String),

    /// Submitted fields failed validation. Carries the page as it should be
    /// re-rendered, with sticky values and field errors.
    #[error("Validation failed: {}", summary(.0))]
    ValidationFailed(Box<PageView>),

    /// The catalog service task is no longer running.
    #[error("Catalog service unavailable")]
    Unavailable,
}

impl CatalogError {
    /// HTTP status surfaced to the client for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::InvalidId(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

fn summary(view: &PageView) -> String {
    view.form.error_summary()
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(CatalogError::InvalidId("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(CatalogError::NotFound("9".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(CatalogError::Unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_error_display() {
        let err = CatalogError::NotFound("999".into());
        assert_eq!(err.to_string(), "Product 999 not found");

        let err = CatalogError::InvalidId("abc".into());
        assert!(err.to_string().contains("abc"));
    }
}
