//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check seed products (non-empty, unique names)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CatalogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::CatalogConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("seed product #{0} has an empty name")]
    EmptySeedName(usize),

    #[error("duplicate seed product name '{0}'")]
    DuplicateSeedName(String),

    #[error("invalid cookie name '{0}'")]
    InvalidCookieName(String),
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &CatalogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if config.catalog.channel_depth == 0 {
        errors.push(ValidationError::Zero("catalog.channel_depth"));
    }

    let mut names = HashSet::new();
    for (i, seed) in config.catalog.seed.iter().enumerate() {
        if seed.name.trim().is_empty() {
            errors.push(ValidationError::EmptySeedName(i));
        } else if !names.insert(seed.name.as_str()) {
            errors.push(ValidationError::DuplicateSeedName(seed.name.clone()));
        }
    }

    if !is_cookie_token(&config.session.search_cookie) {
        errors.push(ValidationError::InvalidCookieName(
            config.session.search_cookie.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// RFC 6265 cookie-name token: visible ASCII without separators.
fn is_cookie_token(name: &str) -> bool {
    const SEPARATORS: &str = "()<>@,;:\\\"/[]?={} \t";
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_graphic() && !SEPARATORS.contains(c))
}
