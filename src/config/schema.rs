//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Root configuration for the catalog server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Catalog contents at startup and service tuning.
    pub catalog: CatalogSection,

    /// Client-side session state (search cookie).
    pub session: SessionConfig,

    /// Template and static asset locations.
    pub render: RenderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Catalog service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Products created at startup, in order. Ids are assigned from 1.
    pub seed: Vec<SeedProduct>,

    /// Depth of the command channel in front of the catalog service.
    pub channel_depth: usize,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            seed: vec![SeedProduct {
                name: "Hammer".to_string(),
                description: "Smashing hammer".to_string(),
                price_cents: 1000,
            }],
            channel_depth: 64,
        }
    }
}

impl CatalogSection {
    /// Build the startup catalog from the seed list.
    pub fn build_catalog(&self) -> Catalog {
        let mut catalog = Catalog::new();
        for seed in &self.seed {
            catalog.create(seed.name.clone(), seed.description.clone(), seed.price_cents);
        }
        catalog
    }
}

/// A product present at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedProduct {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub price_cents: u64,
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the last search text.
    pub search_cookie: String,

    /// Cookie lifetime in seconds.
    pub cookie_max_age_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_cookie: "search_text".to_string(),
            cookie_max_age_secs: 30 * 24 * 3600, // 30 days
        }
    }
}

/// Template and asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory to load templates from. Embedded templates when unset.
    pub template_dir: Option<String>,

    /// Directory served under `/static`. Not mounted when unset.
    pub static_dir: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.session.search_cookie, "search_text");
        assert!(config.render.template_dir.is_none());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_default_seed_catalog() {
        let catalog = CatalogSection::default().build_catalog();
        assert_eq!(catalog.len(), 1);
        let hammer = &catalog.products()[0];
        assert_eq!(hammer.id, 1);
        assert_eq!(hammer.name, "Hammer");
        assert_eq!(hammer.description, "Smashing hammer");
        assert_eq!(hammer.price_cents, 1000);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CatalogConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [[catalog.seed]]
            name = "Saw"
            price_cents = 1250
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.catalog.seed.len(), 1);
        assert_eq!(config.catalog.seed[0].description, "");
        assert_eq!(config.catalog.channel_depth, 64);
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
