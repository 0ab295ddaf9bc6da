//! Product Catalog Library
//!
//! Server-rendered product catalog with htmx-driven partial updates.

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;

pub use config::schema::CatalogConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
