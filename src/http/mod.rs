//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, tracing, timeout, metrics)
//!     → request.rs (RenderMode decided once from HX-Request, search cookie)
//!     → handlers.rs (one handler per route, talks to the catalog service)
//!     → response.rs (HTML, htmx directives, cookies, error mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RenderMode, UuidRequestId, HX_REQUEST, X_REQUEST_ID};
pub use response::HttpError;
pub use server::{AppState, HttpServer};
