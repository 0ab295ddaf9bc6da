//! Template rendering.
//!
//! # Data Flow
//! ```text
//! Handler picks a Template (+ RenderMode for the list view)
//!     → engine.rs (minijinja Environment, auto-escaped .html)
//!     → PageView serialized as the template context
//!     → HTML string
//! ```
//!
//! # Design Decisions
//! - Every template is loaded and compiled at startup; a missing or broken
//!   template stops the process before it binds
//! - Templates are embedded unless a template directory is configured

pub mod engine;

pub use engine::{RenderError, Renderer, Template};
