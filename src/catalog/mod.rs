//! Catalog subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (CatalogHandle::send, bounded mpsc + oneshot reply)
//!     → service task owns PageState, applies one transition per message
//!         → validate.rs (id + field checks against the store)
//!         → store.rs (create / update / remove)
//!         → filter.rs (recompute filtered view)
//!     → PageView snapshot returned to the handler for rendering
//! ```
//!
//! # Design Decisions
//! - One owner task for all catalog state: writes are atomic and totally ordered
//! - Handlers never see `PageState`, only owned `PageView` snapshots
//! - Ids come from a process-wide counter and are never reused

pub mod error;
pub mod filter;
pub mod page;
pub mod service;
pub mod store;
pub mod validate;

pub use error::{CatalogError, CatalogResult};
pub use page::{FormState, PageState, PageView, ProductForm, ProductView};
pub use service::{CatalogHandle, CatalogService};
pub use store::{Catalog, Product};
