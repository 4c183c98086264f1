//! Facade crate for Keel features and shared modules.
//! Re-exports domain/kernel primitives, bootstraps the enabled slices and composes the
//! API router. Keep this crate thin: it should compose other crates, not implement
//! business logic.
//!
//! ## Usage
//! - Call [`bootstrap`] with validated settings and register the returned slices in
//!   [`ApiState`](kernel::server::ApiState).
//! - Mount [`api_router`] under the API prefix.
//! - Call [`shutdown`] once the server has drained.

mod bootstrap;
mod error;
mod router;
pub mod services;

pub use bootstrap::{bootstrap, shutdown};
pub use error::{BootstrapError, BootstrapErrorExt};
pub use keel_domain as domain;
pub use keel_kernel as kernel;
pub use router::api_router;

/// Feature slices.
pub mod features {
    pub use keel_items as items;
    pub use keel_ocr as ocr;
}
