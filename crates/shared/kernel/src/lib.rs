//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it hosts settings loading, the startup safety check and,
//! behind the `server` feature, the HTTP plumbing every slice builds on.
//!
//! ## Settings loading
//! ```rust,no_run
//! use keel_kernel::config::{load_settings, validate};
//!
//! let settings = load_settings(Some("config/local.toml")).unwrap_or_default();
//! validate(&settings).expect("production must not run with DEBUG");
//! ```
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use keel_domain as domain;
