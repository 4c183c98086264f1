//! File storage for the service.
//!
//! * [`Storage`] is a sandboxed local engine: path traversal protection through
//!   canonicalization, atomic writes (unique temp file, `fsync`, `rename`) and removal
//!   of stale temp files at startup.
//! * [`StorageService`] picks a backend from configuration (`local`, `s3`, `gcs`).
//!   Remote backends are placeholders that validate their bucket and return object URLs.
//!
//! # Example
//!
//! ```rust
//! use keel_storage::{StorageError, StorageKind, StorageOptions, StorageService};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     let options = StorageOptions {
//!         kind: StorageKind::S3,
//!         s3_bucket: Some("uploads".to_owned()),
//!         ..StorageOptions::default()
//!     };
//!     let service = StorageService::init(options).await?;
//!     assert_eq!(service.save("a/b.txt", b"x").await?, "s3://uploads/a/b.txt");
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod security;
mod service;

pub use builder::StorageBuilder;
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};
pub use service::{StorageKind, StorageOptions, StorageService};
