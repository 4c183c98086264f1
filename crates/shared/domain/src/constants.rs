//! Canonical feature names and the environment variables that govern them.

pub const DB_POSTGRES: &str = "db_postgres";
pub const DB_MONGO: &str = "db_mongo";
pub const OCR: &str = "ocr";
pub const STORAGE: &str = "storage";

pub const ENABLE_DB_POSTGRES: &str = "ENABLE_DB_POSTGRES";
pub const ENABLE_DB_MONGO: &str = "ENABLE_DB_MONGO";
pub const ENABLE_OCR: &str = "ENABLE_OCR";
pub const ENABLE_STORAGE: &str = "ENABLE_STORAGE";

/// Version reported when `APP_VERSION` is not set.
pub const DEFAULT_APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `OpenAPI` tag for service-level endpoints.
pub const SYSTEM_TAG: &str = "System";
