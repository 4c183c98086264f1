//! Shared HTTP plumbing: application state, the error envelope, the feature guard,
//! CORS policy and the system routes.

pub mod cors;
pub mod error;
pub mod guard;
mod health;
pub mod router;
pub mod state;

pub use cors::cors_layer;
pub use error::{ApiError, ApiErrorExt, ErrorBody, not_found_fallback};
pub use guard::FeatureGuard;
pub use health::HealthResponse;
pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
