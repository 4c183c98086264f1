//! OCR feature slice.
//!
//! Routes are mounted only when `ENABLE_OCR` is on; each handler re-checks the flag
//! through [`FeatureGuard`](keel_kernel::server::FeatureGuard). Recognition is a
//! placeholder that returns canned text with the provider's nominal confidence.

mod error;
mod handlers;
mod model;
mod provider;

pub use crate::error::{OcrError, OcrErrorExt};
pub use crate::handlers::MAX_UPLOAD_BYTES;
pub use crate::model::{OcrResult, OcrStatus};
pub use crate::provider::OcrProvider;
use axum::extract::DefaultBodyLimit;
use keel_domain::config::SettingsInner;
use keel_kernel::domain::registry::InitializedSlice;
use keel_kernel::server::ApiState;
use tracing::{info, warn};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// OCR feature state
#[keel_derive::keel_slice]
pub struct Ocr {
    pub provider: OcrProvider,
}

/// Initialize the OCR feature from `OCR_PROVIDER` / `OCR_API_KEY`.
///
/// # Errors
///
/// Returns [`OcrError::UnknownProvider`] when `OCR_PROVIDER` names no known engine.
pub fn init(settings: &SettingsInner) -> Result<InitializedSlice, OcrError> {
    let provider: OcrProvider = settings.ocr_provider.parse()?;

    if provider.is_cloud() && settings.ocr_api_key.is_none() {
        warn!(%provider, "OCR_API_KEY is not set; cloud OCR requests would be rejected");
    }

    info!(%provider, "OCR slice initialized");
    Ok(InitializedSlice::new(Ocr::new(OcrInner { provider })))
}

/// `/ocr/status` and `/ocr/process`, relative to the API prefix.
///
/// Request bodies are capped at [`MAX_UPLOAD_BYTES`].
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::ocr_status))
        .routes(routes!(handlers::process_ocr))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
