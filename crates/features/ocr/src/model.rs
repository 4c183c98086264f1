use keel_derive::api_model;
use utoipa::ToSchema;

/// Text extracted from an uploaded image.
#[api_model(rename_all = "snake_case")]
#[derive(Clone, PartialEq)]
pub struct OcrResult {
    pub text: String,
    /// Engine confidence in `[0, 1]`
    pub confidence: f64,
    pub provider: String,
}

#[api_model(rename_all = "snake_case")]
pub struct OcrStatus {
    pub enabled: bool,
    pub provider: String,
    pub status: String,
}

/// Multipart form accepted by `POST /ocr/process`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub(crate) struct OcrUpload {
    /// Image to process
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}
