use crate::Ocr;
use crate::model::{OcrResult, OcrStatus, OcrUpload};
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use keel_derive::api_handler;
use keel_domain::features::FeatureSet;
use keel_kernel::server::{ApiError, ApiState, ErrorBody, FeatureGuard};

pub(crate) const OCR_TAG: &str = "OCR";
const FILE_FIELD: &str = "file";

/// Largest accepted `/ocr/process` request body, multipart envelope included.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[api_handler(
    get,
    path = "/ocr/status",
    responses(
        (status = OK, description = "OCR readiness", body = OcrStatus),
        (status = NOT_FOUND, description = "OCR is disabled", body = ErrorBody),
    ),
    tag = OCR_TAG,
)]
pub(crate) async fn ocr_status(State(state): State<ApiState>) -> Result<Json<OcrStatus>, ApiError> {
    FeatureGuard::require(&state.settings, FeatureSet::OCR)?;
    let ocr = state.try_get_slice::<Ocr>()?;

    Ok(Json(OcrStatus {
        enabled: true,
        provider: ocr.provider.as_str().to_owned(),
        status: "ready".to_owned(),
    }))
}

#[api_handler(
    post,
    path = "/ocr/process",
    request_body(content = OcrUpload, content_type = "multipart/form-data"),
    responses(
        (status = OK, description = "Recognized text", body = OcrResult),
        (status = BAD_REQUEST, description = "Missing or empty file", body = ErrorBody),
        (status = NOT_FOUND, description = "OCR is disabled", body = ErrorBody),
        (status = PAYLOAD_TOO_LARGE, description = "Upload exceeds the size limit", body = ErrorBody),
    ),
    tag = OCR_TAG,
)]
pub(crate) async fn process_ocr(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<OcrResult>, ApiError> {
    FeatureGuard::require(&state.settings, FeatureSet::OCR)?;
    let ocr = state.try_get_slice::<Ocr>()?;

    let mut image = None;
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() == Some(FILE_FIELD) {
            image = Some(field.bytes().await.map_err(malformed)?);
            break;
        }
    }

    let image = image.ok_or_else(|| ApiError::bad_request("Missing multipart field 'file'"))?;
    if image.is_empty() {
        return Err(ApiError::bad_request("Uploaded file is empty"));
    }

    Ok(Json(ocr.provider.recognize(&image)))
}

fn malformed(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge { limit: MAX_UPLOAD_BYTES };
    }
    ApiError::BadRequest { message: err.body_text().into(), context: Some("multipart".into()) }
}
