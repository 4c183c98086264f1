use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use keel_domain::config::{Settings, SettingsInner};
use keel_kernel::server::{ApiState, not_found_fallback};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "keel-test-boundary";

fn settings(enable_ocr: bool, provider: &str) -> SettingsInner {
    SettingsInner { enable_ocr, ocr_provider: provider.to_owned(), ..SettingsInner::default() }
}

fn app(settings: SettingsInner) -> Router {
    let slice = keel_ocr::init(&settings).unwrap();
    let state = ApiState::builder()
        .settings(Settings::new(settings))
        .register_slice(slice)
        .build()
        .unwrap();
    let (router, _api) = keel_ocr::router().split_for_parts();
    router.fallback(not_found_fallback).with_state(state)
}

fn multipart(field: &str, content: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"scan.png\"\r\nContent-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::post("/ocr/process")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn status_reports_configured_provider() {
    let request = Request::get("/ocr/status").body(Body::empty()).unwrap();
    let (status, body) = send(app(settings(true, "google_vision")), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], true);
    assert_eq!(body["provider"], "google_vision");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn process_returns_placeholder_text() {
    let (status, body) = send(app(settings(true, "tesseract")), multipart("file", b"\x89PNG")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "tesseract");
    assert_eq!(body["confidence"], 0.95);
    assert_eq!(body["text"], "Placeholder OCR text - implement actual OCR processing");
}

#[tokio::test]
async fn missing_or_empty_file_is_a_bad_request() {
    let (status, body) = send(app(settings(true, "tesseract")), multipart("image", b"data")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Missing multipart field 'file'");
    assert_eq!(body["error_type"], "bad_request");

    let (status, body) = send(app(settings(true, "tesseract")), multipart("file", b"")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Uploaded file is empty");
}

#[tokio::test]
async fn uploads_above_the_default_axum_limit_are_accepted() {
    let scan = vec![7_u8; 3 * 1024 * 1024];
    let (status, body) = send(app(settings(true, "tesseract")), multipart("file", &scan)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "tesseract");
}

#[tokio::test]
async fn oversized_upload_is_rejected_with_413() {
    let scan = vec![7_u8; keel_ocr::MAX_UPLOAD_BYTES + 1];
    let (status, body) = send(app(settings(true, "tesseract")), multipart("file", &scan)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error_type"], "payload_too_large");
    assert_eq!(
        body["detail"],
        format!("Request body exceeds the {} byte limit", keel_ocr::MAX_UPLOAD_BYTES)
    );
}

#[tokio::test]
async fn guard_rejects_requests_when_flag_is_off() {
    let request = Request::get("/ocr/status").body(Body::empty()).unwrap();
    let (status, body) = send(app(settings(false, "tesseract")), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Feature 'ENABLE_OCR' is not enabled");
    assert_eq!(body["error_type"], "feature_disabled");

    let (status, body) = send(app(settings(false, "tesseract")), multipart("file", b"x")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "feature_disabled");
}

#[test]
fn unknown_provider_fails_init() {
    let err = keel_ocr::init(&settings(true, "abbyy")).unwrap_err();
    assert!(matches!(err, keel_ocr::OcrError::UnknownProvider { .. }));
}

#[test]
fn cloud_provider_without_key_still_initializes() {
    let slice = keel_ocr::init(&settings(true, "aws_textract")).unwrap();
    let ocr = slice.downcast_ref::<keel_ocr::Ocr>().unwrap();
    assert_eq!(ocr.provider, keel_ocr::OcrProvider::AwsTextract);
    assert_eq!(slice.name(), "ocr");
}
