mod common;

use axum::http::StatusCode;
use common::{app, get_json};
use keel::domain::config::SettingsInner;

#[tokio::test]
async fn ocr_routes_are_absent_when_disabled() {
    let app = app(SettingsInner::default()).await;

    let (status, body) = get_json(&app, "/api/v1/ocr/status").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn ocr_routes_are_mounted_when_enabled() {
    let app = app(SettingsInner {
        enable_ocr: true,
        ocr_provider: "aws_textract".to_owned(),
        ..SettingsInner::default()
    })
    .await;

    let (status, body) = get_json(&app, "/api/v1/ocr/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "aws_textract");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn disabled_services_are_not_registered() {
    let server = keel_server::Server::builder().build().await.unwrap();
    assert_eq!(server.state().slice_names(), ["items"]);
}

#[tokio::test]
async fn enabled_storage_is_registered() {
    let dir = tempfile::tempdir().unwrap();
    let settings = SettingsInner {
        enable_storage: true,
        storage_path: dir.path().to_path_buf(),
        ..SettingsInner::default()
    };
    let server = keel_server::Server::builder()
        .settings(keel::domain::config::Settings::new(settings))
        .build()
        .await
        .unwrap();
    assert_eq!(server.state().slice_names(), ["file_storage", "items"]);
}
