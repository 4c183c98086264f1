use axum::extract::State;
use axum::http::header;
use axum::{Json, response::IntoResponse};
use keel_derive::{api_handler, api_model};
use keel_domain::config::Settings;
use keel_domain::constants::SYSTEM_TAG;
use std::sync::LazyLock;
use std::time::Instant;

#[api_model(rename_all = "snake_case")]
/// Health check response
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,
    /// Application version
    pub version: String,
    /// Deployment environment
    pub environment: String,
    /// Uptime in seconds
    pub uptime: u64,
}

pub(super) static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Healthcheck endpoint", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(settings): State<Settings>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "ok".to_owned(),
        version: settings.app_version.clone(),
        environment: settings.environment.to_string(),
        uptime: START_TIME.elapsed().as_secs(),
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
