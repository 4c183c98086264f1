use super::error::not_found_fallback;
use super::health;
use axum::extract::FromRef;
use keel_domain::config::Settings;
use std::sync::LazyLock;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes every deployment serves regardless of feature flags.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
    Settings: FromRef<S>,
{
    LazyLock::force(&health::START_TIME);
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}
