use keel_domain::config::SettingsInner;
use keel_domain::features::FeatureSet;
use keel_kernel::server::{ApiState, system_router};
use utoipa_axum::router::OpenApiRouter;

/// Routes served under the API prefix.
///
/// Health and items are always present; optional routers are mounted only when their
/// flag is on, so disabled paths fall through to the not-found fallback.
pub fn api_router(settings: &SettingsInner) -> OpenApiRouter<ApiState> {
    let mut router = system_router::<ApiState>().merge(keel_items::router());

    if settings.is_enabled(FeatureSet::OCR) {
        router = router.merge(keel_ocr::router());
    }

    router
}
