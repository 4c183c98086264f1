use axum::routing::get;
use axum::{Json, Router};
use keel::kernel::server::{ApiState, cors_layer, not_found_fallback};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

const DOCS_PATH: &str = "/docs";
const OPENAPI_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let settings = state.settings.clone();

    let mut api = ApiDoc::openapi();
    api.info.title.clone_from(&settings.app_name);
    api.info.version.clone_from(&settings.app_version);

    let prefix = normalize_prefix(&settings.api_v1_prefix);
    let features = keel::api_router(&settings);
    let openapi = OpenApiRouter::with_openapi(api);
    let openapi = if prefix.is_empty() { openapi.merge(features) } else { openapi.nest(&prefix, features) };

    // Separate the OpenAPI routes and the API documentation object
    let (api_routes, api_doc) = openapi.split_for_parts();

    let mut router = Router::new().merge(api_routes);
    if settings.is_production() {
        tracing::info!("API docs disabled in production");
    } else {
        let document = Arc::new(api_doc.clone());
        router = router
            .merge(Scalar::with_url(DOCS_PATH, api_doc))
            .route(
                OPENAPI_PATH,
                get(move || {
                    let document = Arc::clone(&document);
                    async move { Json(document.as_ref().clone()) }
                }),
            );
    }

    router
        .fallback(not_found_fallback)
        .layer(cors_layer(&settings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `api/v1/` and `/api/v1` both become `/api/v1`; `/` and blank mean "no prefix".
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") }
}

#[cfg(test)]
mod tests {
    use super::normalize_prefix;

    #[test]
    fn prefixes_are_normalized() {
        assert_eq!(normalize_prefix("/api/v1"), "/api/v1");
        assert_eq!(normalize_prefix("api/v1/"), "/api/v1");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("  "), "");
    }
}
