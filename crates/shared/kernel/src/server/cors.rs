use axum::http::{HeaderName, HeaderValue, Method};
use keel_domain::config::SettingsInner;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tracing::warn;

const WILDCARD: &str = "*";

/// Builds the CORS policy from the `CORS_*` settings.
///
/// A `*` entry allows everything. Combined with credentials, wildcard entries mirror the
/// request instead, since browsers reject `*` on credentialed responses. An empty origin
/// list allows any origin outside production and none in production.
#[must_use]
pub fn cors_layer(settings: &SettingsInner) -> CorsLayer {
    let credentials = settings.cors_allow_credentials;

    CorsLayer::new()
        .allow_origin(origins(settings, credentials))
        .allow_methods(methods(&settings.cors_allow_methods, credentials))
        .allow_headers(headers(&settings.cors_allow_headers, credentials))
        .allow_credentials(credentials)
}

fn origins(settings: &SettingsInner, credentials: bool) -> AllowOrigin {
    let list = &settings.cors_origins;
    let any = list.iter().any(|o| o == WILDCARD) || (list.is_empty() && !settings.is_production());
    if any {
        return if credentials { AllowOrigin::mirror_request() } else { Any.into() };
    }

    let parsed = list.iter().filter_map(|origin| {
        HeaderValue::from_str(origin.trim_end_matches('/'))
            .inspect_err(|_| warn!(origin = %origin, "Ignoring invalid CORS origin"))
            .ok()
    });
    AllowOrigin::list(parsed)
}

fn methods(list: &[String], credentials: bool) -> AllowMethods {
    if list.iter().any(|m| m == WILDCARD) {
        return if credentials { AllowMethods::mirror_request() } else { Any.into() };
    }

    let parsed = list.iter().filter_map(|method| {
        Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .inspect_err(|_| warn!(method = %method, "Ignoring invalid CORS method"))
            .ok()
    });
    AllowMethods::list(parsed)
}

fn headers(list: &[String], credentials: bool) -> AllowHeaders {
    if list.iter().any(|h| h == WILDCARD) {
        return if credentials { AllowHeaders::mirror_request() } else { Any.into() };
    }

    let parsed = list.iter().filter_map(|header| {
        HeaderName::from_bytes(header.as_bytes())
            .inspect_err(|_| warn!(header = %header, "Ignoring invalid CORS header"))
            .ok()
    });
    AllowHeaders::list(parsed)
}
