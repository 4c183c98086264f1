use super::state::ApiStateError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use keel_derive::api_model;
use std::borrow::Cow;
use tracing::error;

/// Request-level failure rendered as the JSON error envelope.
#[keel_derive::keel_error]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Feature '{feature}' is not enabled")]
    FeatureDisabled { feature: Cow<'static, str> },

    #[error("{message}")]
    BadRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Request body exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("State error{}: {source}", format_context(.context))]
    State { source: ApiStateError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ApiError {
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: message.into(), context: None }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } | Self::FeatureDisabled { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::State { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::FeatureDisabled { .. } => "feature_disabled",
            Self::BadRequest { .. } => "bad_request",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::State { .. } | Self::Internal { .. } => "internal_error",
        }
    }
}

/// JSON error envelope.
#[api_model(rename_all = "snake_case")]
pub struct ErrorBody {
    /// Human-readable reason
    pub detail: String,
    /// Stable machine-readable category
    pub error_type: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };

        let body = ErrorBody { detail, error_type: self.error_type().to_owned() };
        (status, Json(body)).into_response()
    }
}

/// Fallback for unmatched routes, including those of disabled features.
pub async fn not_found_fallback() -> ApiError {
    ApiError::not_found("Not Found")
}
