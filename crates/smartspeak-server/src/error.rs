use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use smartspeak::errors::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Everything the chat endpoint can surface to a caller. Each variant maps
/// to one row of the response contract; bodies never leak configuration
/// detail such as API key env var names.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("provider API key not configured")]
    Configuration,

    /// Upstream non-2xx; the status is passed through to the caller.
    #[error("upstream error {status}")]
    Upstream {
        status: u16,
        message: &'static str,
        details: Option<String>,
    },

    #[error("no reply text in upstream response")]
    NoReply,

    #[error("unexpected error: {0}")]
    Internal(String),
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey { .. } => ApiError::Configuration,
            ProviderError::Upstream { status, message } => {
                let user_message = match status {
                    429 => "Too many requests. Please wait a moment and try again.",
                    401 => "Authentication error. Please contact support.",
                    _ => "AI service temporarily unavailable",
                };
                ApiError::Upstream {
                    status,
                    message: user_message,
                    details: Some(message),
                }
            }
            ProviderError::NoReply => ApiError::NoReply,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({
                    "error": "Method not allowed",
                    "allowed": ["POST"]
                })),
            )
                .into_response(),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::Configuration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "API configuration error. Please contact support."
                })),
            )
                .into_response(),
            ApiError::Upstream {
                status,
                message,
                details,
            } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let mut body = json!({ "error": message });
                if let Some(details) = details {
                    body["details"] = json!(details);
                }
                (status, Json(body)).into_response()
            }
            ApiError::NoReply => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to generate response. Please try again."
                })),
            )
                .into_response(),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "An unexpected error occurred. Please try again.",
                    "timestamp": Utc::now().to_rfc3339()
                })),
            )
                .into_response(),
        }
    }
}
