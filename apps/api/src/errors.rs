use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The `Display` text is for logs only. Callers see the fixed message from
/// [`AppError::public_message`], so 500-class bodies never carry upstream detail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Resume text missing or shorter than the minimum length")]
    MissingOrShortInput,

    #[error("Resume text is {length} characters, limit is {limit}")]
    ResumeTooLong { length: usize, limit: usize },

    #[error("Request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("OPENAI_API_KEY is not configured")]
    MissingConfiguration,

    #[error("Completion service error: {0}")]
    Upstream(String),

    #[error("Completion transport error: {0}")]
    Transport(String),

    #[error("Could not parse model output: {reason}")]
    ResponseParse { reason: String, raw: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidBody(_) | AppError::MissingOrShortInput => StatusCode::BAD_REQUEST,
            AppError::ResumeTooLong { .. } | AppError::BodyTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            AppError::MissingConfiguration
            | AppError::Upstream(_)
            | AppError::Transport(_)
            | AppError::ResponseParse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message placed in the `error` field of the response body.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "Method not allowed",
            AppError::InvalidBody(_) => "Invalid request body",
            AppError::MissingOrShortInput => "Resume text is required",
            AppError::ResumeTooLong { .. } | AppError::BodyTooLarge { .. } => {
                "Resume text is too long"
            }
            AppError::MissingConfiguration => "API key not configured",
            AppError::Upstream(_) | AppError::Transport(_) => "Failed to analyze resume",
            AppError::ResponseParse { .. } => "Failed to parse analysis results",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidBody(detail) => {
                tracing::debug!("Rejected request body: {detail}");
            }
            AppError::MissingConfiguration => {
                tracing::error!("Analysis requested but OPENAI_API_KEY is not set");
            }
            AppError::Upstream(detail) => {
                tracing::error!("Completion service error: {detail}");
            }
            AppError::Transport(detail) => {
                tracing::error!("Error calling completion service: {detail}");
            }
            AppError::ResponseParse { reason, raw } => {
                tracing::error!("Failed to parse model response ({reason}): {raw}");
            }
            AppError::MethodNotAllowed
            | AppError::MissingOrShortInput
            | AppError::ResumeTooLong { .. }
            | AppError::BodyTooLarge { .. } => {}
        }

        let body = Json(json!({ "error": self.public_message() }));

        (self.status(), body).into_response()
    }
}
