//! Input validation for `/api/analyze`. Runs before any network cost is incurred.

use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::analysis::models::AnalysisRequest;
use crate::errors::AppError;

/// Resumes shorter than this are rejected as missing.
pub const MIN_RESUME_LENGTH: usize = 50;

/// Room for the JSON object around `resume` and any other fields the client sends.
pub const BODY_OVERHEAD: usize = 16 * 1024;

/// Largest request body accepted for a given resume limit.
///
/// Sized for the worst case where every UTF-16 unit arrives escaped as `\uXXXX`.
pub fn body_limit(max_length: usize) -> usize {
    max_length.saturating_mul(6).saturating_add(BODY_OVERHEAD)
}

/// Validates the raw inbound request and extracts the resume text.
///
/// Checks, in order:
/// 1. method is POST
/// 2. body parses as JSON (and is not the literal `null`)
/// 3. `resume` is a string of at least [`MIN_RESUME_LENGTH`]
/// 4. `resume` does not exceed `max_length`
///
/// Lengths are counted in UTF-16 code units, the unit browser clients measure in.
pub fn validate_request(
    method: &Method,
    body: &[u8],
    max_length: usize,
) -> Result<AnalysisRequest, AppError> {
    if *method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let payload: Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))?;
    if payload.is_null() {
        return Err(AppError::InvalidBody("body is JSON null".to_string()));
    }

    let resume = payload
        .get("resume")
        .and_then(Value::as_str)
        .ok_or(AppError::MissingOrShortInput)?;

    let length = text_length(resume);
    if length < MIN_RESUME_LENGTH {
        return Err(AppError::MissingOrShortInput);
    }
    if length > max_length {
        return Err(AppError::ResumeTooLong {
            length,
            limit: max_length,
        });
    }

    Ok(AnalysisRequest {
        resume_text: resume.to_string(),
    })
}

/// Classifies a body that could not be buffered. The method check still runs first.
pub fn unreadable_body(
    method: &Method,
    status: StatusCode,
    detail: String,
    limit: usize,
) -> AppError {
    if *method != Method::POST {
        return AppError::MethodNotAllowed;
    }
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::BodyTooLarge { limit };
    }
    AppError::InvalidBody(detail)
}

fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}
