//! Response normalization: turns raw model text into a checked `AnalysisResult`.
//!
//! The only cleanup performed is removing a surrounding markdown code fence and
//! whitespace. Anything that still fails to deserialize is rejected.

use crate::analysis::models::AnalysisResult;
use crate::errors::AppError;

/// Parses raw completion text into an `AnalysisResult`.
pub fn normalize_completion(raw: &str) -> Result<AnalysisResult, AppError> {
    let cleaned = strip_json_fences(raw);
    serde_json::from_str(cleaned).map_err(|e| AppError::ResponseParse {
        reason: e.to_string(),
        raw: raw.to_string(),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
///
/// The opening and closing fences are removed independently, so a reply with
/// only one of them is still cleaned. Idempotent.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let text = match text.strip_prefix("```") {
        // Skip an info string such as `json` or `JSON` on the opening line.
        Some(after_open) => after_open
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
            .trim(),
        None => text,
    };

    text.strip_suffix("```").map(str::trim).unwrap_or(text)
}
