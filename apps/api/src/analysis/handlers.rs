//! Axum route handler for the analysis API.

use axum::{
    extract::{rejection::BytesRejection, State},
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::analysis::normalize::normalize_completion;
use crate::analysis::prompts::{compose_prompt, ANALYSIS_PROMPT_VERSION};
use crate::analysis::validation::{body_limit, unreadable_body, validate_request};
use crate::errors::AppError;
use crate::llm_client::{CompletionService, LlmError};
use crate::state::AppState;

/// ANY /api/analyze
///
/// Only POST is accepted; other verbs get a JSON 405 from the validator.
/// The body is read as raw bytes so malformed JSON maps to our own 400, and a
/// body over the route's limit still gets the method check and a JSON error.
pub async fn handle_analyze(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("analysis", %request_id);

    async move {
        let body = match body {
            Ok(body) => body,
            Err(rejection) => {
                return unreadable_body(
                    &method,
                    rejection.status(),
                    rejection.body_text(),
                    body_limit(state.config.max_resume_chars),
                )
                .into_response();
            }
        };

        match analyze(
            state.completion.as_deref(),
            &method,
            &body,
            state.config.max_resume_chars,
        )
        .await
        {
            Ok(result) => Json(result).into_response(),
            Err(err) => err.into_response(),
        }
    }
    .instrument(span)
    .await
}

/// Full pipeline: validate → credential check → compose → complete → normalize.
///
/// `completion` is `None` when no API key was configured at startup.
pub async fn analyze(
    completion: Option<&dyn CompletionService>,
    method: &Method,
    body: &[u8],
    max_resume_chars: usize,
) -> Result<AnalysisResult, AppError> {
    let request = validate_request(method, body, max_resume_chars)?;
    let completion = completion.ok_or(AppError::MissingConfiguration)?;

    let prompt = compose_prompt(&request);
    info!(
        resume_bytes = request.resume_text.len(),
        prompt_version = ANALYSIS_PROMPT_VERSION,
        "Requesting resume analysis"
    );

    let raw = completion
        .complete(prompt.system_instruction, &prompt.user_message)
        .await
        .map_err(upstream_error)?;

    let result = normalize_completion(&raw)?;
    info!(
        work_history = result.work_history.len(),
        titles = result.suggested_titles.len(),
        companies = result.suggested_companies.len(),
        "Resume analysis complete"
    );

    Ok(result)
}

fn upstream_error(err: LlmError) -> AppError {
    match err {
        LlmError::Http(e) => AppError::Transport(e.to_string()),
        other => AppError::Upstream(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Returns a canned reply and records what it was asked.
    struct FakeCompletion {
        reply: Result<String, (u16, String)>,
        calls: AtomicUsize,
        last_user: Mutex<Option<String>>,
    }

    impl FakeCompletion {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_user: Mutex::new(None),
            }
        }

        fn api_error(status: u16, message: &str) -> Self {
            Self {
                reply: Err((status, message.to_string())),
                calls: AtomicUsize::new(0),
                last_user: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionService for FakeCompletion {
        async fn complete(&self, _system: &str, user: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_user.lock().unwrap() = Some(user.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err((status, message)) => Err(LlmError::Api {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    const LIMIT: usize = 50_000;

    fn valid_output() -> serde_json::Value {
        json!({
            "workHistory": [
                { "company": "Acme", "title": "Engineer", "summary": "You built billing." }
            ],
            "suggestedTitles": ["Backend Engineer", "Platform Engineer"],
            "suggestedCompanies": [{
                "name": "Globex",
                "url": "https://globex.example/careers",
                "reason": "Similar payments scale.",
                "basedOn": "Acme"
            }]
        })
    }

    fn resume_body() -> Vec<u8> {
        serde_json::to_vec(&json!({ "resume": "A".repeat(60) })).unwrap()
    }

    #[tokio::test]
    async fn test_successful_analysis_round_trips() {
        let fake = FakeCompletion::ok(&valid_output().to_string());
        let result = analyze(Some(&fake), &Method::POST, &resume_body(), LIMIT)
            .await
            .unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), valid_output());
        assert_eq!(fake.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_user_message_carries_resume() {
        let fake = FakeCompletion::ok(&valid_output().to_string());
        analyze(Some(&fake), &Method::POST, &resume_body(), LIMIT)
            .await
            .unwrap();
        let sent = fake.last_user.lock().unwrap().clone().unwrap();
        assert!(sent.ends_with(&"A".repeat(60)));
        assert!(sent.starts_with("Here is the resume to analyze:"));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_completion() {
        let fake = FakeCompletion::ok("{}");
        let short = serde_json::to_vec(&json!({ "resume": "short" })).unwrap();

        assert!(matches!(
            analyze(Some(&fake), &Method::GET, &resume_body(), LIMIT).await,
            Err(AppError::MethodNotAllowed)
        ));
        assert!(matches!(
            analyze(Some(&fake), &Method::POST, b"{oops", LIMIT).await,
            Err(AppError::InvalidBody(_))
        ));
        assert!(matches!(
            analyze(Some(&fake), &Method::POST, &short, LIMIT).await,
            Err(AppError::MissingOrShortInput)
        ));
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_key_checked_after_validation() {
        let short = serde_json::to_vec(&json!({ "resume": "short" })).unwrap();
        assert!(matches!(
            analyze(None, &Method::POST, &short, LIMIT).await,
            Err(AppError::MissingOrShortInput)
        ));
        assert!(matches!(
            analyze(None, &Method::POST, &resume_body(), LIMIT).await,
            Err(AppError::MissingConfiguration)
        ));
    }

    #[tokio::test]
    async fn test_upstream_error_maps_to_upstream_failure() {
        let fake = FakeCompletion::api_error(401, "Incorrect API key provided: sk-abc");
        let err = analyze(Some(&fake), &Method::POST, &resume_body(), LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(ref detail) if detail.contains("401")));
        assert_eq!(err.public_message(), "Failed to analyze resume");
    }

    #[tokio::test]
    async fn test_fenced_output_is_accepted() {
        let fenced = format!("```json\n{}\n```", valid_output());
        let fake = FakeCompletion::ok(&fenced);
        let result = analyze(Some(&fake), &Method::POST, &resume_body(), LIMIT)
            .await
            .unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), valid_output());
    }

    #[tokio::test]
    async fn test_unparseable_output_maps_to_parse_failure() {
        let fake = FakeCompletion::ok("I could not find any work history.");
        let err = analyze(Some(&fake), &Method::POST, &resume_body(), LIMIT)
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), "Failed to parse analysis results");
    }
}
