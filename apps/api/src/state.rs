use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. `None` when OPENAI_API_KEY is unset;
    /// analysis requests then fail with "API key not configured".
    pub completion: Option<Arc<dyn CompletionService>>,
    pub config: Config,
}
