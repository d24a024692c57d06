//! Resume analysis: the single endpoint this service exposes.
//!
//! Pipeline per request: validate → compose prompt → complete → normalize.
//! All completion calls go through `llm_client::CompletionService`.

pub mod handlers;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod validation;
