pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};

use crate::analysis::handlers;
use crate::analysis::validation::body_limit;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let analyze_body_limit = body_limit(state.config.max_resume_chars);

    Router::new()
        .route("/health", get(health::health_handler))
        // Method filtering happens in the handler so non-POST gets a JSON 405.
        .route(
            "/api/analyze",
            any(handlers::handle_analyze).layer(DefaultBodyLimit::max(analyze_body_limit)),
        )
        .with_state(state)
}
