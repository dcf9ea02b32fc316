//! Router construction.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::storage::SubmissionRepository;

use super::handlers::{create_submission_handler, health_handler, submission_usage_handler};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ApiState {
    pub repository: SubmissionRepository,
}

/// Build the API router over the given repository
pub fn build_router(repository: SubmissionRepository) -> Router {
    let state = ApiState { repository };

    Router::new()
        .route(
            "/api/v1/submissions",
            post(create_submission_handler).get(submission_usage_handler),
        )
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
