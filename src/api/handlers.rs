//! Request handlers.
//!
//! Orchestration is deliberately thin: parse body, run the validation
//! pipeline, persist on acceptance, map every outcome to an envelope. No
//! failure propagates past the handler boundary.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::validation::submission_pipeline;

use super::envelope::{SubmissionResponse, SuccessEnvelope};
use super::error::ApiError;
use super::routes::ApiState;

/// Accept one submission: validate, persist, echo the stored record
pub async fn create_submission_handler(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SuccessEnvelope<SubmissionResponse>>), ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected unparseable request body");
        ApiError::MalformedInput("Request body must be valid JSON".to_string())
    })?;

    let record = body.as_object().ok_or_else(|| {
        warn!("Rejected non-object request body");
        ApiError::MalformedInput("Request body must be a JSON object".to_string())
    })?;

    let submission = submission_pipeline().accept(record).map_err(|rejection| {
        info!(
            reason = %rejection.reason,
            field = rejection.field.as_deref().unwrap_or("-"),
            "Submission rejected by validation pipeline"
        );
        ApiError::from(rejection)
    })?;

    let repository = &state.repository;

    repository.ensure_schema().await.map_err(|e| {
        error!(error = %e, "Failed to ensure submission schema");
        ApiError::from(e)
    })?;

    let id = repository.insert(&submission).await.map_err(|e| {
        error!(error = %e, "Failed to store submission");
        ApiError::from(e)
    })?;

    info!(id, author = %submission.author, "Submission stored");

    let response = SubmissionResponse {
        id,
        title: submission.title,
        description: submission.description,
        author: submission.author,
    };

    Ok((
        StatusCode::CREATED,
        Json(SuccessEnvelope::new("Data validated and saved successfully", response)),
    ))
}

/// Usage hint for clients probing the endpoint with GET
pub async fn submission_usage_handler() -> Json<SuccessEnvelope<Value>> {
    Json(SuccessEnvelope::new(
        "Submit data using POST with title, description, and author fields",
        json!({
            "endpoint": "/api/v1/submissions",
            "method": "POST",
            "fields": ["title", "description", "author"],
        }),
    ))
}

/// Health probe reporting process and database status
pub async fn health_handler(State(state): State<ApiState>) -> (StatusCode, Json<Value>) {
    match crate::storage::check_connection(state.repository.pool()).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok", "database": "reachable" }))),
        Err(e) => {
            warn!(error = %e, "Health check found database unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unreachable" })),
            )
        }
    }
}
