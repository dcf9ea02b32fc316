//! API error mapping.
//!
//! Converts pipeline rejections and infrastructure failures into the error
//! envelope. Validation failures carry their full structured context;
//! storage and unexpected failures surface a generic message only, with the
//! detail retained in server-side logs.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::Error;
use crate::validation::{ReasonCode, Rejection};

use super::envelope::ErrorEnvelope;

#[derive(Debug)]
pub enum ApiError {
    /// Pipeline rejection with full structured context
    Validation(Rejection),
    /// Unparseable or non-object request body
    MalformedInput(String),
    /// Storage failure, surfaced generically
    Storage,
    /// Any other unexpected failure
    Internal,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        let envelope = match self {
            ApiError::Validation(rejection) => {
                let mut details = json!({ "reason": rejection.reason.to_string() });
                if let Some(field) = &rejection.field {
                    details["field"] = json!(field);
                }
                if let (Some(target), Some(extra)) =
                    (details.as_object_mut(), rejection.details.as_object())
                {
                    for (key, value) in extra {
                        target.insert(key.clone(), value.clone());
                    }
                }
                ErrorEnvelope::new("validation_error", rejection.message, details)
            }
            ApiError::MalformedInput(message) => ErrorEnvelope::new(
                "validation_error",
                message,
                json!({ "reason": ReasonCode::MalformedInput.to_string() }),
            ),
            ApiError::Storage => ErrorEnvelope::new(
                "error",
                "Internal server error",
                json!({ "reason": ReasonCode::StorageError.to_string() }),
            ),
            ApiError::Internal => ErrorEnvelope::new(
                "error",
                "Internal server error",
                json!({ "reason": "internal_error" }),
            ),
        };

        (status, Json(envelope)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Database { .. } => ApiError::Storage,
            // Infrastructure-level validation (config, table names) reaching
            // a request path is a server bug, not client input
            _ => ApiError::Internal,
        }
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        ApiError::Validation(rejection)
    }
}
