//! Response envelopes shared by every endpoint.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// Success envelope: `{ status, message, data, timestamp }`
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub data: T,
    pub timestamp: String,
}

impl<T: Serialize> SuccessEnvelope<T> {
    pub fn new<M: Into<String>>(message: M, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error envelope: `{ status, message, details, timestamp }`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub message: String,
    pub details: Value,
    pub timestamp: String,
}

impl ErrorEnvelope {
    pub fn new<M: Into<String>>(status: &'static str, message: M, details: Value) -> Self {
        Self { status, message: message.into(), details, timestamp: Utc::now().to_rfc3339() }
    }
}

/// Echoed fields of a stored submission
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = SuccessEnvelope::new("saved", json!({ "id": 1 }));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["message"], "saved");
        assert_eq!(value["data"]["id"], 1);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope =
            ErrorEnvelope::new("validation_error", "bad input", json!({ "reason": "too_short" }));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["status"], "validation_error");
        assert_eq!(value["details"]["reason"], "too_short");
    }
}
