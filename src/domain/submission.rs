//! Submission record types.
//!
//! A [`SubmissionRecord`] is the canonical, trimmed shape of validated input.
//! It is only constructed after every pipeline rule has passed, consumed by a
//! single store call, and then discarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Validated, trimmed submission ready for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub title: String,
    pub description: String,
    pub author: String,
}

impl SubmissionRecord {
    /// Build a record from raw field values, trimming each one. Restricted to
    /// the crate so records cannot appear without passing the pipeline.
    pub(crate) fn trimmed(title: &str, description: &str, author: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            author: author.trim().to_string(),
        }
    }
}

/// Persisted submission row: record fields plus the store-assigned identifier
/// and insertion timestamp. Owned by the store, never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredSubmission {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}
