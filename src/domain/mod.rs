//! # Domain Types
//!
//! Canonical shapes for validated submissions and persisted rows.

pub mod submission;

pub use submission::{StoredSubmission, SubmissionRecord};
