//! # Validation Pipeline
//!
//! Ordered, short-circuiting evaluation of [`FieldRule`]s. The canonical
//! submission pipeline fixes the client-facing error precedence: presence,
//! then types, then title length, then description length, then author
//! format.

use lazy_static::lazy_static;
use serde_json::{Map, Value};

use crate::domain::SubmissionRecord;

use super::{
    rules::{FieldRule, FieldType},
    Rejection, ValidationOutcome, DESCRIPTION_MAX_LENGTH, DESCRIPTION_MIN_LENGTH, FIELD_AUTHOR,
    FIELD_DESCRIPTION, FIELD_TITLE, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH,
};

lazy_static! {
    static ref SUBMISSION_PIPELINE: ValidationPipeline = ValidationPipeline::new(vec![
        FieldRule::Presence { fields: vec![FIELD_TITLE, FIELD_DESCRIPTION, FIELD_AUTHOR] },
        FieldRule::TypeCheck {
            fields: vec![
                (FIELD_TITLE, FieldType::String),
                (FIELD_DESCRIPTION, FieldType::String),
                (FIELD_AUTHOR, FieldType::String),
            ],
        },
        FieldRule::LengthRange { field: FIELD_TITLE, min: TITLE_MIN_LENGTH, max: TITLE_MAX_LENGTH },
        FieldRule::LengthRange {
            field: FIELD_DESCRIPTION,
            min: DESCRIPTION_MIN_LENGTH,
            max: DESCRIPTION_MAX_LENGTH,
        },
        FieldRule::PatternMatch { field: FIELD_AUTHOR },
    ]);
}

/// The canonical pipeline for submission payloads, built once at process
/// start and shared read-only across requests.
pub fn submission_pipeline() -> &'static ValidationPipeline {
    &SUBMISSION_PIPELINE
}

/// Ordered sequence of field rules evaluated first-failure-wins
#[derive(Debug, Clone)]
pub struct ValidationPipeline {
    rules: Vec<FieldRule>,
}

impl ValidationPipeline {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Run every rule in declared order against the payload. The first
    /// failing rule terminates the run; later rules are never evaluated.
    pub fn validate(&self, record: &Map<String, Value>) -> ValidationOutcome {
        for rule in &self.rules {
            if let ValidationOutcome::Rejected(rejection) = rule.evaluate(record) {
                return ValidationOutcome::Rejected(rejection);
            }
        }
        ValidationOutcome::Accepted
    }

    /// Validate a payload and, on acceptance, build the trimmed canonical
    /// record. A [`SubmissionRecord`] only ever exists after every rule has
    /// passed.
    pub fn accept(&self, record: &Map<String, Value>) -> Result<SubmissionRecord, Rejection> {
        match self.validate(record) {
            ValidationOutcome::Accepted => Ok(SubmissionRecord::trimmed(
                record.get(FIELD_TITLE).and_then(Value::as_str).unwrap_or_default(),
                record.get(FIELD_DESCRIPTION).and_then(Value::as_str).unwrap_or_default(),
                record.get(FIELD_AUTHOR).and_then(Value::as_str).unwrap_or_default(),
            )),
            ValidationOutcome::Rejected(rejection) => Err(rejection),
        }
    }
}
