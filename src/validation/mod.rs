//! # Validation Module
//!
//! Declarative field-validation pipeline for submission payloads. The
//! pipeline is an ordered list of [`FieldRule`]s evaluated short-circuit
//! against the raw JSON object: the first failing rule terminates the run and
//! its [`Rejection`] is surfaced to the caller. Rules are pure and
//! independent; order only decides which single failure a client sees first.
//!
//! Key design principles:
//! - Presence and type checks precede per-field content checks
//! - Length checks operate on trimmed values, counted in characters
//! - The author-name format is three independently evaluable predicates
//!   (capitalization, character set, minimum letter count), all of which are
//!   reported when they fail

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

pub mod pipeline;
pub mod rules;

pub use pipeline::{submission_pipeline, ValidationPipeline};
pub use rules::{FieldRule, FieldType};

lazy_static! {
    /// Author names must open with an uppercase letter, accented Latin
    /// capitals included.
    static ref CAPITAL_START_REGEX: Regex = Regex::new(r"^[A-ZÁÉÍÓÚÑÜ]").unwrap();

    /// Allowed author-name alphabet: Latin letters (accented included),
    /// spaces, hyphens, apostrophes, and dots.
    static ref ALLOWED_CHARACTERS_REGEX: Regex =
        Regex::new(r"^[A-Za-zÁÉÍÓÚÑÜáéíóúñü'\-. ]+$").unwrap();

    /// A single Latin letter, case-insensitive, for counting alphabetic
    /// characters with punctuation and spaces stripped.
    static ref LETTER_REGEX: Regex = Regex::new(r"(?i)[a-záéíóúñü]").unwrap();
}

/// Submission field names
pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_AUTHOR: &str = "author";

/// Length limits, in characters, applied to trimmed values
pub const TITLE_MIN_LENGTH: usize = 5;
pub const TITLE_MAX_LENGTH: usize = 100;
pub const DESCRIPTION_MIN_LENGTH: usize = 5;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

/// Minimum alphabetic characters an author name must contain
pub const AUTHOR_MIN_LETTERS: usize = 2;

/// Reason codes for every client-visible failure the service can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonCode {
    MissingField,
    InvalidType,
    TooShort,
    TooLong,
    EmptyValue,
    InvalidFormat,
    MalformedInput,
    StorageError,
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReasonCode::MissingField => write!(f, "missing_field"),
            ReasonCode::InvalidType => write!(f, "invalid_type"),
            ReasonCode::TooShort => write!(f, "too_short"),
            ReasonCode::TooLong => write!(f, "too_long"),
            ReasonCode::EmptyValue => write!(f, "empty_value"),
            ReasonCode::InvalidFormat => write!(f, "invalid_format"),
            ReasonCode::MalformedInput => write!(f, "malformed_input"),
            ReasonCode::StorageError => write!(f, "storage_error"),
        }
    }
}

/// Structured validation failure surfaced to the client
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub reason: ReasonCode,
    pub field: Option<String>,
    pub message: String,
    /// Reason-specific context: missing field lists, current/limit lengths,
    /// the provided value, failing format predicates.
    pub details: Value,
}

impl Rejection {
    pub fn new<M: Into<String>>(reason: ReasonCode, message: M, details: Value) -> Self {
        Self { reason, field: None, message: message.into(), details }
    }

    pub fn for_field<F: Into<String>, M: Into<String>>(
        reason: ReasonCode,
        field: F,
        message: M,
        details: Value,
    ) -> Self {
        Self { reason, field: Some(field.into()), message: message.into(), details }
    }
}

/// Outcome of one pipeline run. Never both accepted and rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(Rejection),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }

    /// Extract the rejection, if any
    pub fn rejection(self) -> Option<Rejection> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::Rejected(rejection) => Some(rejection),
        }
    }
}

/// Check that an author name opens with an uppercase letter
pub fn starts_with_capital(name: &str) -> bool {
    CAPITAL_START_REGEX.is_match(name)
}

/// Check that an author name uses only the allowed alphabet
pub fn uses_allowed_characters(name: &str) -> bool {
    ALLOWED_CHARACTERS_REGEX.is_match(name)
}

/// Count the alphabetic characters in a name, punctuation and spaces stripped
pub fn letter_count(name: &str) -> usize {
    LETTER_REGEX.find_iter(name).count()
}

/// Check that an author name keeps at least [`AUTHOR_MIN_LETTERS`] letters
pub fn has_minimum_letters(name: &str) -> bool {
    letter_count(name) >= AUTHOR_MIN_LETTERS
}

/// Evaluate the three author-name predicates, returning a message for each
/// failing one. An empty result means the name is well formed.
pub fn author_format_issues(name: &str) -> Vec<String> {
    let mut issues = Vec::new();

    if !starts_with_capital(name) {
        issues.push("must start with a capital letter".to_string());
    }
    if !uses_allowed_characters(name) {
        issues.push(
            "contains characters outside letters, spaces, hyphens, apostrophes, and dots"
                .to_string(),
        );
    }
    if !has_minimum_letters(name) {
        issues.push(format!("must contain at least {} letters", AUTHOR_MIN_LETTERS));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capital_start() {
        assert!(starts_with_capital("Juan"));
        assert!(starts_with_capital("Ñoño"));
        assert!(starts_with_capital("Álvaro"));
        assert!(!starts_with_capital("juan"));
        assert!(!starts_with_capital("ñoño"));
        assert!(!starts_with_capital("1Juan"));
        assert!(!starts_with_capital(""));
    }

    #[test]
    fn test_allowed_characters() {
        assert!(uses_allowed_characters("Ana-María López"));
        assert!(uses_allowed_characters("O'Brien"));
        assert!(uses_allowed_characters("J. R. R. Tolkien"));
        assert!(uses_allowed_characters("Ñoño"));
        assert!(!uses_allowed_characters("A1"));
        assert!(!uses_allowed_characters("Juan_Pérez"));
        assert!(!uses_allowed_characters(""));
    }

    #[test]
    fn test_letter_count() {
        assert_eq!(letter_count("Ana"), 3);
        assert_eq!(letter_count("A. B."), 2);
        assert_eq!(letter_count("A1"), 1);
        assert_eq!(letter_count("Ñoño"), 4);
        assert_eq!(letter_count("-- ''"), 0);
    }

    #[test]
    fn test_author_format_issues() {
        assert!(author_format_issues("Ana-María López").is_empty());
        assert!(author_format_issues("Ñoño").is_empty());

        // Lowercase start fails exactly one predicate
        assert_eq!(author_format_issues("ana").len(), 1);

        // Digit breaks the alphabet and the letter count together
        assert_eq!(author_format_issues("A1").len(), 2);
    }

    #[test]
    fn test_reason_code_display() {
        assert_eq!(ReasonCode::MissingField.to_string(), "missing_field");
        assert_eq!(ReasonCode::InvalidType.to_string(), "invalid_type");
        assert_eq!(ReasonCode::TooShort.to_string(), "too_short");
        assert_eq!(ReasonCode::TooLong.to_string(), "too_long");
        assert_eq!(ReasonCode::EmptyValue.to_string(), "empty_value");
        assert_eq!(ReasonCode::InvalidFormat.to_string(), "invalid_format");
        assert_eq!(ReasonCode::MalformedInput.to_string(), "malformed_input");
        assert_eq!(ReasonCode::StorageError.to_string(), "storage_error");
    }
}
