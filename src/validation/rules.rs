//! # Field Rules
//!
//! A [`FieldRule`] is one declarative check over a named field of the raw
//! payload. Evaluation is a pure function of the payload: no I/O, no shared
//! state, the same input always yields the same outcome.

use serde_json::{json, Map, Value};

use super::{
    author_format_issues, letter_count, ReasonCode, Rejection, ValidationOutcome,
    AUTHOR_MIN_LETTERS,
};

/// Declared primitive type a field must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
        }
    }
}

/// Name of the JSON type a value actually holds, for type-mismatch reports
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One declarative validation check. Immutable, defined at process start,
/// shared read-only across requests.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Fail when any of the named keys is absent or null
    Presence { fields: Vec<&'static str> },
    /// Fail when a present field holds a value of the wrong JSON type
    TypeCheck { fields: Vec<(&'static str, FieldType)> },
    /// Fail when the trimmed character count falls outside `[min, max]`;
    /// whitespace-only input surfaces the distinct `EmptyValue` reason
    LengthRange { field: &'static str, min: usize, max: usize },
    /// Fail when the trimmed value breaks any author-name format predicate
    PatternMatch { field: &'static str },
}

impl FieldRule {
    /// Evaluate this rule against a payload. Pure; never observes the result
    /// of any other rule.
    pub fn evaluate(&self, record: &Map<String, Value>) -> ValidationOutcome {
        match self {
            FieldRule::Presence { fields } => evaluate_presence(record, fields),
            FieldRule::TypeCheck { fields } => evaluate_types(record, fields),
            FieldRule::LengthRange { field, min, max } => {
                evaluate_length(record, field, *min, *max)
            }
            FieldRule::PatternMatch { field } => evaluate_pattern(record, field),
        }
    }
}

fn evaluate_presence(record: &Map<String, Value>, fields: &[&'static str]) -> ValidationOutcome {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|field| matches!(record.get(**field), None | Some(Value::Null)))
        .copied()
        .collect();

    if missing.is_empty() {
        return ValidationOutcome::Accepted;
    }

    ValidationOutcome::Rejected(Rejection::new(
        ReasonCode::MissingField,
        format!("Missing required fields: {}", missing.join(", ")),
        json!({ "missing": missing, "required": fields }),
    ))
}

fn evaluate_types(
    record: &Map<String, Value>,
    fields: &[(&'static str, FieldType)],
) -> ValidationOutcome {
    let mismatches: Vec<Value> = fields
        .iter()
        .filter_map(|(field, expected)| {
            let value = record.get(*field)?;
            if expected.matches(value) {
                None
            } else {
                Some(json!({
                    "field": field,
                    "expected": expected.name(),
                    "actual": json_type_name(value),
                }))
            }
        })
        .collect();

    if mismatches.is_empty() {
        return ValidationOutcome::Accepted;
    }

    let first_field = mismatches[0]["field"].as_str().unwrap_or_default().to_string();
    ValidationOutcome::Rejected(Rejection::for_field(
        ReasonCode::InvalidType,
        first_field,
        "All fields must hold text values",
        json!({ "mismatches": mismatches }),
    ))
}

fn evaluate_length(
    record: &Map<String, Value>,
    field: &'static str,
    min: usize,
    max: usize,
) -> ValidationOutcome {
    let raw = match record.get(field) {
        Some(Value::String(s)) => s,
        // Type ownership lives with TypeCheck; a non-string here still cannot
        // satisfy a length bound
        Some(value) => {
            return ValidationOutcome::Rejected(Rejection::for_field(
                ReasonCode::InvalidType,
                field,
                format!("Field '{}' must be a string", field),
                json!({ "expected": "string", "actual": json_type_name(value) }),
            ))
        }
        None => {
            return ValidationOutcome::Rejected(Rejection::for_field(
                ReasonCode::MissingField,
                field,
                format!("Missing required field: {}", field),
                json!({ "missing": [field] }),
            ))
        }
    };

    let trimmed = raw.trim();
    let length = trimmed.chars().count();

    if length == 0 && min > 0 && !raw.is_empty() {
        return ValidationOutcome::Rejected(Rejection::for_field(
            ReasonCode::EmptyValue,
            field,
            format!("Field '{}' cannot be empty or whitespace only", field),
            json!({ "providedValue": raw, "minimumRequired": min }),
        ));
    }

    if length < min {
        return ValidationOutcome::Rejected(Rejection::for_field(
            ReasonCode::TooShort,
            field,
            format!("Field '{}' is too short", field),
            json!({
                "currentLength": length,
                "minimumRequired": min,
                "providedValue": raw,
            }),
        ));
    }

    if length > max {
        return ValidationOutcome::Rejected(Rejection::for_field(
            ReasonCode::TooLong,
            field,
            format!("Field '{}' exceeds maximum length", field),
            json!({
                "currentLength": length,
                "maximumAllowed": max,
                "providedValue": raw,
            }),
        ));
    }

    ValidationOutcome::Accepted
}

fn evaluate_pattern(record: &Map<String, Value>, field: &'static str) -> ValidationOutcome {
    let raw = match record.get(field) {
        Some(Value::String(s)) => s,
        Some(value) => {
            return ValidationOutcome::Rejected(Rejection::for_field(
                ReasonCode::InvalidType,
                field,
                format!("Field '{}' must be a string", field),
                json!({ "expected": "string", "actual": json_type_name(value) }),
            ))
        }
        None => {
            return ValidationOutcome::Rejected(Rejection::for_field(
                ReasonCode::MissingField,
                field,
                format!("Missing required field: {}", field),
                json!({ "missing": [field] }),
            ))
        }
    };

    let trimmed = raw.trim();
    let issues = author_format_issues(trimmed);

    if issues.is_empty() {
        return ValidationOutcome::Accepted;
    }

    ValidationOutcome::Rejected(Rejection::for_field(
        ReasonCode::InvalidFormat,
        field,
        format!("Field '{}' has an invalid name format", field),
        json!({
            "issues": issues,
            "providedValue": raw,
            "letterCount": letter_count(trimmed),
            "minimumLetters": AUTHOR_MIN_LETTERS,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("test payload must be an object")
    }

    fn rejection(outcome: ValidationOutcome) -> Rejection {
        outcome.rejection().expect("expected a rejection")
    }

    #[test]
    fn test_presence_names_every_absent_field() {
        let rule = FieldRule::Presence { fields: vec!["title", "description", "author"] };
        let payload = record(json!({ "title": "Hello there" }));

        let rejected = rejection(rule.evaluate(&payload));
        assert_eq!(rejected.reason, ReasonCode::MissingField);
        assert_eq!(rejected.details["missing"], json!(["description", "author"]));
    }

    #[test]
    fn test_presence_treats_null_as_absent() {
        let rule = FieldRule::Presence { fields: vec!["title"] };
        let payload = record(json!({ "title": null }));

        let rejected = rejection(rule.evaluate(&payload));
        assert_eq!(rejected.details["missing"], json!(["title"]));
    }

    #[test]
    fn test_presence_accepts_empty_string() {
        // An empty string is present; the length rule owns that failure so
        // the declared rule order surfaces TooShort for it
        let rule = FieldRule::Presence { fields: vec!["title"] };
        let payload = record(json!({ "title": "" }));

        assert!(rule.evaluate(&payload).is_accepted());
    }

    #[test]
    fn test_type_check_reports_field_and_types() {
        let rule = FieldRule::TypeCheck {
            fields: vec![("title", FieldType::String), ("author", FieldType::String)],
        };
        let payload = record(json!({ "title": 42, "author": "Ana" }));

        let rejected = rejection(rule.evaluate(&payload));
        assert_eq!(rejected.reason, ReasonCode::InvalidType);
        assert_eq!(rejected.field.as_deref(), Some("title"));
        assert_eq!(
            rejected.details["mismatches"],
            json!([{ "field": "title", "expected": "string", "actual": "number" }])
        );
    }

    #[test]
    fn test_length_boundaries() {
        let rule = FieldRule::LengthRange { field: "title", min: 5, max: 100 };

        let at_4 = record(json!({ "title": "abcd" }));
        assert_eq!(rejection(rule.evaluate(&at_4)).reason, ReasonCode::TooShort);

        let at_5 = record(json!({ "title": "abcde" }));
        assert!(rule.evaluate(&at_5).is_accepted());

        let at_100 = record(json!({ "title": "a".repeat(100) }));
        assert!(rule.evaluate(&at_100).is_accepted());

        let at_101 = record(json!({ "title": "a".repeat(101) }));
        assert_eq!(rejection(rule.evaluate(&at_101)).reason, ReasonCode::TooLong);
    }

    #[test]
    fn test_length_trims_before_counting() {
        let rule = FieldRule::LengthRange { field: "title", min: 5, max: 100 };
        let payload = record(json!({ "title": "  abcd   " }));

        let rejected = rejection(rule.evaluate(&payload));
        assert_eq!(rejected.reason, ReasonCode::TooShort);
        assert_eq!(rejected.details["currentLength"], json!(4));
        assert_eq!(rejected.details["providedValue"], json!("  abcd   "));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let rule = FieldRule::LengthRange { field: "title", min: 5, max: 100 };
        let payload = record(json!({ "title": "ñañañ" }));

        assert!(rule.evaluate(&payload).is_accepted());
    }

    #[test]
    fn test_whitespace_only_is_empty_value() {
        let rule = FieldRule::LengthRange { field: "description", min: 5, max: 1000 };
        let payload = record(json!({ "description": "    " }));

        let rejected = rejection(rule.evaluate(&payload));
        assert_eq!(rejected.reason, ReasonCode::EmptyValue);
    }

    #[test]
    fn test_empty_string_is_too_short_not_empty_value() {
        let rule = FieldRule::LengthRange { field: "title", min: 5, max: 100 };
        let payload = record(json!({ "title": "" }));

        let rejected = rejection(rule.evaluate(&payload));
        assert_eq!(rejected.reason, ReasonCode::TooShort);
        assert_eq!(rejected.details["currentLength"], json!(0));
    }

    #[test]
    fn test_pattern_accepts_well_formed_names() {
        let rule = FieldRule::PatternMatch { field: "author" };

        for name in ["Ana-María López", "Ñoño", "Juan Pérez", "O'Brien", "J. Smith"] {
            let payload = record(json!({ "author": name }));
            assert!(rule.evaluate(&payload).is_accepted(), "expected '{}' to pass", name);
        }
    }

    #[test]
    fn test_pattern_rejects_lowercase_start() {
        let rule = FieldRule::PatternMatch { field: "author" };
        let payload = record(json!({ "author": "ana" }));

        let rejected = rejection(rule.evaluate(&payload));
        assert_eq!(rejected.reason, ReasonCode::InvalidFormat);
        assert_eq!(rejected.details["issues"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_pattern_rejects_digit_and_short_name() {
        let rule = FieldRule::PatternMatch { field: "author" };
        let payload = record(json!({ "author": "A1" }));

        let rejected = rejection(rule.evaluate(&payload));
        assert_eq!(rejected.reason, ReasonCode::InvalidFormat);
        // Both the alphabet and the letter-count predicates fail
        assert_eq!(rejected.details["issues"].as_array().map(Vec::len), Some(2));
        assert_eq!(rejected.details["letterCount"], json!(1));
    }

    #[test]
    fn test_pattern_trims_before_matching() {
        let rule = FieldRule::PatternMatch { field: "author" };
        let payload = record(json!({ "author": "  Juan Pérez  " }));

        assert!(rule.evaluate(&payload).is_accepted());
    }

    #[test]
    fn test_rules_are_deterministic() {
        let rule = FieldRule::LengthRange { field: "title", min: 5, max: 100 };
        let payload = record(json!({ "title": "abc" }));

        assert_eq!(rule.evaluate(&payload), rule.evaluate(&payload));
    }
}
