//! Required-field validation.
//!
//! [`validate_records`] reports every problem in one pass: a dataset-level
//! error for required columns missing from the schema (inferred from the first
//! record only) plus one row-level error per blank required cell.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    error::ErrorKind,
    record::{Record, clean_value},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 1-based row; absent for dataset-level errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn global(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            row: None,
            field: None,
            kind,
            message: message.into(),
        }
    }

    pub fn blank_field(row: usize, field: &str) -> Self {
        Self {
            row: Some(row),
            field: Some(field.to_string()),
            kind: ErrorKind::MissingField,
            message: format!("{field} is required in row {row}"),
        }
    }

    pub fn is_global(&self) -> bool {
        self.row.is_none()
    }
}

pub fn validate_records<S: AsRef<str>>(records: &[Record], required: &[S]) -> Vec<ValidationError> {
    let Some(first) = records.first() else {
        return vec![ValidationError::global(
            ErrorKind::EmptyInput,
            "No data to validate",
        )];
    };

    let mut errors = Vec::new();

    let missing = required
        .iter()
        .map(AsRef::as_ref)
        .filter(|field| !first.contains_field(field))
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        errors.push(ValidationError::global(
            ErrorKind::MissingField,
            format!("Missing required fields: {}", missing.join(", ")),
        ));
    }

    for (idx, record) in records.iter().enumerate() {
        for field in required.iter().map(AsRef::as_ref) {
            if record.is_blank(field) {
                errors.push(ValidationError::blank_field(idx + 1, field));
            }
        }
    }

    errors
}

/// Validates an editor-submitted JSON dataset. Non-array input is a format
/// error; arrays are cleaned before validation.
pub fn validate_value<S: AsRef<str>>(value: &JsonValue, required: &[S]) -> Vec<ValidationError> {
    if !value.is_array() {
        return vec![ValidationError::global(
            ErrorKind::Format,
            "Invalid data format",
        )];
    }
    validate_records(&clean_value(value), required)
}

/// Per-record check: one `"{field} is required"` message per blank field.
pub fn row_errors<S: AsRef<str>>(record: &Record, required: &[S]) -> Vec<String> {
    required
        .iter()
        .map(AsRef::as_ref)
        .filter(|field| record.is_blank(field))
        .map(|field| format!("{field} is required"))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn reports_blank_cells_by_row() {
        let data = vec![
            record(&[("Name", "John"), ("Age", "30")]),
            record(&[("Name", ""), ("Age", "25")]),
            record(&[("Name", "Bob"), ("Age", "  ")]),
        ];
        let errors = validate_records(&data, &["Name", "Age"]);
        assert_eq!(
            errors,
            vec![
                ValidationError::blank_field(2, "Name"),
                ValidationError::blank_field(3, "Age"),
            ]
        );
        assert_eq!(errors[0].message, "Name is required in row 2");
    }

    #[test]
    fn missing_columns_and_blank_cells_both_reported() {
        let data = vec![record(&[("Name", "John")])];
        let errors = validate_records(&data, &["Name", "Age", "Email"]);
        assert_eq!(errors[0].message, "Missing required fields: Age, Email");
        assert!(errors[0].is_global());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[1].field.as_deref(), Some("Age"));
        assert_eq!(errors[2].field.as_deref(), Some("Email"));
    }

    #[test]
    fn schema_is_taken_from_first_record_only() {
        let data = vec![
            record(&[("Name", "John")]),
            record(&[("Name", "Jane"), ("Age", "40")]),
        ];
        let errors = validate_records(&data, &["Age"]);
        assert_eq!(errors[0].message, "Missing required fields: Age");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].row, Some(1));
    }

    #[test]
    fn empty_dataset_is_single_error() {
        let errors = validate_records(&[], &["Name"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "No data to validate");
        assert_eq!(errors[0].kind, ErrorKind::EmptyInput);
    }

    #[test]
    fn no_required_fields_never_errors() {
        let data = vec![record(&[("Name", "")])];
        assert!(validate_records::<&str>(&data, &[]).is_empty());
    }

    #[test]
    fn non_array_json_is_format_error() {
        let errors = validate_value(&json!("invalid"), &["Name"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Invalid data format");
        assert_eq!(errors[0].kind, ErrorKind::Format);
    }

    #[test]
    fn json_values_are_cleaned_first() {
        let errors = validate_value(&json!([{"Name": " ", "Age": 0}]), &["Name", "Age"]);
        assert_eq!(errors, vec![ValidationError::blank_field(1, "Name")]);
    }

    #[test]
    fn row_errors_lists_each_blank_field() {
        let row = record(&[("Tier", "Gold"), ("Industry", "")]);
        let errors = row_errors(&row, &["Tier", "Industry", "Topic"]);
        assert_eq!(errors, vec!["Industry is required", "Topic is required"]);
    }

    #[test]
    fn global_errors_omit_row_and_field_in_json() {
        let json = serde_json::to_value(ValidationError::global(
            ErrorKind::EmptyInput,
            "No data to validate",
        ))
        .unwrap();
        assert_eq!(
            json,
            json!({"kind": "empty_input", "message": "No data to validate"})
        );
    }
}
