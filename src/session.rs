//! Request/response shapes for the upload, validate and export round trip.
//!
//! These are the payloads an HTTP layer exchanges with the editor front end.
//! Field names are camelCase on the wire. Each function is a pure call into
//! the engine; transport concerns (status codes, multipart handling) stay with
//! the caller.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, WriteContext},
    fields::DatasetKind,
    integrity::{IntegrityError, check_integrity},
    parser::ParseOptions,
    record::{Dataset, RawRecord, clean_records, read_dataset},
    writer::to_csv_bytes,
};

pub const CSV_CONTENT_TYPE: &str = "text/csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub strings_data: Dataset,
    pub classifications_data: Dataset,
    pub validation_errors: Vec<IntegrityError>,
}

/// Parses both uploaded files and checks them against each other.
pub fn upload(
    strings_text: &str,
    classifications_text: &str,
    options: &ParseOptions,
) -> UploadResponse {
    let strings_data = read_dataset(strings_text, options);
    let classifications_data = read_dataset(classifications_text, options);
    let validation_errors = check_integrity(
        Some(strings_data.as_slice()),
        Some(classifications_data.as_slice()),
    );
    UploadResponse {
        strings_data,
        classifications_data,
        validation_errors,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(default)]
    pub strings_data: Option<Vec<RawRecord>>,
    #[serde(default)]
    pub classifications_data: Option<Vec<RawRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: Vec<IntegrityError>,
}

/// Re-checks edited datasets. Values are cleaned to trimmed strings first.
pub fn validate(request: &ValidateRequest) -> ValidationResponse {
    let strings = request.strings_data.as_deref().map(clean_records);
    let classifications = request.classifications_data.as_deref().map(clean_records);
    let errors = check_integrity(strings.as_deref(), classifications.as_deref());
    ValidationResponse {
        valid: errors.is_empty(),
        errors,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub strings_data: Option<Vec<RawRecord>>,
    #[serde(default)]
    pub classifications_data: Option<Vec<RawRecord>>,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub kind: DatasetKind,
    pub content_type: &'static str,
    pub content_disposition: String,
    pub body: Vec<u8>,
}

/// Serializes the dataset the file name points at (see
/// [`DatasetKind::from_filename`]).
pub fn export(request: &ExportRequest) -> Result<ExportPayload> {
    let kind = DatasetKind::from_filename(&request.filename);
    let rows = match kind {
        DatasetKind::Strings => request.strings_data.as_deref(),
        DatasetKind::Classifications => request.classifications_data.as_deref(),
    };
    let records = clean_records(rows.unwrap_or_default());
    let body = to_csv_bytes(&records, WriteContext::Download)?;
    Ok(ExportPayload {
        kind,
        content_type: CSV_CONTENT_TYPE,
        content_disposition: content_disposition(&request.filename),
        body,
    })
}

pub fn content_disposition(filename: &str) -> String {
    format!("attachment; filename=\"{filename}\"")
}

/// Name offered to a browser download: `.csv` is appended when missing.
pub fn download_filename(name: &str) -> String {
    if name.ends_with(".csv") {
        name.to_string()
    } else {
        format!("{name}.csv")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::{EngineError, ErrorKind};

    const STRINGS: &str = "Tier,Industry,Topic,Subtopic,Prefix,Fuzzing-Idx,Prompt,Risks,Keywords
Gold,Finance,Payments,Cards,PAY,1,\"Enter details\",\"Fraud\",\"credit, debit\"
Silver,Health,Wellness,Fitness,FIT,2,\"Stay healthy\",\"Injury\",\"exercise, gym\"
";
    const CLASSIFICATIONS: &str = "Topic,SubTopic,Industry,Classification
payments,cards,finance,A
";

    #[test]
    fn upload_parses_and_checks() {
        let response = upload(STRINGS, CLASSIFICATIONS, &ParseOptions::default());
        assert_eq!(response.strings_data.len(), 2);
        assert_eq!(response.strings_data[0].value("Keywords"), "credit, debit");
        assert_eq!(response.classifications_data.len(), 1);
        assert_eq!(response.validation_errors.len(), 1);
        assert_eq!(response.validation_errors[0].row, Some(2));
    }

    #[test]
    fn upload_response_uses_camel_case() {
        let response = upload(STRINGS, CLASSIFICATIONS, &ParseOptions::default());
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("stringsData").is_some());
        assert!(value.get("classificationsData").is_some());
        assert_eq!(value["validationErrors"][0]["topic"], json!("Wellness"));
    }

    #[test]
    fn validate_cleans_edited_rows() {
        let request: ValidateRequest = serde_json::from_value(json!({
            "stringsData": [{"Topic": " Payments ", "Subtopic": "Cards", "Industry": "Finance"}],
            "classificationsData": [{"Topic": "Payments", "SubTopic": "Cards", "Industry": "Finance", "Classification": 1}]
        }))
        .unwrap();
        let response = validate(&request);
        assert!(response.valid);
        assert!(response.errors.is_empty());
    }

    #[test]
    fn validate_without_both_datasets_is_invalid() {
        let request: ValidateRequest =
            serde_json::from_value(json!({"stringsData": [], "classificationsData": null})).unwrap();
        let response = validate(&request);
        assert!(!response.valid);
        assert_eq!(response.errors[0].kind, ErrorKind::EmptyInput);
    }

    #[test]
    fn export_routes_by_filename() {
        let request: ExportRequest = serde_json::from_value(json!({
            "stringsData": [{"Topic": "AI", "Note": "a, b"}],
            "classificationsData": [{"Topic": "Other"}],
            "filename": "edited_strings.csv"
        }))
        .unwrap();
        let payload = export(&request).unwrap();
        assert_eq!(payload.kind, DatasetKind::Strings);
        assert_eq!(payload.content_type, "text/csv");
        assert_eq!(
            payload.content_disposition,
            "attachment; filename=\"edited_strings.csv\""
        );
        assert_eq!(payload.body, b"Topic,Note\nAI,\"a, b\"".to_vec());
    }

    #[test]
    fn export_of_missing_dataset_fails() {
        let request = ExportRequest {
            filename: "classifications.csv".to_string(),
            ..ExportRequest::default()
        };
        let err = export(&request).unwrap_err();
        assert_eq!(
            err,
            EngineError::EmptyInput {
                context: WriteContext::Download
            }
        );
        assert_eq!(err.to_string(), "No data to download");
    }

    #[test]
    fn download_names_end_in_csv() {
        assert_eq!(download_filename("report"), "report.csv");
        assert_eq!(download_filename("report.csv"), "report.csv");
    }
}
