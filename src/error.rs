//! Error types for the integrity engine.
//!
//! Data problems (blank fields, unknown classification combinations) are
//! reported as values, see [`crate::validate::ValidationError`] and
//! [`crate::integrity::IntegrityError`]. [`EngineError`] covers the few
//! conditions that cannot be expressed as a row-level report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category attached to every reported data problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input is not a usable dataset shape.
    Format,
    /// Dataset required but empty or absent.
    EmptyInput,
    /// Required field missing from the schema or blank in a row.
    MissingField,
    /// Primary row's combination is not present in the reference dataset.
    IntegrityViolation,
}

/// Where serialized output is headed; only changes the empty-input message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteContext {
    File,
    Download,
}

impl WriteContext {
    fn empty_message(self) -> &'static str {
        match self {
            WriteContext::File => "No data to write",
            WriteContext::Download => "No data to download",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("{}", .context.empty_message())]
    EmptyInput { context: WriteContext },

    #[error("Invalid delimiter {0:?}: must be a single ASCII character other than '\"'")]
    InvalidDelimiter(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_message_follows_context() {
        let file = EngineError::EmptyInput {
            context: WriteContext::File,
        };
        let download = EngineError::EmptyInput {
            context: WriteContext::Download,
        };
        assert_eq!(file.to_string(), "No data to write");
        assert_eq!(download.to_string(), "No data to download");
    }

    #[test]
    fn error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::IntegrityViolation).unwrap();
        assert_eq!(json, "\"integrity_violation\"");
    }
}
