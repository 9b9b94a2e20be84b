//! Cross-dataset referential integrity.
//!
//! Every strings row must name a `Topic`/`Subtopic`/`Industry` combination that
//! exists among the classifications rows (`Topic`/`SubTopic`/`Industry`).
//! Combinations are compared as lower-cased composite keys; the differing
//! spelling of the middle column is handled by reading each side with its own
//! field name, never by renaming columns.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    error::ErrorKind,
    fields::{INDUSTRY, SUB_TOPIC, SUBTOPIC, TOPIC},
    record::Record,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityError {
    /// 1-based row in the strings dataset; absent for dataset-level errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtopic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub kind: ErrorKind,
    pub message: String,
}

impl IntegrityError {
    fn missing_dataset() -> Self {
        Self {
            row: None,
            topic: None,
            subtopic: None,
            industry: None,
            kind: ErrorKind::EmptyInput,
            message: "Both datasets are required for validation".to_string(),
        }
    }

    fn unknown_combination(row: usize, topic: &str, subtopic: &str, industry: &str) -> Self {
        Self {
            row: Some(row),
            topic: Some(topic.to_string()),
            subtopic: Some(subtopic.to_string()),
            industry: Some(industry.to_string()),
            kind: ErrorKind::IntegrityViolation,
            message: format!(
                "Invalid combination: Topic \"{topic}\", Subtopic \"{subtopic}\", Industry \"{industry}\" not found in classifications"
            ),
        }
    }
}

pub fn composite_key(topic: &str, subtopic: &str, industry: &str) -> String {
    format!("{topic}-{subtopic}-{industry}").to_lowercase()
}

/// Set of known combinations built from the classifications dataset.
#[derive(Debug, Clone, Default)]
pub struct ClassificationIndex {
    keys: HashSet<String>,
}

impl ClassificationIndex {
    pub fn build(reference: &[Record]) -> Self {
        let keys = reference
            .iter()
            .map(|row| {
                composite_key(
                    row.value(TOPIC),
                    row.value(SUB_TOPIC),
                    row.value(INDUSTRY),
                )
            })
            .collect();
        Self { keys }
    }

    pub fn contains(&self, topic: &str, subtopic: &str, industry: &str) -> bool {
        self.keys.contains(&composite_key(topic, subtopic, industry))
    }

    /// Number of distinct combinations.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Checks each strings row against the classifications rows, returning one
/// error per unknown combination in strings-row order.
pub fn check_integrity(
    primary: Option<&[Record]>,
    reference: Option<&[Record]>,
) -> Vec<IntegrityError> {
    let (Some(primary), Some(reference)) = (primary, reference) else {
        return vec![IntegrityError::missing_dataset()];
    };

    let index = ClassificationIndex::build(reference);
    primary
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let topic = row.value(TOPIC);
            let subtopic = row.value(SUBTOPIC);
            let industry = row.value(INDUSTRY);
            (!index.contains(topic, subtopic, industry))
                .then(|| IntegrityError::unknown_combination(idx + 1, topic, subtopic, industry))
        })
        .collect()
}
