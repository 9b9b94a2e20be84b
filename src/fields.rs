//! Canonical field vocabulary for the two known dataset kinds.
//!
//! The strings dataset spells the shared join column `Subtopic` while the
//! classifications dataset spells it `SubTopic`. Both spellings are kept as
//! they are; [`crate::integrity`] bridges them by lower-casing join keys.

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const TIER: &str = "Tier";
pub const INDUSTRY: &str = "Industry";
pub const TOPIC: &str = "Topic";
/// Join column as spelled by the strings dataset.
pub const SUBTOPIC: &str = "Subtopic";
/// Join column as spelled by the classifications dataset.
pub const SUB_TOPIC: &str = "SubTopic";
pub const PREFIX: &str = "Prefix";
pub const FUZZING_IDX: &str = "Fuzzing-Idx";
pub const PROMPT: &str = "Prompt";
pub const RISKS: &str = "Risks";
pub const KEYWORDS: &str = "Keywords";
pub const CLASSIFICATION: &str = "Classification";

pub const STRINGS_REQUIRED_FIELDS: &[&str] = &[
    TIER,
    INDUSTRY,
    TOPIC,
    SUBTOPIC,
    PREFIX,
    FUZZING_IDX,
    PROMPT,
    RISKS,
    KEYWORDS,
];

pub const CLASSIFICATIONS_REQUIRED_FIELDS: &[&str] =
    &[TOPIC, SUB_TOPIC, INDUSTRY, CLASSIFICATION];

/// Every spelling the header normalizer may emit for a known column.
pub const CANONICAL_FIELDS: &[&str] = &[
    TIER,
    INDUSTRY,
    TOPIC,
    SUBTOPIC,
    SUB_TOPIC,
    PREFIX,
    FUZZING_IDX,
    PROMPT,
    RISKS,
    KEYWORDS,
    CLASSIFICATION,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "kebab-case")]
pub enum DatasetKind {
    Strings,
    Classifications,
}

impl DatasetKind {
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Strings => STRINGS_REQUIRED_FIELDS,
            DatasetKind::Classifications => CLASSIFICATIONS_REQUIRED_FIELDS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Strings => "strings",
            DatasetKind::Classifications => "classifications",
        }
    }

    /// Export routing: a file name mentioning `strings` is the strings
    /// dataset, anything else is treated as classifications.
    pub fn from_filename(name: &str) -> Self {
        if name.contains("strings") {
            DatasetKind::Strings
        } else {
            DatasetKind::Classifications
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strings" => Ok(DatasetKind::Strings),
            "classifications" => Ok(DatasetKind::Classifications),
            other => Err(format!("Unknown dataset kind '{other}'")),
        }
    }
}
