//! Records, datasets, and the builder/cleaner that produce them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    header::normalize_headers,
    parser::{ParseOptions, parse_rows},
};

/// One CSV row as an ordered field-name → value mapping. Key order follows the
/// source header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, String>);

/// Ordered rows; 1-based position is the row number used in reports.
pub type Dataset = Vec<Record>;

/// A row as submitted by an editor: any JSON value per field.
pub type RawRecord = IndexMap<String, JsonValue>;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Value for `field`, with absent fields read as empty.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Blank means absent, empty, or whitespace only.
    pub fn is_blank(&self, field: &str) -> bool {
        self.value(field).trim().is_empty()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Zips `headers` with each raw row. Missing trailing values become empty;
/// values past the last header are dropped. Every value is trimmed.
pub fn build_records<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> Dataset {
    rows.iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = row.get(idx).map(|s| s.trim()).unwrap_or("");
                    (header.as_ref(), value)
                })
                .collect::<Record>()
        })
        .collect()
}

/// Parses `text`, normalizes the header row, and builds one record per data
/// row. Empty or header-only text yields an empty dataset.
pub fn read_dataset(text: &str, options: &ParseOptions) -> Dataset {
    let rows = parse_rows(text, options);
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Vec::new();
    };
    let headers = normalize_headers(header_row);
    build_records(&headers, data_rows)
}

/// Coerces every value of an edited dataset to a trimmed string. Rows may have
/// differing key sets; each keeps its own.
pub fn clean_records(rows: &[RawRecord]) -> Dataset {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(field, value)| (field.as_str(), stringify(value).trim().to_string()))
                .collect::<Record>()
        })
        .collect()
}

/// Like [`clean_records`] but for an arbitrary JSON value. Anything other than
/// an array cleans to an empty dataset; array items that are not objects
/// become empty records.
pub fn clean_value(value: &JsonValue) -> Dataset {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| match item.as_object() {
            Some(object) => object
                .iter()
                .map(|(field, value)| (field.as_str(), stringify(value).trim().to_string()))
                .collect::<Record>(),
            None => Record::new(),
        })
        .collect()
}

/// String form of a JSON cell: null is empty, arrays join their items with
/// commas, objects render as compact JSON.
pub fn stringify(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        JsonValue::Object(_) => value.to_string(),
    }
}
