//! Presentation helpers: cell truncation, empty-cell flags, row numbers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::Record;

pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Values longer than this many characters are cut and suffixed with
    /// [`ELLIPSIS`].
    pub max_cell_length: usize,
    pub show_row_numbers: bool,
    pub highlight_empty_fields: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_cell_length: 100,
            show_row_numbers: true,
            highlight_empty_fields: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCell {
    pub value: String,
    #[serde(rename = "isEmpty")]
    pub is_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    #[serde(
        rename = "_rowNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub row_number: Option<usize>,
    #[serde(flatten)]
    pub cells: IndexMap<String, DisplayCell>,
}

impl DisplayRow {
    pub fn cell(&self, field: &str) -> Option<&DisplayCell> {
        self.cells.get(field)
    }
}

pub fn format_for_display(records: &[Record], options: &DisplayOptions) -> Vec<DisplayRow> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| DisplayRow {
            row_number: options.show_row_numbers.then_some(idx + 1),
            cells: record
                .iter()
                .map(|(field, value)| (field.to_string(), format_cell(value, options)))
                .collect(),
        })
        .collect()
}

fn format_cell(value: &str, options: &DisplayOptions) -> DisplayCell {
    let value = truncate(value, options.max_cell_length);
    if options.highlight_empty_fields && value.trim().is_empty() {
        DisplayCell {
            value: String::new(),
            is_empty: true,
        }
    } else {
        DisplayCell {
            value,
            is_empty: false,
        }
    }
}

/// Cuts `value` to `max_chars` characters plus [`ELLIPSIS`] when longer.
pub fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &value[..cut]),
        None => value.to_string(),
    }
}
