//! Text-level CSV tokenizer.
//!
//! Splits materialized CSV text into rows of raw string fields. The reader is
//! line-first: input is split on `\n` (a trailing `\r` is stripped from every
//! line) and each line is scanned independently, so a quoted value cannot
//! span lines. Quoting follows the double-quote convention: `"` toggles a
//! quoted span and `""` inside a span is a literal quote.
//!
//! No field-count checks are made here; short and long rows are reconciled
//! against the header by [`crate::record::build_records`].

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const DEFAULT_DELIMITER: char = ',';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub delimiter: char,
    /// Drop blank (or whitespace-only) lines after the header instead of
    /// emitting a row of empty values.
    pub skip_empty_lines: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            skip_empty_lines: true,
        }
    }
}

impl ParseOptions {
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        check_delimiter(delimiter)?;
        self.delimiter = delimiter;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        check_delimiter(self.delimiter)
    }
}

fn check_delimiter(delimiter: char) -> Result<()> {
    if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
        return Err(EngineError::InvalidDelimiter(delimiter.to_string()));
    }
    Ok(())
}

/// Tokenizes `text` into raw rows. The first row is whatever the first line
/// holds; callers decide whether it is a header.
pub fn parse_rows(text: &str, options: &ParseOptions) -> Vec<Vec<String>> {
    if text.is_empty() {
        return Vec::new();
    }
    // A terminating newline ends the last line rather than opening a new one.
    let body = text.strip_suffix('\n').unwrap_or(text);

    let mut rows = Vec::new();
    for (idx, line) in body.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if idx > 0 && options.skip_empty_lines && line.trim().is_empty() {
            continue;
        }
        rows.push(parse_line(line, options.delimiter));
    }
    rows
}

/// Scans a single line into fields. An empty line yields one empty field.
pub fn parse_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            c if c == delimiter && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            other => current.push(other),
        }
    }

    fields.push(current);
    fields
}
