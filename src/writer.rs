//! CSV serialization for export.
//!
//! Columns come from the first record's key order. A value is quoted only when
//! it contains a comma, a double quote, or a line feed; embedded quotes are
//! doubled. Lines are joined with `\n` and the output has no trailing newline.

use std::borrow::Cow;

use crate::{
    error::{EngineError, Result, WriteContext},
    record::Record,
};

pub const FIELD_SEPARATOR: char = ',';

pub fn serialize_records(records: &[Record], context: WriteContext) -> Result<String> {
    let first = records
        .first()
        .ok_or(EngineError::EmptyInput { context })?;
    let headers = first.fields().collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_fields(headers.iter().copied()));
    for record in records {
        lines.push(join_fields(headers.iter().map(|header| record.value(header))));
    }
    Ok(lines.join("\n"))
}

/// Serialized text as UTF-8 bytes, ready for a response body or file.
pub fn to_csv_bytes(records: &[Record], context: WriteContext) -> Result<Vec<u8>> {
    serialize_records(records, context).map(String::into_bytes)
}

fn join_fields<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::new();
    for (idx, value) in values.enumerate() {
        if idx > 0 {
            line.push(FIELD_SEPARATOR);
        }
        line.push_str(&escape_field(value));
    }
    line
}

pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([FIELD_SEPARATOR, '"', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
