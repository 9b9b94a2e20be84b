//! File and stdin/stdout plumbing for the command-line surface.
//!
//! The engine modules never touch the filesystem. Everything that reads or
//! writes bytes goes through here:
//!
//! - **Delimiter resolution**: `.tsv` inputs default to tab, everything else
//!   to comma, unless overridden.
//! - **Encoding**: input decoding and output encoding via `encoding_rs`,
//!   defaulting to UTF-8. A byte-order mark on input is honoured and removed.
//! - **stdin/stdout**: the `-` path convention routes through standard streams.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow, bail};
use encoding_rs::{Encoding, UTF_8};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::{
    parser::ParseOptions,
    record::{Dataset, clean_value, read_dataset},
};

pub const DEFAULT_CSV_DELIMITER: char = ',';
pub const DEFAULT_TSV_DELIMITER: char = '\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<char>) -> char {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn read_input_bytes(path: &Path) -> Result<Vec<u8>> {
    if is_dash(path) {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("Reading from stdin")?;
        Ok(buf)
    } else {
        fs::read(path).with_context(|| format!("Opening input file {path:?}"))
    }
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn encode_text(text: &str, encoding: &'static Encoding) -> Result<Vec<u8>> {
    let (encoded, _, had_errors) = encoding.encode(text);
    if had_errors {
        bail!("Failed to encode text using {}", encoding.name());
    }
    Ok(encoded.into_owned())
}

pub fn read_text(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = read_input_bytes(path)?;
    decode_bytes(&bytes, encoding).with_context(|| format!("Decoding {path:?}"))
}

/// Reads a CSV file into a dataset with normalized headers.
pub fn load_dataset(
    path: &Path,
    options: &ParseOptions,
    encoding: &'static Encoding,
) -> Result<Dataset> {
    let text = read_text(path, encoding)?;
    Ok(read_dataset(&text, options))
}

/// Reads a JSON array of row objects (as produced by an editor) and cleans it.
pub fn load_json_dataset(path: &Path, encoding: &'static Encoding) -> Result<Dataset> {
    let value: JsonValue = load_json(path, encoding)?;
    if !value.is_array() {
        bail!("Invalid data format in {path:?}: expected a JSON array of rows");
    }
    Ok(clean_value(&value))
}

pub fn load_json<T: DeserializeOwned>(path: &Path, encoding: &'static Encoding) -> Result<T> {
    let text = read_text(path, encoding)?;
    serde_json::from_str(&text).with_context(|| format!("Parsing JSON from {path:?}"))
}

/// Writes `bytes` to `path`, or stdout when `path` is absent or `-`.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(p) if !is_dash(p) => {
            fs::write(p, bytes).with_context(|| format!("Creating output file {p:?}"))
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("Writing to stdout")?;
            stdout.flush().context("Flushing stdout")
        }
    }
}

pub fn describe_destination(path: Option<&Path>) -> String {
    match path {
        Some(p) if !is_dash(p) => p.display().to_string(),
        _ => "stdout".to_string(),
    }
}
