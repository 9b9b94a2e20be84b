//! Optional YAML profile supplying defaults for parsing and display.
//!
//! ```yaml
//! delimiter: ";"
//! skip_empty_lines: false
//! display:
//!   max_cell_length: 40
//!   show_row_numbers: false
//! ```
//!
//! Precedence is command-line flag, then profile, then built-in default (with
//! the delimiter default derived from the input's extension).

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    cli::ReadArgs,
    display::DisplayOptions,
    io_utils,
    parser::ParseOptions,
    record::Dataset,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub delimiter: Option<char>,
    pub skip_empty_lines: Option<bool>,
    pub display: DisplayOptions,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = io_utils::read_text(path, UTF_8)?;
        Self::from_yaml(&raw).with_context(|| format!("Loading config from {path:?}"))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        if let Some(delimiter) = config.delimiter {
            ParseOptions::default().with_delimiter(delimiter)?;
        }
        Ok(config)
    }

    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse options for `input`, honouring an explicit delimiter first.
    pub fn parse_options(&self, input: &Path, delimiter: Option<char>) -> Result<ParseOptions> {
        let delimiter = io_utils::resolve_input_delimiter(input, delimiter.or(self.delimiter));
        let options = ParseOptions {
            skip_empty_lines: self.skip_empty_lines.unwrap_or(true),
            ..ParseOptions::default()
        }
        .with_delimiter(delimiter)?;
        Ok(options)
    }
}

/// Reading settings shared by every command: profile, delimiter override and
/// input encoding.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: EngineConfig,
    pub delimiter: Option<char>,
    pub encoding: &'static Encoding,
}

impl Settings {
    pub fn from_args(args: &ReadArgs) -> Result<Self> {
        Ok(Self {
            config: EngineConfig::load_optional(args.config.as_deref())?,
            delimiter: args.delimiter,
            encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
        })
    }

    pub fn parse_options(&self, input: &Path) -> Result<ParseOptions> {
        self.config.parse_options(input, self.delimiter)
    }

    pub fn load_csv(&self, input: &Path) -> Result<Dataset> {
        let options = self.parse_options(input)?;
        debug!(
            "Reading {:?} with delimiter {:?} (skip empty lines: {})",
            input, options.delimiter, options.skip_empty_lines
        );
        io_utils::load_dataset(input, &options, self.encoding)
            .with_context(|| format!("Reading dataset from {input:?}"))
    }

    pub fn load_json(&self, input: &Path) -> Result<Dataset> {
        io_utils::load_json_dataset(input, self.encoding)
    }
}
