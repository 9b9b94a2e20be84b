use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::fields::DatasetKind;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Check strings and classifications CSV files against each other",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a CSV file as a table with normalized headers
    Preview(PreviewArgs),
    /// Check a CSV file for required columns and blank required cells
    Validate(ValidateArgs),
    /// Check that every strings row matches a known classification
    Check(CheckArgs),
    /// Clean a dataset and write it back out as CSV
    Export(ExportArgs),
    /// Report row, column and completeness counts
    Stats(StatsArgs),
}

/// Options shared by every command that reads input.
#[derive(Debug, Clone, Default, Args)]
pub struct ReadArgs {
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML profile with parsing and display defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input CSV file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    /// Truncate cells longer than this many characters
    #[arg(long = "max-cell-length")]
    pub max_cell_length: Option<usize>,
    /// Hide the row number column
    #[arg(long = "no-row-numbers")]
    pub no_row_numbers: bool,
    /// Print formatted rows as JSON instead of a table
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub read: ReadArgs,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Input CSV file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Dataset kind; inferred from the file name when omitted
    #[arg(long, value_enum)]
    pub kind: Option<DatasetKind>,
    /// Print errors as JSON instead of a table
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub read: ReadArgs,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Strings CSV file
    #[arg(long, required_unless_present = "request", requires = "classifications")]
    pub strings: Option<PathBuf>,
    /// Classifications CSV file
    #[arg(long, required_unless_present = "request", requires = "strings")]
    pub classifications: Option<PathBuf>,
    /// JSON file holding edited `stringsData` and `classificationsData`
    #[arg(long, conflicts_with_all = ["strings", "classifications"])]
    pub request: Option<PathBuf>,
    /// Print the full response as JSON
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub read: ReadArgs,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Input CSV file ('-' for stdin)
    #[arg(short = 'i', long = "input", required_unless_present = "request")]
    pub input: Option<PathBuf>,
    /// Treat the input as a JSON array of row objects
    #[arg(long = "json-input")]
    pub json_input: bool,
    /// JSON export request holding both datasets and a `filename`
    #[arg(long, conflicts_with_all = ["input", "json_input"])]
    pub request: Option<PathBuf>,
    /// Output CSV file (stdout if omitted); `.csv` is appended when missing
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Character encoding for the output (defaults to utf-8)
    #[arg(long = "output-encoding")]
    pub output_encoding: Option<String>,
    #[command(flatten)]
    pub read: ReadArgs,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Input CSV file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub read: ReadArgs,
}

pub fn parse_delimiter(value: &str) -> Result<char, String> {
    match value {
        "tab" | "\t" => Ok('\t'),
        "comma" | "," => Ok(','),
        "|" | "pipe" => Ok('|'),
        ";" | "semicolon" => Ok(';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            if first == '"' {
                return Err("Delimiter cannot be the quote character".to_string());
            }
            Ok(first)
        }
    }
}
