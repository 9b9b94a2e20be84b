use std::fmt;

use anyhow::Result;
use log::info;
use serde::{Serialize, Serializer};

use crate::{cli::StatsArgs, config::Settings, record::Record, table};

/// Share of non-blank cells. An empty dataset has no percentage and reports
/// numeric zero; otherwise the percentage is a string with one decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completeness {
    Empty,
    Percent(String),
}

impl fmt::Display for Completeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completeness::Empty => f.write_str("0"),
            Completeness::Percent(value) => f.write_str(value),
        }
    }
}

impl Serialize for Completeness {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Completeness::Empty => serializer.serialize_u8(0),
            Completeness::Percent(value) => serializer.serialize_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStatistics {
    pub row_count: usize,
    pub column_count: usize,
    pub empty_fields: usize,
    pub completeness: Completeness,
}

impl DatasetStatistics {
    fn empty() -> Self {
        Self {
            row_count: 0,
            column_count: 0,
            empty_fields: 0,
            completeness: Completeness::Empty,
        }
    }
}

/// Counts blank cells over the columns of the first record.
pub fn statistics(records: &[Record]) -> DatasetStatistics {
    let Some(first) = records.first() else {
        return DatasetStatistics::empty();
    };
    let columns = first.fields().collect::<Vec<_>>();
    let total = records.len() * columns.len();
    if total == 0 {
        return DatasetStatistics {
            row_count: records.len(),
            ..DatasetStatistics::empty()
        };
    }

    let empty_fields = records
        .iter()
        .map(|record| columns.iter().filter(|c| record.is_blank(c)).count())
        .sum::<usize>();

    DatasetStatistics {
        row_count: records.len(),
        column_count: columns.len(),
        empty_fields,
        completeness: Completeness::Percent(percent_one_decimal(total - empty_fields, total)),
    }
}

/// `part / whole * 100` to one decimal place, halves rounded up.
fn percent_one_decimal(part: usize, whole: usize) -> String {
    let tenths = (part as u128 * 2000 + whole as u128) / (whole as u128 * 2);
    format!("{}.{}", tenths / 10, tenths % 10)
}

pub fn execute(args: &StatsArgs) -> Result<()> {
    let settings = Settings::from_args(&args.read)?;
    let records = settings.load_csv(&args.input)?;
    let stats = statistics(&records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let headers = vec!["metric".to_string(), "value".to_string()];
        let rows = vec![
            vec!["rows".to_string(), stats.row_count.to_string()],
            vec!["columns".to_string(), stats.column_count.to_string()],
            vec!["empty fields".to_string(), stats.empty_fields.to_string()],
            vec!["completeness %".to_string(), stats.completeness.to_string()],
        ];
        table::print_table(&headers, &rows);
    }
    info!(
        "Computed statistics for {} row(s) from {:?}",
        stats.row_count, args.input
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn counts_blank_cells() {
        let data = vec![
            record(&[("Name", "John"), ("Age", "30"), ("City", "")]),
            record(&[("Name", ""), ("Age", "25"), ("City", "LA")]),
        ];
        let stats = statistics(&data);
        assert_eq!(stats.row_count, 2);
        assert_eq!(stats.column_count, 3);
        assert_eq!(stats.empty_fields, 2);
        assert_eq!(stats.completeness, Completeness::Percent("66.7".into()));
    }

    #[test]
    fn empty_dataset_reports_numeric_zero() {
        let stats = statistics(&[]);
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({"rowCount": 0, "columnCount": 0, "emptyFields": 0, "completeness": 0})
        );
    }

    #[test]
    fn populated_dataset_reports_string_percentage() {
        let stats = statistics(&[record(&[("a", "1")])]);
        assert_eq!(serde_json::to_value(&stats).unwrap()["completeness"], json!("100.0"));
    }

    #[test]
    fn columns_come_from_first_record() {
        let data = vec![
            record(&[("a", "1")]),
            record(&[("b", "2")]),
        ];
        let stats = statistics(&data);
        assert_eq!(stats.column_count, 1);
        assert_eq!(stats.empty_fields, 1);
        assert_eq!(stats.completeness.to_string(), "50.0");
    }

    #[test]
    fn keyless_records_have_no_percentage() {
        let stats = statistics(&[Record::new()]);
        assert_eq!(stats.row_count, 1);
        assert_eq!(stats.completeness, Completeness::Empty);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(percent_one_decimal(1, 16), "6.3");
        assert_eq!(percent_one_decimal(2, 3), "66.7");
        assert_eq!(percent_one_decimal(1, 3), "33.3");
        assert_eq!(percent_one_decimal(0, 5), "0.0");
    }
}
