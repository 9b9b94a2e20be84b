use std::path::Path;

use anyhow::{Result, bail};
use log::{info, warn};

use crate::{
    cli::ValidateArgs,
    config::Settings,
    fields::DatasetKind,
    table,
    validate::{ValidationError, validate_records},
};

pub fn execute(args: &ValidateArgs) -> Result<()> {
    let kind = args.kind.unwrap_or_else(|| infer_kind(&args.input));
    let settings = Settings::from_args(&args.read)?;
    let records = settings.load_csv(&args.input)?;
    info!(
        "Validating {} row(s) from {:?} as {} data",
        records.len(),
        args.input,
        kind
    );

    let errors = validate_records(&records, kind.required_fields());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&errors)?);
    } else if !errors.is_empty() {
        print_errors(&errors);
    }

    if errors.is_empty() {
        info!("✓ {:?} has every required {} field", args.input, kind);
        Ok(())
    } else {
        warn!("{} problem(s) found in {:?}", errors.len(), args.input);
        bail!("Validation failed with {} error(s)", errors.len())
    }
}

fn infer_kind(path: &Path) -> DatasetKind {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    DatasetKind::from_filename(&name)
}

fn print_errors(errors: &[ValidationError]) {
    let headers = vec!["row".to_string(), "field".to_string(), "message".to_string()];
    let rows = errors
        .iter()
        .map(|error| {
            vec![
                error.row.map(|row| row.to_string()).unwrap_or_default(),
                error.field.clone().unwrap_or_default(),
                error.message.clone(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);
}
