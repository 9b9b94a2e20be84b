use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde::Serialize;

use crate::{
    cli::CheckArgs,
    config::Settings,
    integrity::IntegrityError,
    io_utils,
    session::{self, ValidateRequest, ValidationResponse},
    table,
};

pub fn execute(args: &CheckArgs) -> Result<()> {
    let settings = Settings::from_args(&args.read)?;

    let errors = match (&args.request, &args.strings, &args.classifications) {
        (Some(path), _, _) => {
            let request: ValidateRequest = io_utils::load_json(path, settings.encoding)
                .with_context(|| format!("Loading validation request from {path:?}"))?;
            let response = session::validate(&request);
            emit(args.json, &response)?;
            response.errors
        }
        (None, Some(strings), Some(classifications)) => {
            let strings_text = io_utils::read_text(strings, settings.encoding)?;
            let classifications_text = io_utils::read_text(classifications, settings.encoding)?;
            let response = session::upload(
                &strings_text,
                &classifications_text,
                &settings.parse_options(strings)?,
            );
            info!(
                "Checking {} strings row(s) against {} classification row(s)",
                response.strings_data.len(),
                response.classifications_data.len()
            );
            emit(args.json, &response)?;
            response.validation_errors
        }
        _ => bail!("Provide --strings and --classifications, or --request"),
    };

    if errors.is_empty() {
        info!("✓ Every strings row matches a classification");
        Ok(())
    } else {
        warn!("{} integrity problem(s) found", errors.len());
        bail!("Integrity check failed with {} error(s)", errors.len())
    }
}

fn emit<T: Serialize + AsErrors>(json: bool, value: &T) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else if !value.errors().is_empty() {
        print_errors(value.errors());
    }
    Ok(())
}

/// Responses that carry integrity errors for the table view.
trait AsErrors {
    fn errors(&self) -> &[IntegrityError];
}

impl AsErrors for ValidationResponse {
    fn errors(&self) -> &[IntegrityError] {
        &self.errors
    }
}

impl AsErrors for session::UploadResponse {
    fn errors(&self) -> &[IntegrityError] {
        &self.validation_errors
    }
}

fn print_errors(errors: &[IntegrityError]) {
    let headers = ["row", "topic", "subtopic", "industry", "message"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = errors
        .iter()
        .map(|error| {
            vec![
                error.row.map(|row| row.to_string()).unwrap_or_default(),
                error.topic.clone().unwrap_or_default(),
                error.subtopic.clone().unwrap_or_default(),
                error.industry.clone().unwrap_or_default(),
                error.message.clone(),
            ]
        })
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);
}
