use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::info;

use crate::{
    cli::ExportArgs,
    config::Settings,
    error::WriteContext,
    io_utils,
    session::{self, ExportRequest, download_filename},
    writer::serialize_records,
};

pub fn execute(args: &ExportArgs) -> Result<()> {
    let settings = Settings::from_args(&args.read)?;
    let output_encoding = io_utils::resolve_encoding(args.output_encoding.as_deref())?;

    if let Some(request_path) = &args.request {
        return export_request(args, &settings, request_path, output_encoding);
    }

    let input = args
        .input
        .as_deref()
        .context("An --input file is required unless --request is given")?;
    let records = if args.json_input {
        settings.load_json(input)?
    } else {
        settings.load_csv(input)?
    };

    let text = serialize_records(&records, WriteContext::File)?;
    let bytes = io_utils::encode_text(&text, output_encoding)?;
    let output = args.output.as_deref().map(output_path);
    io_utils::write_output(output.as_deref(), &bytes)?;

    info!(
        "Exported {} row(s) from {:?} -> {}",
        records.len(),
        input,
        io_utils::describe_destination(output.as_deref())
    );
    Ok(())
}

fn export_request(
    args: &ExportArgs,
    settings: &Settings,
    request_path: &Path,
    output_encoding: &'static Encoding,
) -> Result<()> {
    let request: ExportRequest = io_utils::load_json(request_path, settings.encoding)
        .with_context(|| format!("Loading export request from {request_path:?}"))?;
    let payload = session::export(&request)?;
    info!(
        "Export of {} data offered as: {}",
        payload.kind, payload.content_disposition
    );

    let text = String::from_utf8(payload.body).context("Export body is not valid UTF-8")?;
    let bytes = io_utils::encode_text(&text, output_encoding)?;
    let output = args.output.as_deref().map(output_path);
    io_utils::write_output(output.as_deref(), &bytes)?;
    info!(
        "Wrote {} data -> {}",
        payload.kind,
        io_utils::describe_destination(output.as_deref())
    );
    Ok(())
}

/// Output files without an extension get `.csv` appended; `-` stays stdout.
fn output_path(path: &Path) -> PathBuf {
    if io_utils::is_dash(path) || path.extension().is_some() {
        return path.to_path_buf();
    }
    match path.file_name() {
        Some(name) => path.with_file_name(download_filename(&name.to_string_lossy())),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_gain_csv_extension() {
        assert_eq!(output_path(Path::new("out/report")), PathBuf::from("out/report.csv"));
        assert_eq!(output_path(Path::new("report.tsv")), PathBuf::from("report.tsv"));
        assert_eq!(output_path(Path::new("-")), PathBuf::from("-"));
    }
}
