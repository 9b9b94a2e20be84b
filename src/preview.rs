use anyhow::Result;
use log::info;

use crate::{
    cli::PreviewArgs,
    config::Settings,
    display::{DisplayOptions, format_for_display},
    record::Record,
    table,
};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let settings = Settings::from_args(&args.read)?;
    let mut records = settings.load_csv(&args.input)?;
    let total = records.len();
    records.truncate(args.rows);

    let options = display_options(&settings.config.display, args);
    let rows = format_for_display(&records, &options);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        let columns = columns_of(&records);
        print!("{}", table::render_display_rows(&columns, &rows));
    }
    info!(
        "Displayed {} of {} row(s) from {:?}",
        rows.len(),
        total,
        args.input
    );
    Ok(())
}

fn display_options(profile: &DisplayOptions, args: &PreviewArgs) -> DisplayOptions {
    DisplayOptions {
        max_cell_length: args.max_cell_length.unwrap_or(profile.max_cell_length),
        show_row_numbers: profile.show_row_numbers && !args.no_row_numbers,
        ..profile.clone()
    }
}

fn columns_of(records: &[Record]) -> Vec<String> {
    records
        .first()
        .map(|record| record.fields().map(str::to_string).collect())
        .unwrap_or_default()
}
