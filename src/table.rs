//! Plain-text table rendering for terminal output.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::display::DisplayRow;

/// Shown in place of a highlighted empty cell.
pub const EMPTY_MARKER: &str = "-";
pub const ROW_NUMBER_HEADER: &str = "#";

const COLUMN_GAP: &str = "  ";

/// Renders formatted rows under `columns`. A `#` column is prepended when the
/// rows carry row numbers.
pub fn render_display_rows(columns: &[String], rows: &[DisplayRow]) -> String {
    let numbered = rows.iter().any(|row| row.row_number.is_some());

    let mut headers = Vec::with_capacity(columns.len() + 1);
    if numbered {
        headers.push(ROW_NUMBER_HEADER.to_string());
    }
    headers.extend(columns.iter().cloned());

    let body = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(headers.len());
            if numbered {
                cells.push(row.row_number.map(|n| n.to_string()).unwrap_or_default());
            }
            cells.extend(columns.iter().map(|column| match row.cell(column) {
                Some(cell) if cell.is_empty => EMPTY_MARKER.to_string(),
                Some(cell) => cell.value.clone(),
                None => String::new(),
            }));
            cells
        })
        .collect::<Vec<_>>();

    render_table(&headers, &body)
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths = column_widths(headers, rows);

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths));

    let rule = widths.iter().map(|w| "-".repeat((*w).max(3))).collect::<Vec<_>>();
    let rule_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&rule, &rule_widths));

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = headers
        .iter()
        .map(|h| display_width(&sanitize_cell(h)).max(1))
        .collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(&sanitize_cell(cell)));
        }
    }
    widths
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let cell = sanitize_cell(value);
            let padding = width.saturating_sub(display_width(&cell));
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end_matches(' ').to_string()
}

/// Character count, ignoring ANSI colour sequences.
fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayOptions, format_for_display};
    use crate::record::Record;

    #[test]
    fn aligns_columns() {
        let headers = vec!["id".to_string(), "name".to_string()];
        let rows = vec![
            vec!["1".to_string(), "Alice".to_string()],
            vec!["2".to_string(), "Bob".to_string()],
        ];
        let rendered = render_table(&headers, &rows);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines, vec!["id  name", "---  -----", "1   Alice", "2   Bob"]);
    }

    #[test]
    fn control_characters_become_spaces() {
        let headers = vec!["note".to_string()];
        let rows = vec![vec!["line1\nline2\tvalue".to_string()]];
        let rendered = render_table(&headers, &rows);
        assert_eq!(rendered.lines().nth(2), Some("line1 line2 value"));
    }

    #[test]
    fn display_rows_get_number_column_and_empty_marker() {
        let records = vec![
            Record::from_iter([("Name", "John"), ("City", "")]),
            Record::from_iter([("Name", "Jane"), ("City", "LA")]),
        ];
        let rows = format_for_display(&records, &DisplayOptions::default());
        let columns = vec!["Name".to_string(), "City".to_string()];
        let rendered = render_display_rows(&columns, &rows);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "#  Name  City");
        assert_eq!(lines[1], "---  ----  ----");
        assert_eq!(lines[2], "1  John  -");
        assert_eq!(lines[3], "2  Jane  LA");
    }
}
