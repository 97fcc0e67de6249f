//! Rolling window retention exports

use crate::domain::layout::LineLayout;
use crate::domain::punch::{PunchRecord, RawLine};
use crate::domain::report::Sheet;
use crate::domain::temporal::{embedded_date, DateWindow};

/// Column headers of the validated-record table
pub const RECORD_HEADER: [&str; 6] = ["DATE", "TIME", "TERMINAL", "IDENTIFIER", "NAME", "SECTION"];

/// Name of the single sheet of the validated-record workbook
pub const RECORD_SHEET: &str = "Registros";

/// Terminal name as used in export file names.
///
/// ASCII letters, digits, `-` and `_` are kept; everything else becomes `_`.
pub fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Raw lines of one terminal whose embedded date falls in the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowExport {
    pub terminal: String,
    pub lines: Vec<RawLine>,
}

impl WindowExport {
    /// Keep lines with a parseable date inside `window`, in arrival order.
    ///
    /// Identifier resolution plays no part here: a line from an unknown
    /// employee is retained as long as its date is valid and in range.
    pub fn filter(terminal: &str, lines: &[RawLine], layout: &LineLayout, window: &DateWindow) -> Self {
        let lines = lines
            .iter()
            .filter(|line| {
                embedded_date(&line.text, layout).is_some_and(|date| window.contains(date))
            })
            .cloned()
            .collect();

        WindowExport {
            terminal: terminal.to_string(),
            lines,
        }
    }

    /// The retained lines, verbatim, one per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

/// One table row per validated record
pub fn record_rows(records: &[PunchRecord]) -> Vec<[String; 6]> {
    records
        .iter()
        .map(|r| {
            [
                r.date().format("%d/%m/%Y").to_string(),
                r.time().format("%H:%M").to_string(),
                r.terminal().to_string(),
                r.employee_id().to_string(),
                r.name().to_string(),
                r.section().unwrap_or("").to_string(),
            ]
        })
        .collect()
}

/// The validated records as a single worksheet
pub fn record_sheet(records: &[PunchRecord]) -> Sheet {
    Sheet {
        name: RECORD_SHEET.to_string(),
        header: RECORD_HEADER.to_vec(),
        rows: record_rows(records).into_iter().map(Vec::from).collect(),
    }
}

/// Plain-text dump of validated records over a window
pub fn render_record_dump(records: &[PunchRecord], window: &DateWindow) -> String {
    let mut out = format!(
        "VALIDATED PUNCHES {} - {}\nTotal records: {}\n{}\n",
        window.start.format("%d/%m/%Y"),
        window.end.format("%d/%m/%Y"),
        records.len(),
        "=".repeat(80)
    );

    for row in record_rows(records) {
        out.push_str(&row.join(" | "));
        out.push('\n');
    }
    out
}
