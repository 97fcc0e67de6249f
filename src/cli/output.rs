//! Output formatting utilities

use crate::application::{DailyReportOutcome, IngestStats, RollingExport, RunSummary};

fn format_stats(stats: &IngestStats) -> String {
    format!(
        "{} read, {} matched, {} dated, {} in range",
        stats.lines_read, stats.lines_matched, stats.lines_dated, stats.lines_in_range
    )
}

/// Format the daily report counters
pub fn format_daily_summary(outcome: &DailyReportOutcome) -> String {
    let report = &outcome.report;
    let mut output = format!("Daily report {}\n", report.date.format("%d/%m/%Y"));
    for terminal in &outcome.per_terminal {
        output.push_str(&format!(
            "  {:<16} {}\n",
            terminal.terminal,
            format_stats(&terminal.stats)
        ));
    }
    output.push_str(&format!(
        "  Employees reported: {} in {} section(s)\n",
        report.total(),
        report.sections.len()
    ));
    if !outcome.multi_punch.is_empty() {
        output.push_str(&format!(
            "  Left out (more than one punch): {}\n",
            outcome.multi_punch.len()
        ));
    }
    if report.unsectioned > 0 {
        output.push_str(&format!(
            "  Left out (no section): {}\n",
            report.unsectioned
        ));
    }
    if report.is_empty() {
        output.push_str("  No records found for this day\n");
    }
    output
}

/// Format the rolling export counters
pub fn format_export_summary(export: &RollingExport) -> String {
    let mut output = format!(
        "Rolling export {} - {}\n",
        export.window.start.format("%d/%m/%Y"),
        export.window.end.format("%d/%m/%Y")
    );
    output.push_str(&format!("  Validated records: {}\n", export.records.len()));
    for raw in &export.raw {
        output.push_str(&format!(
            "  {:<16} {} raw line(s)\n",
            raw.terminal,
            raw.lines.len()
        ));
    }
    output
}

/// Format everything a run did
pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut output = String::new();
    if let Some(daily) = &summary.daily {
        output.push_str(&format_daily_summary(daily));
    }
    if let Some(export) = &summary.export {
        output.push_str(&format_export_summary(export));
    }
    output.push_str("Written:\n");
    for path in &summary.written {
        output.push_str(&format!("  {}\n", path.display()));
    }
    output
}
