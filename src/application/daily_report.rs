//! Daily attendance report use case

use crate::application::ingest::{IngestStats, Ingested, TerminalStats};
use crate::domain::dedup::{select_attendance, DedupPolicy};
use crate::domain::report::DailyReport;
use crate::domain::temporal::DateFilter;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

/// Result of building the daily report, with the counters behind it
#[derive(Debug, Clone)]
pub struct DailyReportOutcome {
    pub report: DailyReport,
    pub per_terminal: Vec<TerminalStats>,
    pub totals: IngestStats,
    /// Employees left out for punching more than once
    pub multi_punch: Vec<String>,
    /// Punch records folded away by deduplication
    pub punches_collapsed: usize,
}

impl DailyReportOutcome {
    /// Base name shared by the text report and the workbook
    pub fn file_stem(&self) -> String {
        format!("Relatorio_Presenca_{}", self.report.date.format("%Y%m%d"))
    }
}

/// Build the report of `date`: validate against that day, deduplicate, group
pub fn build_daily_report(
    ingested: &Ingested,
    date: NaiveDate,
    generated_at: NaiveDateTime,
    policy: DedupPolicy,
) -> DailyReportOutcome {
    let validated = ingested.validate(DateFilter::Day(date));
    let totals = validated.totals();
    let dedup = select_attendance(&validated.records, policy);
    let report = DailyReport::assemble(date, generated_at, dedup.events);

    info!(
        date = %date,
        punches = validated.records.len(),
        multi_punch = dedup.multi_punch.len(),
        unsectioned = report.unsectioned,
        reported = report.total(),
        "Daily report assembled"
    );

    DailyReportOutcome {
        report,
        per_terminal: validated.per_terminal,
        totals,
        multi_punch: dedup.multi_punch,
        punches_collapsed: dedup.punches_collapsed,
    }
}
