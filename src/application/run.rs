//! Run orchestration: load everything, compute outputs, then write

use crate::application::daily_report::{build_daily_report, DailyReportOutcome};
use crate::application::ingest::Ingested;
use crate::application::rolling_export::{build_rolling_export, RollingExport};
use crate::domain::window::record_sheet;
use crate::error::Result;
use crate::infrastructure::{Config, PunchSource, ReportWriter};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use tracing::info;

/// Which outputs a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Daily,
    Export,
    All,
}

impl Job {
    fn includes_daily(self) -> bool {
        matches!(self, Job::Daily | Job::All)
    }

    fn includes_export(self) -> bool {
        matches!(self, Job::Export | Job::All)
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub daily: Option<DailyReportOutcome>,
    pub export: Option<RollingExport>,
    pub written: Vec<PathBuf>,
}

/// Service running the batch job against a punch source
pub struct RunService<S: PunchSource> {
    source: S,
    config: Config,
}

impl<S: PunchSource> RunService<S> {
    pub fn new(source: S, config: Config) -> Self {
        RunService { source, config }
    }

    /// Execute `job` for evaluation day `date`.
    ///
    /// All inputs are read and all outputs computed before the first file is
    /// written, so an unreadable source leaves no partial output behind.
    pub fn execute(
        &self,
        job: Job,
        date: NaiveDate,
        generated_at: NaiveDateTime,
        writer: &ReportWriter,
    ) -> Result<RunSummary> {
        let ingested = Ingested::load(&self.source, &self.config)?;
        info!(
            terminals = ingested.batches.len(),
            lines = ingested.line_count(),
            "Inputs loaded"
        );

        let daily = job.includes_daily().then(|| {
            build_daily_report(&ingested, date, generated_at, self.config.dedup_policy())
        });
        let export = job
            .includes_export()
            .then(|| build_rolling_export(&ingested, date, self.config.window_months));

        let mut written = Vec::new();

        if let Some(outcome) = &daily {
            let stem = outcome.file_stem();
            written.push(writer.write_text(&format!("{}.txt", stem), &outcome.report.render_text())?);
            written.push(writer.write_workbook(&stem, &outcome.report.sheets())?);
        }

        if let Some(export) = &export {
            let stem = export.records_stem();
            written.push(writer.write_text(&format!("{}.txt", stem), &export.render_records())?);
            written.push(writer.write_workbook(&stem, &[record_sheet(&export.records)])?);
            for raw in &export.raw {
                written.push(writer.write_text(&export.raw_file_name(&raw.terminal), &raw.render())?);
            }
        }

        Ok(RunSummary {
            daily,
            export,
            written,
        })
    }
}
