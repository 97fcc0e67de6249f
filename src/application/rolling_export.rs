//! Rolling window export use case

use crate::application::ingest::{Ingested, TerminalStats};
use crate::domain::punch::PunchRecord;
use crate::domain::temporal::{DateFilter, DateWindow};
use crate::domain::window::{file_safe, render_record_dump, WindowExport};
use chrono::NaiveDate;
use tracing::info;

/// Retention exports over the trailing window ending on the evaluation day
#[derive(Debug, Clone)]
pub struct RollingExport {
    pub window: DateWindow,
    /// Validated records in the window, in arrival order, not deduplicated
    pub records: Vec<PunchRecord>,
    /// Raw in-window lines per terminal, regardless of identifier match
    pub raw: Vec<WindowExport>,
    pub per_terminal: Vec<TerminalStats>,
}

impl RollingExport {
    pub fn records_stem(&self) -> String {
        format!("Registros_Janela_{}", self.window.end.format("%Y%m%d"))
    }

    pub fn raw_file_name(&self, terminal: &str) -> String {
        format!(
            "Linhas_Janela_{}_{}.txt",
            file_safe(terminal),
            self.window.end.format("%Y%m%d")
        )
    }

    pub fn render_records(&self) -> String {
        render_record_dump(&self.records, &self.window)
    }
}

/// Build the exports for the `months`-month window ending on `today`
pub fn build_rolling_export(ingested: &Ingested, today: NaiveDate, months: u32) -> RollingExport {
    let window = DateWindow::trailing(today, months);
    let validated = ingested.validate(DateFilter::Window(window));

    let raw: Vec<WindowExport> = ingested
        .batches
        .iter()
        .map(|batch| WindowExport::filter(&batch.name, &batch.lines, &batch.layout, &window))
        .collect();

    info!(
        start = %window.start,
        end = %window.end,
        records = validated.records.len(),
        raw_lines = raw.iter().map(|r| r.lines.len()).sum::<usize>(),
        "Rolling export assembled"
    );

    RollingExport {
        window,
        records: validated.records,
        raw,
        per_terminal: validated.per_terminal,
    }
}
