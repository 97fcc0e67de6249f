//! Application layer - Use cases and orchestration

pub mod daily_report;
pub mod ingest;
pub mod init;
pub mod rolling_export;
pub mod run;

pub use daily_report::{build_daily_report, DailyReportOutcome};
pub use ingest::{IngestStats, Ingested, TerminalStats};
pub use rolling_export::{build_rolling_export, RollingExport};
pub use run::{Job, RunService, RunSummary};
