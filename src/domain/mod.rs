//! Domain layer - Punch reconciliation logic and models

pub mod dedup;
pub mod layout;
pub mod punch;
pub mod report;
pub mod resolver;
pub mod roster;
pub mod temporal;
pub mod time_ref;
pub mod window;

pub use dedup::{select_attendance, DedupOutcome, DedupPolicy};
pub use layout::{IdentifierStrategy, LineLayout};
pub use punch::{AttendanceEvent, PunchRecord, RawLine};
pub use report::{DailyReport, ReportRow, ReportSection, Sheet};
pub use resolver::IdentifierResolver;
pub use roster::{RosterEntry, RosterIndex};
pub use temporal::{DateFilter, DateWindow};
pub use time_ref::TimeReference;
pub use window::WindowExport;
