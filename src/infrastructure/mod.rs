//! Infrastructure layer - External I/O and configuration

pub mod config;
pub mod sources;
pub mod writer;

pub use config::{Config, RosterConfig, TerminalConfig};
pub use sources::{FileSystemSource, PunchSource};
pub use writer::ReportWriter;
