//! Error types for ponto

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the ponto application.
///
/// Only run-level failures live here. A line that cannot be matched or dated
/// is dropped by the pipeline and never becomes an error.
#[derive(Debug, Error)]
pub enum PontoError {
    #[error("No ponto.toml found from: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load roster {path}: {reason}")]
    RosterLoad { path: PathBuf, reason: String },

    #[error("Failed to read punches of terminal '{terminal}' from {path}: {source}")]
    PunchSource {
        terminal: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid evaluation date: {0}")]
    InvalidEvaluationDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

impl PontoError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PontoError::ConfigNotFound(_) => 2,
            PontoError::RosterLoad { .. } => 3,
            PontoError::PunchSource { .. } => 4,
            PontoError::InvalidEvaluationDate(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            PontoError::ConfigNotFound(path) => {
                format!(
                    "No ponto.toml found from: {}\n\n\
                    Suggestions:\n\
                    • Run 'ponto init' to create a configuration\n\
                    • Pass --config <FILE> to point at an existing one\n\
                    • Set PONTO_CONFIG environment variable to its path",
                    path.display()
                )
            }
            PontoError::RosterLoad { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check [roster] path in ponto.toml\n\
                    • The roster must be an .xlsx or CSV file with Name, Section and Identifier columns\n\
                    • Portuguese headers Nome, Secao and NIT are accepted too",
                    self
                )
            }
            PontoError::PunchSource { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check the [[terminal]] path entries in ponto.toml\n\
                    • Copy the latest dump from the clock terminal before running",
                    self
                )
            }
            PontoError::InvalidEvaluationDate(input) => {
                format!(
                    "Invalid evaluation date: '{}'\n\n\
                    Valid dates:\n\
                    • today, yesterday, 3 days ago\n\
                    • DD-MM-YYYY or DD/MM/YYYY (e.g., 16-10-2026)\n\
                    • YYYY-MM-DD (e.g., 2026-10-16)",
                    input
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using PontoError
pub type Result<T> = std::result::Result<T, PontoError>;
