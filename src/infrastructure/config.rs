//! Configuration management

use crate::domain::dedup::DedupPolicy;
use crate::domain::layout::{IdentifierStrategy, LineLayout};
use crate::domain::roster::DEFAULT_ID_WIDTH;
use crate::domain::window::file_safe;
use crate::error::{PontoError, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE: &str = "ponto.toml";
/// Environment variable pointing at a configuration file
pub const CONFIG_ENV: &str = "PONTO_CONFIG";

/// Starter configuration written by `ponto init`
pub const DEFAULT_TEMPLATE: &str = r#"# ponto configuration
#
# Relative paths resolve against the directory holding this file.

output_dir = "relatorios"

# Trailing months kept by the rolling export
window_months = 3

# true: only employees with exactly one punch on the day are reported.
# false: every employee is reported with their earliest punch.
single_punch_only = true

# Employee roster: an .xlsx workbook (first sheet) or a CSV file, with
# Nome, Secao and NIT columns
[roster]
path = "Funcionarios.xlsx"
id_width = 11

# Offsets count characters from the start of the line. The date field is
# DDMMYYYY (8 characters) and the time field HHMM (4 characters).
#
# identifier = { strategy = "substring" } scans each line for any roster
# identifier; use { strategy = "fixed_tail", length = 11 } when the
# identifier is always the last characters of the line. The length must
# equal roster.id_width.

[[terminal]]
name = "Algodoeira"
path = "Ponto_Algodoeira.txt"
date_offset = 10
time_offset = 18
identifier = { strategy = "substring" }

[[terminal]]
name = "Escritorio"
path = "Ponto_Escritorio.txt"
date_offset = 10
time_offset = 18
identifier = { strategy = "substring" }

[[terminal]]
name = "Sede"
path = "Ponto_Sede.txt"
date_offset = 10
time_offset = 18
identifier = { strategy = "substring" }

[[terminal]]
name = "Secador"
path = "Ponto_Secador.txt"
date_offset = 10
time_offset = 18
identifier = { strategy = "substring" }
"#;

fn default_output_dir() -> PathBuf {
    PathBuf::from("relatorios")
}

fn default_window_months() -> u32 {
    3
}

fn default_single_punch_only() -> bool {
    true
}

fn default_id_width() -> usize {
    DEFAULT_ID_WIDTH
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterConfig {
    pub path: PathBuf,
    #[serde(default = "default_id_width")]
    pub id_width: usize,
}

/// One clock terminal and the layout of its lines
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TerminalConfig {
    pub name: String,
    pub path: PathBuf,
    pub date_offset: usize,
    pub time_offset: usize,
    #[serde(default)]
    pub identifier: IdentifierStrategy,
}

impl TerminalConfig {
    pub fn layout(&self) -> LineLayout {
        LineLayout::new(self.date_offset, self.time_offset, self.identifier.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_window_months")]
    pub window_months: u32,
    #[serde(default = "default_single_punch_only")]
    pub single_punch_only: bool,
    pub roster: RosterConfig,
    #[serde(rename = "terminal", default)]
    pub terminals: Vec<TerminalConfig>,
    /// Directory the config was loaded from
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    /// Parse and validate configuration text
    pub fn parse(contents: &str, base_dir: &Path) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)
            .map_err(|e| PontoError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;
        config.base_dir = base_dir.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PontoError::ConfigNotFound(path.to_path_buf())
            } else {
                PontoError::Io(e)
            }
        })?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::parse(&contents, &base_dir)
    }

    /// Locate the config: explicit path first, then PONTO_CONFIG, then a
    /// walk up from the current directory
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from_path(Path::new(&path));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` until a directory holding ponto.toml is found
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE);
            if candidate.is_file() {
                return Self::load_from_path(&candidate);
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(PontoError::ConfigNotFound(start.to_path_buf())),
            }
        }
    }

    /// Resolve a configured path against the config directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    pub fn dedup_policy(&self) -> DedupPolicy {
        if self.single_punch_only {
            DedupPolicy::SinglePunchOnly
        } else {
            DedupPolicy::EarliestPunch
        }
    }

    fn validate(&self) -> Result<()> {
        if self.terminals.is_empty() {
            return Err(PontoError::Config(
                "At least one [[terminal]] must be configured".to_string(),
            ));
        }

        if self.window_months == 0 {
            return Err(PontoError::Config(
                "window_months must be at least 1".to_string(),
            ));
        }

        if self.roster.id_width == 0 {
            return Err(PontoError::Config("roster.id_width must be at least 1".to_string()));
        }

        let mut names = HashSet::new();
        // Terminal names become part of export file names
        let mut file_names: HashMap<String, &str> = HashMap::new();
        for terminal in &self.terminals {
            if terminal.name.trim().is_empty() {
                return Err(PontoError::Config("Terminal name cannot be empty".to_string()));
            }
            if !names.insert(terminal.name.as_str()) {
                return Err(PontoError::Config(format!(
                    "Duplicate terminal name: '{}'",
                    terminal.name
                )));
            }
            let file_name = file_safe(&terminal.name).to_lowercase();
            if let Some(other) = file_names.insert(file_name, terminal.name.as_str()) {
                return Err(PontoError::Config(format!(
                    "Terminals '{}' and '{}' would share export file names; rename one of them",
                    other, terminal.name
                )));
            }
            if let IdentifierStrategy::FixedTail { length } = terminal.identifier {
                if length != self.roster.id_width {
                    return Err(PontoError::Config(format!(
                        "Terminal '{}': fixed_tail length {} must equal roster.id_width {}",
                        terminal.name, length, self.roster.id_width
                    )));
                }
            }
        }

        Ok(())
    }
}
