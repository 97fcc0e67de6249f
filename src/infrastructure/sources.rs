//! Punch line and roster sources

use crate::domain::roster::RosterEntry;
use crate::error::{PontoError, Result};
use crate::infrastructure::config::{RosterConfig, TerminalConfig};
use calamine::{open_workbook_auto, Data, Reader};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the raw inputs of a run come from
pub trait PunchSource {
    /// Read all rows of the employee roster
    fn read_roster(&self, roster: &RosterConfig) -> Result<Vec<RosterEntry>>;

    /// Read the raw lines of one terminal, in file order
    fn read_lines(&self, terminal: &TerminalConfig) -> Result<Vec<String>>;
}

/// Decode Latin-1 bytes: every byte maps to the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Split a dump into lines, dropping `\r` terminators and blank lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

const NAME_HEADERS: &[&str] = &["Name", "Nome", "name", "NOME"];
const SECTION_HEADERS: &[&str] = &["Section", "Secao", "Seção", "section", "SECAO"];
const IDENTIFIER_HEADERS: &[&str] = &["Identifier", "NIT", "identifier", "Id"];

/// Extensions read as spreadsheets; anything else is read as CSV
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(alias = "Nome", alias = "name", alias = "NOME")]
    #[serde(rename = "Name")]
    name: String,
    #[serde(alias = "Secao", alias = "Seção", alias = "section", alias = "SECAO")]
    #[serde(rename = "Section", default)]
    section: Option<String>,
    #[serde(alias = "NIT", alias = "identifier", alias = "Id")]
    #[serde(rename = "Identifier")]
    identifier: String,
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Text of a spreadsheet cell. Whole numbers lose the `.0` a float would
/// print, so numeric identifier cells read like the digits typed in.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
        other => other.to_string().trim().to_string(),
    }
}

/// Read roster rows from the first worksheet of a workbook.
///
/// The first row holds the headers; columns are found by name.
pub fn read_roster_workbook(path: &Path) -> Result<Vec<RosterEntry>> {
    let load_error = |reason: String| PontoError::RosterLoad {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| load_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| load_error("workbook has no worksheets".to_string()))?
        .map_err(|e| load_error(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();
    let column = |aliases: &[&str]| header.iter().position(|h| aliases.iter().any(|a| h == a));

    let name_col =
        column(NAME_HEADERS).ok_or_else(|| load_error("missing field `Name`".to_string()))?;
    let id_col = column(IDENTIFIER_HEADERS)
        .ok_or_else(|| load_error("missing field `Identifier`".to_string()))?;
    let section_col = column(SECTION_HEADERS);

    let text_at = |row: &[Data], col: usize| row.get(col).map(cell_text).unwrap_or_default();

    let entries = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| RosterEntry {
            identifier: text_at(row, id_col),
            name: text_at(row, name_col),
            section: section_col
                .map(|col| text_at(row, col))
                .filter(|s| !s.is_empty()),
        })
        .collect();

    Ok(entries)
}

/// Parse roster CSV text; `origin` only labels errors
pub fn parse_roster(reader: impl std::io::Read, origin: &Path) -> Result<Vec<RosterEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for row in csv_reader.deserialize::<RosterRow>() {
        let row = row.map_err(|e| PontoError::RosterLoad {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        entries.push(RosterEntry {
            identifier: row.identifier,
            name: row.name,
            section: row.section.filter(|s| !s.is_empty()),
        });
    }

    Ok(entries)
}

/// Reads roster and punch dumps from disk, relative to a base directory
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    pub root: PathBuf,
}

impl FileSystemSource {
    pub fn new(root: PathBuf) -> Self {
        FileSystemSource { root }
    }
}

impl PunchSource for FileSystemSource {
    fn read_roster(&self, roster: &RosterConfig) -> Result<Vec<RosterEntry>> {
        let path = self.root.join(&roster.path);
        if is_workbook(&path) {
            let entries = read_roster_workbook(&path)?;
            debug!(path = %path.display(), rows = entries.len(), "Read roster workbook");
            return Ok(entries);
        }

        let bytes = fs::read(&path).map_err(|e| PontoError::RosterLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        // Spreadsheet exports are either UTF-8 or Latin-1
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => decode_latin1(err.as_bytes()),
        };

        let entries = parse_roster(text.trim_start_matches('\u{feff}').as_bytes(), &path)?;
        debug!(path = %path.display(), rows = entries.len(), "Read roster");
        Ok(entries)
    }

    fn read_lines(&self, terminal: &TerminalConfig) -> Result<Vec<String>> {
        let path = self.root.join(&terminal.path);
        let bytes = fs::read(&path).map_err(|source| PontoError::PunchSource {
            terminal: terminal.name.clone(),
            path: path.clone(),
            source,
        })?;

        let lines = split_lines(&decode_latin1(&bytes));
        debug!(terminal = %terminal.name, lines = lines.len(), "Read punch dump");
        Ok(lines)
    }
}
