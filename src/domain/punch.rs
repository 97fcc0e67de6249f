//! Punch lines and the records derived from them

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// One raw line as read from a terminal dump, tagged with its origin.
///
/// `sequence` is the global arrival position (terminals in configured
/// order, lines in file order) and drives every first-processed tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    pub terminal: String,
    pub sequence: usize,
}

impl RawLine {
    pub fn new(text: impl Into<String>, terminal: impl Into<String>, sequence: usize) -> Self {
        RawLine {
            text: text.into(),
            terminal: terminal.into(),
            sequence,
        }
    }
}

/// A punch whose identifier was found in the roster and whose embedded
/// date/time parsed and passed the active date filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchRecord {
    employee_id: String,
    name: String,
    section: Option<String>,
    timestamp: NaiveDateTime,
    terminal: String,
    sequence: usize,
}

impl PunchRecord {
    /// Only the validation pipeline creates records
    pub(crate) fn new(
        employee_id: &str,
        name: &str,
        section: Option<&str>,
        timestamp: NaiveDateTime,
        line: &RawLine,
    ) -> Self {
        PunchRecord {
            employee_id: employee_id.to_string(),
            name: name.to_string(),
            section: section.map(str::to_string),
            timestamp,
            terminal: line.terminal.clone(),
            sequence: line.sequence,
        }
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    pub fn sequence(&self) -> usize {
        self.sequence
    }
}

/// The single punch chosen to represent an employee on a given day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEvent {
    punch: PunchRecord,
}

impl AttendanceEvent {
    pub(crate) fn new(punch: PunchRecord) -> Self {
        AttendanceEvent { punch }
    }

    pub fn punch(&self) -> &PunchRecord {
        &self.punch
    }

    pub fn employee_id(&self) -> &str {
        self.punch.employee_id()
    }

    pub fn name(&self) -> &str {
        self.punch.name()
    }

    pub fn section(&self) -> Option<&str> {
        self.punch.section()
    }

    pub fn time(&self) -> NaiveTime {
        self.punch.time()
    }
}
