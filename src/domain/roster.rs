//! Roster index: employee identifier lookups

use std::collections::HashMap;
use tracing::warn;

/// Default width of a canonical employee identifier (NIT)
pub const DEFAULT_ID_WIDTH: usize = 11;

/// One row of the employee roster as read from the source table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub identifier: String,
    pub name: String,
    pub section: Option<String>,
}

impl RosterEntry {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>, section: Option<&str>) -> Self {
        RosterEntry {
            identifier: identifier.into(),
            name: name.into(),
            section: section.map(str::to_string),
        }
    }
}

/// Normalize a raw identifier cell to its canonical fixed-width form.
///
/// Spreadsheet exports sometimes render numeric cells as `12345.0`; the
/// fractional zero is dropped before padding. Identifiers longer than
/// `width` are kept as they are. Returns `None` for empty cells.
pub fn normalize_identifier(raw: &str, width: usize) -> Option<String> {
    let trimmed = raw.trim();
    let trimmed = match trimmed.strip_suffix(".0") {
        Some(int) if !int.is_empty() && int.bytes().all(|b| b.is_ascii_digit()) => int,
        _ => trimmed,
    };

    if trimmed.is_empty() {
        return None;
    }

    Some(format!("{:0>width$}", trimmed, width = width))
}

/// Immutable identifier -> (name, section) lookup built once per run.
///
/// Iteration order is the order in which each identifier first appeared in
/// the roster. When an identifier appears more than once, the last row's
/// name and section win but the first position is kept.
#[derive(Debug, Clone, Default)]
pub struct RosterIndex {
    width: usize,
    order: Vec<String>,
    names: HashMap<String, String>,
    sections: HashMap<String, Option<String>>,
    duplicates: Vec<String>,
    skipped: usize,
}

impl RosterIndex {
    /// Build the index, normalizing identifiers to `width` characters
    pub fn build<I>(entries: I, width: usize) -> Self
    where
        I: IntoIterator<Item = RosterEntry>,
    {
        let mut index = RosterIndex {
            width,
            ..Default::default()
        };

        for entry in entries {
            let Some(id) = normalize_identifier(&entry.identifier, width) else {
                warn!(name = %entry.name, "Skipping roster row without identifier");
                index.skipped += 1;
                continue;
            };

            let section = entry
                .section
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());

            if index.names.contains_key(&id) {
                warn!(identifier = %id, name = %entry.name, "Duplicate roster identifier, last entry wins");
                index.duplicates.push(id.clone());
            } else {
                index.order.push(id.clone());
            }

            index.names.insert(id.clone(), entry.name.trim().to_string());
            index.sections.insert(id, section);
        }

        index
    }

    /// Canonical identifier width used by this index
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, id: &str) -> bool {
        self.names.contains_key(id)
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Section of an employee; `None` when unknown or when the id is not indexed
    pub fn section(&self, id: &str) -> Option<&str> {
        self.sections.get(id).and_then(|s| s.as_deref())
    }

    /// Identifiers in deterministic scan order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Identifiers that appeared more than once in the source roster
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Number of rows dropped for lacking an identifier
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
