//! Per-terminal line layouts

use serde::Deserialize;

/// Width of the embedded `DDMMYYYY` date field
pub const DATE_FIELD_LEN: usize = 8;
/// Width of the embedded `HHMM` time field
pub const TIME_FIELD_LEN: usize = 4;

/// How the employee identifier is located inside a line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum IdentifierStrategy {
    /// Test every roster identifier as a literal substring; first in roster order wins
    #[default]
    Substring,
    /// The identifier is the last `length` characters of the line
    FixedTail { length: usize },
}

/// Character positions of the fields embedded in a terminal's lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLayout {
    pub date_offset: usize,
    pub time_offset: usize,
    pub identifier: IdentifierStrategy,
}

impl LineLayout {
    pub fn new(date_offset: usize, time_offset: usize, identifier: IdentifierStrategy) -> Self {
        LineLayout {
            date_offset,
            time_offset,
            identifier,
        }
    }

    pub fn date_field<'a>(&self, text: &'a str) -> Option<&'a str> {
        char_field(text, self.date_offset, DATE_FIELD_LEN)
    }

    pub fn time_field<'a>(&self, text: &'a str) -> Option<&'a str> {
        char_field(text, self.time_offset, TIME_FIELD_LEN)
    }
}

/// Slice `len` characters starting at character `offset`.
///
/// Returns `None` when the line is too short.
pub fn char_field(text: &str, offset: usize, len: usize) -> Option<&str> {
    let mut indices = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));
    let start = indices.nth(offset)?;
    if len == 0 {
        return Some(&text[start..start]);
    }
    let end = indices.nth(len - 1)?;
    Some(&text[start..end])
}

/// The last `len` characters of `text`, if it has that many
pub fn char_tail(text: &str, len: usize) -> Option<&str> {
    if len == 0 {
        return Some("");
    }
    let (start, _) = text.char_indices().rev().nth(len - 1)?;
    Some(&text[start..])
}
