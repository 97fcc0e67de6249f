//! Temporal validation of embedded date/time fields

use crate::domain::layout::LineLayout;
use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Parse `n` ASCII digits into a number, rejecting anything else
fn digits(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parse a `DDMMYYYY` field into a calendar date
pub fn parse_date_field(field: &str) -> Option<NaiveDate> {
    if field.len() != 8 {
        return None;
    }
    let day = digits(field.get(0..2)?)?;
    let month = digits(field.get(2..4)?)?;
    let year = digits(field.get(4..8)?)?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Parse an `HHMM` field into a wall-clock time
pub fn parse_time_field(field: &str) -> Option<NaiveTime> {
    if field.len() != 4 {
        return None;
    }
    let hour = digits(field.get(0..2)?)?;
    let minute = digits(field.get(2..4)?)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// The date embedded in a line, if present and well formed
pub fn embedded_date(text: &str, layout: &LineLayout) -> Option<NaiveDate> {
    layout.date_field(text).and_then(parse_date_field)
}

/// The date and time embedded in a line, if both are present and well formed
pub fn embedded_timestamp(text: &str, layout: &LineLayout) -> Option<NaiveDateTime> {
    let date = embedded_date(text, layout)?;
    let time = layout.time_field(text).and_then(parse_time_field)?;
    Some(date.and_time(time))
}

/// Inclusive date interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The trailing window `[end - months, end]`.
    ///
    /// Month arithmetic clamps to the last valid day, so 31 May minus three
    /// months starts on 28/29 February.
    pub fn trailing(end: NaiveDate, months: u32) -> Self {
        let start = end
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        DateWindow { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which dates a validation pass keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Only the evaluation day (daily report path)
    Day(NaiveDate),
    /// Any date inside the window (rolling export path)
    Window(DateWindow),
}

impl DateFilter {
    pub fn accepts(&self, date: NaiveDate) -> bool {
        match self {
            DateFilter::Day(day) => *day == date,
            DateFilter::Window(window) => window.contains(date),
        }
    }
}
