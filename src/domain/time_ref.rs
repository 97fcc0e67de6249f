//! Evaluation day references

use crate::error::{PontoError, Result};
use chrono::{Days, NaiveDate};

/// A reference to the day being evaluated, resolved against the run date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeReference {
    /// Current day
    Today,
    /// Previous day
    Yesterday,
    /// A number of days before today
    DaysAgo(u32),
    /// Specific date
    SpecificDate(NaiveDate),
}

impl TimeReference {
    /// Parse an evaluation day reference.
    ///
    /// Accepts `today`, `yesterday`, `N days ago`, `DD-MM-YYYY`,
    /// `DD/MM/YYYY` and `YYYY-MM-DD`.
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "hoje" => return Ok(TimeReference::Today),
            "yesterday" | "ontem" => return Ok(TimeReference::Yesterday),
            _ => {}
        }

        if let Some(count) = normalized
            .strip_suffix(" days ago")
            .or_else(|| normalized.strip_suffix(" day ago"))
        {
            return count
                .trim()
                .parse::<u32>()
                .map(TimeReference::DaysAgo)
                .map_err(|_| PontoError::InvalidEvaluationDate(input.to_string()));
        }

        ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
            .map(TimeReference::SpecificDate)
            .ok_or_else(|| PontoError::InvalidEvaluationDate(input.to_string()))
    }

    /// Resolve this reference to an actual date.
    ///
    /// Fails when the result falls outside the representable calendar.
    pub fn resolve(&self, base_date: NaiveDate) -> Result<NaiveDate> {
        let days_back = match self {
            TimeReference::Today => return Ok(base_date),
            TimeReference::SpecificDate(date) => return Ok(*date),
            TimeReference::Yesterday => 1,
            TimeReference::DaysAgo(n) => u64::from(*n),
        };

        base_date
            .checked_sub_days(Days::new(days_back))
            .ok_or_else(|| PontoError::InvalidEvaluationDate(format!("{} days ago", days_back)))
    }
}
