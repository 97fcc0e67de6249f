//! Attendance deduplication: one representative punch per employee per day

use crate::domain::punch::{AttendanceEvent, PunchRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Rule applied to employees with several punches on the same day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Report only employees with exactly one punch; others are dropped
    #[default]
    SinglePunchOnly,
    /// Report every employee with their earliest punch
    EarliestPunch,
}

/// Result of a deduplication pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupOutcome {
    /// Selected events ordered by (section, name, timestamp, arrival)
    pub events: Vec<AttendanceEvent>,
    /// Employee identifiers dropped for having more than one punch on a day
    pub multi_punch: Vec<String>,
    /// Number of punch records folded away (input records minus events)
    pub punches_collapsed: usize,
}

/// Select one attendance event per (employee, day).
///
/// The representative punch is the one with the minimum timestamp; equal
/// timestamps go to the punch that arrived first. Under
/// [`DedupPolicy::SinglePunchOnly`] any (employee, day) group with more than
/// one punch yields no event.
pub fn select_attendance(records: &[PunchRecord], policy: DedupPolicy) -> DedupOutcome {
    let mut groups: BTreeMap<(&str, NaiveDate), Vec<&PunchRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.employee_id(), record.date()))
            .or_default()
            .push(record);
    }

    let mut outcome = DedupOutcome::default();
    for ((employee_id, _), punches) in groups {
        if policy == DedupPolicy::SinglePunchOnly && punches.len() > 1 {
            outcome.multi_punch.push(employee_id.to_string());
            continue;
        }

        let earliest = punches
            .into_iter()
            .min_by_key(|p| (p.timestamp(), p.sequence()));
        if let Some(punch) = earliest {
            outcome.events.push(AttendanceEvent::new(punch.clone()));
        }
    }

    outcome.multi_punch.dedup();
    outcome.punches_collapsed = records.len() - outcome.events.len();
    outcome.events.sort_by(|a, b| {
        a.section()
            .cmp(&b.section())
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.punch().timestamp().cmp(&b.punch().timestamp()))
            .then_with(|| a.punch().sequence().cmp(&b.punch().sequence()))
    });

    outcome
}
