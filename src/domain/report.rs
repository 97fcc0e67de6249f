//! Section aggregation and daily report assembly

use crate::domain::punch::AttendanceEvent;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashSet};

/// Minimum width of the name column, before the two-character gutter
pub const NAME_PAD_FLOOR: usize = 40;
/// Spreadsheet limit on sheet name length
pub const SHEET_NAME_LIMIT: usize = 31;

const RULE_WIDTH: usize = 80;
const TIME_COLUMN_WIDTH: usize = 18;
const NAME_HEADER: &str = "EMPLOYEE NAME";
const TIME_HEADER: &str = "ENTRY TIME";

/// A structured `{section, name, time}` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub section: String,
    pub name: String,
    pub time: String,
}

/// Attendance events of one section, sorted by employee name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub name: String,
    pub events: Vec<AttendanceEvent>,
}

impl ReportSection {
    pub fn rows(&self) -> Vec<ReportRow> {
        self.events
            .iter()
            .map(|event| ReportRow {
                section: self.name.clone(),
                name: event.name().to_string(),
                time: event.time().format("%H:%M").to_string(),
            })
            .collect()
    }
}

/// One worksheet: a header row followed by data rows of the same width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Daily attendance report grouped by section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub generated_at: NaiveDateTime,
    pub sections: Vec<ReportSection>,
    /// Events left out because the employee has no section
    pub unsectioned: usize,
}

impl DailyReport {
    /// Group events by section.
    ///
    /// Sections are ordered by ordinal string comparison, and so are names
    /// within a section. Equal names keep their incoming order. Events whose
    /// section is missing or blank are counted in `unsectioned` and left out.
    pub fn assemble(
        date: NaiveDate,
        generated_at: NaiveDateTime,
        events: impl IntoIterator<Item = AttendanceEvent>,
    ) -> Self {
        let mut grouped: BTreeMap<String, Vec<AttendanceEvent>> = BTreeMap::new();
        let mut unsectioned = 0;

        for event in events {
            let section = event
                .section()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            match section {
                Some(section) => grouped.entry(section).or_default().push(event),
                None => unsectioned += 1,
            }
        }

        let sections = grouped
            .into_iter()
            .map(|(name, mut events)| {
                events.sort_by(|a, b| a.name().cmp(b.name()));
                ReportSection { name, events }
            })
            .collect();

        DailyReport {
            date,
            generated_at,
            sections,
            unsectioned,
        }
    }

    /// Number of events across all sections
    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// All rows, section by section
    pub fn rows(&self) -> Vec<ReportRow> {
        self.sections.iter().flat_map(ReportSection::rows).collect()
    }

    /// Render the plain-text report
    pub fn render_text(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let date = self.date.format("%d/%m/%Y");
        let mut out = String::new();

        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!("ATTENDANCE REPORT - DATE: {}\n", date));
        out.push_str(&format!(
            "Generated at: {}\n",
            self.generated_at.format("%d/%m/%Y %H:%M:%S")
        ));
        out.push_str(&format!("Total employees: {}\n", self.total()));
        out.push_str(&format!("{}\n", rule));

        if self.is_empty() {
            out.push_str(&format!("\nNo records found for {}.\n", date));
            return out;
        }

        let longest = self
            .sections
            .iter()
            .flat_map(|s| s.events.iter())
            .map(|e| e.name().chars().count())
            .max()
            .unwrap_or(0);
        let pad = longest.max(NAME_PAD_FLOOR) + 2;
        let banner = "#".repeat(53);

        for section in &self.sections {
            out.push_str(&format!("\n{}\n", banner));
            out.push_str(&format!("SECTION: {}\n", section.name));
            out.push_str(&format!("EMPLOYEES IN SECTION: {}\n", section.events.len()));
            out.push_str(&format!("{}\n", banner));
            out.push_str(&format!(
                "| {:<pad$} | {:<tw$} |\n",
                NAME_HEADER,
                TIME_HEADER,
                pad = pad,
                tw = TIME_COLUMN_WIDTH
            ));
            out.push_str(&format!(
                "|{}|{}|\n",
                "-".repeat(pad + 2),
                "-".repeat(TIME_COLUMN_WIDTH + 2)
            ));
            for row in section.rows() {
                out.push_str(&format!(
                    "| {:<pad$} | {:<tw$} |\n",
                    row.name,
                    row.time,
                    pad = pad,
                    tw = TIME_COLUMN_WIDTH
                ));
            }
        }

        out
    }

    /// One sheet per section with unique, spreadsheet-safe names
    pub fn sheets(&self) -> Vec<Sheet> {
        let mut used = HashSet::new();
        self.sections
            .iter()
            .map(|section| Sheet {
                name: sheet_name(&section.name, &mut used),
                header: vec![NAME_HEADER, TIME_HEADER],
                rows: section
                    .rows()
                    .into_iter()
                    .map(|row| vec![row.name, row.time])
                    .collect(),
            })
            .collect()
    }
}

/// Make a sheet name from a section name.
///
/// Characters spreadsheets reject (`[]:*?/\`) are dropped, along with
/// apostrophes at either end. The result is cut to [`SHEET_NAME_LIMIT`]
/// characters and a `~N` suffix keeps names unique among those already in
/// `used`, compared case-insensitively.
pub fn sheet_name(section: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = section
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .collect();
    let cleaned = cleaned.trim_matches(|c: char| c == '\'' || c.is_whitespace());
    let base = if cleaned.is_empty() { "Section" } else { cleaned };

    let mut candidate: String = base.chars().take(SHEET_NAME_LIMIT).collect();
    candidate = candidate.trim_end_matches('\'').to_string();
    let mut n = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!("~{}", n);
        let keep = SHEET_NAME_LIMIT - suffix.chars().count();
        candidate = base.chars().take(keep).collect::<String>() + &suffix;
        n += 1;
    }

    used.insert(candidate.to_lowercase());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::punch::{PunchRecord, RawLine};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn generated() -> NaiveDateTime {
        day().and_hms_opt(9, 30, 0).unwrap()
    }

    fn event(name: &str, section: Option<&str>, h: u32, m: u32) -> AttendanceEvent {
        let line = RawLine::new("", "Sede", 0);
        let at = day().and_hms_opt(h, m, 0).unwrap();
        AttendanceEvent::new(PunchRecord::new("1", name, section, at, &line))
    }

    #[test]
    fn test_sections_and_names_sorted() {
        let report = DailyReport::assemble(
            day(),
            generated(),
            vec![
                event("Zeca", Some("Sede"), 7, 0),
                event("Bia", Some("Escritório"), 7, 5),
                event("Ana", Some("Sede"), 8, 0),
                event("ana", Some("Sede"), 8, 1),
            ],
        );

        let names: Vec<&str> = report.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Escritório", "Sede"]);

        let sede: Vec<&str> = report.sections[1].events.iter().map(|e| e.name()).collect();
        assert_eq!(sede, vec!["Ana", "Zeca", "ana"]);
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn test_unknown_section_excluded() {
        let report = DailyReport::assemble(
            day(),
            generated(),
            vec![
                event("Ana", Some("Sede"), 7, 0),
                event("Nobody", None, 7, 0),
                event("Blank", Some("   "), 7, 0),
            ],
        );
        assert_eq!(report.total(), 1);
        assert_eq!(report.unsectioned, 2);
    }

    #[test]
    fn test_rows_are_structured() {
        let report = DailyReport::assemble(day(), generated(), vec![event("Ana Silva", Some("Escritório"), 7, 58)]);
        assert_eq!(
            report.rows(),
            vec![ReportRow {
                section: "Escritório".to_string(),
                name: "Ana Silva".to_string(),
                time: "07:58".to_string(),
            }]
        );
    }

    #[test]
    fn test_render_text_layout() {
        let report = DailyReport::assemble(day(), generated(), vec![event("Ana Silva", Some("Escritório"), 7, 58)]);
        let text = report.render_text();

        assert!(text.contains("ATTENDANCE REPORT - DATE: 16/10/2026\n"));
        assert!(text.contains("Generated at: 16/10/2026 09:30:00\n"));
        assert!(text.contains("SECTION: Escritório\n"));
        assert!(text.contains("EMPLOYEES IN SECTION: 1\n"));
        let row = format!("| {:<42} | {:<18} |\n", "Ana Silva", "07:58");
        assert!(text.contains(&row));
        let header = format!("| {:<42} | {:<18} |\n", "EMPLOYEE NAME", "ENTRY TIME");
        assert!(text.contains(&header));
        assert!(text.contains(&format!("|{}|{}|\n", "-".repeat(44), "-".repeat(20))));
    }

    #[test]
    fn test_render_text_pads_to_longest_name() {
        let long = "A".repeat(50);
        let report = DailyReport::assemble(day(), generated(), vec![event(&long, Some("Sede"), 7, 0)]);
        let text = report.render_text();
        assert!(text.contains(&format!("| {:<52} | {:<18} |\n", long, "07:00")));
    }

    #[test]
    fn test_render_text_empty_marker() {
        let report = DailyReport::assemble(day(), generated(), Vec::new());
        let text = report.render_text();
        assert!(report.is_empty());
        assert!(text.contains("Total employees: 0"));
        assert!(text.ends_with("No records found for 16/10/2026.\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let build = || {
            DailyReport::assemble(
                day(),
                generated(),
                vec![event("B", Some("S"), 7, 0), event("A", Some("S"), 8, 0)],
            )
            .render_text()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_sheet_name_truncation_and_uniqueness() {
        let mut used = HashSet::new();
        let long = "Departamento de Beneficiamento de Algodão";
        let first = sheet_name(long, &mut used);
        assert_eq!(first.chars().count(), SHEET_NAME_LIMIT);
        assert_eq!(first, long.chars().take(31).collect::<String>());

        let second = sheet_name(long, &mut used);
        assert_eq!(second.chars().count(), SHEET_NAME_LIMIT);
        assert!(second.ends_with("~2"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_sheet_name_strips_invalid_characters() {
        let mut used = HashSet::new();
        assert_eq!(sheet_name("Sede/Campo [1]", &mut used), "SedeCampo 1");
        assert_eq!(sheet_name("???", &mut used), "Section");
        assert_eq!(sheet_name("'Campo'", &mut used), "Campo");
    }

    #[test]
    fn test_sheets_follow_sections() {
        let report = DailyReport::assemble(
            day(),
            generated(),
            vec![event("Ana", Some("Sede"), 7, 0), event("Bia", Some("Escritório"), 8, 15)],
        );
        let sheets = report.sheets();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Escritório");
        assert_eq!(sheets[0].rows, vec![vec!["Bia".to_string(), "08:15".to_string()]]);
        assert_eq!(sheets[1].header, vec!["EMPLOYEE NAME", "ENTRY TIME"]);
    }
}
