//! Ingestion and validation of punch lines

use crate::domain::layout::LineLayout;
use crate::domain::punch::{PunchRecord, RawLine};
use crate::domain::resolver::IdentifierResolver;
use crate::domain::roster::RosterIndex;
use crate::domain::temporal::{embedded_timestamp, DateFilter};
use crate::error::Result;
use crate::infrastructure::{Config, PunchSource};
use std::ops::AddAssign;
use tracing::{debug, info};

/// Raw lines of one terminal with the layout used to read them
#[derive(Debug, Clone)]
pub struct TerminalBatch {
    pub name: String,
    pub layout: LineLayout,
    pub lines: Vec<RawLine>,
}

/// Line counters of a validation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub lines_read: usize,
    /// Lines in which a roster identifier was found
    pub lines_matched: usize,
    /// Matched lines whose date and time parsed
    pub lines_dated: usize,
    /// Dated lines accepted by the date filter
    pub lines_in_range: usize,
}

impl AddAssign for IngestStats {
    fn add_assign(&mut self, other: Self) {
        self.lines_read += other.lines_read;
        self.lines_matched += other.lines_matched;
        self.lines_dated += other.lines_dated;
        self.lines_in_range += other.lines_in_range;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalStats {
    pub terminal: String,
    pub stats: IngestStats,
}

/// Records that passed validation, in arrival order
#[derive(Debug, Clone)]
pub struct Validated {
    pub records: Vec<PunchRecord>,
    pub per_terminal: Vec<TerminalStats>,
}

impl Validated {
    pub fn totals(&self) -> IngestStats {
        let mut total = IngestStats::default();
        for terminal in &self.per_terminal {
            total += terminal.stats;
        }
        total
    }
}

/// Every input of a run, fully materialized before any output is produced
#[derive(Debug, Clone)]
pub struct Ingested {
    pub roster: RosterIndex,
    pub batches: Vec<TerminalBatch>,
}

impl Ingested {
    /// Build from an already indexed roster and per-terminal line texts.
    ///
    /// Sequence numbers follow the order of `terminals`, then line order.
    pub fn new<I, L>(roster: RosterIndex, terminals: I) -> Self
    where
        I: IntoIterator<Item = (String, LineLayout, L)>,
        L: IntoIterator<Item = String>,
    {
        let mut sequence = 0;
        let batches = terminals
            .into_iter()
            .map(|(name, layout, texts)| {
                let lines = texts
                    .into_iter()
                    .map(|text| {
                        let line = RawLine::new(text, name.as_str(), sequence);
                        sequence += 1;
                        line
                    })
                    .collect();
                TerminalBatch {
                    name,
                    layout,
                    lines,
                }
            })
            .collect();

        Ingested { roster, batches }
    }

    /// Read the roster and every configured terminal. Any unreadable source
    /// aborts the load.
    pub fn load<S: PunchSource>(source: &S, config: &Config) -> Result<Self> {
        let entries = source.read_roster(&config.roster)?;
        let roster = RosterIndex::build(entries, config.roster.id_width);
        info!(
            employees = roster.len(),
            duplicates = roster.duplicates().len(),
            skipped = roster.skipped(),
            "Roster indexed"
        );

        let mut terminals = Vec::with_capacity(config.terminals.len());
        for terminal in &config.terminals {
            let texts = source.read_lines(terminal)?;
            terminals.push((terminal.name.clone(), terminal.layout(), texts));
        }

        Ok(Self::new(roster, terminals))
    }

    pub fn line_count(&self) -> usize {
        self.batches.iter().map(|b| b.lines.len()).sum()
    }

    /// Resolve and date every line, keeping those accepted by `filter`
    pub fn validate(&self, filter: DateFilter) -> Validated {
        let resolver = IdentifierResolver::new(&self.roster);
        let mut records = Vec::new();
        let mut per_terminal = Vec::with_capacity(self.batches.len());

        for batch in &self.batches {
            let mut stats = IngestStats::default();
            for line in &batch.lines {
                if let Some(record) =
                    validate_line(&resolver, &self.roster, line, &batch.layout, &filter, &mut stats)
                {
                    records.push(record);
                }
            }
            debug!(terminal = %batch.name, ?stats, "Validated terminal");
            per_terminal.push(TerminalStats {
                terminal: batch.name.clone(),
                stats,
            });
        }

        Validated {
            records,
            per_terminal,
        }
    }
}

fn validate_line(
    resolver: &IdentifierResolver<'_>,
    roster: &RosterIndex,
    line: &RawLine,
    layout: &LineLayout,
    filter: &DateFilter,
    stats: &mut IngestStats,
) -> Option<PunchRecord> {
    stats.lines_read += 1;

    let Some(id) = resolver.resolve(&line.text, &layout.identifier) else {
        debug!(terminal = %line.terminal, sequence = line.sequence, "No roster identifier");
        return None;
    };
    stats.lines_matched += 1;

    let Some(timestamp) = embedded_timestamp(&line.text, layout) else {
        debug!(terminal = %line.terminal, sequence = line.sequence, "Unparseable date or time");
        return None;
    };
    stats.lines_dated += 1;

    if !filter.accepts(timestamp.date()) {
        return None;
    }
    stats.lines_in_range += 1;

    let name = roster.name(id)?;
    Some(PunchRecord::new(id, name, roster.section(id), timestamp, line))
}
