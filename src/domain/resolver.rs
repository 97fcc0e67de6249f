//! Identifier resolution: find which employee a raw line belongs to

use crate::domain::layout::{char_tail, IdentifierStrategy};
use crate::domain::roster::RosterIndex;
use std::collections::{BTreeMap, HashMap};

/// Maps raw lines to roster identifiers.
///
/// Substring scanning is indexed by identifier length: for each distinct
/// length the line is windowed once and every window is looked up in a hash
/// map of identifier -> roster position. The match with the lowest roster
/// position wins, which is exactly the result of testing identifiers one by
/// one in roster order and stopping at the first hit.
///
/// When one identifier is a substring of another and both occur in a line,
/// the one earlier in the roster is returned. No further disambiguation is
/// attempted; prefer `FixedTail` for terminals with a fixed layout.
#[derive(Debug)]
pub struct IdentifierResolver<'a> {
    roster: &'a RosterIndex,
    order: Vec<&'a str>,
    by_length: BTreeMap<usize, HashMap<&'a str, usize>>,
}

impl<'a> IdentifierResolver<'a> {
    pub fn new(roster: &'a RosterIndex) -> Self {
        let order: Vec<&'a str> = roster.identifiers().collect();
        let mut by_length: BTreeMap<usize, HashMap<&'a str, usize>> = BTreeMap::new();

        for (position, id) in order.iter().enumerate() {
            by_length
                .entry(id.chars().count())
                .or_default()
                .insert(*id, position);
        }

        IdentifierResolver {
            roster,
            order,
            by_length,
        }
    }

    /// Resolve the identifier embedded in `text` using `strategy`
    pub fn resolve(&self, text: &str, strategy: &IdentifierStrategy) -> Option<&'a str> {
        match strategy {
            IdentifierStrategy::Substring => self.scan(text),
            IdentifierStrategy::FixedTail { length } => self.fixed_tail(text, *length),
        }
    }

    fn fixed_tail(&self, text: &str, length: usize) -> Option<&'a str> {
        let tail = char_tail(text, length)?;
        let position = self.by_length.get(&length)?.get(tail)?;
        Some(self.order[*position])
    }

    fn scan(&self, text: &str) -> Option<&'a str> {
        if self.roster.is_empty() {
            return None;
        }

        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;

        let mut best: Option<usize> = None;
        for (&len, ids) in &self.by_length {
            if len == 0 || len > char_count {
                continue;
            }
            for start in 0..=(char_count - len) {
                let window = &text[bounds[start]..bounds[start + len]];
                if let Some(&position) = ids.get(window) {
                    if best.map_or(true, |b| position < b) {
                        best = Some(position);
                    }
                }
            }
        }

        best.map(|position| self.order[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::roster::RosterEntry;

    fn roster(ids: &[&str]) -> RosterIndex {
        RosterIndex::build(
            ids.iter()
                .map(|id| RosterEntry::new(*id, format!("Employee {}", id), Some("S"))),
            0,
        )
    }

    /// Straight-line version of the scan used to check the indexed one
    fn naive_scan<'a>(roster: &'a RosterIndex, text: &str) -> Option<&'a str> {
        roster.identifiers().find(|id| text.contains(id))
    }

    #[test]
    fn test_substring_finds_embedded_identifier() {
        let r = roster(&["00112233445", "99887766554"]);
        let resolver = IdentifierResolver::new(&r);
        let line = "0000000003161020260758099887766554";
        assert_eq!(
            resolver.resolve(line, &IdentifierStrategy::Substring),
            Some("99887766554")
        );
    }

    #[test]
    fn test_substring_no_match() {
        let r = roster(&["00112233445"]);
        let resolver = IdentifierResolver::new(&r);
        assert_eq!(
            resolver.resolve("000000000316102026075812345", &IdentifierStrategy::Substring),
            None
        );
    }

    #[test]
    fn test_substring_first_in_roster_order_wins() {
        // "12345" is a suffix of "0012345"; both occur in the line
        let r = roster(&["12345", "0012345"]);
        let resolver = IdentifierResolver::new(&r);
        assert_eq!(
            resolver.resolve("xx0012345", &IdentifierStrategy::Substring),
            Some("12345")
        );

        let r = roster(&["0012345", "12345"]);
        let resolver = IdentifierResolver::new(&r);
        assert_eq!(
            resolver.resolve("xx0012345", &IdentifierStrategy::Substring),
            Some("0012345")
        );
    }

    #[test]
    fn test_substring_matches_naive_scan() {
        let r = roster(&["555", "12345", "0012345", "777", "34", "99887766554"]);
        let resolver = IdentifierResolver::new(&r);
        let lines = [
            "xx0012345",
            "abc777def555",
            "034",
            "nothing here",
            "",
            "99887766554",
            "ção777",
            "1234",
        ];

        for line in lines {
            assert_eq!(
                resolver.resolve(line, &IdentifierStrategy::Substring),
                naive_scan(&r, line),
                "line {:?}",
                line
            );
        }
    }

    #[test]
    fn test_fixed_tail_requires_roster_membership() {
        let r = roster(&["00112233445"]);
        let resolver = IdentifierResolver::new(&r);
        let strategy = IdentifierStrategy::FixedTail { length: 11 };

        assert_eq!(
            resolver.resolve("00000001161020260758000112233445", &strategy),
            Some("00112233445")
        );
        assert_eq!(resolver.resolve("0000000116102026075899999999999", &strategy), None);
        assert_eq!(resolver.resolve("short", &strategy), None);
    }

    #[test]
    fn test_fixed_tail_ignores_identifier_elsewhere_in_line() {
        let r = roster(&["00112233445"]);
        let resolver = IdentifierResolver::new(&r);
        let strategy = IdentifierStrategy::FixedTail { length: 11 };
        assert_eq!(resolver.resolve("00112233445 trailing junk", &strategy), None);
    }

    #[test]
    fn test_empty_roster_resolves_nothing() {
        let r = roster(&[]);
        let resolver = IdentifierResolver::new(&r);
        assert_eq!(resolver.resolve("00112233445", &IdentifierStrategy::Substring), None);
    }
}
