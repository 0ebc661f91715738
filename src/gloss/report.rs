/*!
 * Summary of one realignment run.
 */

use std::fmt;

/// A record left untouched because it lacked some configured tiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteRecord {
    /// Line number of the record's first tier
    pub line_number: usize,
    /// Markers the record did carry, in order
    pub markers: Vec<String>,
    /// Configured markers it was missing
    pub missing: Vec<String>,
}

/// Counts gathered while realigning a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealignReport {
    pub records_found: usize,
    pub records_realigned: usize,
    /// Records whose tiers carry no field at all, emitted as they were
    pub records_without_fields: usize,
    pub incomplete: Vec<IncompleteRecord>,
    pub tier_lines: usize,
    pub passthrough_lines: usize,
    /// Tier lines whose text differs from the input
    pub lines_changed: usize,
}

impl RealignReport {
    pub fn records_skipped(&self) -> usize {
        self.incomplete.len()
    }

    /// Whether realigning changed anything
    pub fn has_changes(&self) -> bool {
        self.lines_changed > 0
    }
}

impl fmt::Display for RealignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} record(s) detected, {} realigned, {} without fields, {} left unchanged as incomplete; {} of {} tier line(s) changed",
            self.records_found,
            self.records_realigned,
            self.records_without_fields,
            self.records_skipped(),
            self.lines_changed,
            self.tier_lines
        )
    }
}

impl fmt::Display for IncompleteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record at line {} ({}) is missing {}",
            self.line_number,
            self.markers.join(" "),
            self.missing.join(" ")
        )
    }
}
