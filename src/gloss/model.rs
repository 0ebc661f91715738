/*!
 * Core data types of the realignment engine.
 *
 * A document is a sequence of segments: records of aligned tier lines, and
 * passthrough lines that are copied to the output untouched.
 */

use std::fmt;

use super::width::{Codepoint, WidthTable};

/// One word of a tier line, measured in display columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    text: String,
    codepoints: Vec<Codepoint>,
    width: usize,
}

impl Field {
    /// Measure `text` against the given width table
    pub fn measure(text: &str, widths: &WidthTable) -> Self {
        let codepoints = widths.codepoints(text);
        let width = codepoints.iter().map(Codepoint::width).sum();
        Self {
            text: text.to_string(),
            codepoints,
            width,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn codepoints(&self) -> &[Codepoint] {
        &self.codepoints
    }

    /// Number of display columns the field occupies
    pub fn display_width(&self) -> usize {
        self.width
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One physical tier line: marker plus its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    /// Marker text exactly as it appeared, e.g. `\gl`
    pub marker: String,
    /// Display width of the marker
    pub marker_width: usize,
    /// 1-based line number in the source document
    pub line_number: usize,
    /// Original line text, used when a record is passed through unchanged
    pub raw: String,
    pub fields: Vec<Field>,
}

impl Tier {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Consecutive tier lines describing one transcribed unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub tiers: Vec<Tier>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tier: Tier) {
        self.tiers.push(tier);
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Line number of the first tier, if any
    pub fn first_line(&self) -> Option<usize> {
        self.tiers.first().map(|t| t.line_number)
    }

    /// Largest field count over all tiers
    pub fn column_count(&self) -> usize {
        self.tiers.iter().map(Tier::field_count).max().unwrap_or(0)
    }

    pub fn markers(&self) -> Vec<&str> {
        self.tiers.iter().map(|t| t.marker.as_str()).collect()
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.tiers.iter().any(|t| t.marker == marker)
    }

    /// Original lines of the record, unchanged
    pub fn raw_lines(&self) -> Vec<String> {
        self.tiers.iter().map(|t| t.raw.clone()).collect()
    }
}

/// Piece of a scanned document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Tier lines to realign
    Record(Record),
    /// Line kept verbatim (blank lines, headers, free translations, ...)
    Passthrough(String),
}

/// A scanned input document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub segments: Vec<Segment>,
    /// Terminator of each input line in order: `"\n"`, `"\r\n"`, or `""`
    /// for a last line without one
    pub line_endings: Vec<&'static str>,
}

impl Document {
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Record(record) => Some(record),
            Segment::Passthrough(_) => None,
        })
    }

    pub fn passthrough_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Passthrough(_)))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.line_endings.len()
    }

    /// Whether the input ended with a line terminator
    pub fn trailing_newline(&self) -> bool {
        self.line_endings.last().is_some_and(|ending| !ending.is_empty())
    }

    /// Join rendered lines, giving each the terminator its input line had.
    ///
    /// `lines` must hold one entry per input line.
    pub fn assemble(&self, lines: &[String]) -> String {
        let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
        for (line, ending) in lines.iter().zip(&self.line_endings) {
            out.push_str(line);
            out.push_str(ending);
        }
        out
    }
}
