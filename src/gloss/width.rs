/*!
 * Display width of codepoints.
 *
 * Toolbox pads interlinear columns by counting codepoints, which overcounts
 * every combining diacritic by one. Widths here follow what a terminal or a
 * monospaced print font actually shows:
 * - combining marks take no column of their own
 * - East Asian Wide and Fullwidth characters take two columns
 * - control and invisible format characters take none
 * - everything else takes one
 */

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::errors::ConfigError;

// @const: "U+0300" or "U+0300..U+036F"
static RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)U\+([0-9A-F]{1,6})(?:\s*\.\.\s*U\+([0-9A-F]{1,6}))?$").unwrap()
});

/// Width-relevant classification of a single codepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodepointClass {
    /// Single-width character carrying one or more combining marks
    Base,
    /// Nonspacing or enclosing mark attached to the preceding character
    CombiningMark,
    /// East Asian Wide or Fullwidth character
    Wide,
    /// Control or invisible format character
    ZeroWidthOther,
    /// Ordinary single-width character
    Plain,
}

impl CodepointClass {
    /// Number of display columns contributed by this class
    pub fn width(self) -> usize {
        match self {
            Self::Base | Self::Plain => 1,
            Self::Wide => 2,
            Self::CombiningMark | Self::ZeroWidthOther => 0,
        }
    }
}

/// A single Unicode scalar value with its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codepoint {
    pub ch: char,
    pub class: CodepointClass,
}

impl Codepoint {
    pub fn width(&self) -> usize {
        self.class.width()
    }
}

/// Inclusive range of codepoints used for width overrides.
///
/// Serialized as `"U+E000..U+E0FF"`, or `"U+0301"` for a single codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
}

impl CodepointRange {
    pub fn new(start: u32, end: u32) -> Result<Self, ConfigError> {
        let input = format!("U+{:04X}..U+{:04X}", start, end);
        if start > end {
            return Err(ConfigError::InvalidRange {
                input,
                reason: "start is greater than end".to_string(),
            });
        }
        if end > 0x10FFFF {
            return Err(ConfigError::InvalidRange {
                input,
                reason: "beyond the last Unicode codepoint U+10FFFF".to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&(c as u32))
    }
}

impl FromStr for CodepointRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = RANGE_REGEX
            .captures(s.trim())
            .ok_or_else(|| ConfigError::InvalidRange {
                input: s.to_string(),
                reason: "expected U+XXXX or U+XXXX..U+YYYY".to_string(),
            })?;

        let parse_hex = |text: &str| {
            u32::from_str_radix(text, 16).map_err(|e| ConfigError::InvalidRange {
                input: s.to_string(),
                reason: e.to_string(),
            })
        };

        let start = parse_hex(&captures[1])?;
        let end = match captures.get(2) {
            Some(end) => parse_hex(end.as_str())?,
            None => start,
        };

        Self::new(start, end).map_err(|e| match e {
            ConfigError::InvalidRange { reason, .. } => ConfigError::InvalidRange {
                input: s.to_string(),
                reason,
            },
            other => other,
        })
    }
}

impl TryFrom<String> for CodepointRange {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CodepointRange> for String {
    fn from(range: CodepointRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "U+{:04X}", self.start)
        } else {
            write!(f, "U+{:04X}..U+{:04X}", self.start, self.end)
        }
    }
}

/// Codepoint classifier: default Unicode tables plus configured overrides
#[derive(Debug, Clone, Default)]
pub struct WidthTable {
    combining_overrides: Vec<CodepointRange>,
    wide_overrides: Vec<CodepointRange>,
}

impl WidthTable {
    pub fn new(combining_overrides: Vec<CodepointRange>, wide_overrides: Vec<CodepointRange>) -> Self {
        Self {
            combining_overrides,
            wide_overrides,
        }
    }

    /// Classify a codepoint on its own, without looking at its neighbours.
    ///
    /// Never returns `Base`; that depends on what follows the character and
    /// is decided by [`WidthTable::codepoints`].
    pub fn classify(&self, c: char) -> CodepointClass {
        if self.combining_overrides.iter().any(|r| r.contains(c)) {
            return CodepointClass::CombiningMark;
        }
        if self.wide_overrides.iter().any(|r| r.contains(c)) {
            return CodepointClass::Wide;
        }
        if c.is_control() || is_invisible_format(c) {
            return CodepointClass::ZeroWidthOther;
        }

        match c.width() {
            Some(2..) => CodepointClass::Wide,
            Some(1) => CodepointClass::Plain,
            Some(_) if extends_grapheme(c) => CodepointClass::CombiningMark,
            _ => CodepointClass::ZeroWidthOther,
        }
    }

    /// Display width of a single codepoint
    pub fn width(&self, c: char) -> usize {
        self.classify(c).width()
    }

    /// Display width of a whole string
    pub fn str_width(&self, text: &str) -> usize {
        text.chars().map(|c| self.width(c)).sum()
    }

    /// Classify every codepoint of `text`, promoting plain characters that
    /// carry combining marks to `Base`.
    pub fn codepoints(&self, text: &str) -> Vec<Codepoint> {
        let mut codepoints: Vec<Codepoint> = text
            .chars()
            .map(|ch| Codepoint {
                ch,
                class: self.classify(ch),
            })
            .collect();

        for i in 1..codepoints.len() {
            if codepoints[i].class == CodepointClass::CombiningMark
                && codepoints[i - 1].class == CodepointClass::Plain
            {
                codepoints[i - 1].class = CodepointClass::Base;
            }
        }

        codepoints
    }
}

// Format characters with Grapheme_Cluster_Break=Extend that are not marks
fn is_invisible_format(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200F}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}')
}

// A zero-width character is a combining mark when it fuses with a preceding
// letter into a single grapheme cluster.
fn extends_grapheme(c: char) -> bool {
    let mut probe = String::with_capacity(8);
    probe.push('a');
    probe.push(c);
    probe.graphemes(true).count() == 1
}
