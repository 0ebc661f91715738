/*!
 * Tier line tokenizer.
 *
 * Splits a tier line into its marker and its fields. Padding between fields
 * is thrown away; the realigner regenerates it.
 */

use log::trace;

use super::model::{Field, Tier};
use super::width::WidthTable;
use crate::errors::RealignError;

/// Recognizes tier markers and splits tier lines into fields
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    // longest first, so `\tx` wins over `\t`
    markers: Vec<&'a str>,
    delimiter: &'a str,
    widths: &'a WidthTable,
}

impl<'a> Tokenizer<'a> {
    pub fn new(markers: &'a [String], delimiter: &'a str, widths: &'a WidthTable) -> Self {
        let mut markers: Vec<&str> = markers.iter().map(String::as_str).collect();
        markers.sort_by(|a, b| b.len().cmp(&a.len()));
        Self {
            markers,
            delimiter,
            widths,
        }
    }

    /// Return the tier marker that `line` starts with, if any.
    ///
    /// The marker must be followed by end of line, a space or tab, or the
    /// delimiter; a marker glued to other text (including a no-break space)
    /// is not a tier marker.
    pub fn match_marker(&self, line: &str) -> Option<&'a str> {
        self.markers.iter().copied().find(|marker| {
            line.strip_prefix(marker).is_some_and(|rest| {
                rest.is_empty()
                    || rest.starts_with(is_padding)
                    || rest.starts_with(self.delimiter)
            })
        })
    }

    /// Split a tier line into a [`Tier`].
    pub fn tokenize(&self, line: &str, line_number: usize, marker: &str) -> Result<Tier, RealignError> {
        let rest = line.strip_prefix(marker).ok_or_else(|| {
            RealignError::malformed(line_number, line, format!("expected tier marker {:?}", marker))
        })?;

        let content = self.strip_delimiter(rest).ok_or_else(|| {
            RealignError::malformed(
                line_number,
                line,
                format!(
                    "tier marker {:?} is not followed by delimiter {:?}",
                    marker, self.delimiter
                ),
            )
        })?;

        let fields: Vec<Field> = split_fields(content)
            .map(|word| Field::measure(word, self.widths))
            .collect();

        trace!("Line {}: {} with {} field(s)", line_number, marker, fields.len());

        Ok(Tier {
            marker: marker.to_string(),
            marker_width: self.widths.str_width(marker),
            line_number,
            raw: line.to_string(),
            fields,
        })
    }

    fn strip_delimiter<'l>(&self, rest: &'l str) -> Option<&'l str> {
        if rest.chars().all(is_padding) {
            return Some("");
        }
        if let Some(content) = rest.strip_prefix(self.delimiter) {
            return Some(content);
        }
        // A whitespace delimiter tolerates other padding, e.g. a tab
        let delimiter_is_blank = self.delimiter.chars().all(char::is_whitespace);
        if delimiter_is_blank && rest.starts_with(is_padding) {
            return Some(rest);
        }
        None
    }
}

fn is_padding(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split field content on runs of spaces and tabs
pub fn split_fields(content: &str) -> impl Iterator<Item = &str> {
    content.split(is_padding).filter(|word| !word.is_empty())
}
