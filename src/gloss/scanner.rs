/*!
 * Record scanner.
 *
 * Walks a document line by line and groups consecutive tier lines into
 * records. The configured marker list is the record cycle: a tier line
 * whose marker does not come strictly later in the cycle than the previous
 * tier line's marker starts a new record. Any other line closes the open
 * record and is kept verbatim.
 */

use log::debug;

use super::model::{Document, Record, Segment};
use super::tokenizer::Tokenizer;
use super::width::WidthTable;
use crate::app_config::TierConfig;
use crate::errors::RealignError;

/// Splits a document into records and passthrough lines
#[derive(Debug, Clone)]
pub struct RecordScanner<'a> {
    tiers: &'a TierConfig,
    tokenizer: Tokenizer<'a>,
}

impl<'a> RecordScanner<'a> {
    pub fn new(tiers: &'a TierConfig, widths: &'a WidthTable) -> Self {
        Self {
            tiers,
            tokenizer: Tokenizer::new(&tiers.markers, &tiers.marker_delimiter, widths),
        }
    }

    /// Scan `text` into a [`Document`].
    ///
    /// Fails on the first tier line that cannot be tokenized.
    pub fn scan(&self, text: &str) -> Result<Document, RealignError> {
        let (lines, line_endings) = split_lines(text);

        let mut segments = Vec::new();
        let mut current = Record::new();
        let mut last_position: Option<usize> = None;

        for (index, line) in lines.into_iter().enumerate() {
            let line_number = index + 1;

            let Some(marker) = self.tokenizer.match_marker(line) else {
                close_record(&mut segments, &mut current);
                last_position = None;
                segments.push(Segment::Passthrough(line.to_string()));
                continue;
            };

            let position = self.tiers.cycle_position(marker).ok_or_else(|| {
                RealignError::InternalInvariant(format!(
                    "matched marker {:?} is not in the configured cycle",
                    marker
                ))
            })?;

            if last_position.is_some_and(|previous| position <= previous) {
                debug!("Line {}: marker {} restarts the cycle", line_number, marker);
                close_record(&mut segments, &mut current);
            }

            current.push(self.tokenizer.tokenize(line, line_number, marker)?);
            last_position = Some(position);
        }
        close_record(&mut segments, &mut current);

        Ok(Document {
            segments,
            line_endings,
        })
    }
}

fn close_record(segments: &mut Vec<Segment>, current: &mut Record) {
    if !current.is_empty() {
        segments.push(Segment::Record(std::mem::take(current)));
    }
}

/// Split text into lines and the terminator of each.
///
/// A line ends at `\n`, taking a directly preceding `\r` with it. A lone `\r`
/// is data. The last line's terminator is `""` when the text does not end
/// with a newline.
fn split_lines(text: &str) -> (Vec<&str>, Vec<&'static str>) {
    let mut lines = Vec::new();
    let mut endings = Vec::new();

    let mut rest = text;
    while !rest.is_empty() {
        let Some(end) = rest.find('\n') else {
            lines.push(rest);
            endings.push("");
            break;
        };
        let line = &rest[..end];
        match line.strip_suffix('\r') {
            Some(stripped) => {
                lines.push(stripped);
                endings.push("\r\n");
            }
            None => {
                lines.push(line);
                endings.push("\n");
            }
        }
        rest = &rest[end + 1..];
    }

    (lines, endings)
}
