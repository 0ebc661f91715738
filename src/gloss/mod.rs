/*!
 * Interlinear gloss realignment engine.
 *
 * Toolbox aligns the words of interlinear tiers by padding with spaces, but
 * measures words by codepoint count. Words with combining diacritics come
 * out too short and every column after them drifts. This engine re-pads the
 * tiers by display width.
 *
 * Pipeline, per document:
 * - `scanner`: split into records and passthrough lines
 * - `tokenizer`: split each tier line into marker and fields
 * - `columns`: compute column widths per record
 * - `realigner`: re-emit each tier with regenerated padding
 *
 * The engine is pure: no I/O, no shared state, deterministic output.
 */

pub mod columns;
pub mod model;
pub mod realigner;
pub mod report;
pub mod scanner;
pub mod tokenizer;
pub mod width;

use log::{debug, trace};

use crate::app_config::Config;
use crate::errors::RealignError;

pub use columns::{ColumnLayout, required_widths};
pub use model::{Document, Field, Record, Segment, Tier};
pub use realigner::Realigner;
pub use report::{IncompleteRecord, RealignReport};
pub use scanner::RecordScanner;
pub use tokenizer::Tokenizer;
pub use width::{Codepoint, CodepointClass, CodepointRange, WidthTable};

/// Realign every record of `text`.
///
/// Either the whole document is returned realigned or an error is returned;
/// there is no partial output.
pub fn realign(text: &str, config: &Config) -> Result<String, RealignError> {
    realign_with_report(text, config).map(|(output, _)| output)
}

/// Realign every record of `text` and report what was done.
pub fn realign_with_report(text: &str, config: &Config) -> Result<(String, RealignReport), RealignError> {
    config.validate()?;

    let widths = config.width_table();
    let document = RecordScanner::new(&config.tiers, &widths).scan(text)?;
    let realigner = Realigner::new(&config.tiers.marker_delimiter, config.layout.spacing);

    let mut report = RealignReport::default();
    let mut lines = Vec::new();

    for segment in &document.segments {
        let record = match segment {
            Segment::Passthrough(line) => {
                report.passthrough_lines += 1;
                lines.push(line.clone());
                continue;
            }
            Segment::Record(record) => record,
        };

        report.records_found += 1;
        report.tier_lines += record.tiers.len();

        if config.tiers.require_complete_records {
            if let Some(incomplete) = find_missing_tiers(record, &config.tiers.markers) {
                debug!("Leaving {}", incomplete);
                report.incomplete.push(incomplete);
                lines.extend(record.raw_lines());
                continue;
            }
        }

        let layout = required_widths(record);
        if layout.is_empty() {
            trace!("Record at line {:?} has no fields", record.first_line());
            lines.extend(record.raw_lines());
            report.records_without_fields += 1;
            continue;
        }

        let rendered = realigner.render(record, &layout)?;
        report.lines_changed += rendered
            .iter()
            .zip(&record.tiers)
            .filter(|(line, tier)| **line != tier.raw)
            .count();
        report.records_realigned += 1;
        lines.extend(rendered);
    }

    if lines.len() != document.line_count() {
        return Err(RealignError::InternalInvariant(format!(
            "rendered {} lines for {} input lines",
            lines.len(),
            document.line_count()
        )));
    }

    debug!("{}", report);
    Ok((document.assemble(&lines), report))
}

fn find_missing_tiers(record: &Record, markers: &[String]) -> Option<IncompleteRecord> {
    let missing: Vec<String> = markers
        .iter()
        .filter(|m| !record.has_marker(m))
        .cloned()
        .collect();
    if missing.is_empty() {
        return None;
    }
    Some(IncompleteRecord {
        line_number: record.first_line().unwrap_or(0),
        markers: record.markers().into_iter().map(str::to_string).collect(),
        missing,
    })
}
