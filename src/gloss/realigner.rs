/*!
 * Renders a record's tiers with regenerated padding.
 */

use super::columns::ColumnLayout;
use super::model::{Record, Tier};
use crate::errors::RealignError;

/// Re-emits tier lines so every column starts at the same display column
#[derive(Debug, Clone)]
pub struct Realigner<'a> {
    delimiter: &'a str,
    spacing: usize,
}

impl<'a> Realigner<'a> {
    pub fn new(delimiter: &'a str, spacing: usize) -> Self {
        Self { delimiter, spacing }
    }

    /// Render every tier of `record`, one line per tier, in tier order.
    pub fn render(&self, record: &Record, layout: &ColumnLayout) -> Result<Vec<String>, RealignError> {
        record
            .tiers
            .iter()
            .map(|tier| self.render_tier(tier, layout))
            .collect()
    }

    /// Render a single tier against the record's layout.
    pub fn render_tier(&self, tier: &Tier, layout: &ColumnLayout) -> Result<String, RealignError> {
        if tier.field_count() > layout.column_count() {
            return Err(RealignError::InternalInvariant(format!(
                "line {} has {} fields but the layout only has {} columns",
                tier.line_number,
                tier.field_count(),
                layout.column_count()
            )));
        }
        if tier.marker_width > layout.marker_width {
            return Err(RealignError::InternalInvariant(format!(
                "marker {:?} on line {} is wider than the layout's marker column",
                tier.marker, tier.line_number
            )));
        }

        let mut line = tier.marker.clone();
        if tier.is_empty() {
            return Ok(line);
        }

        // delimiter first, then the marker column padding
        line.push_str(self.delimiter);
        push_spaces(&mut line, layout.marker_width - tier.marker_width);

        let last = tier.field_count() - 1;
        for (slot, field) in tier.fields.iter().enumerate() {
            line.push_str(field.text());
            if slot < last {
                let column = layout.widths[slot];
                let padding = column.checked_sub(field.display_width()).ok_or_else(|| {
                    RealignError::InternalInvariant(format!(
                        "field {:?} on line {} is wider than its column ({} > {})",
                        field.text(),
                        tier.line_number,
                        field.display_width(),
                        column
                    ))
                })?;
                push_spaces(&mut line, padding + self.spacing);
            }
        }

        Ok(line)
    }
}

fn push_spaces(line: &mut String, count: usize) {
    line.extend(std::iter::repeat_n(' ', count));
}
