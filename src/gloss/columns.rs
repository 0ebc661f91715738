/*!
 * Column model: how wide every column of a record has to be.
 */

use super::model::Record;

/// Column widths of one record, in display columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Width of the widest tier marker; all content starts after it
    pub marker_width: usize,
    /// Width of the widest field at each slot index
    pub widths: Vec<usize>,
}

impl ColumnLayout {
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    /// Display column at which field `index` starts, counting the marker
    /// prefix as `prefix_width` columns.
    pub fn column_start(&self, index: usize, prefix_width: usize, spacing: usize) -> usize {
        prefix_width
            + self.widths[..index.min(self.widths.len())]
                .iter()
                .map(|w| w + spacing)
                .sum::<usize>()
    }
}

/// Compute the column layout a record needs.
///
/// Tiers with fewer fields contribute nothing to the missing columns.
pub fn required_widths(record: &Record) -> ColumnLayout {
    let mut widths = vec![0; record.column_count()];
    for tier in &record.tiers {
        for (slot, field) in tier.fields.iter().enumerate() {
            widths[slot] = widths[slot].max(field.display_width());
        }
    }

    let marker_width = record
        .tiers
        .iter()
        .map(|t| t.marker_width)
        .max()
        .unwrap_or(0);

    ColumnLayout {
        marker_width,
        widths,
    }
}
