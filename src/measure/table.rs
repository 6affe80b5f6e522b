//! Minimal table layout: resolve column widths, then size rows by their
//! tallest cell. The paginator sees the result as a single opaque box.

use crate::model::{ColumnWidth, TableContent, TextContent};

/// Geometry of a table at a given width. Offsets are relative to the
/// table's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub column_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    /// Stroke width of the grid (0 when borderless).
    pub border: f64,
    pub cell_padding: f64,
}

impl TableLayout {
    /// Lay out `table` in `max_width`, measuring each cell's text with
    /// `measure_text(text, available_width)`.
    pub fn compute<F>(table: &TableContent, max_width: f64, measure_text: F) -> Self
    where
        F: Fn(&TextContent, f64) -> f64,
    {
        let border = table.border.width();
        let inner_width = (max_width - 2.0 * border).max(0.0);
        let column_widths = resolve_column_widths(&table.columns, inner_width, table.column_count());
        let pad = table.cell_padding;

        let row_heights = table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&column_widths)
                    .map(|(cell, &col_w)| {
                        let text_width = (col_w - 2.0 * pad).max(0.0);
                        measure_text(&cell.text, text_width) + 2.0 * pad
                    })
                    .fold(0.0f64, f64::max)
            })
            .collect();

        Self {
            column_widths,
            row_heights,
            border,
            cell_padding: pad,
        }
    }

    /// Total height, including the outer border.
    pub fn height(&self) -> f64 {
        self.row_heights.iter().sum::<f64>() + 2.0 * self.border
    }

    /// Left edge of each column.
    pub fn column_offsets(&self) -> Vec<f64> {
        offsets(self.border, &self.column_widths)
    }

    /// Top edge of each row.
    pub fn row_offsets(&self) -> Vec<f64> {
        offsets(self.border, &self.row_heights)
    }
}

fn offsets(start: f64, sizes: &[f64]) -> Vec<f64> {
    sizes
        .iter()
        .scan(start, |acc, &size| {
            let at = *acc;
            *acc += size;
            Some(at)
        })
        .collect()
}

/// Fixed and fractional columns take their share first; Auto columns split
/// what is left. With no definitions every column gets an equal share.
pub fn resolve_column_widths(defs: &[ColumnWidth], available_width: f64, num_cols: usize) -> Vec<f64> {
    if defs.is_empty() {
        if num_cols == 0 {
            return Vec::new();
        }
        return vec![available_width / num_cols as f64; num_cols];
    }

    let mut widths = Vec::new();
    let mut remaining = available_width;
    let mut auto_count = 0;

    for def in defs {
        match def {
            ColumnWidth::Fixed(w) => {
                widths.push(*w);
                remaining -= w;
            }
            ColumnWidth::Fraction(f) => {
                let w = available_width * f;
                widths.push(w);
                remaining -= w;
            }
            ColumnWidth::Auto => {
                widths.push(0.0);
                auto_count += 1;
            }
        }
    }

    if auto_count > 0 {
        let auto_width = remaining.max(0.0) / auto_count as f64;
        for (i, def) in defs.iter().enumerate() {
            if matches!(def, ColumnWidth::Auto) {
                widths[i] = auto_width;
            }
        }
    }

    // Cells beyond the defined columns share nothing; give them zero width
    widths.resize(widths.len().max(num_cols), 0.0);
    widths
}
