//! Line-enumeration labels for the gutter.
//!
//! Presentation-facing: the engine supplies row count and current line, the
//! surface renders the labels at the computed pixel offsets.

use crate::config::LayoutMetrics;

/// One gutter label for a rendered row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLabel {
    /// 1-based display number.
    pub number: usize,
    /// Vertical pixel offset of the label.
    pub y: f64,
    /// Whether this is the caret's line.
    pub highlighted: bool,
}

/// Produce one label per row, aligned to the row boxes the locator assumes.
pub fn line_labels(
    row_count: usize,
    current_line: usize,
    metrics: &LayoutMetrics,
) -> Vec<LineLabel> {
    (0..row_count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let y = i as f64 * metrics.line_height + metrics.padding_top + metrics.label_correction;
            LineLabel {
                number: i + 1,
                y,
                highlighted: i + 1 == current_line,
            }
        })
        .collect()
}
