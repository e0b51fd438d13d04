//! Pointer and native-selection resolution into flat offsets.
//!
//! Two horizontal modes exist for two different input surfaces. The
//! selection-exact mode works from native selection anchors and is
//! authoritative wherever both are available; the pixel-width mode walks
//! measured glyph widths and is an approximation used only for caret
//! placement on the plain-text surface, never for text mutation.
//!
//! Every function here is total: out-of-bounds pointers clamp to the nearest
//! valid row or column, because this sits on the hot path of every pointer
//! event and must never interrupt the surface.

mod measure;

pub use measure::{FixedWidthMeasurer, MonospaceMeasurer, TextMeasurer};

use tracing::trace;

use crate::config::LayoutMetrics;
use crate::index::RowIndex;
use crate::position::{self, RowCol, Selection};

/// A pointer position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One endpoint of a native selection, as reported by the render surface.
///
/// The surface tags each row container with its row number; the selection
/// endpoint lands in a text node nested somewhere under that container, so
/// it arrives as the node's local offset plus the node's total length rather
/// than a position within the row's full text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionAnchor {
    /// Row container the endpoint's node sits under.
    pub row: usize,
    /// Offset of the endpoint within its text node.
    pub offset_in_node: usize,
    /// Total length of that text node.
    pub node_len: usize,
}

impl SelectionAnchor {
    pub const fn new(row: usize, offset_in_node: usize, node_len: usize) -> Self {
        Self {
            row,
            offset_in_node,
            node_len,
        }
    }
}

/// Resolve the row under a pointer Y coordinate.
///
/// `ceil` of the adjusted Y over the line height gives a 1-based line
/// number; anything above the first row clamps to row 0 and anything below
/// the last row clamps to the last row.
pub fn row_at_y(y: f64, scroll_offset: f64, index: &RowIndex, metrics: &LayoutMetrics) -> usize {
    let adjusted = y - metrics.padding_top + scroll_offset - metrics.container_top;
    let line = (adjusted / metrics.line_height).ceil();
    if line < 1.0 {
        trace!(y, "pointer above first row, clamping to row 0");
        return 0;
    }
    // Finite by construction: line_height is a positive host-supplied pixel value.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let line = line as usize;
    if line > index.row_count() {
        trace!(y, line, "pointer below last row, clamping");
        return index.row_count() - 1;
    }
    line - 1
}

/// Resolve the column under a pointer X coordinate by accumulating measured
/// glyph widths across the row. Returns a byte offset within the row.
///
/// The column is the index of the first character whose accumulated width
/// passes the pointer, so a click anywhere inside a glyph places the caret
/// before it. Clicks past the end of the row clamp to the row length.
pub fn col_at_x(
    row_text: &str,
    x: f64,
    metrics: &LayoutMetrics,
    measurer: &dyn TextMeasurer,
) -> usize {
    let target = x - metrics.left_margin;
    if target <= 0.0 {
        return 0;
    }
    let mut accumulated = 0.0;
    for (byte_idx, ch) in row_text.char_indices() {
        accumulated += measurer.measure(ch);
        if accumulated > target {
            return byte_idx;
        }
    }
    row_text.len()
}

/// Flat offset of a native-selection endpoint.
///
/// `index.end_of(row)` marks the end of the row, not the start, so the
/// node's own length is subtracted before adding back the local offset.
/// The subtraction saturates at 0 per the clamp policy.
pub fn anchor_offset(anchor: SelectionAnchor, index: &RowIndex) -> usize {
    let row = anchor.row.min(index.row_count() - 1);
    let offset = (index.end_of(row) + anchor.offset_in_node).saturating_sub(anchor.node_len);
    position::clamp_offset(offset, index)
}

/// Resolve a pointer-driven native selection change into a selection range.
///
/// Anchor and focus are located independently; the result is not normalized,
/// so a right-to-left drag yields `start > end`.
pub fn selection_from_anchors(
    anchor: SelectionAnchor,
    focus: SelectionAnchor,
    index: &RowIndex,
) -> Selection {
    Selection {
        start: anchor_offset(anchor, index),
        end: anchor_offset(focus, index),
    }
}

/// Resolve a pointer position into a flat offset (pixel-width mode).
pub fn offset_at_pointer(
    body: &str,
    index: &RowIndex,
    pointer: PointerPos,
    scroll_offset: f64,
    metrics: &LayoutMetrics,
    measurer: &dyn TextMeasurer,
) -> usize {
    let row = row_at_y(pointer.y, scroll_offset, index, metrics);
    let row_text = &body[index.start_of(row)..index.end_of(row)];
    let col = col_at_x(row_text, pointer.x, metrics, measurer);
    position::to_offset_clamped(RowCol::new(row, col), index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> LayoutMetrics {
        LayoutMetrics {
            line_height: 20.0,
            padding_top: 10.0,
            left_margin: 5.0,
            container_top: 0.0,
            label_correction: 0.0,
        }
    }

    // --- Vertical resolution ---

    #[test]
    fn test_row_at_y_first_row() {
        let index = RowIndex::build("ab\ncde\nf");
        // Middle of the first line box: 10 < y <= 30.
        assert_eq!(row_at_y(15.0, 0.0, &index, &metrics()), 0);
        assert_eq!(row_at_y(30.0, 0.0, &index, &metrics()), 0);
    }

    #[test]
    fn test_row_at_y_second_row() {
        let index = RowIndex::build("ab\ncde\nf");
        assert_eq!(row_at_y(31.0, 0.0, &index, &metrics()), 1);
        assert_eq!(row_at_y(50.0, 0.0, &index, &metrics()), 1);
    }

    #[test]
    fn test_row_at_y_clamps_above_to_first_row() {
        let index = RowIndex::build("ab\ncde\nf");
        assert_eq!(row_at_y(-100.0, 0.0, &index, &metrics()), 0);
        assert_eq!(row_at_y(3.0, 0.0, &index, &metrics()), 0);
    }

    #[test]
    fn test_row_at_y_clamps_below_to_last_row() {
        let index = RowIndex::build("ab\ncde\nf");
        assert_eq!(row_at_y(10_000.0, 0.0, &index, &metrics()), 2);
    }

    #[test]
    fn test_row_at_y_scroll_offset_shifts_rows() {
        let index = RowIndex::build("ab\ncde\nf");
        // Scrolled down one line, the pointer at the top line box hits row 1.
        assert_eq!(row_at_y(15.0, 20.0, &index, &metrics()), 1);
    }

    #[test]
    fn test_row_at_y_container_top_shifts_origin() {
        let index = RowIndex::build("ab\ncde\nf");
        let shifted = LayoutMetrics {
            container_top: 100.0,
            ..metrics()
        };
        assert_eq!(row_at_y(115.0, 0.0, &index, &shifted), 0);
        assert_eq!(row_at_y(135.0, 0.0, &index, &shifted), 1);
    }

    // --- Horizontal resolution, pixel-width mode ---

    #[test]
    fn test_col_at_x_left_of_margin_is_zero() {
        let measurer = FixedWidthMeasurer::new(8.0);
        assert_eq!(col_at_x("hello", 0.0, &metrics(), &measurer), 0);
        assert_eq!(col_at_x("hello", 5.0, &metrics(), &measurer), 0);
    }

    #[test]
    fn test_col_at_x_inside_glyph_places_before_it() {
        let measurer = FixedWidthMeasurer::new(8.0);
        // 5px margin + 8px per char: x=14 is inside the second glyph.
        assert_eq!(col_at_x("hello", 14.0, &metrics(), &measurer), 1);
    }

    #[test]
    fn test_col_at_x_past_row_end_clamps_to_len() {
        let measurer = FixedWidthMeasurer::new(8.0);
        assert_eq!(col_at_x("hello", 1000.0, &metrics(), &measurer), 5);
    }

    #[test]
    fn test_col_at_x_empty_row_is_zero() {
        let measurer = FixedWidthMeasurer::new(8.0);
        assert_eq!(col_at_x("", 50.0, &metrics(), &measurer), 0);
    }

    #[test]
    fn test_col_at_x_returns_byte_offsets_for_multibyte() {
        let measurer = FixedWidthMeasurer::new(8.0);
        // "éa": 'é' is 2 bytes; a click inside 'a' must land on its byte start.
        assert_eq!(col_at_x("éa", 15.0, &metrics(), &measurer), 2);
    }

    // --- Horizontal resolution, selection-exact mode ---

    #[test]
    fn test_anchor_offset_nested_node() {
        let index = RowIndex::build("ab\ncde\nf");
        // Row 1 ends at 6; a 3-char node with local offset 2 resolves to 5.
        let anchor = SelectionAnchor::new(1, 2, 3);
        assert_eq!(anchor_offset(anchor, &index), 5);
    }

    #[test]
    fn test_anchor_offset_full_row_node() {
        let index = RowIndex::build("ab\ncde\nf");
        // Node spans the whole row: local offset 0 is the row start.
        let anchor = SelectionAnchor::new(1, 0, 3);
        assert_eq!(anchor_offset(anchor, &index), 3);
    }

    #[test]
    fn test_anchor_offset_saturates_at_zero() {
        let index = RowIndex::build("ab");
        let anchor = SelectionAnchor::new(0, 0, 10);
        assert_eq!(anchor_offset(anchor, &index), 0);
    }

    #[test]
    fn test_anchor_offset_clamps_bad_row() {
        let index = RowIndex::build("ab\ncde");
        let anchor = SelectionAnchor::new(9, 1, 3);
        assert_eq!(anchor_offset(anchor, &index), 4);
    }

    #[test]
    fn test_selection_from_anchors_keeps_direction() {
        let index = RowIndex::build("ab\ncde\nf");
        let anchor = SelectionAnchor::new(1, 2, 3);
        let focus = SelectionAnchor::new(0, 1, 2);
        let selection = selection_from_anchors(anchor, focus, &index);
        assert_eq!(selection, Selection { start: 5, end: 1 });
    }

    // --- Full pointer resolution ---

    #[test]
    fn test_offset_at_pointer_combines_axes() {
        let body = "ab\ncde\nf";
        let index = RowIndex::build(body);
        let measurer = FixedWidthMeasurer::new(8.0);
        // Second line box, past the third glyph: row 1, col 3 -> offset 6.
        let pointer = PointerPos::new(40.0, 45.0);
        assert_eq!(
            offset_at_pointer(body, &index, pointer, 0.0, &metrics(), &measurer),
            6
        );
    }

    #[test]
    fn test_offset_at_pointer_origin_is_zero() {
        let body = "ab\ncde\nf";
        let index = RowIndex::build(body);
        let measurer = FixedWidthMeasurer::new(8.0);
        let pointer = PointerPos::new(0.0, 0.0);
        assert_eq!(
            offset_at_pointer(body, &index, pointer, 0.0, &metrics(), &measurer),
            0
        );
    }

    #[test]
    fn test_offset_at_pointer_far_corner_is_body_end() {
        let body = "ab\ncde\nf";
        let index = RowIndex::build(body);
        let measurer = FixedWidthMeasurer::new(8.0);
        let pointer = PointerPos::new(9999.0, 9999.0);
        assert_eq!(
            offset_at_pointer(body, &index, pointer, 0.0, &metrics(), &measurer),
            8
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pointer_resolution_is_idempotent(
                body in "[a-z \n]{1,120}",
                x in 0.0..500.0f64,
                y in -50.0..500.0f64,
            ) {
                let index = RowIndex::build(&body);
                let measurer = FixedWidthMeasurer::new(8.0);
                let pointer = PointerPos::new(x, y);
                let first = offset_at_pointer(&body, &index, pointer, 0.0, &metrics(), &measurer);
                let second = offset_at_pointer(&body, &index, pointer, 0.0, &metrics(), &measurer);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn pointer_resolution_stays_in_bounds(
                body in "[a-z \n]{0,120}",
                x in -100.0..1000.0f64,
                y in -100.0..1000.0f64,
                scroll in 0.0..200.0f64,
            ) {
                let index = RowIndex::build(&body);
                let measurer = FixedWidthMeasurer::new(8.0);
                let pointer = PointerPos::new(x, y);
                let offset =
                    offset_at_pointer(&body, &index, pointer, scroll, &metrics(), &measurer);
                prop_assert!(offset <= body.len());
            }

            #[test]
            fn row_at_y_always_valid(
                body in "[a-z \n]{0,120}",
                y in -500.0..2000.0f64,
            ) {
                let index = RowIndex::build(&body);
                let row = row_at_y(y, 0.0, &index, &metrics());
                prop_assert!(row < index.row_count());
            }
        }
    }
}
