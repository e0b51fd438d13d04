//! Line-level edit operations.
//!
//! These produce a fresh body string plus the caret/selection to apply
//! against it; the input body is never modified in place.

use tracing::warn;

use crate::index::RowIndex;
use crate::position::{self, RowCol, Selection};

/// Direction for line-level operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Result of a line-level edit: the new body and the caret state to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub body: String,
    /// Spans the duplicated row in the new body.
    pub selection: Selection,
    /// 1-based caret line in the new body.
    pub caret_line: usize,
}

/// Duplicate the line at `current_line` (1-based, matching the gutter's
/// display numbering).
///
/// The clone is inserted immediately after the source row regardless of
/// direction; the direction only decides where the caret lands, `Down`
/// following the clone and `Up` staying on the original. The resulting
/// selection spans the full row under the new caret line.
///
/// An out-of-range `current_line` clamps to `1..=row_count` with a warning
/// rather than failing; this runs from a keybind handler and must not
/// interrupt editing.
pub fn duplicate_line(
    body: &str,
    index: &RowIndex,
    current_line: usize,
    direction: Direction,
) -> LineEdit {
    let line = match position::check_line(current_line, index) {
        Ok(line) => line,
        Err(err) => {
            let clamped = current_line.clamp(1, index.row_count());
            warn!(%err, clamped, "clamping duplicate target");
            clamped
        }
    };

    let mut parts = body.split('\n').collect::<Vec<_>>();
    let cloned = parts[line - 1];
    parts.insert(line, cloned);
    let new_body = parts.join("\n");
    let new_index = RowIndex::build(&new_body);

    let caret_line = match direction {
        Direction::Down => line + 1,
        Direction::Up => line.saturating_sub(1).max(1),
    }
    .min(new_index.row_count());

    let row = caret_line - 1;
    let selection = Selection {
        start: position::to_offset_clamped(RowCol::new(row, 0), &new_index),
        end: position::to_offset_clamped(RowCol::new(row, new_index.row_len(row)), &new_index),
    };

    LineEdit {
        body: new_body,
        selection,
        caret_line,
    }
}
