//! Flat-offset to row/column translation.
//!
//! Offsets are byte indices into the body; columns are byte offsets within a
//! row. Translation in both directions goes through the [`RowIndex`] so that
//! the round-trip law holds exactly: for every valid offset `o`,
//! `to_offset(to_row_col(o)) == o`.

use thiserror::Error;

use crate::index::RowIndex;

/// Zero-based row/column position within a text body.
///
/// `col` ranges over `0..=row_len(row)`: a column equal to the row length is
/// a caret sitting after the row's last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCol {
    pub row: usize,
    pub col: usize,
}

impl RowCol {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A caret or selection as a pair of flat offsets.
///
/// `start == end` is a caret. The pair is deliberately not normalized: a
/// right-to-left drag produces `start > end`, and the consuming surface
/// decides whether it needs anchor/focus or document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// A collapsed selection (caret) at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Whether the selection is collapsed to a caret.
    pub const fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// The selection in document order, for consumers that need a span.
    pub fn ordered(&self) -> (usize, usize) {
        (self.start.min(self.end), self.start.max(self.end))
    }
}

/// Positions the strict translator entry points reject.
///
/// The engine's hot paths never surface these: the locator and mutator clamp
/// to the nearest valid position instead, so no fault reaches a keystroke or
/// pointer handler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    /// A row or column outside the indexed body.
    #[error("position {row}:{col} outside body with {rows} rows")]
    OutOfRange { row: usize, col: usize, rows: usize },

    /// A 1-based line number outside `1..=rows`.
    #[error("line {line} outside valid range 1..={rows}")]
    InvalidLineNumber { line: usize, rows: usize },
}

/// Convert a row/column position to a flat offset.
///
/// # Errors
///
/// Returns [`PositionError::OutOfRange`] if `row` is not a valid row or
/// `col` exceeds the row's length.
pub fn to_offset(pos: RowCol, index: &RowIndex) -> Result<usize, PositionError> {
    if pos.row >= index.row_count() || pos.col > index.row_len(pos.row) {
        return Err(PositionError::OutOfRange {
            row: pos.row,
            col: pos.col,
            rows: index.row_count(),
        });
    }
    Ok(index.start_of(pos.row) + pos.col)
}

/// Convert a row/column position to a flat offset, clamping out-of-range
/// rows and columns to the nearest valid position. Total.
pub fn to_offset_clamped(pos: RowCol, index: &RowIndex) -> usize {
    let row = pos.row.min(index.row_count() - 1);
    let col = pos.col.min(index.row_len(row));
    index.start_of(row) + col
}

/// Convert a flat offset to a row/column position, clamping offsets past
/// the end of the body. Total.
pub fn to_row_col(offset: usize, index: &RowIndex) -> RowCol {
    let offset = offset.min(index.body_len());
    let row = index.find_row(offset);
    RowCol::new(row, offset - index.start_of(row))
}

/// Clamp a flat offset into the indexed body's bounds.
pub fn clamp_offset(offset: usize, index: &RowIndex) -> usize {
    offset.min(index.body_len())
}

/// Validate a 1-based display line number against the indexed body.
///
/// # Errors
///
/// Returns [`PositionError::InvalidLineNumber`] if `line` is outside
/// `1..=row_count`.
pub fn check_line(line: usize, index: &RowIndex) -> Result<usize, PositionError> {
    let rows = index.row_count();
    if (1..=rows).contains(&line) {
        Ok(line)
    } else {
        Err(PositionError::InvalidLineNumber { line, rows })
    }
}
