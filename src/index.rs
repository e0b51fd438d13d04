//! Row boundary index over a text body.
//!
//! The [`RowIndex`] is the leaf of the engine: a cumulative table of row-end
//! offsets that every other offset computation is built on. It is a pure
//! function of the body text and is rebuilt on every text change, so lookups
//! against it must be cheap (binary search) rather than re-scanning the body.

/// Cumulative row-boundary table for a text body.
///
/// Entry `i` is the flat byte offset immediately past row `i`'s content,
/// with each newline occupying one slot between rows. For `"ab\ncde\nf"`
/// the table is `[2, 6, 8]`.
///
/// Invariants (hold for every body, including the empty string):
/// - entries are non-decreasing;
/// - entry count equals row count (never zero — an empty body is one empty row);
/// - the last entry equals the body length;
/// - `entry[i] - entry[i-1] - 1` is the byte length of row `i` for `i > 0`,
///   and `entry[0]` is the byte length of row `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIndex {
    ends: Vec<usize>,
}

impl RowIndex {
    /// Build the index for a body. Total over all strings; an empty body
    /// yields a single empty row with index `[0]`.
    pub fn build(body: &str) -> Self {
        let mut ends = Vec::new();
        let mut cumulative = 0;
        for (i, row) in body.split('\n').enumerate() {
            if i > 0 {
                cumulative += 1;
            }
            cumulative += row.len();
            ends.push(cumulative);
        }
        Self { ends }
    }

    /// Number of rows in the indexed body. Always at least 1.
    pub fn row_count(&self) -> usize {
        self.ends.len()
    }

    /// Flat offset immediately past `row`'s content.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count()`.
    pub fn end_of(&self, row: usize) -> usize {
        self.ends[row]
    }

    /// Flat offset of the first byte of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count()`.
    pub fn start_of(&self, row: usize) -> usize {
        if row == 0 { 0 } else { self.ends[row - 1] + 1 }
    }

    /// Byte length of `row`, excluding its trailing newline.
    ///
    /// # Panics
    ///
    /// Panics if `row >= row_count()`.
    pub fn row_len(&self, row: usize) -> usize {
        self.ends[row] - self.start_of(row)
    }

    /// Total byte length of the indexed body.
    pub fn body_len(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    /// The row that owns a flat offset, via binary search.
    ///
    /// An offset equal to a row's boundary belongs to the row ending there,
    /// not the next row: a caret sitting exactly on a newline highlights the
    /// row before it. Offsets past the end of the body clamp to the last row.
    pub fn find_row(&self, offset: usize) -> usize {
        let row = self.ends.partition_point(|&end| end < offset);
        row.min(self.ends.len() - 1)
    }
}
