//! Shared edit state for the two collaborating surfaces.
//!
//! The raw input surface and the styled render surface stay in sync by
//! sharing one body and one selection, both owned here. Whichever surface
//! changed last wins: input events land as flat offsets directly, pointer
//! and native-selection events are translated through the locator.
//!
//! Ordering invariant: the row index is rebuilt before any translator or
//! locator call that depends on it. Every mutation in this module reindexes
//! before returning, so the stored index is never stale.

use ropey::Rope;

use crate::config::LayoutMetrics;
use crate::gutter::{self, LineLabel};
use crate::index::RowIndex;
use crate::locate::{self, PointerPos, SelectionAnchor, TextMeasurer};
use crate::mutate::{self, Direction};
use crate::position::Selection;

/// A text body plus the caret/selection state shared by its surfaces.
///
/// The body is rope-backed for cheap edits; engine calls operate on string
/// snapshots and byte offsets. All offsets handed in are clamped to the
/// body's bounds, so no event can push the session into an invalid state.
pub struct EditSession {
    rope: Rope,
    index: RowIndex,
    selection: Selection,
    dirty: bool,
}

impl EditSession {
    /// Create a session over an initial body, caret at offset 0.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            index: RowIndex::build(text),
            selection: Selection::caret(0),
            dirty: false,
        }
    }

    /// Create an empty session.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full body text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// The current row index, always in sync with the body.
    pub const fn index(&self) -> &RowIndex {
        &self.index
    }

    /// The current selection (caret when collapsed, unnormalized otherwise).
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Number of rows in the body.
    pub fn row_count(&self) -> usize {
        self.index.row_count()
    }

    /// 1-based line of the selection focus, for the gutter highlight.
    pub fn current_line(&self) -> usize {
        self.index.find_row(self.selection.end) + 1
    }

    /// Whether the body has been modified since creation or the last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the body as clean (e.g. after the host persists it).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Gutter labels for the current body and caret line.
    pub fn line_labels(&self, metrics: &LayoutMetrics) -> Vec<LineLabel> {
        gutter::line_labels(self.row_count(), self.current_line(), metrics)
    }

    // --- Events from the input surface ---

    /// Raw text-change event: replace the whole body.
    ///
    /// The selection carries over, clamped to the new body's bounds.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.reindex();
        self.selection = self.clamped(self.selection);
        self.dirty = true;
    }

    /// Native caret/selection change from the input surface, already in
    /// flat offsets. Clamped, never rejected.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = self.clamped(selection);
    }

    /// Insert a character at the caret, replacing any active selection.
    pub fn insert_char(&mut self, ch: char) {
        let start = self.delete_selected_span();
        let at = self.rope.byte_to_char(start);
        self.rope.insert_char(at, ch);
        self.reindex();
        self.selection = Selection::caret(start + ch.len_utf8());
        self.dirty = true;
    }

    /// Insert a string at the caret, replacing any active selection.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let start = self.delete_selected_span();
        let at = self.rope.byte_to_char(start);
        self.rope.insert(at, s);
        self.reindex();
        self.selection = Selection::caret(start + s.len());
        self.dirty = true;
    }

    /// Delete backwards from the caret (Backspace), or delete the active
    /// selection. Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if !self.selection.is_caret() {
            let start = self.delete_selected_span();
            self.reindex();
            self.selection = Selection::caret(start);
            self.dirty = true;
            return true;
        }
        let caret = self.selection.start;
        if caret == 0 {
            return false;
        }
        let at = self.rope.byte_to_char(caret);
        let prev_byte = self.rope.char_to_byte(at - 1);
        self.rope.remove(at - 1..at);
        self.reindex();
        self.selection = Selection::caret(prev_byte);
        self.dirty = true;
        true
    }

    /// Delete forwards from the caret (Delete key), or delete the active
    /// selection. Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if !self.selection.is_caret() {
            return self.delete_back();
        }
        let caret = self.selection.start;
        if caret >= self.index.body_len() {
            return false;
        }
        let at = self.rope.byte_to_char(caret);
        self.rope.remove(at..=at);
        self.reindex();
        self.selection = Selection::caret(caret);
        self.dirty = true;
        true
    }

    // --- Events from the render surface ---

    /// Pointer click: place the caret under the pointer (pixel-width mode).
    pub fn click(
        &mut self,
        pointer: PointerPos,
        scroll_offset: f64,
        metrics: &LayoutMetrics,
        measurer: &dyn TextMeasurer,
    ) {
        let body = self.text();
        let offset = locate::offset_at_pointer(
            &body,
            &self.index,
            pointer,
            scroll_offset,
            metrics,
            measurer,
        );
        self.selection = Selection::caret(offset);
    }

    /// Native selection change: resolve anchor and focus independently
    /// (selection-exact mode) and adopt the resulting range as-is.
    pub fn select_native(&mut self, anchor: SelectionAnchor, focus: SelectionAnchor) {
        self.selection = locate::selection_from_anchors(anchor, focus, &self.index);
    }

    // --- Keybinds ---

    /// Duplicate the caret's line, moving the caret per `direction` and
    /// selecting the full row it lands on.
    pub fn duplicate_line(&mut self, direction: Direction) {
        let body = self.text();
        let edit = mutate::duplicate_line(&body, &self.index, self.current_line(), direction);
        self.rope = Rope::from_str(&edit.body);
        self.reindex();
        self.selection = edit.selection;
        self.dirty = true;
    }

    // --- Private helpers ---

    /// Rebuild the row index from the current rope. Must run after every
    /// rope mutation and before the selection is recomputed.
    fn reindex(&mut self) {
        let body = self.rope.to_string();
        self.index = RowIndex::build(&body);
    }

    /// Remove the selected span if there is one; returns the byte offset
    /// where subsequent insertion should happen. Does not reindex.
    fn delete_selected_span(&mut self) -> usize {
        let (start, end) = self.selection.ordered();
        if start != end {
            let from = self.rope.byte_to_char(start);
            let to = self.rope.byte_to_char(end);
            self.rope.remove(from..to);
        }
        start
    }

    fn clamped(&self, selection: Selection) -> Selection {
        let len = self.index.body_len();
        Selection {
            start: selection.start.min(len),
            end: selection.end.min(len),
        }
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field(
                "rope",
                &format_args!("Rope({} rows)", self.index.row_count()),
            )
            .field("selection", &self.selection)
            .field("dirty", &self.dirty)
            .finish()
    }
}
