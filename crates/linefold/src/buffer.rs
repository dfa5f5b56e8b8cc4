//! The buffer capability consumed by the folding kernel.
//!
//! The kernel holds no copy of document state. Every operation queries a [`LineBuffer`] for fold
//! levels, markers and selections, then issues primitive mutations back to it. Implementations
//! wrap an editing widget, or use the in-memory [`crate::Document`].
//!
//! Lines are 0-based. Positions are character offsets (Unicode scalar values).

use crate::level::FoldLevel;
use crate::markers::{LineMarkers, MarkerKind};

/// A selection range in character offsets, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SelectionRange {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl SelectionRange {
    /// Create a range, ordering the endpoints.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// An empty range (caret) at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

/// Line-oriented buffer primitives.
pub trait LineBuffer {
    /// Number of lines (at least 1).
    fn line_count(&self) -> usize;

    /// Fold level of `line`.
    fn fold_level(&self, line: usize) -> FoldLevel;

    /// Nearest header line enclosing `line`, if any.
    fn fold_parent(&self, line: usize) -> Option<usize>;

    /// Last line of the block headed by `line`.
    ///
    /// `level` overrides the header's own level number. Returns `line` when the block is empty.
    fn last_child(&self, line: usize, level: Option<u32>) -> usize;

    /// Whether the header at `line` is expanded.
    fn is_expanded(&self, line: usize) -> bool;

    /// Set the persisted expanded flag of `line` without touching visibility.
    fn set_expanded(&mut self, line: usize, expanded: bool);

    /// Whether `line` is currently visible.
    fn is_line_visible(&self, line: usize) -> bool;

    /// Make `from..=to` visible.
    fn show_lines(&mut self, from: usize, to: usize);

    /// Make `from..=to` invisible.
    fn hide_lines(&mut self, from: usize, to: usize);

    /// Markers on `line`.
    fn markers(&self, line: usize) -> LineMarkers;

    /// Attach a marker to `line`.
    fn add_marker(&mut self, line: usize, kind: MarkerKind);

    /// Remove a marker from `line`.
    fn delete_marker(&mut self, line: usize, kind: MarkerKind);

    /// Line containing character offset `pos` (clamped to the last line).
    fn line_from_position(&self, pos: usize) -> usize;

    /// Caret offset of the main selection.
    fn caret(&self) -> usize;

    /// All selection ranges; the first is the main selection.
    fn selections(&self) -> Vec<SelectionRange>;

    /// Replace selection `index`.
    fn set_selection(&mut self, index: usize, range: SelectionRange);

    /// Offset of the first non-blank character of `line`.
    fn line_indent_position(&self, line: usize) -> usize;

    /// Rewrite the leading whitespace of `line` to span `columns` columns.
    fn set_line_indentation(&mut self, line: usize, columns: usize);

    /// Open an undo group.
    fn begin_undo_group(&mut self);

    /// Close the innermost undo group.
    fn end_undo_group(&mut self);

    /// Move the lines covered by the main selection up by one line.
    fn move_selected_lines_up(&mut self);

    /// Move the lines covered by the main selection down by one line.
    fn move_selected_lines_down(&mut self);

    /// Tell change tracking that hidden lines changed near `line`.
    fn notify_hide_line_change(&mut self, is_hide: bool, line: usize);

    /// Scroll so that `primary` is visible, and `secondary` too if possible.
    fn scroll_range(&mut self, _secondary: usize, _primary: usize) {}

    /// Scroll so that the caret is visible.
    fn scroll_caret(&mut self) {}

    /// A header's expanded state was changed by a user fold command.
    fn notify_fold_change(&mut self, _line: usize, _expanded: bool) {}
}
