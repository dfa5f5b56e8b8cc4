//! Fold engine: expand/collapse state per header line.
//!
//! The engine keeps no state of its own. Fold levels come from the buffer (computed by an
//! external lexer), and the engine drives the buffer's expanded flags and line visibility.

use linefold_lang::FoldStrategy;
use tracing::{debug, trace};

use crate::buffer::LineBuffer;
use crate::hidden::HiddenLines;
use crate::level::FoldLevelStack;

/// Requested fold state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldAction {
    /// Show the block's children.
    Expand,
    /// Hide the block's children.
    Collapse,
}

impl FoldAction {
    /// `true` for [`FoldAction::Expand`].
    pub fn is_expand(self) -> bool {
        self == FoldAction::Expand
    }
}

/// Fold commands over a borrowed buffer.
pub struct FoldEngine<'a, B: LineBuffer + ?Sized> {
    buffer: &'a mut B,
    strategy: FoldStrategy,
}

impl<'a, B: LineBuffer + ?Sized> FoldEngine<'a, B> {
    /// Create an engine for a document whose lexer assigns levels per `strategy`.
    pub fn new(buffer: &'a mut B, strategy: FoldStrategy) -> Self {
        Self { buffer, strategy }
    }

    /// Header line enclosing `line`: the line itself if it is a header, else its fold parent.
    pub fn header_of(&self, line: usize) -> Option<usize> {
        if line >= self.buffer.line_count() {
            return None;
        }
        if self.buffer.fold_level(line).header {
            Some(line)
        } else {
            self.buffer.fold_parent(line)
        }
    }

    /// Whether `line` is a header in the state `action` asks for.
    fn is_in_state(&self, line: usize, action: FoldAction) -> bool {
        self.buffer.is_expanded(line) == action.is_expand()
    }

    /// Fold or unfold the block enclosing `line`.
    ///
    /// Returns `true` if a header was toggled. Lines with no enclosing header and headers
    /// already in the requested state are left alone.
    pub fn fold(&mut self, line: usize, action: FoldAction, notify: bool) -> bool {
        let Some(header) = self.header_of(line) else {
            return false;
        };
        if self.is_in_state(header, action) {
            return false;
        }
        self.toggle(header);
        if notify {
            self.buffer.notify_fold_change(header, action.is_expand());
        }
        true
    }

    /// Flip the expanded state of `header` and update the visibility of its block.
    fn toggle(&mut self, header: usize) {
        let expand = !self.buffer.is_expanded(header);
        trace!(header, expand, "toggle fold");
        self.buffer.set_expanded(header, expand);
        if expand {
            self.expand(header, true, false, 0, None);
            HiddenLines::new(&mut *self.buffer).rehide_from(header);
        } else {
            let last = self.buffer.last_child(header, None);
            if last > header {
                self.buffer.hide_lines(header + 1, last);
            }
        }
    }

    /// Fold or unfold the block enclosing the caret line.
    pub fn fold_current_pos(&mut self, action: FoldAction) -> bool {
        let line = self.buffer.line_from_position(self.buffer.caret());
        self.fold(line, action, false)
    }

    /// Whether the block enclosing the caret line is collapsed.
    pub fn is_current_line_folded(&self) -> bool {
        let line = self.buffer.line_from_position(self.buffer.caret());
        self.header_of(line)
            .is_some_and(|header| !self.buffer.is_expanded(header))
    }

    /// Fold or unfold every header at nesting level `level` (0 = outermost).
    ///
    /// Unfolding re-applies marker-hidden regions afterwards.
    pub fn fold_level(&mut self, level: usize, action: FoldAction) {
        debug!(level, ?action, strategy = ?self.strategy, "fold level");
        match self.strategy {
            FoldStrategy::IndentationBased => self.fold_indentation_based_level(level, action),
            FoldStrategy::LevelNumber => {
                for line in 0..self.buffer.line_count() {
                    let fold_level = self.buffer.fold_level(line);
                    if fold_level.header
                        && fold_level.value as usize == level
                        && !self.is_in_state(line, action)
                    {
                        self.fold(line, action, false);
                    }
                }
            }
        }

        if action.is_expand() {
            HiddenLines::new(&mut *self.buffer).hide_marked_lines(0, true);
        }
    }

    /// Level scan for grammars whose raw levels are indentation amounts.
    ///
    /// Each header's depth is its position on a [`FoldLevelStack`]; a header at the requested depth
    /// is folded and its children are skipped, which keeps the scan linear in the line count.
    fn fold_indentation_based_level(&mut self, level: usize, action: FoldAction) {
        let target_depth = level + 1;
        let mut stack = FoldLevelStack::new();
        let line_count = self.buffer.line_count();
        let mut line = 0;
        while line < line_count {
            let fold_level = self.buffer.fold_level(line);
            if fold_level.header && stack.push(fold_level.value) == target_depth {
                if !self.is_in_state(line, action) {
                    self.fold(line, action, false);
                }
                line = self.buffer.last_child(line, None);
            }
            line += 1;
        }
    }

    /// Collapse every header at every level, or expand everything.
    ///
    /// Expanding re-applies marker-hidden regions, since showing all lines also reveals them.
    pub fn fold_all(&mut self, action: FoldAction) {
        debug!(?action, "fold all");
        let line_count = self.buffer.line_count();
        match action {
            FoldAction::Expand => {
                for line in 0..line_count {
                    if self.buffer.fold_level(line).header {
                        self.buffer.set_expanded(line, true);
                    }
                }
                self.buffer.show_lines(0, line_count.saturating_sub(1));
                HiddenLines::new(&mut *self.buffer).hide_marked_lines(0, true);
                self.buffer.scroll_caret();
            }
            FoldAction::Collapse => {
                for line in 0..line_count {
                    if !self.buffer.fold_level(line).header {
                        continue;
                    }
                    self.buffer.set_expanded(line, false);
                    let last = self.buffer.last_child(line, None);
                    if last > line {
                        self.buffer.hide_lines(line + 1, last);
                    }
                }
            }
        }
    }

    /// Expand the block enclosing `line` so that `levels` levels of nesting are visible.
    ///
    /// Nested headers within reach are marked expanded, deeper ones collapsed.
    pub fn expand_levels(&mut self, line: usize, levels: usize) -> bool {
        let Some(header) = self.header_of(line) else {
            return false;
        };
        let levels = isize::try_from(levels.max(1)).unwrap_or(isize::MAX);
        self.buffer.set_expanded(header, true);
        self.expand(header, true, true, levels, None);
        HiddenLines::new(&mut *self.buffer).rehide_from(header);
        true
    }

    /// Propagate visibility through the block headed by `line`.
    ///
    /// Walks `line + 1` through the header's last child, recursing into nested headers with
    /// `vis_levels - 1`. With `force`, each line is shown when `vis_levels > 0` and hidden
    /// otherwise, and nested headers get their expanded flag set when `vis_levels > 1`. Without
    /// `force`, lines are only shown (when `do_expand`), and children of nested collapsed headers
    /// stay hidden; the persisted flags are not touched.
    ///
    /// `level` overrides the header's level number for the last-child query. Returns the first
    /// line after the block.
    pub fn expand(
        &mut self,
        line: usize,
        do_expand: bool,
        force: bool,
        vis_levels: isize,
        level: Option<u32>,
    ) -> usize {
        let last = self.buffer.last_child(line, level);
        let mut line = line + 1;
        while line <= last {
            if force {
                if vis_levels > 0 {
                    self.buffer.show_lines(line, line);
                } else {
                    self.buffer.hide_lines(line, line);
                }
            } else if do_expand {
                self.buffer.show_lines(line, line);
            }

            if self.buffer.fold_level(line).header {
                if force {
                    self.buffer.set_expanded(line, vis_levels > 1);
                    line = self.expand(line, do_expand, force, vis_levels - 1, None);
                } else {
                    let child_visible = do_expand && self.buffer.is_expanded(line);
                    line = self.expand(line, child_visible, force, vis_levels - 1, None);
                }
            } else {
                line += 1;
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::level::FoldLevel;

    fn nested() -> Document {
        let mut doc = Document::new("a\nb\nc\nd");
        doc.set_fold_levels([
            FoldLevel::header(0),
            FoldLevel::header(1),
            FoldLevel::new(2),
            FoldLevel::new(0),
        ]);
        doc
    }

    #[test]
    fn test_expand_levels_saturates_huge_depth() {
        let mut doc = nested();
        let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);
        engine.fold_all(FoldAction::Collapse);

        assert!(engine.expand_levels(0, usize::MAX));
        assert!(doc.hidden_lines().is_empty());
        assert!(doc.is_expanded(0));
        assert!(doc.is_expanded(1));
    }

    #[test]
    fn test_expand_levels_zero_shows_one_level() {
        let mut doc = nested();
        let mut engine = FoldEngine::new(&mut doc, FoldStrategy::LevelNumber);
        engine.fold_all(FoldAction::Collapse);

        assert!(engine.expand_levels(0, 0));
        assert_eq!(doc.hidden_lines(), vec![2]);
        assert!(!doc.is_expanded(1));
    }
}
