//! Structural line edits that keep selections on the same logical text.

use tracing::debug;

use crate::buffer::{LineBuffer, SelectionRange};

/// Translate `offset` across an indentation change that moved a line's indent position from
/// `before` to `after`.
///
/// Offsets at or after the old indent position shift by the difference. When the indentation
/// shrank, offsets that fell inside the removed whitespace clamp to the new indent position.
/// Offsets before the indentation are unchanged.
pub fn adjust_offset(offset: usize, before: usize, after: usize) -> usize {
    if after > before {
        if offset >= before {
            offset + (after - before)
        } else {
            offset
        }
    } else if after < before {
        if offset >= before {
            offset - (before - after)
        } else if offset >= after {
            after
        } else {
            offset
        }
    } else {
        offset
    }
}

/// Line edits over a borrowed buffer.
pub struct LineEditor<'a, B: LineBuffer + ?Sized> {
    buffer: &'a mut B,
}

impl<'a, B: LineBuffer + ?Sized> LineEditor<'a, B> {
    /// Wrap a buffer.
    pub fn new(buffer: &'a mut B) -> Self {
        Self { buffer }
    }

    /// Set the indentation of `line` to `indent` columns, keeping selections in place.
    ///
    /// With several selections, the indentation of each selection's start line is set instead,
    /// all inside one undo group.
    pub fn set_line_indent(&mut self, line: usize, indent: usize) {
        let selections = self.buffer.selections();
        if selections.len() <= 1 {
            let range = selections.first().copied().unwrap_or_default();
            let (before, after) = self.reindent(line, indent);
            self.buffer.set_selection(
                0,
                SelectionRange::new(
                    adjust_offset(range.start, before, after),
                    adjust_offset(range.end, before, after),
                ),
            );
            return;
        }

        debug!(selections = selections.len(), indent, "set indent per selection");
        self.buffer.begin_undo_group();
        for index in 0..selections.len() {
            // Earlier edits may have shifted this range; read it fresh.
            let Some(range) = self.buffer.selections().get(index).copied() else {
                break;
            };
            let line = self.buffer.line_from_position(range.start);
            let (before, after) = self.reindent(line, indent);
            self.buffer.set_selection(
                index,
                SelectionRange::new(
                    adjust_offset(range.start, before, after),
                    adjust_offset(range.end, before, after),
                ),
            );
        }
        self.buffer.end_undo_group();
    }

    /// Apply the indentation and report the indent position before and after.
    fn reindent(&mut self, line: usize, indent: usize) -> (usize, usize) {
        let before = self.buffer.line_indent_position(line);
        self.buffer.set_line_indentation(line, indent);
        let after = self.buffer.line_indent_position(line);
        (before, after)
    }

    /// Move the selected lines up by one line.
    pub fn current_lines_up(&mut self) {
        self.buffer.move_selected_lines_up();
    }

    /// Move the selected lines down by one line and scroll the moved selection into view.
    pub fn current_lines_down(&mut self) {
        self.buffer.move_selected_lines_down();
        if let Some(main) = self.buffer.selections().first().copied() {
            self.buffer.scroll_range(main.end, main.start);
        }
    }
}
