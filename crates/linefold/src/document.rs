//! In-memory reference buffer.
//!
//! [`Document`] implements [`LineBuffer`] on top of a [`ropey::Rope`] plus a per-line state table
//! (fold level, expanded flag, visibility, markers). Hosts that embed a real editing widget
//! implement [`LineBuffer`] themselves; `Document` serves headless use and tests.
//!
//! Selection offsets follow the usual editing-widget rules when text changes: positions after a
//! deletion move back, positions inside it collapse to its start, and positions after an
//! insertion point move forward.

use ropey::Rope;

use crate::buffer::{LineBuffer, SelectionRange};
use crate::config::IndentSettings;
use crate::level::FoldLevel;
use crate::markers::{LineMarkers, MarkerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineState {
    level: FoldLevel,
    expanded: bool,
    visible: bool,
    markers: LineMarkers,
}

impl Default for LineState {
    fn default() -> Self {
        Self {
            level: FoldLevel::default(),
            expanded: true,
            visible: true,
            markers: LineMarkers::default(),
        }
    }
}

/// A hide-line change notification received by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideLineChange {
    /// Lines were hidden (`true`) or shown (`false`).
    pub is_hide: bool,
    /// Boundary line reported by the notifier.
    pub line: usize,
}

/// Rope-backed document with per-line fold and marker state.
#[derive(Debug, Clone)]
pub struct Document {
    text: Rope,
    lines: Vec<LineState>,
    /// Non-empty; index 0 is the main selection.
    selections: Vec<SelectionRange>,
    caret: usize,
    indent: IndentSettings,
    undo_depth: usize,
    undo_actions: usize,
    hide_line_changes: Vec<HideLineChange>,
    fold_changes: Vec<(usize, bool)>,
    last_scroll: Option<(usize, usize)>,
}

impl Document {
    /// Create a document with default indentation settings.
    pub fn new(text: &str) -> Self {
        Self::with_indent_settings(text, IndentSettings::default())
    }

    /// Create a document with explicit indentation settings.
    pub fn with_indent_settings(text: &str, indent: IndentSettings) -> Self {
        let text = Rope::from_str(text);
        let lines = vec![LineState::default(); text.len_lines()];
        Self {
            text,
            lines,
            selections: vec![SelectionRange::caret(0)],
            caret: 0,
            indent,
            undo_depth: 0,
            undo_actions: 0,
            hide_line_changes: Vec::new(),
            fold_changes: Vec::new(),
            last_scroll: None,
        }
    }

    /// Full text.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.text.len_chars()
    }

    /// Text of `line` without its line ending.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.text.len_lines() {
            return String::new();
        }
        let (content, _) = self.split_line(line);
        content
    }

    /// Character offset where `line` starts (clamped to the end of the text).
    pub fn line_start(&self, line: usize) -> usize {
        self.text.line_to_char(line.min(self.text.len_lines()))
    }

    /// Indentation of `line` in columns.
    pub fn line_indentation(&self, line: usize) -> usize {
        if line >= self.text.len_lines() {
            return 0;
        }
        let tab = self.indent.tab_width.max(1);
        let mut columns = 0;
        for ch in self.text.line(line).chars() {
            match ch {
                ' ' => columns += 1,
                '\t' => columns = (columns / tab + 1) * tab,
                _ => break,
            }
        }
        columns
    }

    /// Indentation settings.
    pub fn indent_settings(&self) -> IndentSettings {
        self.indent
    }

    /// Set the fold level of one line.
    pub fn set_fold_level(&mut self, line: usize, level: FoldLevel) {
        if let Some(state) = self.lines.get_mut(line) {
            state.level = level;
        }
    }

    /// Set fold levels from the first line onward.
    pub fn set_fold_levels(&mut self, levels: impl IntoIterator<Item = FoldLevel>) {
        for (state, level) in self.lines.iter_mut().zip(levels) {
            state.level = level;
        }
    }

    /// Replace all selections. An empty list leaves a caret at offset 0.
    pub fn set_selections(&mut self, selections: Vec<SelectionRange>) {
        let len = self.text.len_chars();
        let mut selections: Vec<SelectionRange> = selections
            .into_iter()
            .map(|r| SelectionRange::new(r.start.min(len), r.end.min(len)))
            .collect();
        if selections.is_empty() {
            selections.push(SelectionRange::caret(0));
        }
        self.caret = selections[0].end;
        self.selections = selections;
    }

    /// Collapse the selection to a caret at `pos`.
    pub fn set_caret(&mut self, pos: usize) {
        self.set_selections(vec![SelectionRange::caret(pos)]);
    }

    /// Select from `anchor` to `caret`; the caret may precede the anchor.
    pub fn select(&mut self, anchor: usize, caret: usize) {
        self.set_selections(vec![SelectionRange::new(anchor, caret)]);
        self.caret = caret.min(self.text.len_chars());
    }

    /// Select whole lines `first..=last` (up to the end of `last`'s content).
    pub fn select_lines(&mut self, first: usize, last: usize) {
        let start = self.line_start(first);
        let end = self.line_start(last) + self.line_text(last).chars().count();
        self.set_selections(vec![SelectionRange::new(start, end)]);
    }

    /// Number of undoable actions recorded so far (an undo group counts once).
    pub fn undo_actions(&self) -> usize {
        self.undo_actions
    }

    /// Current undo-group nesting depth.
    pub fn undo_depth(&self) -> usize {
        self.undo_depth
    }

    /// Hide-line change notifications received, oldest first.
    pub fn hide_line_changes(&self) -> &[HideLineChange] {
        &self.hide_line_changes
    }

    /// Fold change notifications received, oldest first.
    pub fn fold_changes(&self) -> &[(usize, bool)] {
        &self.fold_changes
    }

    /// Most recent scroll request as `(secondary, primary)`.
    pub fn last_scroll(&self) -> Option<(usize, usize)> {
        self.last_scroll
    }

    /// Lines currently hidden, ascending.
    pub fn hidden_lines(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.visible)
            .map(|(i, _)| i)
            .collect()
    }

    fn split_line(&self, line: usize) -> (String, String) {
        let full = self.text.line(line).to_string();
        let ending_len = line_ending_len(&full);
        let split = full.len() - ending_len;
        (full[..split].to_string(), full[split..].to_string())
    }

    fn record_edit(&mut self) {
        if self.undo_depth == 0 {
            self.undo_actions += 1;
        }
    }

    /// Replace `[start, end)` with `insert`, moving selections like an editing widget does.
    fn replace(&mut self, start: usize, end: usize, insert: &str) {
        let deleted = end - start;
        let inserted = insert.chars().count();
        if deleted > 0 {
            self.text.remove(start..end);
        }
        if inserted > 0 {
            self.text.insert(start, insert);
        }

        let adjust = |pos: usize| -> usize {
            let pos = if pos > start {
                if pos > end { pos - deleted } else { start }
            } else {
                pos
            };
            if pos > start { pos + inserted } else { pos }
        };
        for sel in &mut self.selections {
            *sel = SelectionRange::new(adjust(sel.start), adjust(sel.end));
        }
        self.caret = adjust(self.caret);
        self.record_edit();
    }

    /// Lines covered by the main selection. A selection ending at column 0 of a later line does
    /// not include that line.
    fn selected_line_block(&self) -> (usize, usize) {
        let main = self.selections[0];
        let first = self.line_from_position(main.start);
        let mut last = self.line_from_position(main.end);
        if last > first && main.end == self.text.line_to_char(last) {
            last -= 1;
        }
        (first, last)
    }

    fn move_block(&mut self, up: bool) {
        let (first, last) = self.selected_line_block();
        let line_count = self.text.len_lines();
        let (seg_first, seg_last) = if up {
            if first == 0 {
                return;
            }
            (first - 1, last)
        } else {
            if last + 1 >= line_count {
                return;
            }
            (first, last + 1)
        };

        // Line endings stay in place; only contents and per-line state travel.
        let (mut contents, endings): (Vec<String>, Vec<String>) =
            (seg_first..=seg_last).map(|l| self.split_line(l)).unzip();
        if up {
            contents.rotate_left(1);
            self.lines[seg_first..=seg_last].rotate_left(1);
        } else {
            contents.rotate_right(1);
            self.lines[seg_first..=seg_last].rotate_right(1);
        }

        let locate = |doc: &Document, pos: usize| {
            let line = doc.line_from_position(pos);
            (line, pos - doc.text.line_to_char(line))
        };
        let main = self.selections[0];
        let anchor = if self.caret == main.end {
            main.start
        } else {
            main.end
        };
        let old_anchor = locate(self, anchor);
        let old_caret = locate(self, self.caret);

        let seg_start = self.text.line_to_char(seg_first);
        let seg_end = self.text.line_to_char(seg_last + 1);
        let rebuilt: String = contents
            .iter()
            .zip(&endings)
            .map(|(c, e)| format!("{c}{e}"))
            .collect();
        self.text.remove(seg_start..seg_end);
        self.text.insert(seg_start, &rebuilt);

        let relocate = |doc: &Document, (line, col): (usize, usize)| -> usize {
            if (first..=last).contains(&line) {
                let new_line = if up { line - 1 } else { line + 1 };
                let len = contents[new_line - seg_first].chars().count();
                doc.text.line_to_char(new_line) + col.min(len)
            } else if !up && line == last + 1 && col == 0 {
                doc.text.line_to_char(last + 2)
            } else {
                doc.text.line_to_char(line) + col
            }
        };
        let new_anchor = relocate(self, old_anchor);
        let new_caret = relocate(self, old_caret);
        self.selections = vec![SelectionRange::new(new_anchor, new_caret)];
        self.caret = new_caret;
        self.record_edit();
    }
}

fn line_ending_len(line: &str) -> usize {
    if line.ends_with("\r\n") {
        return 2;
    }
    match line.chars().last() {
        Some('\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}') => {
            line.chars().last().map_or(0, char::len_utf8)
        }
        _ => 0,
    }
}

impl LineBuffer for Document {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn fold_level(&self, line: usize) -> FoldLevel {
        self.lines.get(line).map(|s| s.level).unwrap_or_default()
    }

    fn fold_parent(&self, line: usize) -> Option<usize> {
        if line == 0 || line >= self.lines.len() {
            return None;
        }
        let level = self.lines[line].level.value;
        let mut look = line - 1;
        while look > 0 {
            let candidate = self.lines[look].level;
            if !candidate.whitespace && candidate.value < level {
                break;
            }
            look -= 1;
        }
        let candidate = self.lines[look].level;
        (candidate.header && candidate.value < level).then_some(look)
    }

    fn last_child(&self, line: usize, level: Option<u32>) -> usize {
        let count = self.lines.len();
        if line >= count {
            return line;
        }
        let header = FoldLevel::header(level.unwrap_or(self.lines[line].level.value));
        let mut last = line;
        while last + 1 < count && header.is_subordinate(self.lines[last + 1].level) {
            last += 1;
        }
        if last > line {
            // Trailing blank line that belongs to the parent block.
            let after = self.lines.get(last + 1).map_or(0, |s| s.level.value);
            if header.value > after && self.lines[last].level.whitespace {
                last -= 1;
            }
        }
        last
    }

    fn is_expanded(&self, line: usize) -> bool {
        self.lines.get(line).is_none_or(|s| s.expanded)
    }

    fn set_expanded(&mut self, line: usize, expanded: bool) {
        if let Some(state) = self.lines.get_mut(line) {
            state.expanded = expanded;
        }
    }

    fn is_line_visible(&self, line: usize) -> bool {
        self.lines.get(line).is_some_and(|s| s.visible)
    }

    fn show_lines(&mut self, from: usize, to: usize) {
        let to = to.min(self.lines.len().saturating_sub(1));
        for state in self.lines.iter_mut().take(to + 1).skip(from) {
            state.visible = true;
        }
    }

    fn hide_lines(&mut self, from: usize, to: usize) {
        let to = to.min(self.lines.len().saturating_sub(1));
        for state in self.lines.iter_mut().take(to + 1).skip(from) {
            state.visible = false;
        }
    }

    fn markers(&self, line: usize) -> LineMarkers {
        self.lines.get(line).map(|s| s.markers).unwrap_or_default()
    }

    fn add_marker(&mut self, line: usize, kind: MarkerKind) {
        if let Some(state) = self.lines.get_mut(line) {
            state.markers.set(kind, true);
        }
    }

    fn delete_marker(&mut self, line: usize, kind: MarkerKind) {
        if let Some(state) = self.lines.get_mut(line) {
            state.markers.set(kind, false);
        }
    }

    fn line_from_position(&self, pos: usize) -> usize {
        self.text.char_to_line(pos.min(self.text.len_chars()))
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn selections(&self) -> Vec<SelectionRange> {
        self.selections.clone()
    }

    fn set_selection(&mut self, index: usize, range: SelectionRange) {
        let len = self.text.len_chars();
        let range = SelectionRange::new(range.start.min(len), range.end.min(len));
        if let Some(sel) = self.selections.get_mut(index) {
            // The main caret stays on the side of the range it was on.
            let caret_at_start = sel.start != sel.end && self.caret == sel.start;
            *sel = range;
            if index == 0 {
                self.caret = if caret_at_start { range.start } else { range.end };
            }
        }
    }

    fn line_indent_position(&self, line: usize) -> usize {
        if line >= self.text.len_lines() {
            return self.text.len_chars();
        }
        let blanks = self
            .text
            .line(line)
            .chars()
            .take_while(|c| matches!(c, ' ' | '\t'))
            .count();
        self.text.line_to_char(line) + blanks
    }

    fn set_line_indentation(&mut self, line: usize, columns: usize) {
        if line >= self.text.len_lines() || self.line_indentation(line) == columns {
            return;
        }
        let tab = self.indent.tab_width.max(1);
        let prefix = if self.indent.use_tabs {
            format!("{}{}", "\t".repeat(columns / tab), " ".repeat(columns % tab))
        } else {
            " ".repeat(columns)
        };
        let start = self.text.line_to_char(line);
        let end = self.line_indent_position(line);
        self.replace(start, end, &prefix);
    }

    fn begin_undo_group(&mut self) {
        self.undo_depth += 1;
    }

    fn end_undo_group(&mut self) {
        if self.undo_depth == 0 {
            return;
        }
        self.undo_depth -= 1;
        if self.undo_depth == 0 {
            self.undo_actions += 1;
        }
    }

    fn move_selected_lines_up(&mut self) {
        self.move_block(true);
    }

    fn move_selected_lines_down(&mut self) {
        self.move_block(false);
    }

    fn notify_hide_line_change(&mut self, is_hide: bool, line: usize) {
        self.hide_line_changes.push(HideLineChange { is_hide, line });
    }

    fn scroll_range(&mut self, secondary: usize, primary: usize) {
        self.last_scroll = Some((secondary, primary));
    }

    fn scroll_caret(&mut self) {
        self.last_scroll = Some((self.caret, self.caret));
    }

    fn notify_fold_change(&mut self, line: usize, expanded: bool) {
        self.fold_changes.push((line, expanded));
    }
}
