//! Hidden-region manager.
//!
//! Arbitrary line ranges can be hidden independently of folding. A region hiding lines
//! `begin + 1 ..= end - 1` is recorded as a [`MarkerKind::HideBegin`] marker on `begin` and a
//! [`MarkerKind::HideEnd`] marker on `end`. Markers are the authoritative record; the buffer's
//! visibility flags are derived from them and can be rebuilt with
//! [`HiddenLines::hide_marked_lines`].
//!
//! Regions never overlap or nest. Two regions may share a boundary line (an END and a BEGIN on
//! the same visible line), but hiding that boundary line merges them into one region.

use tracing::{debug, warn};

use crate::buffer::LineBuffer;
use crate::error::MarkerPairingError;
use crate::markers::MarkerKind;

/// A hidden region read back from the marker table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HiddenRegion {
    /// Line carrying the BEGIN marker (stays visible).
    pub begin_line: usize,
    /// Line carrying the END marker (stays visible).
    pub end_line: usize,
}

impl HiddenRegion {
    /// Hidden lines, inclusive. Empty when the markers are on adjacent lines.
    pub fn hidden_lines(&self) -> std::ops::RangeInclusive<usize> {
        self.begin_line + 1..=self.end_line.saturating_sub(1)
    }
}

/// Which boundary markers a removal step may delete.
#[derive(Debug, Clone, Copy)]
struct MarkerMask {
    begin: bool,
    end: bool,
}

const BEGIN_ONLY: MarkerMask = MarkerMask {
    begin: true,
    end: false,
};
const END_ONLY: MarkerMask = MarkerMask {
    begin: false,
    end: true,
};
const BOTH: MarkerMask = MarkerMask {
    begin: true,
    end: true,
};

/// Running balance of removed markers during a hide request.
#[derive(Debug, Default)]
struct RemovalScope {
    /// `+1` per BEGIN removed, `-1` per END removed.
    balance: isize,
    /// The last marker removed was a BEGIN.
    last_was_begin: bool,
}

/// Hidden-region commands over a borrowed buffer.
pub struct HiddenLines<'a, B: LineBuffer + ?Sized> {
    buffer: &'a mut B,
}

impl<'a, B: LineBuffer + ?Sized> HiddenLines<'a, B> {
    /// Wrap a buffer.
    pub fn new(buffer: &'a mut B) -> Self {
        Self { buffer }
    }

    fn remove_markers(&mut self, line: usize, mask: MarkerMask, scope: &mut RemovalScope) {
        let markers = self.buffer.markers(line);
        if mask.end && markers.hide_end {
            self.buffer.delete_marker(line, MarkerKind::HideEnd);
            scope.last_was_begin = false;
            scope.balance -= 1;
        }
        if mask.begin && markers.hide_begin {
            self.buffer.delete_marker(line, MarkerKind::HideBegin);
            scope.last_was_begin = true;
            scope.balance += 1;
        }
    }

    /// Nearest BEGIN marker above `line` whose region is still open at `line`.
    fn enclosing_begin(&self, line: usize) -> Option<usize> {
        let markers = self.buffer.markers(line);
        if markers.has_hide_marker() {
            return None;
        }
        (0..line).rev().find_map(|look| {
            let markers = self.buffer.markers(look);
            if markers.hide_begin {
                Some(Some(look))
            } else if markers.hide_end {
                Some(None)
            } else {
                None
            }
        })?
    }

    /// Hide the lines spanned by the main selection.
    ///
    /// The first and last document lines are never hidden; the span is clamped one line inward
    /// at each document edge. Existing regions inside or touching the span are absorbed, so the
    /// result is a single region. Returns `false` when nothing can be hidden.
    pub fn hide_lines(&mut self) -> bool {
        let Some(main) = self.buffer.selections().first().copied() else {
            return false;
        };
        let mut start_line = self.buffer.line_from_position(main.start);
        let mut end_line = self.buffer.line_from_position(main.end);

        let line_count = self.buffer.line_count();
        if line_count < 3 {
            return false;
        }
        if start_line == 0 {
            start_line = 1;
        }
        if end_line == line_count - 1 {
            end_line -= 1;
        }
        if start_line > end_line {
            return false;
        }

        let mut scope = RemovalScope::default();
        let mut start_marker = start_line - 1;
        let mut end_marker = end_line + 1;

        // A span that starts inside an existing region takes over that region's BEGIN.
        if let Some(begin) = self.enclosing_begin(start_marker) {
            start_marker = begin;
        }

        self.remove_markers(start_marker, BEGIN_ONLY, &mut scope);
        for line in start_line..=end_line {
            self.remove_markers(line, BOTH, &mut scope);
        }
        self.remove_markers(end_marker, END_ONLY, &mut scope);

        if scope.balance == 0 && scope.last_was_begin {
            // The span bridged two regions: absorb both.
            while scope.balance == 0 && start_marker > 0 {
                start_marker -= 1;
                self.remove_markers(start_marker, BEGIN_ONLY, &mut scope);
            }
            while scope.balance != 0 && end_marker + 1 < line_count {
                end_marker += 1;
                self.remove_markers(end_marker, END_ONLY, &mut scope);
            }
        } else {
            // At most one side touches an existing region.
            while scope.balance < 0 && start_marker > 0 {
                start_marker -= 1;
                self.remove_markers(start_marker, BEGIN_ONLY, &mut scope);
            }
            while scope.balance > 0 && end_marker + 1 < line_count {
                end_marker += 1;
                self.remove_markers(end_marker, END_ONLY, &mut scope);
            }
        }

        if scope.balance != 0 {
            warn!(
                start_marker,
                end_marker,
                balance = scope.balance,
                "unbalanced hide markers around hidden region"
            );
        }

        debug!(start_marker, end_marker, "hide lines");
        self.buffer.add_marker(start_marker, MarkerKind::HideBegin);
        self.buffer.add_marker(end_marker, MarkerKind::HideEnd);
        self.hide_marked_lines(start_marker, false);
        self.buffer.notify_hide_line_change(true, start_marker);
        true
    }

    /// Show hidden regions starting at or after `search_start`.
    ///
    /// Stops after the first region unless `end_of_doc`. With `delete`, the region's markers are
    /// removed as well, so the lines stay visible after a resync. A BEGIN with no END shows
    /// through the last line.
    pub fn show_hidden_lines(&mut self, search_start: usize, end_of_doc: bool, delete: bool) {
        let line_count = self.buffer.line_count();
        let mut line = search_start;
        while line < line_count {
            if !self.buffer.markers(line).hide_begin {
                line += 1;
                continue;
            }
            let begin = line;
            let end = (begin + 1..line_count).find(|&l| self.buffer.markers(l).hide_end);
            if end.is_none() {
                warn!(begin, "hide-begin marker without matching hide-end");
            }
            let last_hidden = end.map_or(line_count - 1, |end| end - 1);
            if begin < last_hidden {
                self.buffer.show_lines(begin + 1, last_hidden);
            }

            if delete {
                self.buffer.delete_marker(begin, MarkerKind::HideBegin);
                if let Some(end) = end {
                    self.buffer.delete_marker(end, MarkerKind::HideEnd);
                }
                self.buffer.notify_hide_line_change(false, begin);
            }

            if !end_of_doc {
                return;
            }
            line = begin + 1;
        }
    }

    /// Re-derive line visibility from the markers, starting at `search_start`.
    ///
    /// Stops after the first complete region unless `end_of_doc`; an unterminated region at the
    /// end of the document is hidden through the last line only when `end_of_doc`.
    pub fn hide_marked_lines(&mut self, search_start: usize, end_of_doc: bool) {
        let line_count = self.buffer.line_count();
        let mut start_hiding = search_start;
        let mut in_section = false;

        for line in search_start..line_count {
            let markers = self.buffer.markers(line);
            if markers.hide_end {
                if in_section {
                    if start_hiding < line {
                        self.buffer.hide_lines(start_hiding, line - 1);
                    }
                    if !end_of_doc {
                        return;
                    }
                }
                in_section = false;
            }
            if markers.hide_begin {
                start_hiding = line + 1;
                in_section = true;
            }
        }

        if in_section && end_of_doc && start_hiding < line_count {
            self.buffer.hide_lines(start_hiding, line_count - 1);
        }
    }

    /// Re-hide marked regions from the one open at `line` (if any) to the end of the document.
    ///
    /// Used after an unfold has shown lines that the markers still record as hidden.
    pub fn rehide_from(&mut self, line: usize) {
        let start = self.enclosing_begin(line).unwrap_or(line);
        self.hide_marked_lines(start, true);
    }

    /// Handle a click on a hide marker in the gutter: show the region and drop its markers.
    ///
    /// Returns `false` if `line` carries no hide marker.
    pub fn marker_clicked(&mut self, line: usize) -> bool {
        let markers = self.buffer.markers(line);
        if !markers.has_hide_marker() {
            return false;
        }

        if markers.hide_begin {
            self.show_hidden_lines(line, false, true);
        } else if let Some(begin) = (0..=line)
            .rev()
            .find(|&l| self.buffer.markers(l).hide_begin)
        {
            self.show_hidden_lines(begin, false, true);
        }
        true
    }

    /// Delete every hide marker and show every line.
    pub fn restore_hidden_lines(&mut self) {
        let line_count = self.buffer.line_count();
        for line in 0..line_count {
            let markers = self.buffer.markers(line);
            if markers.hide_begin {
                self.buffer.delete_marker(line, MarkerKind::HideBegin);
            }
            if markers.hide_end {
                self.buffer.delete_marker(line, MarkerKind::HideEnd);
            }
        }
        self.buffer.show_lines(0, line_count.saturating_sub(1));
    }

    /// React to a hide-state change reported for `location`.
    pub fn notify_hideline_markers(&mut self, is_hide: bool, location: usize, delete: bool) {
        if is_hide {
            self.hide_marked_lines(location, false);
        } else {
            self.show_hidden_lines(location, false, delete);
        }
    }

    /// Regions currently recorded in the marker table, in document order.
    ///
    /// Unpaired markers are skipped; use [`HiddenLines::check_pairing`] to detect them.
    pub fn regions(&self) -> Vec<HiddenRegion> {
        let mut regions = Vec::new();
        let mut open = None;
        for line in 0..self.buffer.line_count() {
            let markers = self.buffer.markers(line);
            if markers.hide_end {
                if let Some(begin_line) = open.take() {
                    regions.push(HiddenRegion {
                        begin_line,
                        end_line: line,
                    });
                }
            }
            if markers.hide_begin {
                open = Some(line);
            }
        }
        regions
    }

    /// Validate that markers pair up into non-overlapping regions.
    pub fn check_pairing(&self) -> Result<Vec<HiddenRegion>, MarkerPairingError> {
        let mut regions = Vec::new();
        let mut open: Option<usize> = None;
        for line in 0..self.buffer.line_count() {
            let markers = self.buffer.markers(line);
            if markers.hide_end {
                let begin_line = open
                    .take()
                    .ok_or(MarkerPairingError::UnmatchedEnd { line })?;
                regions.push(HiddenRegion {
                    begin_line,
                    end_line: line,
                });
            }
            if markers.hide_begin {
                if let Some(outer) = open {
                    return Err(MarkerPairingError::NestedBegin { outer, inner: line });
                }
                open = Some(line);
            }
        }
        match open {
            Some(line) => Err(MarkerPairingError::UnmatchedBegin { line }),
            None => Ok(regions),
        }
    }
}
