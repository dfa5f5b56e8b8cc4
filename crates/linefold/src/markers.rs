//! Per-line marker flags.

/// Marker kinds a line can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Line just above a hidden region.
    HideBegin,
    /// Line just below a hidden region.
    HideEnd,
    /// User bookmark. Never touched by the hidden-region manager.
    Bookmark,
}

/// Markers attached to one line.
///
/// A line carries at most one marker of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineMarkers {
    /// [`MarkerKind::HideBegin`] is set.
    pub hide_begin: bool,
    /// [`MarkerKind::HideEnd`] is set.
    pub hide_end: bool,
    /// [`MarkerKind::Bookmark`] is set.
    pub bookmark: bool,
}

impl LineMarkers {
    /// Set or clear `kind`.
    pub fn set(&mut self, kind: MarkerKind, on: bool) {
        match kind {
            MarkerKind::HideBegin => self.hide_begin = on,
            MarkerKind::HideEnd => self.hide_end = on,
            MarkerKind::Bookmark => self.bookmark = on,
        }
    }

    /// Whether either hidden-region boundary marker is set.
    pub fn has_hide_marker(&self) -> bool {
        self.hide_begin || self.hide_end
    }
}
