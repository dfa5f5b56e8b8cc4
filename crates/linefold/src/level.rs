//! Fold levels and nesting-depth normalization.
//!
//! Fold levels are produced by an external lexer, one per line. This module only models them;
//! it never computes them from text.

/// Fold level of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FoldLevel {
    /// Raw level number (block depth, or indentation amount for indentation-based grammars).
    pub value: u32,
    /// This line starts a foldable block.
    pub header: bool,
    /// Blank line; subordinate to whichever block surrounds it.
    pub whitespace: bool,
}

impl FoldLevel {
    /// A plain (non-header) line at `value`.
    pub const fn new(value: u32) -> Self {
        Self {
            value,
            header: false,
            whitespace: false,
        }
    }

    /// A header line at `value`.
    pub const fn header(value: u32) -> Self {
        Self {
            value,
            header: true,
            whitespace: false,
        }
    }

    /// A blank line at `value`.
    pub const fn whitespace(value: u32) -> Self {
        Self {
            value,
            header: false,
            whitespace: true,
        }
    }

    /// Whether a line with level `other` belongs to the block started at `self`.
    pub fn is_subordinate(&self, other: FoldLevel) -> bool {
        other.whitespace || self.value < other.value
    }
}

/// Translates raw header levels into logical nesting depths during a forward scan.
///
/// Raw levels need not be contiguous (an indentation-based lexer may report 0, 4, 12), so the
/// depth of a header is the number of enclosing headers still open when it is pushed.
#[derive(Debug, Clone, Default)]
pub struct FoldLevelStack {
    levels: Vec<u32>,
}

impl FoldLevelStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Push a header's raw level, closing every open block at the same or deeper level.
    ///
    /// Returns the 1-based depth of the pushed header.
    pub fn push(&mut self, level: u32) -> usize {
        while self.levels.last().is_some_and(|&top| level <= top) {
            self.levels.pop();
        }
        self.levels.push(level);
        self.levels.len()
    }
}
