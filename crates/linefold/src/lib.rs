#![warn(missing_docs)]
//! Linefold - Headless Folding and Hidden-Line Kernel
//!
//! # Overview
//!
//! `linefold` maintains the mapping between a document's logical line structure (fold levels,
//! hidden ranges, markers) and what is visible, and keeps selections on the same logical text
//! across structural line edits. It does not store text or render anything: every operation
//! queries a [`LineBuffer`] and issues primitive mutations back to it.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface & Configuration          │  ← Public API
//! ├──────────────┬───────────────┬──────────────┤
//! │ Fold Engine  │ Hidden Lines  │ Line Editor  │  ← Kernel
//! ├──────────────┴───────────────┴──────────────┤
//! │  LineBuffer trait (levels, markers, sel.)   │  ← Buffer capability
//! ├─────────────────────────────────────────────┤
//! │  Document (Rope + per-line state)           │  ← Reference buffer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use linefold::{Document, HiddenLines, LineBuffer};
//!
//! let mut doc = Document::new("a\nb\nc\nd\ne");
//! doc.select_lines(1, 2);
//!
//! assert!(HiddenLines::new(&mut doc).hide_lines());
//! assert_eq!(doc.hidden_lines(), vec![1, 2]);
//! assert!(doc.markers(0).hide_begin);
//! assert!(doc.markers(3).hide_end);
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - Buffer capability trait
//! - [`document`] - Rope-backed reference buffer
//! - [`level`] - Fold levels and nesting depth
//! - [`markers`] - Per-line marker flags
//! - [`fold`] - Fold engine
//! - [`hidden`] - Hidden-region manager
//! - [`indent`] - Selection-preserving line edits
//! - [`commands`] - Unified command interface
//! - [`config`] - Configuration

pub mod buffer;
pub mod commands;
pub mod config;
pub mod document;
mod error;
pub mod fold;
pub mod hidden;
pub mod indent;
pub mod level;
pub mod markers;

pub use buffer::{LineBuffer, SelectionRange};
pub use commands::{
    Command, CommandExecutor, CommandResult, FoldCommand, HideCommand, LineCommand,
};
pub use config::{EditorConfig, IndentSettings};
pub use document::{Document, HideLineChange};
pub use error::{CommandError, ConfigError, MarkerPairingError};
pub use fold::{FoldAction, FoldEngine};
pub use hidden::{HiddenLines, HiddenRegion};
pub use indent::{LineEditor, adjust_offset};
pub use level::{FoldLevel, FoldLevelStack};
pub use linefold_lang::{FoldStrategy, Language};
pub use markers::{LineMarkers, MarkerKind};
