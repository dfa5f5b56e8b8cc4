//! Command interface
//!
//! A single entry point for the editor surface: every fold, hide and line command is a
//! [`Command`] value executed against the buffer owned by a [`CommandExecutor`].
//!
//! # Example
//!
//! ```rust
//! use linefold::{Command, CommandExecutor, Document, EditorConfig, FoldAction, FoldCommand, FoldLevel};
//!
//! let mut doc = Document::new("fn a() {\n    x\n}\n");
//! doc.set_fold_levels([FoldLevel::header(0), FoldLevel::new(1), FoldLevel::new(1)]);
//!
//! let mut executor = CommandExecutor::new(doc, EditorConfig::default());
//! executor
//!     .execute(Command::Fold(FoldCommand::Line {
//!         line: 1,
//!         action: FoldAction::Collapse,
//!         notify: false,
//!     }))
//!     .unwrap();
//!
//! assert_eq!(executor.buffer().hidden_lines(), vec![1, 2]);
//! ```

use tracing::debug;

use crate::buffer::LineBuffer;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::error::CommandError;
use crate::fold::{FoldAction, FoldEngine};
use crate::hidden::HiddenLines;
use crate::indent::LineEditor;

/// Fold commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldCommand {
    /// Fold or unfold every header at nesting level `level` (0 = outermost).
    Level {
        /// Nesting level.
        level: usize,
        /// Requested state.
        action: FoldAction,
    },
    /// Collapse every level, or expand everything.
    All {
        /// Requested state.
        action: FoldAction,
    },
    /// Fold or unfold the block enclosing the caret.
    CurrentPos {
        /// Requested state.
        action: FoldAction,
    },
    /// Fold or unfold the block enclosing `line`.
    Line {
        /// Any line of the block.
        line: usize,
        /// Requested state.
        action: FoldAction,
        /// Report the change through the buffer's fold notification.
        notify: bool,
    },
    /// Expand the block enclosing `line` so that `levels` nesting levels are visible.
    ExpandLevels {
        /// Any line of the block.
        line: usize,
        /// Number of visible levels.
        levels: usize,
    },
}

/// Hidden-region commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HideCommand {
    /// Hide the lines spanned by the main selection.
    HideSelection,
    /// Show hidden regions from `search_start`.
    Show {
        /// First line to search for a BEGIN marker.
        search_start: usize,
        /// Continue through the whole document.
        end_of_doc: bool,
        /// Delete the markers of shown regions.
        delete: bool,
    },
    /// Re-derive visibility from the markers.
    HideMarked {
        /// First line to scan.
        search_start: usize,
        /// Continue through the whole document.
        end_of_doc: bool,
    },
    /// A hide marker in the gutter was clicked.
    MarkerClicked {
        /// Clicked line.
        line: usize,
    },
    /// Remove every hide marker and show all lines.
    RestoreAll,
}

/// Structural line commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    /// Set the indentation of `line` to `indent` columns.
    SetIndent {
        /// Target line (single selection).
        line: usize,
        /// Indentation in columns.
        indent: usize,
    },
    /// Move the selected lines up.
    MoveUp,
    /// Move the selected lines down.
    MoveDown,
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fold commands
    Fold(FoldCommand),
    /// Hidden-region commands
    Hide(HideCommand),
    /// Line commands
    Line(LineCommand),
}

/// Command execution result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// The command applied.
    Success,
    /// The command did not apply here (no enclosing fold, nothing to hide, no marker).
    NoOp,
}

impl CommandResult {
    fn from_applied(applied: bool) -> Self {
        if applied {
            CommandResult::Success
        } else {
            CommandResult::NoOp
        }
    }
}

/// Command executor
///
/// Owns the buffer and configuration and runs commands against them in program order.
pub struct CommandExecutor<B: LineBuffer> {
    buffer: B,
    config: EditorConfig,
    command_history: Vec<Command>,
}

impl<B: LineBuffer> CommandExecutor<B> {
    /// Create an executor over `buffer`.
    ///
    /// The buffer keeps its own indentation settings; build it from
    /// [`EditorConfig::indent_settings`] so reindenting follows `tab_width` and `use_tabs`.
    pub fn new(buffer: B, config: EditorConfig) -> Self {
        Self {
            buffer,
            config,
            command_history: Vec::new(),
        }
    }

    /// Execute command
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        debug!(?command, "execute");
        self.command_history.push(command.clone());

        match command {
            Command::Fold(cmd) => Ok(self.execute_fold(cmd)),
            Command::Hide(cmd) => self.execute_hide(cmd),
            Command::Line(cmd) => Ok(self.execute_line(cmd)),
        }
    }

    /// Execute commands in order, stopping at the first error.
    pub fn execute_batch(
        &mut self,
        commands: Vec<Command>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        let mut results = Vec::with_capacity(commands.len());
        for command in commands {
            results.push(self.execute(command)?);
        }
        Ok(results)
    }

    /// Commands executed so far, including ones that failed.
    pub fn get_command_history(&self) -> &[Command] {
        &self.command_history
    }

    /// Borrow the buffer.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Borrow the buffer mutably (for host-side edits between commands).
    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    /// Give back the buffer.
    pub fn into_buffer(self) -> B {
        self.buffer
    }

    /// Configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Whether the block enclosing the caret line is collapsed.
    pub fn is_current_line_folded(&mut self) -> bool {
        self.fold_engine().is_current_line_folded()
    }

    fn fold_engine(&mut self) -> FoldEngine<'_, B> {
        FoldEngine::new(&mut self.buffer, self.config.fold_strategy())
    }

    fn execute_fold(&mut self, command: FoldCommand) -> CommandResult {
        let mut engine = self.fold_engine();
        match command {
            FoldCommand::Level { level, action } => {
                engine.fold_level(level, action);
                CommandResult::Success
            }
            FoldCommand::All { action } => {
                engine.fold_all(action);
                CommandResult::Success
            }
            FoldCommand::CurrentPos { action } => {
                CommandResult::from_applied(engine.fold_current_pos(action))
            }
            FoldCommand::Line {
                line,
                action,
                notify,
            } => CommandResult::from_applied(engine.fold(line, action, notify)),
            FoldCommand::ExpandLevels { line, levels } => {
                CommandResult::from_applied(engine.expand_levels(line, levels))
            }
        }
    }

    fn execute_hide(&mut self, command: HideCommand) -> Result<CommandResult, CommandError> {
        let mut hidden = HiddenLines::new(&mut self.buffer);
        if self.config.strict_markers {
            hidden.check_pairing()?;
        }

        let result = match command {
            HideCommand::HideSelection => CommandResult::from_applied(hidden.hide_lines()),
            HideCommand::Show {
                search_start,
                end_of_doc,
                delete,
            } => {
                hidden.show_hidden_lines(search_start, end_of_doc, delete);
                CommandResult::Success
            }
            HideCommand::HideMarked {
                search_start,
                end_of_doc,
            } => {
                hidden.hide_marked_lines(search_start, end_of_doc);
                CommandResult::Success
            }
            HideCommand::MarkerClicked { line } => {
                CommandResult::from_applied(hidden.marker_clicked(line))
            }
            HideCommand::RestoreAll => {
                hidden.restore_hidden_lines();
                CommandResult::Success
            }
        };
        Ok(result)
    }

    fn execute_line(&mut self, command: LineCommand) -> CommandResult {
        let mut editor = LineEditor::new(&mut self.buffer);
        match command {
            LineCommand::SetIndent { line, indent } => editor.set_line_indent(line, indent),
            LineCommand::MoveUp => editor.current_lines_up(),
            LineCommand::MoveDown => editor.current_lines_down(),
        }
        CommandResult::Success
    }
}

impl CommandExecutor<Document> {
    /// Create a [`Document`] from `text` with the configuration's indentation settings and an
    /// executor over it.
    pub fn with_document(text: &str, config: EditorConfig) -> Self {
        let document = Document::with_indent_settings(text, config.indent_settings());
        Self::new(document, config)
    }
}
