//! Editor configuration relevant to folding and indentation.

use std::path::Path;

use linefold_lang::{FoldStrategy, Language};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How leading whitespace is written when a line's indentation is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndentSettings {
    /// Columns per tab stop.
    pub tab_width: usize,
    /// Fill indentation with tabs (then spaces for the remainder) instead of spaces only.
    pub use_tabs: bool,
}

impl Default for IndentSettings {
    fn default() -> Self {
        Self {
            tab_width: 4,
            use_tabs: false,
        }
    }
}

/// Configuration shared by a [`crate::CommandExecutor`] and its buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grammar of the document; decides the fold-by-level strategy.
    pub language: Language,
    /// Columns per tab stop.
    pub tab_width: usize,
    /// Indent with tabs.
    pub use_tabs: bool,
    /// Validate marker pairing before hide commands and fail instead of walking corrupt markers.
    pub strict_markers: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            language: Language::Text,
            tab_width: 4,
            use_tabs: false,
            strict_markers: false,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with the language picked from `path`'s extension.
    ///
    /// Unknown or missing extensions fall back to [`Language::Text`].
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let language = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Language::from_extension)
            .unwrap_or_default();
        Self {
            language,
            ..Self::default()
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width == 0 {
            return Err(ConfigError::ZeroTabWidth);
        }
        Ok(())
    }

    /// Indentation settings for the buffer.
    pub fn indent_settings(&self) -> IndentSettings {
        IndentSettings {
            tab_width: self.tab_width.max(1),
            use_tabs: self.use_tabs,
        }
    }

    /// Fold-by-level strategy for the configured grammar.
    pub fn fold_strategy(&self) -> FoldStrategy {
        self.language.fold_strategy()
    }
}
