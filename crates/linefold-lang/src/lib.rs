#![warn(missing_docs)]
//! `linefold-lang` - data-driven language descriptions for `linefold`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any lexer or
//! highlighting system. It only answers the questions the folding kernel needs to ask about a
//! document's grammar, most importantly whether fold levels come from indentation.

use serde::{Deserialize, Serialize};

/// How a grammar's lexer assigns fold levels to lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FoldStrategy {
    /// Levels are explicit block depths (braces, tags, keywords).
    ///
    /// "Fold level N" compares the raw level number of each header with `N`.
    #[default]
    LevelNumber,
    /// Levels are derived from indentation amounts.
    ///
    /// Raw level numbers are indentation widths and need not be contiguous, so "fold level N"
    /// first normalizes each header to its logical nesting depth.
    IndentationBased,
}

/// Lexical grammar of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// No lexer; nothing folds unless levels are supplied externally.
    #[default]
    Text,
    /// C and C++.
    Cpp,
    /// Rust.
    Rust,
    /// JavaScript / TypeScript.
    JavaScript,
    /// JSON.
    Json,
    /// XML and HTML.
    Xml,
    /// Lua.
    Lua,
    /// Python.
    Python,
    /// CoffeeScript.
    CoffeeScript,
    /// Haskell.
    Haskell,
    /// Nim.
    Nim,
    /// Visual Basic.
    #[serde(rename = "vb")]
    VisualBasic,
    /// YAML.
    Yaml,
}

impl Language {
    /// Grammars whose lexers compute fold levels from indentation amounts.
    pub const INDENTATION_BASED: [Language; 6] = [
        Language::Python,
        Language::CoffeeScript,
        Language::Haskell,
        Language::Nim,
        Language::VisualBasic,
        Language::Yaml,
    ];

    /// Fold strategy used by this grammar's lexer.
    pub fn fold_strategy(self) -> FoldStrategy {
        if Self::INDENTATION_BASED.contains(&self) {
            FoldStrategy::IndentationBased
        } else {
            FoldStrategy::LevelNumber
        }
    }

    /// Returns `true` if fold levels come from indentation.
    pub fn is_fold_indentation_based(self) -> bool {
        self.fold_strategy() == FoldStrategy::IndentationBased
    }

    /// Look up a grammar by a common file extension (without the dot, case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let lang = match ext.to_ascii_lowercase().as_str() {
            "txt" => Language::Text,
            "c" | "h" | "cc" | "cpp" | "cxx" | "hpp" => Language::Cpp,
            "rs" => Language::Rust,
            "js" | "mjs" | "ts" => Language::JavaScript,
            "json" => Language::Json,
            "xml" | "html" | "htm" | "svg" => Language::Xml,
            "lua" => Language::Lua,
            "py" | "pyw" => Language::Python,
            "coffee" => Language::CoffeeScript,
            "hs" => Language::Haskell,
            "nim" => Language::Nim,
            "vb" | "vbs" | "bas" => Language::VisualBasic,
            "yml" | "yaml" => Language::Yaml,
            _ => return None,
        };
        Some(lang)
    }
}
