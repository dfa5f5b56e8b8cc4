use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Violations of hidden-region marker pairing found by [`crate::HiddenLines::check_pairing`].
pub enum MarkerPairingError {
    #[error("hide-begin marker on line {line} has no matching hide-end marker")]
    /// A BEGIN marker is never closed.
    UnmatchedBegin {
        /// Line carrying the BEGIN marker.
        line: usize,
    },

    #[error("hide-end marker on line {line} has no preceding hide-begin marker")]
    /// An END marker closes nothing.
    UnmatchedEnd {
        /// Line carrying the END marker.
        line: usize,
    },

    #[error("hide-begin marker on line {inner} opens inside the region begun on line {outer}")]
    /// A BEGIN marker appears while another region is still open.
    NestedBegin {
        /// Line of the still-open BEGIN marker.
        outer: usize,
        /// Line of the nested BEGIN marker.
        inner: usize,
    },
}

#[derive(Debug, Error)]
/// Errors produced while loading [`crate::EditorConfig`].
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    /// The configuration text is not valid JSON for the schema.
    Json(#[from] serde_json::Error),

    #[error("tab width must be at least 1")]
    /// `tab_width` was 0.
    ZeroTabWidth,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors returned by [`crate::CommandExecutor::execute`].
pub enum CommandError {
    #[error("marker table is corrupt: {0}")]
    /// Strict marker checking is enabled and the marker table failed validation.
    CorruptMarkers(#[from] MarkerPairingError),
}
