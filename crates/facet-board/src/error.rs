//! Error types for dashboard assembly.

use thiserror::Error;

/// Errors from dashboard-level widget management.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// No widget with this name exists on the dashboard.
    #[error("unknown widget '{name}'")]
    UnknownWidget { name: String },

    /// A widget with this name already exists.
    #[error("widget '{name}' already exists")]
    DuplicateWidget { name: String },

    /// The named widget is not a range widget.
    #[error("widget '{name}' is not a range widget")]
    NotARangeWidget { name: String },

    /// The named widget is not a selection widget.
    #[error("widget '{name}' is not a selection widget")]
    NotASelectionWidget { name: String },
}

/// Result type alias for dashboard operations.
pub type BoardResult<T> = Result<T, BoardError>;
