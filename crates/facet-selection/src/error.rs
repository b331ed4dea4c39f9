//! Error types for selection widgets.

use thiserror::Error;

/// Errors from user-facing widget operations.
///
/// Everything the engine can recover from locally (unresolvable columns,
/// stale indices, malformed values) is recovered, not raised; these
/// variants cover genuine caller mistakes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The path does not name a selectable value in the widget's current
    /// value tree.
    #[error("no selectable value at path '{path}'")]
    PathNotFound { path: String },
}

/// Result type alias for widget operations.
pub type SelectionResult<T> = Result<T, SelectionError>;
