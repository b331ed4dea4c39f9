//! Error types for range filters.

use thiserror::Error;

/// Errors from strict range-filter construction.
///
/// The refresh path never raises these; it repairs and clamps instead.
/// They exist for callers restoring persisted state that is supposed to
/// be well-formed already.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    /// The tick sequence is not strictly ascending.
    #[error("ticks are not strictly ascending at index {index}")]
    UnorderedTicks { index: usize },
}

/// Result type alias for range-filter operations.
pub type RangeResult<T> = Result<T, RangeError>;
