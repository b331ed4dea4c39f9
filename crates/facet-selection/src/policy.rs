//! Per-widget selection policy.
//!
//! Configuration travels as a plain value type handed to the condition
//! builder, never as ambient state.

use serde::{Deserialize, Serialize};

/// Policy controlling which nodes qualify for predicate generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Single-selection interaction mode: only the innermost picked level
    /// is the real constraint, and ancestors above it are implied. When
    /// set, nodes at levels strictly below this maximum qualify for
    /// predicate generation even when merely marked `INCLUDED`.
    pub single_selection_levels: Option<usize>,
}

impl SelectionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy with single-selection levels up to (excluding) `max_level`.
    pub fn with_single_selection(max_level: usize) -> Self {
        Self {
            single_selection_levels: Some(max_level),
        }
    }

    /// Whether a merely-included ancestor at `level` qualifies.
    pub fn ancestor_qualifies(&self, level: i32) -> bool {
        match self.single_selection_levels {
            Some(max) => level >= 0 && (level as usize) < max,
            None => false,
        }
    }
}
