//! Column metadata boundary types.
//!
//! The hosting application's column provider resolves which columns back a
//! widget's hierarchy levels; the engine only consumes the result. An
//! unresolvable level (schema drift) arrives as `None` and is skipped, not
//! treated as fatal.

use serde::{Deserialize, Serialize};

/// Data type tag for a bound column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Text,
    Boolean,
    Integer,
    Float,
    Date,
    DateTime,
}

impl ColumnType {
    /// Whether two column types can be compared against each other when
    /// matching shared-bounds prefixes. Numeric types are interchangeable;
    /// everything else must match exactly.
    pub fn compatible(self, other: ColumnType) -> bool {
        self == other
            || matches!(
                (self, other),
                (ColumnType::Integer, ColumnType::Float)
                    | (ColumnType::Float, ColumnType::Integer)
            )
    }

    /// Whether values of this type live on a calendar/time axis.
    pub fn is_temporal(self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::DateTime)
    }
}

/// A reference to a bound column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Column name as known to the data source
    pub name: String,
    /// Data type tag
    pub ty: ColumnType,
    /// Whether the column is a cube dimension (affects comparator and
    /// sentinel rules in the hosting application)
    pub cube: bool,
}

impl ColumnRef {
    /// Create a non-cube column reference.
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            cube: false,
        }
    }

    /// Create a cube-dimension column reference.
    pub fn cube(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            cube: true,
        }
    }
}

/// One hierarchy level's resolved column. `None` means the level's bound
/// column no longer exists; condition building skips its leaf but still
/// recurses through the level.
pub type LevelColumn = Option<ColumnRef>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_types_compatible() {
        assert!(ColumnType::Integer.compatible(ColumnType::Float));
        assert!(ColumnType::Float.compatible(ColumnType::Integer));
        assert!(ColumnType::Date.compatible(ColumnType::Date));
        assert!(!ColumnType::Date.compatible(ColumnType::Text));
    }

    #[test]
    fn temporal_types() {
        assert!(ColumnType::Date.is_temporal());
        assert!(ColumnType::DateTime.is_temporal());
        assert!(!ColumnType::Integer.is_temporal());
    }
}
