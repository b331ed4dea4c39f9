//! Shared bounds: a captured range selection propagated to linked
//! filters.
//!
//! The source filter captures its effective selection once; every
//! dependent derives its own view truncated to the column prefix it can
//! compare. Deriving a view never mutates the captured value another
//! dependent will read.

use facet_conditions::{decode_composite, ColumnType};
use serde::{Deserialize, Serialize};

use crate::filter::{RangeFilter, TickValue};

/// A range selection captured from one filter for propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedBounds {
    pub raw_min: TickValue,
    pub raw_max: TickValue,
    /// Column types of the source dimension, in hierarchy order
    pub column_types: Vec<ColumnType>,
    pub upper_inclusive: bool,
    /// `false` means the window spans the whole domain: no real
    /// restriction, and intersection must short-circuit to "everything"
    pub active: bool,
}

impl SharedBounds {
    /// Bounds that restrict nothing.
    pub fn inactive() -> Self {
        Self {
            raw_min: TickValue(Vec::new()),
            raw_max: TickValue(Vec::new()),
            column_types: Vec::new(),
            upper_inclusive: true,
            active: false,
        }
    }

    /// Capture a filter's current effective selection.
    ///
    /// `column_types` are the source dimension's column types. A filter
    /// with no window, or one spanning its whole domain, captures
    /// inactive bounds.
    pub fn capture(filter: &RangeFilter, column_types: &[ColumnType]) -> Self {
        if filter.window_spans_domain() {
            return Self::inactive();
        }
        // Raw tick values, not the calendar-adjusted predicate bounds:
        // dependents share the tick vocabulary of the source.
        let Some(selection) = filter.selection_bounds_raw() else {
            return Self::inactive();
        };
        Self {
            raw_min: selection.0,
            raw_max: selection.1,
            column_types: column_types.to_vec(),
            upper_inclusive: filter.upper_inclusive(),
            active: true,
        }
    }

    /// Decode bounds that arrive as composite-encoded strings (persisted
    /// state, script input).
    ///
    /// Returns the bounds and whether either side degraded to a single
    /// value because its segment count did not match `column_types`.
    /// Degraded bounds compare on one text column only; callers should
    /// take the linear intersection path for them.
    pub fn from_encoded(
        raw_min: &str,
        raw_max: &str,
        column_types: &[ColumnType],
        upper_inclusive: bool,
    ) -> (Self, bool) {
        let min = decode_composite(raw_min, column_types);
        let max = decode_composite(raw_max, column_types);
        let degraded = min.is_degraded() || max.is_degraded();
        let column_types = if degraded {
            vec![ColumnType::Text]
        } else {
            column_types.to_vec()
        };
        let bounds = Self {
            raw_min: TickValue(min.into_values()),
            raw_max: TickValue(max.into_values()),
            column_types,
            upper_inclusive,
            active: true,
        };
        (bounds, degraded)
    }

    /// Derive the view a target dimension sees: the comparison prefix is
    /// the count of leading compatible columns. Mismatched trailing
    /// columns are ignored rather than an error; zero matching columns
    /// means no restriction at all.
    pub fn matched<'a>(&'a self, target_types: &[ColumnType]) -> BoundsView<'a> {
        let matching_ref_count = self
            .column_types
            .iter()
            .zip(target_types)
            .take_while(|(a, b)| a.compatible(**b))
            .count();
        if self.active && matching_ref_count == 0 {
            tracing::warn!(
                source_types = ?self.column_types,
                target_types = ?target_types,
                "no compatible leading columns, treating shared bounds as no restriction"
            );
        }
        BoundsView {
            bounds: self,
            matching_ref_count,
        }
    }
}

/// A target-specific view of shared bounds, truncated to the matched
/// column prefix.
#[derive(Debug, Clone, Copy)]
pub struct BoundsView<'a> {
    bounds: &'a SharedBounds,
    /// Number of leading columns both dimensions can compare
    pub matching_ref_count: usize,
}

impl BoundsView<'_> {
    /// Whether this view restricts anything.
    pub fn is_active(&self) -> bool {
        self.bounds.active && self.matching_ref_count > 0
    }

    pub fn raw_min(&self) -> &TickValue {
        &self.bounds.raw_min
    }

    pub fn raw_max(&self) -> &TickValue {
        &self.bounds.raw_max
    }
}
