//! Property tests for window intersection.

use facet_conditions::{ColumnType, ScalarValue};
use facet_range::{intersect, intersect_linear, Intersection, RangeFilter, SharedBounds, TickValue};
use proptest::prelude::*;

fn int_ticks(values: Vec<i64>) -> Vec<TickValue> {
    let mut values = values;
    values.sort_unstable();
    values.dedup();
    values
        .into_iter()
        .map(|v| TickValue::single(ScalarValue::Int(v)))
        .collect()
}

fn int_bounds(min: i64, max: i64, active: bool) -> SharedBounds {
    SharedBounds {
        raw_min: TickValue::single(ScalarValue::Int(min)),
        raw_max: TickValue::single(ScalarValue::Int(max)),
        column_types: vec![ColumnType::Integer],
        upper_inclusive: true,
        active,
    }
}

proptest! {
    /// Inactive bounds always intersect to the full range, for any tick
    /// sequence including empty and single-tick ones.
    #[test]
    fn inactive_bounds_are_always_full(
        values in prop::collection::vec(-50i64..50, 0..12),
        min in -60i64..60,
        max in -60i64..60,
    ) {
        let target = RangeFilter::new(int_ticks(values));
        let bounds = int_bounds(min.min(max), min.max(max), false);
        let view = bounds.matched(&[ColumnType::Integer]);
        prop_assert_eq!(intersect(&target, &view), Intersection::Full);
        prop_assert_eq!(intersect_linear(&target, &view), Intersection::Full);
    }

    /// The binary-search path and the linear fallback agree everywhere.
    #[test]
    fn linear_and_binary_agree(
        values in prop::collection::vec(-50i64..50, 1..16),
        min in -60i64..60,
        max in -60i64..60,
        upper_inclusive in any::<bool>(),
    ) {
        let target =
            RangeFilter::new(int_ticks(values)).with_upper_inclusive(upper_inclusive);
        let bounds = int_bounds(min.min(max), min.max(max), true);
        let view = bounds.matched(&[ColumnType::Integer]);
        prop_assert_eq!(intersect(&target, &view), intersect_linear(&target, &view));
    }

    /// A produced window always stays inside the target's tick bounds.
    #[test]
    fn window_stays_in_bounds(
        values in prop::collection::vec(-50i64..50, 1..16),
        min in -60i64..60,
        max in -60i64..60,
    ) {
        let target = RangeFilter::new(int_ticks(values));
        let tick_count = target.ticks().len();
        let bounds = int_bounds(min.min(max), min.max(max), true);
        let view = bounds.matched(&[ColumnType::Integer]);
        if let Intersection::Window(window) = intersect(&target, &view) {
            prop_assert!(window.start < tick_count);
            prop_assert!(window.start + window.length < tick_count);
        }
    }

    /// Every tick value inside the bounds interval is covered by the
    /// produced window (or the result is Full).
    #[test]
    fn covered_ticks_fall_in_window(
        values in prop::collection::vec(-50i64..50, 1..16),
        min in -60i64..60,
        max in -60i64..60,
    ) {
        let target = RangeFilter::new(int_ticks(values));
        let (lo, hi) = (min.min(max), min.max(max));
        let bounds = int_bounds(lo, hi, true);
        let view = bounds.matched(&[ColumnType::Integer]);
        match intersect(&target, &view) {
            Intersection::Full => {}
            Intersection::Window(window) => {
                for (index, tick) in target.ticks().iter().enumerate() {
                    let ScalarValue::Int(v) = tick.values()[0] else { unreachable!() };
                    if v >= lo && v <= hi {
                        prop_assert!(
                            index >= window.start && index <= window.start + window.length,
                            "tick {v} at {index} outside window {window:?}"
                        );
                    }
                }
            }
        }
    }
}
