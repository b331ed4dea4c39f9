//! Window intersection: propagating one filter's bounds onto another.
//!
//! Both boundaries come from binary search over the target's ascending
//! ticks, O(log n) each; the linear variant exists only as the degraded
//! path for composite values whose decode fell back to a single column.
//!
//! The right boundary is an upper_bound-style search: the smallest index
//! whose tick is `>= raw_max`. A tick strictly greater than `raw_max`
//! still becomes the window's right *edge* (edges bound, membership is
//! decided by the filter), so a bounds pair falling between ticks closes
//! over the surrounding interval instead of dropping it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::bounds::BoundsView;
use crate::filter::{RangeFilter, TickValue, TickWindow};

/// Result of intersecting shared bounds with a target filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intersection {
    /// No restriction: the target keeps (or returns to) its full domain.
    Full,
    /// The sub-window of the target's ticks covered by the bounds.
    Window(TickWindow),
}

/// Intersect a target filter's ticks with a shared-bounds view.
///
/// Inactive bounds short-circuit to [`Intersection::Full`] without
/// searching. Comparison is lexicographic over the view's matched column
/// prefix only.
pub fn intersect(target: &RangeFilter, view: &BoundsView<'_>) -> Intersection {
    if !view.is_active() {
        return Intersection::Full;
    }
    let ticks = target.ticks();
    if ticks.is_empty() {
        return Intersection::Full;
    }
    let prefix = view.matching_ref_count;

    let left = ticks.partition_point(|t| t.compare_prefix(view.raw_min(), prefix) == Ordering::Less);
    let right =
        ticks.partition_point(|t| t.compare_prefix(view.raw_max(), prefix) == Ordering::Less);

    resolve(target, view, left, right)
}

/// Linear-scan variant of [`intersect`], same contract. The degraded
/// fallback for targets whose composite values could not be decoded
/// per-column; explicitly O(n).
pub fn intersect_linear(target: &RangeFilter, view: &BoundsView<'_>) -> Intersection {
    if !view.is_active() {
        return Intersection::Full;
    }
    let ticks = target.ticks();
    if ticks.is_empty() {
        return Intersection::Full;
    }
    tracing::debug!(ticks = ticks.len(), "linear intersection fallback");
    let prefix = view.matching_ref_count;

    let position = |bound: &TickValue| {
        ticks
            .iter()
            .position(|t| t.compare_prefix(bound, prefix) != Ordering::Less)
            .unwrap_or(ticks.len())
    };
    let left = position(view.raw_min());
    let right = position(view.raw_max());

    resolve(target, view, left, right)
}

/// Turn raw boundary indices into the final window, applying the
/// whole-domain and degenerate-point escapes.
fn resolve(
    target: &RangeFilter,
    view: &BoundsView<'_>,
    left: usize,
    right: usize,
) -> Intersection {
    let ticks = target.ticks();
    let prefix = view.matching_ref_count;
    let max_index = ticks.len() - 1;

    // Bounds sitting strictly outside the tick domain on both sides do
    // not restrict anything.
    let below_domain =
        left == 0 && ticks[0].compare_prefix(view.raw_min(), prefix) == Ordering::Greater;
    let above_domain = right == ticks.len();
    if below_domain && above_domain {
        return Intersection::Full;
    }

    let start = left.min(max_index);
    let end = right.min(max_index);
    if start >= end {
        // A window collapsed to one tick restricts nothing the inclusive
        // upper edge would not already include; treat it as
        // unconstraining rather than over-restricting.
        if target.upper_inclusive() {
            return Intersection::Full;
        }
        return Intersection::Window(TickWindow {
            start: start.min(end),
            length: 0,
        });
    }

    Intersection::Window(TickWindow {
        start,
        length: end - start,
    })
}
