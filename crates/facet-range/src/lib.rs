//! facet-range - Range filters and cross-filter window intersection
//!
//! The range half of the facet engine:
//!
//! - **Granularity**: calendar-exact stepping for date/time ticks
//!   (`DateGranularity`)
//! - **Range filters**: ascending tick sequences with a selected window
//!   and effective-bounds extraction (`RangeFilter`)
//! - **Shared bounds**: a captured selection propagated to linked
//!   filters, truncated per target to the compatible column prefix
//!   (`SharedBounds`)
//! - **Intersection**: binary search of the bounds against a target's
//!   ticks, with a linear fallback for degraded composite values
//!   (`intersect`, `intersect_linear`)
//!
//! # Examples
//!
//! ```
//! use facet_conditions::{ColumnType, ScalarValue};
//! use facet_range::{intersect, Intersection, RangeFilter, SharedBounds, TickValue};
//!
//! let mut source = RangeFilter::new(
//!     (1..=9).step_by(2).map(|v| TickValue::single(ScalarValue::Int(v))).collect(),
//! );
//! source.select_window(1, 2); // ticks 3..=7
//!
//! let bounds = SharedBounds::capture(&source, &[ColumnType::Integer]);
//! let target = RangeFilter::new(
//!     (2..=8).step_by(2).map(|v| TickValue::single(ScalarValue::Int(v))).collect(),
//! );
//! let result = intersect(&target, &bounds.matched(&[ColumnType::Integer]));
//! assert!(matches!(result, Intersection::Window(_)));
//! ```

pub mod bounds;
pub mod error;
pub mod filter;
pub mod granularity;
pub mod intersect;

pub use bounds::{BoundsView, SharedBounds};
pub use error::{RangeError, RangeResult};
pub use filter::{RangeFilter, RangeSelection, TickValue, TickWindow};
pub use granularity::DateGranularity;
pub use intersect::{intersect, intersect_linear, Intersection};
