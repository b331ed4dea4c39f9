//! Range filter state: ordered ticks and a selected window.
//!
//! Ticks are the selectable boundary values computed from the data range,
//! strictly ascending. The selection is a contiguous window over them;
//! `None` means the user has not restricted anything. A filter may carry
//! one synthetic trailing tick that only represents "up to but not
//! including the domain maximum"; it bounds a window but is never itself
//! a selectable data value.

use std::cmp::Ordering;

use facet_conditions::ScalarValue;
use serde::{Deserialize, Serialize};

use crate::error::RangeError;
use crate::granularity::DateGranularity;

/// One tick's value: an ordered tuple of scalars. Plain number/date
/// filters use singleton tuples; multi-column dimensions (year/quarter)
/// use longer ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickValue(pub Vec<ScalarValue>);

impl TickValue {
    /// Singleton tick.
    pub fn single(value: ScalarValue) -> Self {
        Self(vec![value])
    }

    pub fn values(&self) -> &[ScalarValue] {
        &self.0
    }

    /// Lexicographic comparison over the leading `prefix` components.
    /// Components beyond the prefix are ignored entirely; a missing
    /// component orders before a present one.
    pub fn compare_prefix(&self, other: &TickValue, prefix: usize) -> Ordering {
        for i in 0..prefix {
            let ord = match (self.0.get(i), other.0.get(i)) {
                (Some(a), Some(b)) => a.compare(b),
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Full-width comparison (the longer tuple wins ties on the shared
    /// prefix).
    pub fn compare(&self, other: &TickValue) -> Ordering {
        self.compare_prefix(other, self.0.len().max(other.0.len()))
    }
}

impl From<ScalarValue> for TickValue {
    fn from(value: ScalarValue) -> Self {
        Self::single(value)
    }
}

/// A contiguous window over a tick sequence: `length` ticks beyond
/// `start` are included along with `start` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickWindow {
    pub start: usize,
    pub length: usize,
}

/// The effective bounds a range selection places on its column.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSelection {
    pub min: TickValue,
    pub max: TickValue,
    pub max_inclusive: bool,
}

/// A range filter: ascending ticks plus an optional selected window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeFilter {
    ticks: Vec<TickValue>,
    window: Option<TickWindow>,
    upper_inclusive: bool,
    exclusive_end_tick: bool,
    granularity: Option<DateGranularity>,
}

impl RangeFilter {
    /// Filter over already-ordered ticks. Out-of-order or duplicate input
    /// is repaired (sorted, deduplicated) rather than rejected; use
    /// [`RangeFilter::try_new`] when restoring persisted state that must
    /// have been well-formed.
    pub fn new(ticks: Vec<TickValue>) -> Self {
        let mut filter = Self {
            ticks: Vec::new(),
            window: None,
            upper_inclusive: true,
            exclusive_end_tick: false,
            granularity: None,
        };
        filter.set_ticks(ticks);
        filter
    }

    /// Strictly validating constructor.
    pub fn try_new(ticks: Vec<TickValue>) -> Result<Self, RangeError> {
        for (index, pair) in ticks.windows(2).enumerate() {
            if pair[0].compare(&pair[1]) != Ordering::Less {
                return Err(RangeError::UnorderedTicks { index: index + 1 });
            }
        }
        Ok(Self {
            ticks,
            window: None,
            upper_inclusive: true,
            exclusive_end_tick: false,
            granularity: None,
        })
    }

    /// Builder-style open upper edge (window right edge excluded).
    pub fn with_upper_inclusive(mut self, upper_inclusive: bool) -> Self {
        self.upper_inclusive = upper_inclusive;
        self
    }

    /// Builder-style trailing sentinel flag: the last tick only bounds
    /// the domain and is never a data value.
    pub fn with_exclusive_end_tick(mut self, exclusive_end_tick: bool) -> Self {
        self.exclusive_end_tick = exclusive_end_tick;
        self
    }

    /// Builder-style calendar granularity for date/time ticks.
    pub fn with_granularity(mut self, granularity: DateGranularity) -> Self {
        self.granularity = Some(granularity);
        self
    }

    pub fn ticks(&self) -> &[TickValue] {
        &self.ticks
    }

    pub fn window(&self) -> Option<TickWindow> {
        self.window
    }

    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    pub fn granularity(&self) -> Option<DateGranularity> {
        self.granularity
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Index of the last tick that is a real data value (skipping the
    /// trailing sentinel).
    pub fn last_data_index(&self) -> Option<usize> {
        let last = self.ticks.len().checked_sub(1)?;
        if self.exclusive_end_tick {
            last.checked_sub(1)
        } else {
            Some(last)
        }
    }

    /// Replace the tick sequence after a data refresh. The previous
    /// window is clamped into the new bounds rather than preserved
    /// verbatim; stale indices never survive.
    pub fn set_ticks(&mut self, mut ticks: Vec<TickValue>) {
        let ordered = ticks
            .windows(2)
            .all(|pair| pair[0].compare(&pair[1]) == Ordering::Less);
        if !ordered {
            tracing::warn!("tick sequence not strictly ascending, repairing");
            ticks.sort_by(|a, b| a.compare(b));
            ticks.dedup_by(|a, b| a.compare(b) == Ordering::Equal);
        }
        self.ticks = ticks;
        self.clamp_window();
    }

    /// Select a window, clamped into the tick bounds.
    pub fn select_window(&mut self, start: usize, length: usize) {
        if self.ticks.is_empty() {
            self.window = None;
            return;
        }
        self.window = Some(TickWindow { start, length });
        self.clamp_window();
    }

    /// Select the whole domain.
    pub fn select_all(&mut self) {
        if self.ticks.is_empty() {
            self.window = None;
        } else {
            self.window = Some(TickWindow {
                start: 0,
                length: self.ticks.len() - 1,
            });
        }
    }

    /// Drop the selection entirely (no restriction).
    pub fn clear_window(&mut self) {
        self.window = None;
    }

    /// Whether the current window covers the whole selectable domain.
    pub fn window_spans_domain(&self) -> bool {
        match (self.window, self.ticks.len()) {
            (Some(w), n) if n > 0 => w.start == 0 && w.start + w.length >= n - 1,
            _ => false,
        }
    }

    fn clamp_window(&mut self) {
        let Some(window) = self.window else {
            return;
        };
        if self.ticks.is_empty() {
            self.window = None;
            return;
        }
        let max_index = self.ticks.len() - 1;
        let start = window.start.min(max_index);
        let length = window.length.min(max_index - start);
        if (start, length) != (window.start, window.length) {
            tracing::debug!(
                start,
                length,
                old_start = window.start,
                old_length = window.length,
                "clamped tick window after refresh"
            );
        }
        self.window = Some(TickWindow { start, length });
    }

    /// The tick indices the current window actually selects, with the
    /// trailing sentinel excluded even when the window's edge sits on it.
    pub fn selected_tick_indices(&self) -> Vec<usize> {
        let Some(window) = self.window else {
            return Vec::new();
        };
        let Some(last_data) = self.last_data_index() else {
            return Vec::new();
        };
        let end = (window.start + window.length).min(last_data);
        if window.start > end {
            return Vec::new();
        }
        (window.start..=end).collect()
    }

    /// The raw min/max tick values of the current window, sentinel
    /// excluded and with no calendar adjustment. This is what bounds
    /// propagation captures: dependents share the source's tick
    /// vocabulary, not its predicate output.
    pub fn selection_bounds_raw(&self) -> Option<(TickValue, TickValue)> {
        let window = self.window?;
        let last_data = self.last_data_index()?;
        if window.start > last_data {
            // window sits entirely on the sentinel
            return None;
        }
        let max_index = (window.start + window.length).min(last_data);
        Some((
            self.ticks[window.start].clone(),
            self.ticks[max_index].clone(),
        ))
    }

    /// The effective selection bounds, or `None` when nothing is
    /// restricted.
    ///
    /// `min` is the first window tick's value; `max` the last that is not
    /// the sentinel. For an inclusive upper edge on a granular date axis,
    /// the bound is advanced one granule: the strict variant exposes that
    /// advanced value for `<` comparison, the non-strict variant steps it
    /// back one unit into the closed bound callers see.
    pub fn selection_bounds(&self, strict_upper: bool) -> Option<RangeSelection> {
        let (min, max) = self.selection_bounds_raw()?;

        if !self.upper_inclusive {
            return Some(RangeSelection {
                min,
                max,
                max_inclusive: false,
            });
        }

        if let (Some(granularity), [single]) = (self.granularity, max.values()) {
            if let Some(advanced) = granularity.advance(single, 1) {
                if strict_upper {
                    return Some(RangeSelection {
                        min,
                        max: TickValue::single(advanced),
                        max_inclusive: false,
                    });
                }
                if let Some(stepped) = granularity.step_back_unit(&advanced) {
                    return Some(RangeSelection {
                        min,
                        max: TickValue::single(stepped),
                        max_inclusive: true,
                    });
                }
            }
        }

        Some(RangeSelection {
            min,
            max,
            max_inclusive: true,
        })
    }
}
