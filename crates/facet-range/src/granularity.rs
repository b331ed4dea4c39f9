//! Calendar-exact granularity arithmetic.
//!
//! Range filters over dates step in whole calendar fields. All arithmetic
//! goes through chrono's checked operations on naive types, so a month
//! step lands on the right day across uneven month lengths and there is
//! no timezone to drift through.

use chrono::{Days, Duration, Months};
use facet_conditions::ScalarValue;
use serde::{Deserialize, Serialize};

/// The calendar field a date range filter steps in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateGranularity {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
}

impl DateGranularity {
    /// Whether this granularity subdivides a day.
    pub fn is_time_grained(self) -> bool {
        matches!(self, DateGranularity::Hour | DateGranularity::Minute)
    }

    /// Advance a temporal value by `steps` whole units. Returns `None`
    /// for non-temporal values or on calendar overflow.
    pub fn advance(self, value: &ScalarValue, steps: i32) -> Option<ScalarValue> {
        match self {
            DateGranularity::Year => add_months(value, steps.checked_mul(12)?),
            DateGranularity::Quarter => add_months(value, steps.checked_mul(3)?),
            DateGranularity::Month => add_months(value, steps),
            DateGranularity::Week => add_days(value, i64::from(steps) * 7),
            DateGranularity::Day => add_days(value, i64::from(steps)),
            DateGranularity::Hour => add_duration(value, Duration::hours(i64::from(steps))),
            DateGranularity::Minute => add_duration(value, Duration::minutes(i64::from(steps))),
        }
    }

    /// Step an upper bound back by the smallest representable unit: one
    /// day for date-grained filters, one second for time-grained ones.
    /// Turns an exclusive `< next-unit` bound into the closed bound
    /// callers see.
    pub fn step_back_unit(self, value: &ScalarValue) -> Option<ScalarValue> {
        if self.is_time_grained() {
            add_duration(value, Duration::seconds(-1))
        } else {
            add_days(value, -1)
        }
    }
}

fn add_months(value: &ScalarValue, months: i32) -> Option<ScalarValue> {
    let backwards = months < 0;
    let magnitude = Months::new(months.unsigned_abs());
    match value {
        ScalarValue::Date(d) => {
            let stepped = if backwards {
                d.checked_sub_months(magnitude)?
            } else {
                d.checked_add_months(magnitude)?
            };
            Some(ScalarValue::Date(stepped))
        }
        ScalarValue::DateTime(dt) => {
            let stepped = if backwards {
                dt.checked_sub_months(magnitude)?
            } else {
                dt.checked_add_months(magnitude)?
            };
            Some(ScalarValue::DateTime(stepped))
        }
        _ => None,
    }
}

fn add_days(value: &ScalarValue, days: i64) -> Option<ScalarValue> {
    let backwards = days < 0;
    let magnitude = Days::new(days.unsigned_abs());
    match value {
        ScalarValue::Date(d) => {
            let stepped = if backwards {
                d.checked_sub_days(magnitude)?
            } else {
                d.checked_add_days(magnitude)?
            };
            Some(ScalarValue::Date(stepped))
        }
        ScalarValue::DateTime(dt) => {
            let stepped = if backwards {
                dt.checked_sub_days(magnitude)?
            } else {
                dt.checked_add_days(magnitude)?
            };
            Some(ScalarValue::DateTime(stepped))
        }
        _ => None,
    }
}

fn add_duration(value: &ScalarValue, duration: Duration) -> Option<ScalarValue> {
    let dt = match value {
        ScalarValue::Date(d) => d.and_hms_opt(0, 0, 0)?,
        ScalarValue::DateTime(dt) => *dt,
        _ => return None,
    };
    dt.checked_add_signed(duration).map(ScalarValue::DateTime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> ScalarValue {
        ScalarValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test_case(DateGranularity::Month, (2024, 12, 1), 1, (2025, 1, 1) ; "month crosses year")]
    #[test_case(DateGranularity::Month, (2024, 1, 31), 1, (2024, 2, 29) ; "month clamps short months")]
    #[test_case(DateGranularity::Quarter, (2024, 11, 1), 1, (2025, 2, 1) ; "quarter is three months")]
    #[test_case(DateGranularity::Year, (2024, 2, 29), -1, (2023, 2, 28) ; "negative steps go backwards")]
    #[test_case(DateGranularity::Week, (2024, 12, 30), 1, (2025, 1, 6) ; "week is seven days")]
    #[test_case(DateGranularity::Day, (2024, 2, 28), 1, (2024, 2, 29) ; "day honors leap years")]
    fn advance_is_calendar_exact(
        granularity: DateGranularity,
        from: (i32, u32, u32),
        steps: i32,
        expected: (i32, u32, u32),
    ) {
        assert_eq!(
            granularity.advance(&date(from.0, from.1, from.2), steps),
            Some(date(expected.0, expected.1, expected.2))
        );
    }

    #[test]
    fn hour_advance_promotes_dates() {
        assert_eq!(
            DateGranularity::Hour.advance(&date(2024, 6, 1), 2),
            Some(ScalarValue::DateTime(datetime(2024, 6, 1, 2, 0, 0)))
        );
    }

    #[test]
    fn step_back_is_one_day_for_date_grains() {
        assert_eq!(
            DateGranularity::Month.step_back_unit(&date(2024, 7, 1)),
            Some(date(2024, 6, 30))
        );
    }

    #[test]
    fn step_back_is_one_second_for_time_grains() {
        assert_eq!(
            DateGranularity::Minute
                .step_back_unit(&ScalarValue::DateTime(datetime(2024, 6, 1, 10, 30, 0))),
            Some(ScalarValue::DateTime(datetime(2024, 6, 1, 10, 29, 59)))
        );
    }

    #[test]
    fn non_temporal_values_do_not_advance() {
        assert_eq!(DateGranularity::Day.advance(&ScalarValue::Int(5), 1), None);
    }
}
