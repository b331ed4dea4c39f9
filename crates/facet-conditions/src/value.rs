//! Typed scalar values with ordering and string coercion.
//!
//! Selection widgets traffic in display strings; the query layer needs
//! native typed values. `ScalarValue` is the common currency: coerced from
//! raw strings per the bound column's type, compared with a total order so
//! sorted tick sequences can be binary-searched.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::column::ColumnType;

/// Marker substituted for a missing value when a selection path or
/// predicate needs a printable stand-in.
pub const NULL_VALUE: &str = "__NULL__";

/// Separator used when a multi-column value is encoded as a single string.
pub const COMPOSITE_SEPARATOR: &str = "::";

/// A typed scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    /// Absent value; compares before everything else
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl ScalarValue {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        ScalarValue::Text(s.into())
    }

    /// Whether this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Numeric view of the value, when it has one.
    fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Int(i) => Some(*i as f64),
            ScalarValue::Float(f) => Some(*f),
            ScalarValue::Bool(b) => Some(*b as i64 as f64),
            _ => None,
        }
    }

    /// Datetime view of the value, when it has one.
    fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            ScalarValue::Date(d) => d.and_hms_opt(0, 0, 0),
            ScalarValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Rank used to order values of incompatible types.
    fn type_rank(&self) -> u8 {
        match self {
            ScalarValue::Null => 0,
            ScalarValue::Bool(_) => 1,
            ScalarValue::Int(_) | ScalarValue::Float(_) => 2,
            ScalarValue::Date(_) | ScalarValue::DateTime(_) => 3,
            ScalarValue::Text(_) => 4,
        }
    }

    /// Total-order comparison.
    ///
    /// Null sorts first. Int and Float compare numerically, Date and
    /// DateTime compare on the timeline. Values of unrelated types fall
    /// back to a fixed type rank so the order stays total.
    pub fn compare(&self, other: &ScalarValue) -> Ordering {
        match (self, other) {
            (ScalarValue::Null, ScalarValue::Null) => Ordering::Equal,
            (ScalarValue::Null, _) => Ordering::Less,
            (_, ScalarValue::Null) => Ordering::Greater,
            (ScalarValue::Text(a), ScalarValue::Text(b)) => a.cmp(b),
            (ScalarValue::Bool(a), ScalarValue::Bool(b)) => a.cmp(b),
            _ => {
                if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
                    return a.total_cmp(&b);
                }
                if let (Some(a), Some(b)) = (self.as_datetime(), other.as_datetime()) {
                    return a.cmp(&b);
                }
                self.type_rank().cmp(&other.type_rank())
            }
        }
    }

    /// Re-type this value for a target column. Text re-parses against the
    /// column type (selection widgets carry display strings); values that
    /// are already native pass through unchanged. The null marker becomes
    /// `Null` even for text columns.
    pub fn coerced(&self, ty: ColumnType) -> ScalarValue {
        match self {
            ScalarValue::Text(raw) if raw.is_empty() || raw == NULL_VALUE => ScalarValue::Null,
            ScalarValue::Text(raw) if ty != ColumnType::Text => ScalarValue::coerce(raw, ty),
            other => other.clone(),
        }
    }

    /// Coerce a raw display string into this column type's native value.
    ///
    /// The empty string and the [`NULL_VALUE`] marker become `Null`. A
    /// string that does not parse as the target type degrades to `Text`
    /// instead of erroring; filtering on a mistyped value is preferable to
    /// aborting a widget refresh.
    pub fn coerce(raw: &str, ty: ColumnType) -> ScalarValue {
        if raw.is_empty() || raw == NULL_VALUE {
            return ScalarValue::Null;
        }
        match ty {
            ColumnType::Text => ScalarValue::Text(raw.to_string()),
            ColumnType::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" => ScalarValue::Bool(true),
                "false" | "0" => ScalarValue::Bool(false),
                _ => ScalarValue::Text(raw.to_string()),
            },
            ColumnType::Integer => raw
                .parse::<i64>()
                .map(ScalarValue::Int)
                .unwrap_or_else(|_| ScalarValue::Text(raw.to_string())),
            ColumnType::Float => raw
                .parse::<f64>()
                .map(ScalarValue::Float)
                .unwrap_or_else(|_| ScalarValue::Text(raw.to_string())),
            ColumnType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(ScalarValue::Date)
                .unwrap_or_else(|_| ScalarValue::Text(raw.to_string())),
            ColumnType::DateTime => parse_datetime(raw)
                .map(ScalarValue::DateTime)
                .unwrap_or_else(|| ScalarValue::Text(raw.to_string())),
        }
    }
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => write!(f, "{NULL_VALUE}"),
            ScalarValue::Bool(b) => write!(f, "{b}"),
            ScalarValue::Int(i) => write!(f, "{i}"),
            ScalarValue::Float(v) => write!(f, "{v}"),
            ScalarValue::Text(s) => write!(f, "{s}"),
            ScalarValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            ScalarValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Result of decoding a multi-column encoded value string.
#[derive(Debug, Clone, PartialEq)]
pub enum CompositeDecode {
    /// Segment count matched the expected column list
    Tuple(Vec<ScalarValue>),
    /// Segment count mismatch; the whole string was kept as one value.
    /// Callers that need per-column comparison should switch to the
    /// linear intersection path when they see this.
    Single(ScalarValue),
}

impl CompositeDecode {
    /// The decoded values, as a tuple either way.
    pub fn into_values(self) -> Vec<ScalarValue> {
        match self {
            CompositeDecode::Tuple(values) => values,
            CompositeDecode::Single(value) => vec![value],
        }
    }

    /// Whether the decode degraded to a single value.
    pub fn is_degraded(&self) -> bool {
        matches!(self, CompositeDecode::Single(_))
    }
}

/// Decode a [`COMPOSITE_SEPARATOR`]-joined value string against the
/// expected column types.
///
/// A segment count mismatch falls back to treating the whole string as a
/// single text value rather than erroring.
pub fn decode_composite(raw: &str, types: &[ColumnType]) -> CompositeDecode {
    let segments: Vec<&str> = raw.split(COMPOSITE_SEPARATOR).collect();
    if segments.len() == types.len() {
        let values = segments
            .iter()
            .zip(types)
            .map(|(seg, ty)| ScalarValue::coerce(seg, *ty))
            .collect();
        CompositeDecode::Tuple(values)
    } else {
        tracing::warn!(
            raw,
            expected = types.len(),
            actual = segments.len(),
            "composite value segment count mismatch, keeping as single value"
        );
        CompositeDecode::Single(ScalarValue::Text(raw.to_string()))
    }
}

/// Encode a tuple of values as a single [`COMPOSITE_SEPARATOR`]-joined
/// string. Inverse of [`decode_composite`] for well-formed input.
pub fn encode_composite(values: &[ScalarValue]) -> String {
    values
        .iter()
        .map(ScalarValue::to_string)
        .collect::<Vec<_>>()
        .join(COMPOSITE_SEPARATOR)
}
