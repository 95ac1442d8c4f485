//! Typed extraction through `TryFrom<&Value>`.
//!
//! Unlike the lenient projections on [`Value`] (`as_int`, `str`, ...), these
//! conversions check the kind first and report a [`TypeError`].

use chrono::{DateTime, TimeDelta, Utc};

use super::error::TypeError;
use super::{Kind, Value};

fn expect(value: &Value, expected: Kind) -> Result<(), TypeError> {
    if value.kind() == expected {
        Ok(())
    } else {
        Err(TypeError::Mismatch {
            expected,
            found: value.kind(),
        })
    }
}

/// `n` as an `i64` when it is integral and inside `[-2^63, 2^63)`.
///
/// A plain `as` cast saturates, so 2^63 would come back as `i64::MAX`.
pub(crate) fn exact_i64(n: f64) -> Option<i64> {
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if n.fract() == 0.0 && (-BOUND..BOUND).contains(&n) {
        Some(n as i64)
    } else {
        None
    }
}

impl TryFrom<&Value> for f64 {
    type Error = TypeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        expect(value, Kind::Number)?;
        Ok(value.as_float())
    }
}

impl TryFrom<&Value> for i64 {
    type Error = TypeError;

    /// Only integral numbers within the `i64` range convert.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        expect(value, Kind::Number)?;
        exact_i64(value.as_float()).ok_or(TypeError::OutOfRange {
            kind: Kind::Number,
            target: "i64",
        })
    }
}

impl TryFrom<&Value> for bool {
    type Error = TypeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        expect(value, Kind::Bool)?;
        Ok(value.is_true())
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = TypeError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        expect(value, Kind::String)?;
        Ok(value.str())
    }
}

impl TryFrom<&Value> for String {
    type Error = TypeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        <&str>::try_from(value).map(str::to_owned)
    }
}

impl TryFrom<&Value> for Vec<u8> {
    type Error = TypeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        expect(value, Kind::Bytes)?;
        Ok(value.as_bytes().to_vec())
    }
}

impl TryFrom<&Value> for DateTime<Utc> {
    type Error = TypeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        expect(value, Kind::Time)?;
        Ok(DateTime::<Utc>::from_timestamp_nanos(value.as_int()))
    }
}

impl TryFrom<&Value> for TimeDelta {
    type Error = TypeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        expect(value, Kind::Duration)?;
        Ok(TimeDelta::nanoseconds(value.as_int()))
    }
}

impl TryFrom<&Value> for std::time::Duration {
    type Error = TypeError;

    /// Negative durations do not convert.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        expect(value, Kind::Duration)?;
        let nanos = u64::try_from(value.as_int()).map_err(|_| TypeError::OutOfRange {
            kind: Kind::Duration,
            target: "std::time::Duration",
        })?;
        Ok(std::time::Duration::from_nanos(nanos))
    }
}
