//! Text rendering of values.
//!
//! The formats produced here are the only externally visible format of the
//! value layer:
//!
//! | Kind     | Rendering                                                  |
//! |----------|------------------------------------------------------------|
//! | String   | the text itself                                            |
//! | Bytes    | the raw bytes                                              |
//! | Number   | `3`, `-12`, `3.5`, `1e-05`, `1.2345675e+06`, `NaN`, `+Inf` |
//! | Bool     | `true` / `false`                                           |
//! | Nil      | `null`                                                     |
//! | Time     | RFC 3339, e.g. `2009-11-10T23:00:00Z`                      |
//! | Duration | `0s`, `1.5µs`, `20ms`, `1h2m3s`, `-1m30.5s`                |
//! | others   | empty                                                      |

use core::fmt::{self, Write};

use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, Utc};

use smallvec::SmallVec;

use super::convert::exact_i64;
use super::{Kind, Value};

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

// ============================================================================
// Options
// ============================================================================

/// Rendering options for [`Value::text_with`].
///
/// Only times are affected; every other kind has a single rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Offset applied to times before rendering.
    pub time_offset: FixedOffset,
    /// Sub-second digits written for times.
    pub time_precision: SecondsFormat,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            time_offset: Utc.fix(),
            time_precision: SecondsFormat::Secs,
        }
    }
}

/// Partial [`TextOptions`]: `None` fields keep the base value.
///
/// ```
/// use kit_core::values::{TextOptions, TextOptionsOverride};
/// use chrono::SecondsFormat;
///
/// let opts = TextOptions::default().override_with(&TextOptionsOverride {
///     time_precision: Some(SecondsFormat::Millis),
///     ..Default::default()
/// });
/// assert_eq!(opts.time_precision, SecondsFormat::Millis);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextOptionsOverride {
    pub time_offset: Option<FixedOffset>,
    pub time_precision: Option<SecondsFormat>,
}

impl TextOptions {
    pub fn override_with(&self, overrides: &TextOptionsOverride) -> Self {
        Self {
            time_offset: overrides.time_offset.unwrap_or(self.time_offset),
            time_precision: overrides.time_precision.unwrap_or(self.time_precision),
        }
    }
}

// ============================================================================
// Sinks
// ============================================================================

/// A text destination that may also accept raw bytes.
///
/// Text destinations decode bytes lossily; byte destinations copy them as-is.
pub(crate) trait Sink: Write {
    fn write_bytes(&mut self, bytes: &[u8]) -> fmt::Result {
        self.write_str(&String::from_utf8_lossy(bytes))
    }
}

impl Sink for String {}

impl Sink for fmt::Formatter<'_> {}

struct ByteSink<'a>(&'a mut Vec<u8>);

impl Write for ByteSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl Sink for ByteSink<'_> {
    fn write_bytes(&mut self, bytes: &[u8]) -> fmt::Result {
        self.0.extend_from_slice(bytes);
        Ok(())
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub(crate) fn write_value<S: Sink>(out: &mut S, value: &Value, opts: &TextOptions) -> fmt::Result {
    match value.kind() {
        Kind::String => out.write_str(value.str()),
        Kind::Bytes => out.write_bytes(value.as_bytes()),
        Kind::Number => write_number(out, value.as_float()),
        Kind::Bool => out.write_str(if value.as_float() > 0.0 { "true" } else { "false" }),
        Kind::Nil => out.write_str("null"),
        Kind::Time => write_time(out, value.as_int(), opts),
        Kind::Duration => write_duration(out, value.as_int()),
        Kind::Invalid | Kind::Map | Kind::Array | Kind::Struct | Kind::Func | Kind::Any => Ok(()),
    }
}

/// Stack buffer for the scientific rendering of one `f64`.
struct DigitBuf(SmallVec<[u8; 32]>);

impl Write for DigitBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

/// Integral values in `i64` range print as integers, everything else in the
/// shortest `%g` form.
fn write_number<W: Write>(out: &mut W, n: f64) -> fmt::Result {
    if let Some(i) = exact_i64(n) {
        return write!(out, "{i}");
    }
    write_float(out, n)
}

fn write_float<W: Write>(out: &mut W, n: f64) -> fmt::Result {
    if n.is_nan() {
        return out.write_str("NaN");
    }
    if n.is_infinite() {
        return out.write_str(if n > 0.0 { "+Inf" } else { "-Inf" });
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345675e6".
    let mut sci = DigitBuf(SmallVec::new());
    write!(sci, "{:e}", n.abs())?;
    let mut sci = sci.0;
    let e = sci.iter().position(|&b| b == b'e').ok_or(fmt::Error)?;
    let exp: i32 = core::str::from_utf8(&sci[e + 1..])
        .ok()
        .and_then(|exp| exp.parse().ok())
        .ok_or(fmt::Error)?;
    sci.truncate(e);
    if sci.get(1) == Some(&b'.') {
        sci.remove(1);
    }
    let digits = core::str::from_utf8(&sci).map_err(|_| fmt::Error)?;

    if n.is_sign_negative() {
        out.write_char('-')?;
    }

    if !(-4..6).contains(&exp) {
        out.write_str(&digits[..1])?;
        if digits.len() > 1 {
            out.write_char('.')?;
            out.write_str(&digits[1..])?;
        }
        let sign = if exp < 0 { '-' } else { '+' };
        return write!(out, "e{sign}{:02}", exp.unsigned_abs());
    }

    if exp < 0 {
        out.write_str("0.")?;
        for _ in 0..(-exp - 1) {
            out.write_char('0')?;
        }
        return out.write_str(digits);
    }

    let point = exp as usize + 1;
    if digits.len() <= point {
        out.write_str(digits)?;
        for _ in digits.len()..point {
            out.write_char('0')?;
        }
        return Ok(());
    }
    out.write_str(&digits[..point])?;
    out.write_char('.')?;
    out.write_str(&digits[point..])
}

fn write_time<W: Write>(out: &mut W, nanos: i64, opts: &TextOptions) -> fmt::Result {
    let time = DateTime::<Utc>::from_timestamp_nanos(nanos).with_timezone(&opts.time_offset);
    out.write_str(&time.to_rfc3339_opts(opts.time_precision, true))
}

fn write_duration<W: Write>(out: &mut W, nanos: i64) -> fmt::Result {
    if nanos == 0 {
        return out.write_str("0s");
    }
    if nanos < 0 {
        out.write_char('-')?;
    }
    let u = nanos.unsigned_abs();

    if u < NANOS_PER_SEC {
        let (unit, scale, prec) = if u < NANOS_PER_MICRO {
            ("ns", 1, 0)
        } else if u < NANOS_PER_MILLI {
            ("µs", NANOS_PER_MICRO, 3)
        } else {
            ("ms", NANOS_PER_MILLI, 6)
        };
        write!(out, "{}", u / scale)?;
        write_fraction(out, u % scale, prec)?;
        return out.write_str(unit);
    }

    let secs = u / NANOS_PER_SEC;
    let hours = secs / 3600;
    if hours > 0 {
        write!(out, "{hours}h")?;
    }
    if secs >= 60 {
        write!(out, "{}m", (secs / 60) % 60)?;
    }
    write!(out, "{}", secs % 60)?;
    write_fraction(out, u % NANOS_PER_SEC, 9)?;
    out.write_char('s')
}

/// Writes `.ddd` for a fraction of `prec` digits, without trailing zeros.
fn write_fraction<W: Write>(out: &mut W, mut frac: u64, mut prec: usize) -> fmt::Result {
    if frac == 0 {
        return Ok(());
    }
    while frac % 10 == 0 {
        frac /= 10;
        prec -= 1;
    }
    write!(out, ".{frac:0prec$}")
}

// ============================================================================
// Value API
// ============================================================================

impl Value {
    /// Render with the default [`TextOptions`].
    ///
    /// Composite kinds (Map, Array, Struct, Func, Any) and Invalid render as `""`.
    pub fn text(&self) -> String {
        self.text_with(&TextOptions::default())
    }

    pub fn text_with(&self, opts: &TextOptions) -> String {
        let mut buf = String::new();
        self.append_text_with(&mut buf, opts);
        buf
    }

    pub fn append_text(&self, buf: &mut String) {
        self.append_text_with(buf, &TextOptions::default());
    }

    pub fn append_text_with(&self, buf: &mut String, opts: &TextOptions) {
        // Writing into a String cannot fail.
        let _ = write_value(buf, self, opts);
    }

    /// Append the rendering to a byte buffer. Bytes values are copied
    /// verbatim, even when they are not valid UTF-8.
    pub fn append(&self, buf: &mut Vec<u8>) {
        let _ = write_value(&mut ByteSink(buf), self, &TextOptions::default());
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &TextOptions::default())
    }
}
