use chrono::{FixedOffset, SecondsFormat};
use pretty_assertions::assert_eq;

use crate::values::{Kind, Map, TextOptions, TextOptionsOverride, Value};

const NANOS_PER_SEC: i64 = 1_000_000_000;

fn number(n: f64) -> String {
    Value::number(n).text()
}

fn duration(nanos: i64) -> String {
    Value::duration_nanos(nanos).text()
}

#[test]
fn test_integral_numbers() {
    assert_eq!(number(3.0), "3");
    assert_eq!(number(-12.0), "-12");
    assert_eq!(number(0.0), "0");
    assert_eq!(number(1e15), "1000000000000000");
}

#[test]
fn test_fractional_numbers() {
    assert_eq!(number(3.5), "3.5");
    assert_eq!(number(-0.5), "-0.5");
    assert_eq!(number(0.1), "0.1");
    assert_eq!(number(0.0001), "0.0001");
    assert_eq!(number(100000.5), "100000.5");
}

#[test]
fn test_exponent_numbers() {
    assert_eq!(number(0.00001), "1e-05");
    assert_eq!(number(1234567.5), "1.2345675e+06");
    assert_eq!(number(1e21), "1e+21");
    assert_eq!(number(-2.5e-10), "-2.5e-10");
    assert_eq!(number(f64::MAX), "1.7976931348623157e+308");
    assert_eq!(number(f64::MIN_POSITIVE), "2.2250738585072014e-308");
}

#[test]
fn test_i64_boundary_numbers() {
    let two_63 = 2f64.powi(63);
    assert_eq!(number(two_63), "9.223372036854776e+18");
    assert_eq!(number(-two_63), "-9223372036854775808");
}

#[test]
fn test_special_numbers() {
    assert_eq!(number(f64::NAN), "NaN");
    assert_eq!(number(f64::INFINITY), "+Inf");
    assert_eq!(number(f64::NEG_INFINITY), "-Inf");
}

#[test]
fn test_shortest_round_trip() {
    for n in [0.1 + 0.2, 1.0 / 3.0, 2.0f64.sqrt(), 123.456] {
        let text = number(n);
        assert_eq!(text.parse::<f64>().unwrap(), n, "{text}");
    }
}

#[test]
fn test_fixed_renderings() {
    assert_eq!(Value::bool(true).text(), "true");
    assert_eq!(Value::bool(false).text(), "false");
    assert_eq!(Value::NIL.text(), "null");
    assert_eq!(Value::string("plain").text(), "plain");
    assert_eq!(Value::bytes(b"raw".to_vec()).text(), "raw");
}

#[test]
fn test_composites_render_empty() {
    for value in [
        Value::INVALID,
        Value::map(Map::new()),
        Value::new(vec![1, 2]),
        Value::func(|_: &[Value]| Value::NIL),
        Value::placeholder(Kind::Struct),
    ] {
        assert_eq!(value.text(), "", "{:?}", value.kind());
    }
}

#[test]
fn test_time_rfc3339() {
    let time = Value::time_nanos(1_257_894_000 * NANOS_PER_SEC);
    assert_eq!(time.text(), "2009-11-10T23:00:00Z");
    assert_eq!(Value::time_nanos(0).text(), "1970-01-01T00:00:00Z");
}

#[test]
fn test_time_options() {
    let time = Value::time_nanos(12_578_940_005 * 100_000_000);

    let shifted = TextOptions::default().override_with(&TextOptionsOverride {
        time_offset: FixedOffset::east_opt(3600),
        ..Default::default()
    });
    assert_eq!(time.text_with(&shifted), "2009-11-11T00:00:00+01:00");

    let millis = TextOptions {
        time_precision: SecondsFormat::Millis,
        ..Default::default()
    };
    assert_eq!(time.text_with(&millis), "2009-11-10T23:00:00.500Z");
}

#[test]
fn test_durations() {
    assert_eq!(duration(0), "0s");
    assert_eq!(duration(999), "999ns");
    assert_eq!(duration(1_500), "1.5µs");
    assert_eq!(duration(20_000_000), "20ms");
    assert_eq!(duration(1_500_000_000), "1.5s");
    assert_eq!(duration(61 * NANOS_PER_SEC), "1m1s");
    assert_eq!(duration(3_723 * NANOS_PER_SEC), "1h2m3s");
    assert_eq!(duration(3_600 * NANOS_PER_SEC), "1h0m0s");
    assert_eq!(duration(-90_500_000_000), "-1m30.5s");
    assert_eq!(duration(-1), "-1ns");
}

#[test]
fn test_append_text() {
    let mut buf = String::from("n=");
    Value::number(7.0).append_text(&mut buf);
    buf.push(' ');
    Value::NIL.append_text(&mut buf);
    assert_eq!(buf, "n=7 null");
}

#[test]
fn test_append_bytes_is_verbatim() {
    let value = Value::bytes(vec![b'a', 0xff]);

    let mut buf = Vec::new();
    value.append(&mut buf);
    assert_eq!(buf, vec![b'a', 0xff]);

    // Text sinks decode lossily.
    assert_eq!(value.text(), "a\u{FFFD}");
}

#[test]
fn test_display() {
    assert_eq!(format!("{}", Value::number(2.5)), "2.5");
    assert_eq!(format!("[{}]", Value::string("x")), "[x]");
    assert_eq!(Value::duration_nanos(NANOS_PER_SEC).to_string(), "1s");
}
