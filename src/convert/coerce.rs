//! Value coercion: one record value into one frame cell.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use super::canonical;
use crate::frame::{OutputType, Scalar};
use crate::model::{PropertyMap, Value};

/// Date a bare time of day is placed on. This is where the Go driver's
/// zero `time.Time` date normalizes to, kept for output compatibility.
pub fn time_reference_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(-1, 11, 30)
}

/// Coerce `value` for a column of type `target`.
///
/// `Null` yields `None`. Matching primitives pass through and integers
/// widen into float columns. Temporal values become absolute instants in
/// temporal columns, durations render as ISO text, and everything else
/// falls back to the canonical JSON text. A value that cannot be
/// serialized becomes an empty string.
pub fn coerce(value: &Value, target: OutputType) -> Option<Scalar> {
    match (value, target) {
        (Value::Null, _) => None,
        (Value::Int(i), OutputType::Integer) => Some(Scalar::Int(*i)),
        (Value::Float(f), OutputType::Float) => Some(Scalar::Float(*f)),
        (Value::Int(i), OutputType::Float) => Some(Scalar::Float(*i as f64)),
        (Value::Bool(b), OutputType::Boolean) => Some(Scalar::Bool(*b)),
        (Value::String(s), OutputType::String) => Some(Scalar::String(s.clone())),
        (v, OutputType::Temporal) if v.is_temporal() => to_instant(v).map(Scalar::Time),
        (Value::Duration(d), _) => Some(Scalar::String(d.to_string())),
        (v, _) => Some(Scalar::String(json_or_empty(canonical::to_json_string(v)))),
    }
}

/// Canonical text of a property map, as shown in node-graph detail columns.
pub fn coerce_properties(props: &PropertyMap) -> Scalar {
    Scalar::String(json_or_empty(canonical::properties_to_json_string(props)))
}

fn json_or_empty(json: crate::Result<String>) -> String {
    json.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "JSON serialization failed, using empty string");
        String::new()
    })
}

/// Absolute point in time for a temporal value.
///
/// Local values are read as UTC, dates are placed at midnight and times
/// of day on [`time_reference_date`].
pub fn to_instant(value: &Value) -> Option<DateTime<FixedOffset>> {
    let utc = FixedOffset::east_opt(0)?;
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::LocalDateTime(ndt) => Some(utc.from_utc_datetime(ndt)),
        Value::Date(d) => Some(utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?)),
        Value::Time { time, offset_seconds } => {
            let offset = FixedOffset::east_opt(*offset_seconds)?;
            offset.from_local_datetime(&on_reference_date(*time)?).single()
        }
        Value::LocalTime(time) => Some(utc.from_utc_datetime(&on_reference_date(*time)?)),
        _ => None,
    }
}

fn on_reference_date(time: NaiveTime) -> Option<NaiveDateTime> {
    Some(time_reference_date()?.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{property_map, IsoDuration, Node, Relationship};
    use chrono::{Datelike, Timelike};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            + chrono::Duration::milliseconds(ms as i64)
    }

    #[test]
    fn test_null_is_absent_for_every_target() {
        for target in [
            OutputType::Integer,
            OutputType::Float,
            OutputType::Boolean,
            OutputType::Temporal,
            OutputType::String,
        ] {
            assert_eq!(coerce(&Value::Null, target), None);
        }
    }

    #[test]
    fn test_matching_primitives_pass_through() {
        assert_eq!(coerce(&Value::Int(1), OutputType::Integer), Some(Scalar::Int(1)));
        assert_eq!(coerce(&Value::Float(0.81234), OutputType::Float), Some(Scalar::Float(0.81234)));
        assert_eq!(coerce(&Value::Bool(true), OutputType::Boolean), Some(Scalar::Bool(true)));
        assert_eq!(coerce(&Value::from("One"), OutputType::String), Some(Scalar::from("One")));
    }

    #[test]
    fn test_integer_widens_into_float_column() {
        assert_eq!(coerce(&Value::Int(2), OutputType::Float), Some(Scalar::Float(2.0)));
        assert_eq!(coerce(&Value::Float(2.5), OutputType::Integer), Some(Scalar::from("2.5")));
    }

    #[test]
    fn test_zoned_datetime_keeps_offset() {
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        let dt = plus_one.with_ymd_and_hms(2022, 3, 2, 13, 14, 15).unwrap()
            + chrono::Duration::milliseconds(144);
        let Some(Scalar::Time(out)) = coerce(&Value::DateTime(dt), OutputType::Temporal) else {
            panic!("expected a time cell");
        };
        assert_eq!(out, dt);
        assert_eq!(out.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_date_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();
        assert_eq!(
            coerce(&Value::Date(date), OutputType::Temporal),
            Some(Scalar::Time(utc(2019, 6, 1, 0, 0, 0, 0)))
        );
    }

    #[test]
    fn test_local_datetime_is_utc() {
        let ndt = NaiveDate::from_ymd_opt(2022, 3, 2).unwrap().and_hms_milli_opt(13, 14, 15, 144).unwrap();
        assert_eq!(
            coerce(&Value::LocalDateTime(ndt), OutputType::Temporal),
            Some(Scalar::Time(utc(2022, 3, 2, 13, 14, 15, 144)))
        );
    }

    #[test]
    fn test_time_of_day_lands_on_reference_date() {
        let time = NaiveTime::from_hms_opt(19, 15, 30).unwrap();
        let Some(Scalar::Time(out)) = coerce(&Value::LocalTime(time), OutputType::Temporal) else {
            panic!("expected a time cell");
        };
        assert_eq!((out.year(), out.month(), out.day()), (-1, 11, 30));
        assert_eq!((out.hour(), out.minute(), out.second()), (19, 15, 30));

        let zoned = Value::Time { time, offset_seconds: -7200 };
        let Some(Scalar::Time(out)) = coerce(&zoned, OutputType::Temporal) else {
            panic!("expected a time cell");
        };
        assert_eq!(out.hour(), 19);
        assert_eq!(out.offset().local_minus_utc(), -7200);
    }

    #[test]
    fn test_duration_renders_iso_text() {
        let d = Value::Duration(IsoDuration::new(0, 0, 180, 0));
        assert_eq!(coerce(&d, OutputType::String), Some(Scalar::from("P0M0DT180S")));
        assert_eq!(coerce(&d, OutputType::Integer), Some(Scalar::from("P0M0DT180S")));
    }

    #[test]
    fn test_composites_serialize() {
        let node = Value::from(Node::new(3).with_labels(["Person"]));
        assert_eq!(
            coerce(&node, OutputType::String),
            Some(Scalar::from(r#"{"Id":3,"ElementId":"3","Labels":["Person"],"Props":{}}"#))
        );
        let rel = Value::from(Relationship::new(9, 3, 4, "KNOWS"));
        let Some(Scalar::String(text)) = coerce(&rel, OutputType::String) else {
            panic!("expected a string cell");
        };
        assert!(text.starts_with(r#"{"Id":9,"ElementId":"9","StartId":3"#));
    }

    #[test]
    fn test_mismatch_falls_back_to_json() {
        assert_eq!(coerce(&Value::from("abc"), OutputType::Integer), Some(Scalar::from(r#""abc""#)));
        assert_eq!(coerce(&Value::Int(5), OutputType::String), Some(Scalar::from("5")));
        let date = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();
        assert_eq!(coerce(&Value::Date(date), OutputType::String), Some(Scalar::from(r#""2019-06-01""#)));
    }

    #[test]
    fn test_serialization_failure_degrades_to_empty_string() {
        let bad = Value::List(vec![Value::Float(f64::INFINITY)]);
        assert_eq!(coerce(&bad, OutputType::String), Some(Scalar::from("")));
        assert_eq!(coerce_properties(&property_map([("x", f64::NAN)])), Scalar::from(""));
    }

    #[test]
    fn test_properties_text() {
        let props = property_map([("name", Value::from("Keanu Reeves")), ("born", Value::Int(1964))]);
        assert_eq!(coerce_properties(&props), Scalar::from(r#"{"born":1964,"name":"Keanu Reeves"}"#));
    }
}
