//! Universal value type matching the Neo4j driver's record cells.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Node, Path, PropertyMap, Relationship};

/// One cell of a Neo4j record.
///
/// Covers every type the Bolt driver hands back:
/// - Scalars: Bool, Int, Float, String, Bytes
/// - Containers: List, Map
/// - Graph: Node, Relationship, Path
/// - Temporal: Date, Time, LocalTime, DateTime, LocalDateTime, Duration
/// - Spatial: Point2D, Point3D
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(PropertyMap),

    // Graph types
    Node(Box<Node>),
    Relationship(Box<Relationship>),
    Path(Box<Path>),

    // Temporal types
    Date(NaiveDate),
    /// Time of day with its UTC offset in seconds, as sent over Bolt.
    Time { time: NaiveTime, offset_seconds: i32 },
    LocalTime(NaiveTime),
    DateTime(DateTime<FixedOffset>),
    LocalDateTime(NaiveDateTime),
    Duration(IsoDuration),

    // Spatial types
    Point2D { srid: i32, x: f64, y: f64 },
    Point3D { srid: i32, x: f64, y: f64, z: f64 },
}

/// ISO 8601 duration (months, days, seconds, nanoseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsoDuration {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
    pub nanoseconds: i32,
}

impl IsoDuration {
    pub fn new(months: i64, days: i64, seconds: i64, nanoseconds: i32) -> Self {
        Self { months, days, seconds, nanoseconds }
    }
}

/// `P<months>M<days>DT<seconds>S`, with a nine digit fraction when
/// nanoseconds are present. `PT3M` renders as `P0M0DT180S`.
///
/// Seconds and nanoseconds are summed before rendering, so the sign is
/// written once: `-1s + 0.5s` is `-0.500000000S`, `-50ns` is `-0.000000050S`.
impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = i128::from(self.seconds) * 1_000_000_000 + i128::from(self.nanoseconds);
        let sign = if total < 0 { "-" } else { "" };
        let total = total.unsigned_abs();
        let (seconds, nanos) = (total / 1_000_000_000, total % 1_000_000_000);
        write!(f, "P{}M{}DT{sign}{seconds}", self.months, self.days)?;
        if nanos != 0 {
            write!(f, ".{nanos:09}")?;
        }
        f.write_str("S")
    }
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::Bytes(_) => "BYTES",
            Value::List(_) => "LIST",
            Value::Map(_) => "MAP",
            Value::Node(_) => "NODE",
            Value::Relationship(_) => "RELATIONSHIP",
            Value::Path(_) => "PATH",
            Value::Date(_) => "DATE",
            Value::Time { .. } => "TIME",
            Value::LocalTime(_) => "LOCAL_TIME",
            Value::DateTime(_) => "DATETIME",
            Value::LocalDateTime(_) => "LOCAL_DATETIME",
            Value::Duration(_) => "DURATION",
            Value::Point2D { .. } => "POINT",
            Value::Point3D { .. } => "POINT",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// Date, time and date-time variants. `Duration` is not a point in time.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Value::Date(_)
                | Value::Time { .. }
                | Value::LocalTime(_)
                | Value::DateTime(_)
                | Value::LocalDateTime(_)
        )
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<Node> for Value { fn from(v: Node) -> Self { Value::Node(Box::new(v)) } }
impl From<Relationship> for Value { fn from(v: Relationship) -> Self { Value::Relationship(Box::new(v)) } }
impl From<IsoDuration> for Value { fn from(v: IsoDuration) -> Self { Value::Duration(v) } }
impl From<PropertyMap> for Value { fn from(v: PropertyMap) -> Self { Value::Map(v) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Bytes(b) => write!(f, "<bytes[{}]>", b.len()),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Node(n) => write!(f, "({}:{})", n.id, n.labels.join(":")),
            Value::Relationship(r) => write!(f, "({})-[:{}]->({})", r.start_id, r.rel_type, r.end_id),
            Value::Path(p) => write!(f, "<path[{}]>", p.hops()),
            Value::Date(d) => write!(f, "{d}"),
            Value::Time { time, offset_seconds } => match FixedOffset::east_opt(*offset_seconds) {
                Some(offset) => write!(f, "{time}{offset}"),
                None => write!(f, "{time}"),
            },
            Value::LocalTime(t) => write!(f, "{t}"),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::LocalDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::Duration(d) => write!(f, "{d}"),
            Value::Point2D { x, y, srid } => write!(f, "point({{srid: {srid}, x: {x}, y: {y}}})"),
            Value::Point3D { x, y, z, srid } => write!(f, "point({{srid: {srid}, x: {x}, y: {y}, z: {z}}})"),
        }
    }
}
