//! # Frames
//!
//! Column-homogeneous output handed to the visualization host.
//!
//! A [`Frame`] is a named list of [`Field`]s. Every field is fixed to one
//! [`OutputType`] and holds one optional [`Scalar`] per row; all fields of
//! a frame have the same length.

#[cfg(feature = "arrow-results")]
pub mod arrow;

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Output types
// ============================================================================

/// The single type a frame column is fixed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputType {
    Integer,
    Float,
    Boolean,
    Temporal,
    String,
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputType::Integer => "integer",
            OutputType::Float => "float",
            OutputType::Boolean => "boolean",
            OutputType::Temporal => "temporal",
            OutputType::String => "string",
        };
        f.write_str(name)
    }
}

/// A coerced cell value.
///
/// Serialized bare; reading one back needs the column type, see
/// [`Scalar::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Time(DateTime<FixedOffset>),
    String(String),
}

impl Scalar {
    pub fn output_type(&self) -> OutputType {
        match self {
            Scalar::Int(_) => OutputType::Integer,
            Scalar::Float(_) => OutputType::Float,
            Scalar::Bool(_) => OutputType::Boolean,
            Scalar::Time(_) => OutputType::Temporal,
            Scalar::String(_) => OutputType::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Read a serialized cell of a column typed `ty`.
    pub fn from_json(value: serde_json::Value, ty: OutputType) -> Result<Scalar, String> {
        let cell = match (ty, &value) {
            (OutputType::Integer, v) => v.as_i64().map(Scalar::Int),
            (OutputType::Float, v) => v.as_f64().map(Scalar::Float),
            (OutputType::Boolean, v) => v.as_bool().map(Scalar::Bool),
            (OutputType::Temporal, serde_json::Value::String(s)) => {
                DateTime::parse_from_rfc3339(s).ok().map(Scalar::Time)
            }
            (OutputType::Temporal, _) => None,
            (OutputType::String, serde_json::Value::String(s)) => Some(Scalar::String(s.clone())),
            (OutputType::String, _) => None,
        };
        cell.ok_or_else(|| format!("invalid {ty} cell: {value}"))
    }

    /// Fit this scalar into a column of type `target`.
    ///
    /// Same type passes through, integers widen into float columns and
    /// anything renders as text in a string column. Everything else has
    /// no representation in `target` and yields `None`.
    pub fn conform(self, target: OutputType) -> Option<Scalar> {
        match (self, target) {
            (s, t) if s.output_type() == t => Some(s),
            (Scalar::Int(i), OutputType::Float) => Some(Scalar::Float(i as f64)),
            (s, OutputType::String) => Some(Scalar::String(s.to_string())),
            (s, t) => {
                tracing::debug!(from = %s.output_type(), to = %t, "Cell does not fit column type, storing null");
                None
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar { fn from(v: i64) -> Self { Scalar::Int(v) } }
impl From<f64> for Scalar { fn from(v: f64) -> Self { Scalar::Float(v) } }
impl From<bool> for Scalar { fn from(v: bool) -> Self { Scalar::Bool(v) } }
impl From<String> for Scalar { fn from(v: String) -> Self { Scalar::String(v) } }
impl From<&str> for Scalar { fn from(v: &str) -> Self { Scalar::String(v.to_owned()) } }
impl From<DateTime<FixedOffset>> for Scalar { fn from(v: DateTime<FixedOffset>) -> Self { Scalar::Time(v) } }

// ============================================================================
// Fields
// ============================================================================

/// Name and fixed type of one output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub output_type: OutputType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, output_type: OutputType) -> Self {
        Self { name: name.into(), output_type }
    }
}

/// One column of a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    #[serde(flatten)]
    pub descriptor: ColumnDescriptor,
    pub values: Vec<Option<Scalar>>,
}

impl Field {
    pub fn new(name: impl Into<String>, output_type: OutputType) -> Self {
        Self::from_descriptor(ColumnDescriptor::new(name, output_type))
    }

    pub fn from_descriptor(descriptor: ColumnDescriptor) -> Self {
        Self { descriptor, values: Vec::new() }
    }

    /// Field pre-filled with `values`, each conformed to `output_type`.
    pub fn with_values<I, S>(name: impl Into<String>, output_type: OutputType, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<Scalar>,
    {
        let mut field = Self::new(name, output_type);
        for value in values {
            field.push(value.map(Into::into));
        }
        field
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn output_type(&self) -> OutputType {
        self.descriptor.output_type
    }

    /// Append one cell, conforming it to the column type.
    pub fn push(&mut self, value: Option<Scalar>) {
        let ty = self.descriptor.output_type;
        self.values.push(value.and_then(|v| v.conform(ty)));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawField {
            #[serde(flatten)]
            descriptor: ColumnDescriptor,
            values: Vec<Option<serde_json::Value>>,
        }

        let raw = RawField::deserialize(deserializer)?;
        let ty = raw.descriptor.output_type;
        let values = raw
            .values
            .into_iter()
            .map(|cell| cell.map(|v| Scalar::from_json(v, ty)).transpose())
            .collect::<Result<Vec<_>, _>>()
            .map_err(D::Error::custom)?;
        Ok(Self { descriptor: raw.descriptor, values })
    }
}

// ============================================================================
// Frames
// ============================================================================

/// Preferred rendering of a frame on the host. Table frames carry no
/// hint; the host shows them as a table by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visualization {
    NodeGraph,
}

/// Host-facing metadata attached to a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMeta {
    pub preferred_visualization: Visualization,
}

/// A named, column-homogeneous table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<FrameMeta>,
}

impl Frame {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self { name: name.into(), fields, meta: None }
    }

    /// A frame whose columns are all strings, with no rows yet.
    pub fn with_string_fields(name: impl Into<String>, columns: &[&str]) -> Self {
        let fields = columns
            .iter()
            .map(|c| Field::new(*c, OutputType::String))
            .collect();
        Self::new(name, fields)
    }

    pub fn with_visualization(mut self, visualization: Visualization) -> Self {
        self.meta = Some(FrameMeta { preferred_visualization: visualization });
        self
    }

    pub fn visualization(&self) -> Option<Visualization> {
        self.meta.as_ref().map(|m| m.preferred_visualization)
    }

    /// Append one row. Missing trailing cells are stored as null, extra
    /// cells are dropped, so every field keeps the same length.
    pub fn append_row(&mut self, row: impl IntoIterator<Item = Option<Scalar>>) {
        let mut row = row.into_iter();
        for field in &mut self.fields {
            field.push(row.next().flatten());
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn row_count(&self) -> usize {
        self.fields.first().map_or(0, Field::len)
    }

    /// Cells of row `index` in field order.
    pub fn row(&self, index: usize) -> Option<Vec<Option<&Scalar>>> {
        if index >= self.row_count() {
            return None;
        }
        Some(
            self.fields
                .iter()
                .map(|f| f.values.get(index).and_then(Option::as_ref))
                .collect(),
        )
    }
}
