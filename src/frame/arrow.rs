//! Frame → Arrow `RecordBatch`.
//!
//! The frame name is stored under the `name` schema metadata key, the
//! frame meta as JSON under `meta`.

use std::collections::HashMap;
use std::sync::Arc;

use ::arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray, TimestampMicrosecondArray,
};
use ::arrow::datatypes::{DataType, Field as ArrowField, Schema, TimeUnit};
use ::arrow::record_batch::RecordBatch;

use super::{Field, Frame, OutputType, Scalar};
use crate::Result;

impl Frame {
    /// Convert into a single Arrow record batch. Every column is nullable;
    /// temporal columns become UTC microsecond timestamps.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let schema_fields: Vec<ArrowField> = self
            .fields
            .iter()
            .map(|f| ArrowField::new(f.name(), data_type(f.output_type()), true))
            .collect();

        let mut metadata = HashMap::new();
        metadata.insert("name".to_string(), self.name.clone());
        if let Some(meta) = &self.meta {
            metadata.insert("meta".to_string(), serde_json::to_string(meta)?);
        }

        let schema = Arc::new(Schema::new(schema_fields).with_metadata(metadata));
        let columns = self.fields.iter().map(column).collect();
        Ok(RecordBatch::try_new(schema, columns)?)
    }
}

fn data_type(ty: OutputType) -> DataType {
    match ty {
        OutputType::Integer => DataType::Int64,
        OutputType::Float => DataType::Float64,
        OutputType::Boolean => DataType::Boolean,
        OutputType::Temporal => DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
        OutputType::String => DataType::Utf8,
    }
}

fn column(field: &Field) -> ArrayRef {
    let cells = field.values.iter();
    match field.output_type() {
        OutputType::Integer => Arc::new(Int64Array::from(
            cells.map(|v| match v { Some(Scalar::Int(i)) => Some(*i), _ => None }).collect::<Vec<_>>(),
        )),
        OutputType::Float => Arc::new(Float64Array::from(
            cells.map(|v| match v { Some(Scalar::Float(f)) => Some(*f), _ => None }).collect::<Vec<_>>(),
        )),
        OutputType::Boolean => Arc::new(BooleanArray::from(
            cells.map(|v| match v { Some(Scalar::Bool(b)) => Some(*b), _ => None }).collect::<Vec<_>>(),
        )),
        OutputType::Temporal => Arc::new(
            TimestampMicrosecondArray::from(
                cells
                    .map(|v| match v { Some(Scalar::Time(t)) => Some(t.timestamp_micros()), _ => None })
                    .collect::<Vec<_>>(),
            )
            .with_timezone("UTC"),
        ),
        OutputType::String => Arc::new(StringArray::from(
            cells.map(|v| v.as_ref().and_then(Scalar::as_str)).collect::<Vec<_>>(),
        )),
    }
}
