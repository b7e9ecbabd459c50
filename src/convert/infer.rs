//! Column type inference.
//!
//! First-committed-type policy: a column takes the type of its first
//! non-null value and keeps it, whatever later rows hold.

use crate::frame::OutputType;
use crate::model::Value;
use crate::record::Record;

/// Natural output type of a single value, `None` for `Null`.
pub fn output_type_of(value: &Value) -> Option<OutputType> {
    match value {
        Value::Null => None,
        Value::Int(_) => Some(OutputType::Integer),
        Value::Float(_) => Some(OutputType::Float),
        Value::Bool(_) => Some(OutputType::Boolean),
        v if v.is_temporal() => Some(OutputType::Temporal),
        _ => Some(OutputType::String),
    }
}

/// Type of column `column` across `records`.
///
/// Defaults to `String` when every value in the column is null or there
/// are no records at all.
pub fn infer_column_type(records: &[Record], column: usize) -> OutputType {
    let mut values = records.iter().map(|r| r.value(column));

    if let Some(ty) = values.next().and_then(output_type_of) {
        return ty;
    }
    if records.is_empty() {
        return OutputType::String;
    }

    tracing::debug!(column, "Could not infer type from first row, value was null. Trying next rows");
    match values.find_map(output_type_of) {
        Some(ty) => ty,
        None => {
            tracing::debug!(column, "Column is null in every row. Assigning string type as default");
            OutputType::String
        }
    }
}
