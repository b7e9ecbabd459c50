//! Table frame builder.

use super::{coerce::coerce, drain_records, infer::infer_column_type};
use crate::frame::{ColumnDescriptor, Field, Frame};
use crate::record::{Record, ResultSource};
use crate::Result;

/// Name of the single frame produced in table mode.
pub const TABLE_FRAME_NAME: &str = "response";

/// Build the `"response"` frame from a result.
///
/// Fails only when the column names cannot be read.
pub fn build_table<S: ResultSource + ?Sized>(source: &mut S) -> Result<Frame> {
    let columns = source.keys()?;
    let records = drain_records(source);
    Ok(table_frame(&columns, &records))
}

/// Build the table frame from already materialized records.
pub fn table_frame(columns: &[String], records: &[Record]) -> Frame {
    let mut fields: Vec<Field> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Field::from_descriptor(ColumnDescriptor::new(name.as_str(), infer_column_type(records, i)))
        })
        .collect();

    for field in &mut fields {
        field.values.reserve(records.len());
    }
    for record in records {
        for (i, field) in fields.iter_mut().enumerate() {
            let cell = coerce(record.value(i), field.output_type());
            field.push(cell);
        }
    }

    Frame::new(TABLE_FRAME_NAME, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{OutputType, Scalar};
    use crate::model::Value;
    use crate::record::QueryResult;
    use crate::Error;

    struct NoMetadata;

    impl ResultSource for NoMetadata {
        fn keys(&self) -> Result<Vec<String>> {
            Err(Error::Metadata("result consumed".into()))
        }
        fn next_record(&mut self) -> Result<Option<Record>> {
            Ok(None)
        }
    }

    /// Delivers its records, then fails instead of ending the stream.
    struct BrokenStream {
        records: Vec<Record>,
    }

    impl ResultSource for BrokenStream {
        fn keys(&self) -> Result<Vec<String>> {
            Ok(vec!["A".into()])
        }
        fn next_record(&mut self) -> Result<Option<Record>> {
            if self.records.is_empty() {
                return Err(Error::Query("connection reset".into()));
            }
            Ok(Some(self.records.remove(0)))
        }
    }

    #[test]
    fn test_metadata_error_propagates() {
        assert!(matches!(build_table(&mut NoMetadata), Err(Error::Metadata(_))));
    }

    #[test]
    fn test_stream_failure_keeps_received_rows() {
        let mut source = BrokenStream { records: vec![Record::new(vec![Value::Int(7)])] };
        let frame = build_table(&mut source).unwrap();
        assert_eq!(frame.row_count(), 1);
        assert_eq!(frame.fields[0].output_type(), OutputType::Integer);
        assert_eq!(frame.fields[0].values, vec![Some(Scalar::Int(7))]);
    }

    #[test]
    fn test_late_mismatch_is_forced_into_column_type() {
        let mut result = QueryResult::new(
            ["A"],
            vec![
                Record::new(vec![Value::Int(1)]),
                Record::new(vec![Value::from("two")]),
                Record::new(vec![Value::Null]),
            ],
        );
        let frame = build_table(&mut result).unwrap();
        let field = &frame.fields[0];
        assert_eq!(field.output_type(), OutputType::Integer);
        assert_eq!(field.values, vec![Some(Scalar::Int(1)), None, None]);
    }

    #[test]
    fn test_short_record_pads_with_null() {
        let frame = table_frame(
            &["A".to_string(), "B".to_string()],
            &[Record::new(vec![Value::from("x")])],
        );
        assert_eq!(frame.fields[1].values, vec![None]);
        assert_eq!(frame.fields[1].output_type(), OutputType::String);
    }
}
