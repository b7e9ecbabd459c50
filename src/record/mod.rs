//! Query results as handed over by the database client.
//!
//! The client runs the Cypher statement; this module only describes what
//! comes back: column names plus an ordered stream of records.

use crate::model::*;
use crate::{Error, Result};

static NULL: Value = Value::Null;

/// One row of a query result: one value per declared column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Value at `index`, `Null` when the record is shorter than that.
    pub fn value(&self, index: usize) -> &Value {
        self.values.get(index).unwrap_or(&NULL)
    }

    /// Get a typed value from the record.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T> {
        let val = self.values.get(index).ok_or_else(|| Error::TypeAssertion {
            expected: format!("column {index}"),
            got: format!("record with {} values", self.values.len()),
        })?;
        T::from_value(val)
    }
}

impl<T: Into<Value>> FromIterator<T> for Record {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// The database client side of a conversion.
///
/// Mirrors the driver's result cursor: `keys()` may fail when the result
/// metadata cannot be obtained, records are pulled one at a time.
pub trait ResultSource {
    /// Column names in result order.
    fn keys(&self) -> Result<Vec<String>>;

    /// Pull the next record, `Ok(None)` once the stream is exhausted.
    fn next_record(&mut self) -> Result<Option<Record>>;

    /// Drain the remaining records.
    fn collect(&mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        Ok(records)
    }
}

/// A fully materialized query result.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
    cursor: usize,
}

impl QueryResult {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>, records: Vec<Record>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            records,
            cursor: 0,
        }
    }
}

impl ResultSource for QueryResult {
    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.columns.clone())
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        let record = self.records.get(self.cursor).cloned();
        if record.is_some() {
            self.cursor += 1;
        }
        Ok(record)
    }

    fn collect(&mut self) -> Result<Vec<Record>> {
        let rest = self.records.get(self.cursor..).unwrap_or_default().to_vec();
        self.cursor = self.records.len();
        Ok(rest)
    }
}

impl<S: ResultSource + ?Sized> ResultSource for &mut S {
    fn keys(&self) -> Result<Vec<String>> { (**self).keys() }
    fn next_record(&mut self) -> Result<Option<Record>> { (**self).next_record() }
    fn collect(&mut self) -> Result<Vec<Record>> { (**self).collect() }
}

impl<S: ResultSource + ?Sized> ResultSource for Box<S> {
    fn keys(&self) -> Result<Vec<String>> { (**self).keys() }
    fn next_record(&mut self) -> Result<Option<Record>> { (**self).next_record() }
    fn collect(&mut self) -> Result<Vec<Record>> { (**self).collect() }
}

// ============================================================================
// Typed extraction
// ============================================================================

/// Convert from Value to concrete types.
pub trait FromValue: Sized {
    fn from_value(val: &Value) -> Result<Self>;
}

pub(crate) fn type_assertion(expected: &str, val: &Value) -> Error {
    Error::TypeAssertion {
        expected: expected.into(),
        got: val.type_name().into(),
    }
}

impl FromValue for Value {
    fn from_value(val: &Value) -> Result<Self> {
        Ok(val.clone())
    }
}

impl FromValue for Vec<Value> {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::List(items) => Ok(items.clone()),
            _ => Err(type_assertion("LIST", val)),
        }
    }
}

impl FromValue for Node {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Node(n) => Ok(*n.clone()),
            _ => Err(type_assertion("NODE", val)),
        }
    }
}

impl FromValue for Relationship {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Relationship(r) => Ok(*r.clone()),
            _ => Err(type_assertion("RELATIONSHIP", val)),
        }
    }
}

impl FromValue for String {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::String(s) => Ok(s.clone()),
            _ => Err(type_assertion("STRING", val)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Int(i) => Ok(*i),
            _ => Err(type_assertion("INTEGER", val)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_result_streams_in_order() {
        let mut result = QueryResult::new(
            ["A"],
            vec![Record::from_iter(["One"]), Record::from_iter(["Two"])],
        );
        assert_eq!(result.keys().unwrap(), vec!["A".to_string()]);
        assert_eq!(result.next_record().unwrap(), Some(Record::from_iter(["One"])));
        assert_eq!(result.collect().unwrap(), vec![Record::from_iter(["Two"])]);
        assert_eq!(result.next_record().unwrap(), None);
    }

    #[test]
    fn test_record_get_typed() {
        let record = Record::new(vec![Value::Int(3), Value::from("x")]);
        assert_eq!(record.get::<i64>(0).unwrap(), 3);
        assert_eq!(record.get::<String>(1).unwrap(), "x");
        assert!(matches!(
            record.get::<Vec<Value>>(0),
            Err(Error::TypeAssertion { .. })
        ));
        assert!(matches!(record.get::<Value>(5), Err(Error::TypeAssertion { .. })));
    }

    #[test]
    fn test_record_get_graph_entities() {
        let record = Record::new(vec![
            Value::from(Node::new(1).with_labels(["Person"])),
            Value::from(Relationship::new(5, 1, 2, "KNOWS")),
        ]);
        assert_eq!(record.get::<Node>(0).unwrap().labels.as_slice(), ["Person".to_string()]);
        assert_eq!(record.get::<Relationship>(1).unwrap().rel_type, "KNOWS");
        assert!(matches!(record.get::<Node>(1), Err(Error::TypeAssertion { .. })));
    }

    #[test]
    fn test_short_record_reads_null() {
        assert_eq!(Record::default().value(2), &Value::Null);
    }
}
