//! Canonical JSON text form of record values.
//!
//! Composite values that have no column type of their own end up in string
//! columns in this form. Maps are written key-sorted, graph entities as
//! objects with fixed field order:
//!
//! ```text
//! Node          {"Id":0,"ElementId":"0","Labels":["Movie"],"Props":{..}}
//! Relationship  {"Id":0,"ElementId":"0","StartId":1,"StartElementId":"1",
//!                "EndId":0,"EndElementId":"0","Type":"ACTED_IN","Props":{..}}
//! ```

use serde::ser::{Error as _, SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::model::*;
use crate::Result;

/// Serialize `value` in its canonical JSON form.
///
/// Fails for values JSON cannot carry (non-finite floats).
pub fn to_json_string(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(&Canonical(value))?)
}

/// Serialize a property map in its canonical JSON form.
pub fn properties_to_json_string(props: &PropertyMap) -> Result<String> {
    Ok(serde_json::to_string(&CanonicalMap(props))?)
}

/// Serde adapter writing a [`Value`] in canonical form.
pub struct Canonical<'a>(pub &'a Value);

struct CanonicalMap<'a>(&'a PropertyMap);
struct CanonicalList<'a>(&'a [Value]);
struct CanonicalNode<'a>(&'a Node);
struct CanonicalRelationship<'a>(&'a Relationship);

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => s.serialize_unit(),
            Value::Bool(b) => s.serialize_bool(*b),
            Value::Int(i) => s.serialize_i64(*i),
            Value::Float(f) if f.is_finite() => s.serialize_f64(*f),
            Value::Float(f) => Err(S::Error::custom(format!("unsupported float value {f}"))),
            Value::String(v) => s.serialize_str(v),
            Value::Bytes(bytes) => {
                let mut seq = s.serialize_seq(Some(bytes.len()))?;
                for b in bytes {
                    seq.serialize_element(b)?;
                }
                seq.end()
            }
            Value::List(items) => CanonicalList(items).serialize(s),
            Value::Map(map) => CanonicalMap(map).serialize(s),
            Value::Node(node) => CanonicalNode(node).serialize(s),
            Value::Relationship(rel) => CanonicalRelationship(rel).serialize(s),
            Value::Path(path) => {
                let nodes: Vec<_> = path.nodes.iter().map(CanonicalNode).collect();
                let rels: Vec<_> = path.relationships.iter().map(CanonicalRelationship).collect();
                let mut st = s.serialize_struct("Path", 2)?;
                st.serialize_field("Nodes", &nodes)?;
                st.serialize_field("Relationships", &rels)?;
                st.end()
            }
            Value::Point2D { srid, x, y } => {
                let mut st = s.serialize_struct("Point2D", 3)?;
                st.serialize_field("X", x)?;
                st.serialize_field("Y", y)?;
                st.serialize_field("SpatialRefId", srid)?;
                st.end()
            }
            Value::Point3D { srid, x, y, z } => {
                let mut st = s.serialize_struct("Point3D", 4)?;
                st.serialize_field("X", x)?;
                st.serialize_field("Y", y)?;
                st.serialize_field("Z", z)?;
                st.serialize_field("SpatialRefId", srid)?;
                st.end()
            }
            // Temporal values and durations as their ISO text.
            Value::Date(_)
            | Value::Time { .. }
            | Value::LocalTime(_)
            | Value::DateTime(_)
            | Value::LocalDateTime(_)
            | Value::Duration(_) => s.collect_str(self.0),
        }
    }
}

impl Serialize for CanonicalMap<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(k, &Canonical(v))?;
        }
        map.end()
    }
}

impl Serialize for CanonicalList<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(self.0.len()))?;
        for v in self.0 {
            seq.serialize_element(&Canonical(v))?;
        }
        seq.end()
    }
}

impl Serialize for CanonicalNode<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let node = self.0;
        let mut st = s.serialize_struct("Node", 4)?;
        st.serialize_field("Id", &node.id.0)?;
        st.serialize_field("ElementId", &node.element_id)?;
        st.serialize_field("Labels", node.labels.as_slice())?;
        st.serialize_field("Props", &CanonicalMap(&node.properties))?;
        st.end()
    }
}

impl Serialize for CanonicalRelationship<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let rel = self.0;
        let mut st = s.serialize_struct("Relationship", 8)?;
        st.serialize_field("Id", &rel.id.0)?;
        st.serialize_field("ElementId", &rel.element_id)?;
        st.serialize_field("StartId", &rel.start_id.0)?;
        st.serialize_field("StartElementId", &rel.start_element_id)?;
        st.serialize_field("EndId", &rel.end_id.0)?;
        st.serialize_field("EndElementId", &rel.end_element_id)?;
        st.serialize_field("Type", &rel.rel_type)?;
        st.serialize_field("Props", &CanonicalMap(&rel.properties))?;
        st.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_map() {
        let value = Value::Map(property_map([
            ("key", Value::from("Value")),
            (
                "listKey",
                Value::List(vec![
                    Value::Map(property_map([("inner", "Map1")])),
                    Value::Map(property_map([("inner", "Map2")])),
                ]),
            ),
        ]));
        assert_eq!(
            to_json_string(&value).unwrap(),
            r#"{"key":"Value","listKey":[{"inner":"Map1"},{"inner":"Map2"}]}"#
        );
    }

    #[test]
    fn test_node() {
        let node = Node::new(0)
            .with_labels(["Movie"])
            .with_property("title", "The Matrix")
            .with_property("released", 1999)
            .with_property("tagline", "Welcome to the Real World");
        assert_eq!(
            to_json_string(&Value::from(node)).unwrap(),
            r#"{"Id":0,"ElementId":"0","Labels":["Movie"],"Props":{"released":1999,"tagline":"Welcome to the Real World","title":"The Matrix"}}"#
        );
    }

    #[test]
    fn test_relationship() {
        let rel = Relationship::new(0, 1, 0, "ACTED_IN")
            .with_property("roles", vec!["Neo"]);
        assert_eq!(
            to_json_string(&Value::from(rel)).unwrap(),
            r#"{"Id":0,"ElementId":"0","StartId":1,"StartElementId":"1","EndId":0,"EndElementId":"0","Type":"ACTED_IN","Props":{"roles":["Neo"]}}"#
        );
    }

    #[test]
    fn test_bytes_and_lists() {
        assert_eq!(to_json_string(&Value::Bytes(b"Neo4j".to_vec())).unwrap(), "[78,101,111,52,106]");
        assert_eq!(to_json_string(&Value::from(vec!["a", "b", "c"])).unwrap(), r#"["a","b","c"]"#);
        assert_eq!(to_json_string(&Value::from(vec![1i64, 2, 3])).unwrap(), "[1,2,3]");
        assert_eq!(to_json_string(&Value::List(vec![Value::Null])).unwrap(), "[null]");
    }

    #[test]
    fn test_duration_inside_list() {
        let value = Value::List(vec![Value::Duration(IsoDuration::new(0, 0, 180, 0))]);
        assert_eq!(to_json_string(&value).unwrap(), r#"["P0M0DT180S"]"#);
    }

    #[test]
    fn test_path() {
        let path = Path::starting_at(Node::new(1).with_element_id("4:db:1"))
            .then(Relationship::new(2, 1, 3, "KNOWS"), Node::new(3));
        assert_eq!(path.hops(), 1);
        assert_eq!(
            to_json_string(&Value::Path(Box::new(path))).unwrap(),
            concat!(
                r#"{"Nodes":[{"Id":1,"ElementId":"4:db:1","Labels":[],"Props":{}},"#,
                r#"{"Id":3,"ElementId":"3","Labels":[],"Props":{}}],"#,
                r#""Relationships":[{"Id":2,"ElementId":"2","StartId":1,"StartElementId":"1","#,
                r#""EndId":3,"EndElementId":"3","Type":"KNOWS","Props":{}}]}"#,
            )
        );
    }

    #[test]
    fn test_points() {
        let p = Value::Point2D { srid: 7203, x: 1.5, y: 2.0 };
        assert_eq!(to_json_string(&p).unwrap(), r#"{"X":1.5,"Y":2.0,"SpatialRefId":7203}"#);
    }

    #[test]
    fn test_non_finite_float_fails() {
        let value = Value::Map(property_map([("x", f64::NAN)]));
        assert!(to_json_string(&value).is_err());
    }
}
