//! Relationship (edge) in the property graph.

use serde::{Deserialize, Serialize};

use super::{NodeId, PropertyMap, Value};

/// Database relationship identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelId(pub i64);

impl std::fmt::Display for RelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A relationship (directed edge) in the property graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelId,
    /// Neo4j 5.x stable element identifier (e.g. `"5:abc:456"`).
    pub element_id: String,
    pub start_id: NodeId,
    pub start_element_id: String,
    pub end_id: NodeId,
    pub end_element_id: String,
    pub rel_type: String,
    pub properties: PropertyMap,
}

impl Relationship {
    /// Element ids default to the decimal form of the numeric ids.
    pub fn new(id: i64, start: i64, end: i64, rel_type: impl Into<String>) -> Self {
        Self {
            id: RelId(id),
            element_id: id.to_string(),
            start_id: NodeId(start),
            start_element_id: start.to_string(),
            end_id: NodeId(end),
            end_element_id: end.to_string(),
            rel_type: rel_type.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
