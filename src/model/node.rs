//! Node in the property graph.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{PropertyMap, Value};

/// Database node identifier (64-bit signed, as the driver reports it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub i64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Labels of a node. Almost every node has one or two.
pub type Labels = SmallVec<[String; 2]>;

/// A node in the property graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Neo4j 5.x stable element identifier (e.g. `"4:abc:123"`).
    pub element_id: String,
    pub labels: Labels,
    pub properties: PropertyMap,
}

impl Node {
    /// A label-less node without properties. The element id defaults to
    /// the decimal form of `id`.
    pub fn new(id: i64) -> Self {
        Self {
            id: NodeId(id),
            element_id: id.to_string(),
            labels: Labels::new(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = element_id.into();
        self
    }

    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// First label, used as the node-graph subtitle.
    pub fn primary_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}
