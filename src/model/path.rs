use serde::{Deserialize, Serialize};

use super::{Node, Relationship};

/// A walk through the graph as returned by the driver. Written out whole
/// (nodes, then relationships) when a path lands in a text column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub nodes: Vec<Node>,
    pub relationships: Vec<Relationship>,
}

impl Path {
    pub fn starting_at(node: Node) -> Self {
        Self { nodes: vec![node], relationships: Vec::new() }
    }

    /// Builder: follow `rel` to `node`.
    pub fn then(mut self, rel: Relationship, node: Node) -> Self {
        self.relationships.push(rel);
        self.nodes.push(node);
        self
    }

    /// Number of hops.
    pub fn hops(&self) -> usize {
        self.relationships.len()
    }
}
