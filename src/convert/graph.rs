//! Node-graph frame builder.
//!
//! Expects column 0 of every record to hold a list of nodes and column 1
//! a list of relationships. Nodes are deduplicated by id (first one wins),
//! relationships are emitted as they come.

use hashbrown::HashSet;

use super::coerce::coerce_properties;
use crate::frame::{Frame, Scalar, Visualization};
use crate::model::*;
use crate::record::{type_assertion, Record, ResultSource};
use crate::{Error, Result};

pub const NODES_FRAME_NAME: &str = "nodes";
pub const EDGES_FRAME_NAME: &str = "edges";

pub const NODE_COLUMNS: [&str; 4] = ["id", "title", "subTitle", "detail__props"];
pub const EDGE_COLUMNS: [&str; 5] = ["id", "source", "target", "mainStat", "detail__props"];

/// The two frames of a node-graph response.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFrames {
    pub nodes: Frame,
    pub edges: Frame,
}

impl GraphFrames {
    /// Nodes first, edges second.
    pub fn into_frames(self) -> Vec<Frame> {
        vec![self.nodes, self.edges]
    }
}

/// Build the `"nodes"` and `"edges"` frames from a result.
///
/// Any record whose first two columns are not a node list and a
/// relationship list fails the whole conversion.
pub fn build_graph<S: ResultSource + ?Sized>(source: &mut S) -> Result<GraphFrames> {
    let columns = source.keys()?;
    if columns.len() < 2 {
        return Err(Error::TypeAssertion {
            expected: "a node list column and a relationship list column".into(),
            got: format!("{} column(s)", columns.len()),
        });
    }

    let mut builder = GraphBuilder::new();
    loop {
        match source.next_record() {
            Ok(Some(record)) => builder.add_record(&record)?,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Record stream failed, building graph from records received so far");
                break;
            }
        }
    }
    Ok(builder.finish())
}

/// Incremental node-graph builder. Owns the set of node ids seen so far.
pub struct GraphBuilder {
    nodes: Frame,
    edges: Frame,
    seen: HashSet<NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Frame::with_string_fields(NODES_FRAME_NAME, &NODE_COLUMNS),
            edges: Frame::with_string_fields(EDGES_FRAME_NAME, &EDGE_COLUMNS),
            seen: HashSet::new(),
        }
    }

    /// Add the nodes and relationships of one record.
    pub fn add_record(&mut self, record: &Record) -> Result<()> {
        let nodes = as_list(record.value(0), "list of nodes")?;
        let rels = as_list(record.value(1), "list of relationships")?;

        for value in nodes {
            let Value::Node(node) = value else {
                return Err(type_assertion("NODE", value));
            };
            self.add_node(node);
        }
        for value in rels {
            let Value::Relationship(rel) = value else {
                return Err(type_assertion("RELATIONSHIP", value));
            };
            self.add_relationship(rel);
        }
        Ok(())
    }

    fn add_node(&mut self, node: &Node) {
        if !self.seen.insert(node.id) {
            return;
        }
        let id = node.id.to_string();
        self.nodes.append_row([
            Some(Scalar::String(id.clone())),
            Some(Scalar::String(id)),
            node.primary_label().map(Scalar::from),
            Some(coerce_properties(&node.properties)),
        ]);
    }

    fn add_relationship(&mut self, rel: &Relationship) {
        self.edges.append_row([
            Some(Scalar::String(rel.id.to_string())),
            Some(Scalar::String(rel.start_id.to_string())),
            Some(Scalar::String(rel.end_id.to_string())),
            Some(Scalar::String(rel.rel_type.clone())),
            Some(coerce_properties(&rel.properties)),
        ]);
    }

    /// Both frames, tagged with the node-graph hint.
    pub fn finish(self) -> GraphFrames {
        GraphFrames {
            nodes: self.nodes.with_visualization(Visualization::NodeGraph),
            edges: self.edges.with_visualization(Visualization::NodeGraph),
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn as_list<'a>(value: &'a Value, expected: &str) -> Result<&'a [Value]> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(type_assertion(expected, other)),
    }
}
