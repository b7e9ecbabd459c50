//! # Result → Frame conversion
//!
//! ```text
//! ResultSource ──keys/records──┬─ Format::Table     → infer + coerce → "response"
//!                              └─ Format::NodeGraph → dedup nodes    → "nodes", "edges"
//! ```
//!
//! Conversion is synchronous and keeps no state between calls.

pub mod canonical;
pub mod coerce;
pub mod graph;
pub mod infer;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::record::{Record, ResultSource};
use crate::Result;

pub use coerce::{coerce, coerce_properties};
pub use graph::{build_graph, GraphBuilder, GraphFrames};
pub use infer::{infer_column_type, output_type_of};
pub use table::{build_table, table_frame};

/// Requested output shape.
///
/// Parsed leniently: `"nodegraph"` selects the node graph, any other
/// value (including none at all) selects the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", rename_all = "lowercase")]
pub enum Format {
    #[default]
    Table,
    NodeGraph,
}

impl Format {
    pub fn parse(s: &str) -> Self {
        match s {
            "nodegraph" => Format::NodeGraph,
            _ => Format::Table,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Table => "table",
            Format::NodeGraph => "nodegraph",
        }
    }
}

impl From<&str> for Format {
    fn from(s: &str) -> Self {
        Format::parse(s)
    }
}

impl From<Option<String>> for Format {
    fn from(s: Option<String>) -> Self {
        s.as_deref().map(Format::parse).unwrap_or_default()
    }
}

/// Convert a query result into the frames for `format`.
///
/// Table mode yields one frame, node-graph mode yields nodes then edges.
/// On error no frames are returned.
pub fn convert<S: ResultSource + ?Sized>(source: &mut S, format: Format) -> Result<Vec<Frame>> {
    match format {
        Format::Table => Ok(vec![build_table(source)?]),
        Format::NodeGraph => Ok(build_graph(source)?.into_frames()),
    }
}

/// Pull every record. A failing stream ends early with what it delivered.
pub(crate) fn drain_records<S: ResultSource + ?Sized>(source: &mut S) -> Vec<Record> {
    let mut records = Vec::new();
    loop {
        match source.next_record() {
            Ok(Some(record)) => records.push(record),
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, received = records.len(), "Record stream failed, converting records received so far");
                break;
            }
        }
    }
    records
}
