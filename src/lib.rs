//! # neo4j-frames — Neo4j query results as visualization frames
//!
//! Turns the records of a Cypher query into the frames a dashboard panel
//! renders: either one typed table, or a deduplicated node/edge graph.
//!
//! ## Design Principles
//!
//! 1. **Pure conversion**: no I/O, no shared state; the database client
//!    hands over a `ResultSource`, the caller gets `Frame`s back
//! 2. **One type per column**: the first non-null value fixes a column's type
//! 3. **Never lose the batch**: a bad value degrades to text or null, a bad
//!    query fails alone
//!
//! ## Quick Start
//!
//! ```rust
//! use neo4j_frames::{convert, Format, QueryResult, Record, Value};
//!
//! # fn example() -> neo4j_frames::Result<()> {
//! let mut result = QueryResult::new(
//!     ["A"],
//!     vec![Record::new(vec![Value::Null]), Record::new(vec![Value::Int(1)])],
//! );
//! let frames = convert(&mut result, Format::Table)?;
//! assert_eq!(frames[0].name, "response");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Output Formats
//!
//! | Format | Frames | Columns |
//! |--------|--------|---------|
//! | `table` | `response` | one per result column, type inferred |
//! | `nodegraph` | `nodes`, `edges` | `id, title, subTitle, detail__props` / `id, source, target, mainStat, detail__props` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod record;
pub mod frame;
pub mod convert;
pub mod query;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, Relationship, Path, Value, PropertyMap, IsoDuration,
    NodeId, RelId, property_map,
};

// ============================================================================
// Re-exports: Results and frames
// ============================================================================

pub use record::{Record, QueryResult, ResultSource, FromValue};
pub use frame::{
    Frame, Field, FrameMeta, ColumnDescriptor, OutputType, Scalar, Visualization,
};

// ============================================================================
// Re-exports: Conversion
// ============================================================================

pub use convert::{convert, build_table, build_graph, coerce, infer_column_type, Format, GraphFrames};
pub use query::{query_data, QueryRunner, QueryModel, DataQuery, DataResponse, QueryDataResponse};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Query metadata error: {0}")]
    Metadata(String),

    #[error("Type assertion failed: expected {expected}, got {got}")]
    TypeAssertion { expected: String, got: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid query model: {0}")]
    InvalidQuery(String),

    #[error("Query error: {0}")]
    Query(String),

    #[cfg(feature = "arrow-results")]
    #[error("Arrow error: {0}")]
    Arrow(#[from] ::arrow::error::ArrowError),
}

pub type Result<T> = std::result::Result<T, Error>;
