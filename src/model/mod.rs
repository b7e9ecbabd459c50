//! # Property Graph Model
//!
//! The value types a Neo4j record can carry, as handed over by the
//! database client. These types are the input side of every conversion.
//!
//! Design rule: NO frame types here.
//! This module is pure data — no I/O, no state, no async.

pub mod node;
pub mod relationship;
pub mod path;
pub mod value;
pub mod property_map;

pub use node::{Node, NodeId};
pub use relationship::{Relationship, RelId};
pub use path::Path;
pub use value::{IsoDuration, Value};
pub use property_map::{property_map, PropertyMap};
