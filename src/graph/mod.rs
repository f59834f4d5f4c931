//! Host-graph core
//!
//! This module implements the runtime graph that GP 2 rules execute
//! against:
//! - Stable-index slotted storage with slot reuse for nodes and edges
//! - Per-node incidence arrays kept consistent under arbitrary churn
//! - Label-class secondary indices for match pruning
//! - A snapshot stack for speculative execution and backtracking
//! - Invariant validation and the textual graph forms

pub mod display;
pub mod edge;
pub mod node;
pub mod slotted;
pub mod snapshot;
pub mod store;
pub mod types;

mod validate;

// Re-export main types
pub use display::VerboseGraph;
pub use edge::Edge;
pub use node::Node;
pub use slotted::SlotArray;
pub use snapshot::SnapshotStack;
pub use store::{Graph, GraphConfig, GraphError, GraphResult};
pub use types::{EdgeId, NodeId};
