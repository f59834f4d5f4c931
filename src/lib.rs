//! GP 2 runtime graph core
//!
//! The in-memory host graph of a GP 2 graph-rewrite engine: a directed,
//! labelled, possibly bidirectional multigraph mutated by rule applications.
//!
//! # Architecture
//!
//! - Slotted containers hand out stable integer indices and recycle freed
//!   slots through a LIFO free-slot stack, so a handle obtained at insertion
//!   stays valid until removal.
//! - The graph store owns its nodes and edges; every cross-reference (edge
//!   endpoints, incidence entries, index membership) is an index, never
//!   shared ownership.
//! - A label-class secondary index accelerates rule matching by bucketing
//!   nodes and edges under the coarse classification of their labels.
//! - A snapshot stack deep-copies whole graphs to support the speculative
//!   execution behind `try`, `if` and as-long-as-possible iteration.
//!
//! # Example Usage
//!
//! ```rust
//! use gp2_runtime::{Atom, Graph, Label, LabelClass, Mark};
//!
//! // Create an empty host graph
//! let mut graph = Graph::new();
//!
//! // Create a root node and an ordinary node labelled 42
//! let n0 = graph.add_node(true, None).unwrap();
//! let n1 = graph
//!     .add_node(false, Some(Label::new(Mark::Red, vec![Atom::Integer(42)])))
//!     .unwrap();
//!
//! // Connect them
//! let e0 = graph.add_edge(false, None, n0, n1).unwrap();
//!
//! assert_eq!(graph.number_of_nodes(), 2);
//! assert_eq!(graph.number_of_edges(), 1);
//! assert_eq!(graph.get_node(n1).unwrap().label_class(), LabelClass::Int);
//! assert_eq!(graph.source(e0).unwrap(), n0);
//! assert!(graph.is_valid());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod label;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, Graph, GraphConfig, GraphError, GraphResult, Node, NodeId, SlotArray,
    SnapshotStack, VerboseGraph,
};
pub use label::{Atom, Label, LabelClass, LabelError, Mark};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
