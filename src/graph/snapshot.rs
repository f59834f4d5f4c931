//! Snapshot stack for speculative execution
//!
//! `try … then … else`, `if … then … else` and as-long-as-possible
//! iteration all execute a program fragment that may have to be undone.
//! Before such a fragment runs, the executor pushes a snapshot; on failure
//! it restores the snapshot, on success it discards it.
//!
//! Every cross-reference in a [`Graph`] is a stable index, so the deep copy
//! preserves object identity by construction: the copy's edge `e3` refers
//! to the copy's nodes under exactly the indices the original's `e3` used.

use super::store::{Graph, GraphError, GraphResult};

/// A stack of host-graph snapshots owned by one executor.
///
/// Snapshots nest arbitrarily; restores unwind them in reverse order of the
/// pushes. Dropping the stack releases every remaining snapshot.
#[derive(Debug, Default)]
pub struct SnapshotStack {
    snapshots: Vec<Graph>,
}

impl SnapshotStack {
    pub fn new() -> Self {
        SnapshotStack {
            snapshots: Vec::new(),
        }
    }

    /// Deep-copy the graph and push the copy.
    ///
    /// The copy preserves every stable index, every free-slot stack, both
    /// class indices and the root list, so a later restore is
    /// indistinguishable from the graph at this push point.
    pub fn push(&mut self, graph: &Graph) {
        self.snapshots.push(graph.clone());
    }

    /// Discard the working graph and return the most recent snapshot.
    ///
    /// `current` is consumed either way; callers that are not sure a
    /// snapshot exists check [`depth`](Self::depth) first.
    pub fn restore(&mut self, current: Graph) -> GraphResult<Graph> {
        drop(current);
        self.snapshots.pop().ok_or(GraphError::EmptySnapshotStack)
    }

    /// Discard the most recent snapshot without touching the working graph.
    /// This is the commit path of a successful `try`.
    pub fn discard(&mut self) -> GraphResult<()> {
        match self.snapshots.pop() {
            Some(_) => Ok(()),
            None => Err(GraphError::EmptySnapshotStack),
        }
    }

    /// Number of snapshots currently held
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Release every remaining snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
