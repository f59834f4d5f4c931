//! Node representation for the host graph
//!
//! A node owns its label and its two incidence arrays; incidence entries
//! and everything else pointing at the node hold its stable index only.

use serde::{Deserialize, Serialize};

use super::slotted::SlotArray;
use super::types::{EdgeId, NodeId};
use crate::label::{Label, LabelClass};

/// A node in the host graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Stable index, equal to the node's slot in the graph's node container
    pub(crate) index: NodeId,

    /// Root flag used by rooted matching
    pub(crate) root: bool,

    /// Owned label
    pub(crate) label: Label,

    /// Classification of the label, cached for the secondary index
    pub(crate) label_class: LabelClass,

    /// Recorded in-degree; always the populated count of `in_edges`
    pub(crate) indegree: usize,

    /// Recorded out-degree; always the populated count of `out_edges`
    pub(crate) outdegree: usize,

    /// Outgoing incidence, a slotted container in its own right
    pub(crate) out_edges: SlotArray<EdgeId>,

    /// Incoming incidence
    pub(crate) in_edges: SlotArray<EdgeId>,
}

impl Node {
    pub(crate) fn new(
        index: NodeId,
        root: bool,
        label: Label,
        label_class: LabelClass,
        incident_capacity: usize,
    ) -> Self {
        Node {
            index,
            root,
            label,
            label_class,
            indegree: 0,
            outdegree: 0,
            out_edges: SlotArray::with_capacity(incident_capacity),
            in_edges: SlotArray::with_capacity(incident_capacity),
        }
    }

    pub fn index(&self) -> NodeId {
        self.index
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_class(&self) -> LabelClass {
        self.label_class
    }

    pub fn indegree(&self) -> usize {
        self.indegree
    }

    pub fn outdegree(&self) -> usize {
        self.outdegree
    }

    /// Outgoing edges, ascending by incidence slot
    pub fn out_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_edges.iter().map(|(_, edge)| *edge)
    }

    /// Incoming edges, ascending by incidence slot
    pub fn in_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.in_edges.iter().map(|(_, edge)| *edge)
    }

    /// Record a new outgoing edge in the first free incidence slot.
    pub(crate) fn attach_out(&mut self, edge: EdgeId) {
        self.out_edges.insert(edge);
        self.outdegree += 1;
    }

    /// Record a new incoming edge in the first free incidence slot.
    pub(crate) fn attach_in(&mut self, edge: EdgeId) {
        self.in_edges.insert(edge);
        self.indegree += 1;
    }

    /// Scan the outgoing incidence for `edge` and vacate its slot, applying
    /// the trailing-slot collapse rule.
    pub(crate) fn detach_out(&mut self, edge: EdgeId) {
        let slot = self
            .out_edges
            .iter()
            .find_map(|(slot, entry)| (*entry == edge).then_some(slot));
        if let Some(slot) = slot {
            if self.out_edges.remove(slot).is_ok() {
                self.outdegree -= 1;
            }
        }
    }

    /// Scan the incoming incidence for `edge` and vacate its slot.
    pub(crate) fn detach_in(&mut self, edge: EdgeId) {
        let slot = self
            .in_edges
            .iter()
            .find_map(|(slot, entry)| (*entry == edge).then_some(slot));
        if let Some(slot) = slot {
            if self.in_edges.remove(slot).is_ok() {
                self.indegree -= 1;
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Mark;

    fn node(index: usize) -> Node {
        Node::new(
            NodeId::new(index),
            false,
            Label::empty(),
            LabelClass::Empty,
            4,
        )
    }

    #[test]
    fn test_new_node_has_no_incidence() {
        let node = node(0);
        assert_eq!(node.indegree(), 0);
        assert_eq!(node.outdegree(), 0);
        assert_eq!(node.out_edges().count(), 0);
        assert_eq!(node.in_edges().count(), 0);
        assert!(!node.is_root());
    }

    #[test]
    fn test_attach_and_detach_track_degrees() {
        let mut node = node(0);
        node.attach_out(EdgeId::new(0));
        node.attach_out(EdgeId::new(1));
        node.attach_in(EdgeId::new(2));
        assert_eq!(node.outdegree(), 2);
        assert_eq!(node.indegree(), 1);

        node.detach_out(EdgeId::new(0));
        assert_eq!(node.outdegree(), 1);
        assert_eq!(node.out_edges().collect::<Vec<_>>(), vec![EdgeId::new(1)]);

        node.detach_in(EdgeId::new(2));
        assert_eq!(node.indegree(), 0);
    }

    #[test]
    fn test_detach_unknown_edge_is_a_no_op() {
        let mut node = node(0);
        node.attach_out(EdgeId::new(0));
        node.detach_out(EdgeId::new(9));
        assert_eq!(node.outdegree(), 1);
    }

    #[test]
    fn test_incidence_slots_are_reused() {
        let mut node = node(0);
        node.attach_out(EdgeId::new(10));
        node.attach_out(EdgeId::new(11));
        node.attach_out(EdgeId::new(12));

        // Vacating a middle slot leaves a hole that the next attach fills
        node.detach_out(EdgeId::new(11));
        node.attach_out(EdgeId::new(13));
        let edges: Vec<_> = node.out_edges().collect();
        assert_eq!(
            edges,
            vec![EdgeId::new(10), EdgeId::new(13), EdgeId::new(12)]
        );
    }

    #[test]
    fn test_node_equality_is_by_index() {
        let a = node(7);
        let mut b = node(7);
        b.label = Label::new(Mark::Red, vec![]);
        assert_eq!(a, b);
        assert_ne!(a, node(8));
    }
}
