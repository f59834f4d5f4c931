//! Edge representation for the host graph
//!
//! An edge owns its label and refers to its endpoints by stable node index;
//! it never owns the nodes it connects.

use serde::{Deserialize, Serialize};

use super::types::{EdgeId, NodeId};
use crate::label::{Label, LabelClass};

/// A directed (possibly bidirectional) edge in the host graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Stable index, equal to the edge's slot in the graph's edge container
    pub(crate) index: EdgeId,

    /// In rule patterns a bidirectional edge matches either direction
    pub(crate) bidirectional: bool,

    /// Owned label
    pub(crate) label: Label,

    /// Classification of the label, cached for the secondary index
    pub(crate) label_class: LabelClass,

    /// Source node (edge goes FROM this node)
    pub(crate) source: NodeId,

    /// Target node (edge goes TO this node)
    pub(crate) target: NodeId,
}

impl Edge {
    pub(crate) fn new(
        index: EdgeId,
        bidirectional: bool,
        label: Label,
        label_class: LabelClass,
        source: NodeId,
        target: NodeId,
    ) -> Self {
        Edge {
            index,
            bidirectional,
            label,
            label_class,
            source,
            target,
        }
    }

    pub fn index(&self) -> EdgeId {
        self.index
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_class(&self) -> LabelClass {
        self.label_class
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, node1: NodeId, node2: NodeId) -> bool {
        (self.source == node1 && self.target == node2)
            || (self.source == node2 && self.target == node1)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}
