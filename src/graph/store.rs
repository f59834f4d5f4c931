//! Host-graph storage
//!
//! The mutable store that rule applications operate on. Owns the node and
//! edge containers, keeps each node's incidence arrays consistent with the
//! edge set, and maintains the label-class secondary indices and the root
//! list alongside every mutation.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::edge::Edge;
use super::node::Node;
use super::slotted::SlotArray;
use super::types::{EdgeId, NodeId};
use crate::label::{Label, LabelClass, LabelError};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("index {index} is out of range (high-water mark {bound})")]
    OutOfRange { index: usize, bound: usize },

    #[error("slot {index} is empty")]
    EmptySlot { index: usize },

    #[error("cannot remove node {0} with incident edges")]
    DanglingIncidence(NodeId),

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error("no snapshot to restore")]
    EmptySnapshotStack,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Initial capacities for a graph's containers.
///
/// These replace the fixed ceilings of earlier GP 2 runtimes: containers
/// start at these sizes and grow on demand instead of rejecting work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Slots pre-allocated in the node container
    pub node_capacity: usize,
    /// Slots pre-allocated in the edge container
    pub edge_capacity: usize,
    /// Slots pre-allocated in each new node's incidence arrays
    pub incident_edge_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_capacity: 1024,
            edge_capacity: 4096,
            incident_edge_capacity: 16,
        }
    }
}

/// The host graph: a directed, labelled multigraph with stable indices
///
/// Storage layout:
/// - nodes, edges: slotted containers assigning stable indices with reuse
/// - nodes_by_class, edges_by_class: label-class secondary indices
/// - root_nodes: the distinguished nodes used by rooted matching
#[derive(Debug, Clone)]
pub struct Graph {
    /// Node storage
    nodes: SlotArray<Node>,

    /// Edge storage
    edges: SlotArray<Edge>,

    /// Nodes bucketed by label class
    nodes_by_class: HashMap<LabelClass, HashSet<NodeId>>,

    /// Edges bucketed by label class
    edges_by_class: HashMap<LabelClass, HashSet<EdgeId>>,

    /// Root nodes in insertion order
    root_nodes: Vec<NodeId>,

    /// Capacities applied to new incidence arrays
    config: GraphConfig,
}

impl Graph {
    /// Create an empty host graph with default capacities
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create an empty host graph with the given capacities
    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            nodes: SlotArray::with_capacity(config.node_capacity),
            edges: SlotArray::with_capacity(config.edge_capacity),
            nodes_by_class: HashMap::new(),
            edges_by_class: HashMap::new(),
            root_nodes: Vec::new(),
            config,
        }
    }

    /// Create a node with the given root flag and label (`None` for the
    /// blank label). Returns the node's stable index.
    pub fn add_node(&mut self, root: bool, label: Option<Label>) -> GraphResult<NodeId> {
        let label = label.unwrap_or_default();
        let class = label.class()?;

        let incident_capacity = self.config.incident_edge_capacity;
        let index = NodeId::new(self.nodes.insert_with(|slot| {
            Node::new(NodeId::new(slot), root, label, class, incident_capacity)
        }));

        self.nodes_by_class.entry(class).or_default().insert(index);
        if root {
            self.root_nodes.push(index);
        }
        Ok(index)
    }

    /// Create an edge between two live nodes. Returns the edge's stable
    /// index.
    pub fn add_edge(
        &mut self,
        bidirectional: bool,
        label: Option<Label>,
        source: NodeId,
        target: NodeId,
    ) -> GraphResult<EdgeId> {
        let label = label.unwrap_or_default();
        let class = label.class()?;

        // Both endpoints must be live before anything is installed
        self.nodes.get(source.as_usize())?;
        self.nodes.get(target.as_usize())?;

        let index = EdgeId::new(self.edges.insert_with(|slot| {
            Edge::new(EdgeId::new(slot), bidirectional, label, class, source, target)
        }));

        self.nodes.get_mut(source.as_usize())?.attach_out(index);
        self.nodes.get_mut(target.as_usize())?.attach_in(index);

        self.edges_by_class.entry(class).or_default().insert(index);
        Ok(index)
    }

    /// Remove a node with no incident edges.
    ///
    /// A node that still has incident edges is left untouched and the
    /// removal is reported as a dangling-incidence error.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<()> {
        let node = self.nodes.get(id.as_usize())?;
        if node.indegree() > 0 || node.outdegree() > 0 {
            warn!("cannot remove node {id} with incident edges");
            return Err(GraphError::DanglingIncidence(id));
        }
        let class = node.label_class();
        let root = node.is_root();

        self.remove_node_class_entry(class, id);
        if root {
            self.root_nodes.retain(|root_id| *root_id != id);
        }
        self.nodes.remove(id.as_usize())?;
        Ok(())
    }

    /// Remove an edge, detaching it from its endpoints' incidence arrays.
    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        let edge = self.edges.get(id.as_usize())?;
        let source = edge.source();
        let target = edge.target();
        let class = edge.label_class();

        self.nodes.get_mut(source.as_usize())?.detach_out(id);
        self.nodes.get_mut(target.as_usize())?.detach_in(id);

        self.remove_edge_class_entry(class, id);
        self.edges.remove(id.as_usize())?;
        Ok(())
    }

    /// Relabel a node and/or toggle its root flag.
    ///
    /// With `change_label`, the old label is replaced by `new_label` (`None`
    /// for the blank label) and the node moves between class buckets when
    /// its classification changes. A label that fails classification leaves
    /// the node untouched.
    pub fn relabel_node(
        &mut self,
        id: NodeId,
        new_label: Option<Label>,
        change_label: bool,
        toggle_root: bool,
    ) -> GraphResult<()> {
        // Classify up front so a rejected label mutates nothing
        let staged = if change_label {
            let label = new_label.unwrap_or_default();
            let class = label.class()?;
            Some((label, class))
        } else {
            None
        };
        self.nodes.get(id.as_usize())?;

        if toggle_root {
            let node = self.nodes.get_mut(id.as_usize())?;
            node.root = !node.root;
            if node.root {
                self.root_nodes.push(id);
            } else {
                self.root_nodes.retain(|root_id| *root_id != id);
            }
        }

        if let Some((label, class)) = staged {
            let node = self.nodes.get_mut(id.as_usize())?;
            let old_class = node.label_class;
            node.label = label;
            node.label_class = class;
            if old_class != class {
                self.remove_node_class_entry(old_class, id);
                self.nodes_by_class.entry(class).or_default().insert(id);
            }
        }
        Ok(())
    }

    /// Relabel an edge and/or toggle its bidirectional flag.
    pub fn relabel_edge(
        &mut self,
        id: EdgeId,
        new_label: Option<Label>,
        change_label: bool,
        toggle_bidirectional: bool,
    ) -> GraphResult<()> {
        let staged = if change_label {
            let label = new_label.unwrap_or_default();
            let class = label.class()?;
            Some((label, class))
        } else {
            None
        };
        self.edges.get(id.as_usize())?;

        if toggle_bidirectional {
            let edge = self.edges.get_mut(id.as_usize())?;
            edge.bidirectional = !edge.bidirectional;
        }

        if let Some((label, class)) = staged {
            let edge = self.edges.get_mut(id.as_usize())?;
            let old_class = edge.label_class;
            edge.label = label;
            edge.label_class = class;
            if old_class != class {
                self.remove_edge_class_entry(old_class, id);
                self.edges_by_class.entry(class).or_default().insert(id);
            }
        }
        Ok(())
    }

    // ============================================================
    // Read-only query surface (consumed by the matcher)
    // ============================================================

    pub fn get_node(&self, id: NodeId) -> GraphResult<&Node> {
        self.nodes.get(id.as_usize())
    }

    pub fn get_edge(&self, id: EdgeId) -> GraphResult<&Edge> {
        self.edges.get(id.as_usize())
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains(id.as_usize())
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains(id.as_usize())
    }

    pub fn source(&self, id: EdgeId) -> GraphResult<NodeId> {
        Ok(self.get_edge(id)?.source())
    }

    pub fn target(&self, id: EdgeId) -> GraphResult<NodeId> {
        Ok(self.get_edge(id)?.target())
    }

    pub fn in_degree(&self, id: NodeId) -> GraphResult<usize> {
        Ok(self.get_node(id)?.indegree())
    }

    pub fn out_degree(&self, id: NodeId) -> GraphResult<usize> {
        Ok(self.get_node(id)?.outdegree())
    }

    /// The edge in slot `slot` of the node's outgoing incidence
    pub fn out_edge(&self, id: NodeId, slot: usize) -> GraphResult<EdgeId> {
        self.get_node(id)?.out_edges.get(slot).copied()
    }

    /// The edge in slot `slot` of the node's incoming incidence
    pub fn in_edge(&self, id: NodeId, slot: usize) -> GraphResult<EdgeId> {
        self.get_node(id)?.in_edges.get(slot).copied()
    }

    /// Outgoing edges of a node, ascending by incidence slot
    pub fn out_edges(&self, id: NodeId) -> GraphResult<impl Iterator<Item = EdgeId> + '_> {
        Ok(self.get_node(id)?.out_edges())
    }

    /// Incoming edges of a node, ascending by incidence slot
    pub fn in_edges(&self, id: NodeId) -> GraphResult<impl Iterator<Item = EdgeId> + '_> {
        Ok(self.get_node(id)?.in_edges())
    }

    /// Root nodes in insertion order
    pub fn root_nodes(&self) -> &[NodeId] {
        &self.root_nodes
    }

    /// Live nodes whose label currently classifies as `class`
    pub fn nodes_by_class(&self, class: LabelClass) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes_by_class
            .get(&class)
            .into_iter()
            .flat_map(|members| members.iter().copied())
    }

    /// Live edges whose label currently classifies as `class`
    pub fn edges_by_class(&self, class: LabelClass) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges_by_class
            .get(&class)
            .into_iter()
            .flat_map(|members| members.iter().copied())
    }

    pub fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Live nodes as `(index, &node)`, ascending by index
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(slot, node)| (NodeId::new(slot), node))
    }

    /// Live edges as `(index, &edge)`, ascending by index
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().map(|(slot, edge)| (EdgeId::new(slot), edge))
    }

    // ============================================================
    // Internal bookkeeping
    // ============================================================

    pub(crate) fn node_container(&self) -> &SlotArray<Node> {
        &self.nodes
    }

    pub(crate) fn edge_container(&self) -> &SlotArray<Edge> {
        &self.edges
    }

    pub(crate) fn node_class_index(&self) -> &HashMap<LabelClass, HashSet<NodeId>> {
        &self.nodes_by_class
    }

    pub(crate) fn edge_class_index(&self) -> &HashMap<LabelClass, HashSet<EdgeId>> {
        &self.edges_by_class
    }

    fn remove_node_class_entry(&mut self, class: LabelClass, id: NodeId) {
        if let Some(members) = self.nodes_by_class.get_mut(&class) {
            members.remove(&id);
            if members.is_empty() {
                self.nodes_by_class.remove(&class);
            }
        }
    }

    fn remove_edge_class_entry(&mut self, class: LabelClass, id: EdgeId) {
        if let Some(members) = self.edges_by_class.get_mut(&class) {
            members.remove(&id);
            if members.is_empty() {
                self.edges_by_class.remove(&class);
            }
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
