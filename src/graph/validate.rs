//! Host-graph invariant checking
//!
//! Walks the whole store and reports every violated invariant. Intended
//! for tests and for fuzz-style mutation sequences; the mutating API is
//! expected to keep all of these true at every public boundary.

use std::collections::HashSet;

use tracing::warn;

use super::slotted::SlotArray;
use super::store::Graph;
use super::types::{EdgeId, NodeId};

/// Checks that a slotted container's vacant slots below the high-water mark
/// are exactly the entries of its free-slot stack.
fn check_partition<T>(array: &SlotArray<T>, what: &str, diagnostics: &mut Vec<String>) {
    let free: HashSet<usize> = array.free_slots().iter().copied().collect();
    if free.len() != array.free_slots().len() {
        diagnostics.push(format!("{what}: free-slot stack contains duplicates"));
    }
    for &slot in array.free_slots() {
        if slot >= array.high_water() {
            diagnostics.push(format!(
                "{what}: free slot {slot} is beyond the high-water mark {}",
                array.high_water()
            ));
        } else if array.contains(slot) {
            diagnostics.push(format!("{what}: free slot {slot} is occupied"));
        }
    }
    let occupied: HashSet<usize> = array.iter().map(|(slot, _)| slot).collect();
    for slot in 0..array.high_water() {
        if !occupied.contains(&slot) && !free.contains(&slot) {
            diagnostics.push(format!(
                "{what}: slot {slot} is empty but not on the free-slot stack"
            ));
        }
    }
}

impl Graph {
    /// Verify every structural invariant, returning one diagnostic per
    /// violation. An empty vector means the graph is consistent.
    pub fn validate(&self) -> Vec<String> {
        let mut diagnostics = Vec::new();

        let nodes = self.node_container();
        let edges = self.edge_container();

        check_partition(nodes, "node array", &mut diagnostics);
        check_partition(edges, "edge array", &mut diagnostics);

        // Recorded counts against the containers
        if self.number_of_nodes() != nodes.iter().count() {
            diagnostics.push(format!(
                "node count {} does not match the {} occupied node slots",
                self.number_of_nodes(),
                nodes.iter().count()
            ));
        }
        if self.number_of_edges() != edges.iter().count() {
            diagnostics.push(format!(
                "edge count {} does not match the {} occupied edge slots",
                self.number_of_edges(),
                edges.iter().count()
            ));
        }

        let root_set: HashSet<NodeId> = self.root_nodes().iter().copied().collect();
        if root_set.len() != self.root_nodes().len() {
            diagnostics.push("root list contains duplicates".to_string());
        }

        for (slot, node) in nodes.iter() {
            let id = NodeId::new(slot);

            // Each entry records the slot it occupies
            if node.index() != id {
                diagnostics.push(format!(
                    "node in slot {slot} records index {}",
                    node.index().as_usize()
                ));
            }

            check_partition(
                &node.out_edges,
                &format!("node {id} out-incidence"),
                &mut diagnostics,
            );
            check_partition(
                &node.in_edges,
                &format!("node {id} in-incidence"),
                &mut diagnostics,
            );

            // Degrees against populated incidence counts
            let out_count = node.out_edges.iter().count();
            if node.outdegree() != out_count {
                diagnostics.push(format!(
                    "node {id} records outdegree {} but its out-incidence holds {out_count} edges",
                    node.outdegree()
                ));
            }
            let in_count = node.in_edges.iter().count();
            if node.indegree() != in_count {
                diagnostics.push(format!(
                    "node {id} records indegree {} but its in-incidence holds {in_count} edges",
                    node.indegree()
                ));
            }

            // Incidence entries must refer to live edges with matching endpoints
            for (_, &edge_id) in node.out_edges.iter() {
                match self.get_edge(edge_id) {
                    Ok(edge) if edge.source() == id => {}
                    Ok(edge) => diagnostics.push(format!(
                        "node {id} out-incidence holds {edge_id}, whose source is {}",
                        edge.source()
                    )),
                    Err(_) => diagnostics.push(format!(
                        "node {id} out-incidence holds {edge_id}, which is not a live edge"
                    )),
                }
            }
            for (_, &edge_id) in node.in_edges.iter() {
                match self.get_edge(edge_id) {
                    Ok(edge) if edge.target() == id => {}
                    Ok(edge) => diagnostics.push(format!(
                        "node {id} in-incidence holds {edge_id}, whose target is {}",
                        edge.target()
                    )),
                    Err(_) => diagnostics.push(format!(
                        "node {id} in-incidence holds {edge_id}, which is not a live edge"
                    )),
                }
            }

            // Class index membership, under the node's class and nowhere else
            for (&class, members) in self.node_class_index() {
                let member = members.contains(&id);
                if class == node.label_class() && !member {
                    diagnostics.push(format!(
                        "node {id} is missing from the index entry for its class {class}"
                    ));
                } else if class != node.label_class() && member {
                    diagnostics.push(format!(
                        "node {id} of class {} also appears under class {class}",
                        node.label_class()
                    ));
                }
            }
            if !self
                .node_class_index()
                .contains_key(&node.label_class())
            {
                diagnostics.push(format!(
                    "node {id} is missing from the index entry for its class {}",
                    node.label_class()
                ));
            }

            // Root flag against the root list
            if node.is_root() != root_set.contains(&id) {
                if node.is_root() {
                    diagnostics.push(format!("root node {id} is missing from the root list"));
                } else {
                    diagnostics.push(format!("non-root node {id} appears in the root list"));
                }
            }
        }

        for (slot, edge) in edges.iter() {
            let id = EdgeId::new(slot);

            if edge.index() != id {
                diagnostics.push(format!(
                    "edge in slot {slot} records index {}",
                    edge.index().as_usize()
                ));
            }

            // Source holds the edge exactly once in its out-incidence;
            // target exactly once in its in-incidence
            match self.get_node(edge.source()) {
                Ok(source) => {
                    let occurrences = source.out_edges().filter(|&out| out == id).count();
                    if occurrences != 1 {
                        diagnostics.push(format!(
                            "edge {id} occurs {occurrences} times in the out-incidence of its source {}",
                            edge.source()
                        ));
                    }
                }
                Err(_) => diagnostics.push(format!(
                    "edge {id} refers to source {}, which is not a live node",
                    edge.source()
                )),
            }
            match self.get_node(edge.target()) {
                Ok(target) => {
                    let occurrences = target.in_edges().filter(|&inc| inc == id).count();
                    if occurrences != 1 {
                        diagnostics.push(format!(
                            "edge {id} occurs {occurrences} times in the in-incidence of its target {}",
                            edge.target()
                        ));
                    }
                }
                Err(_) => diagnostics.push(format!(
                    "edge {id} refers to target {}, which is not a live node",
                    edge.target()
                )),
            }

            for (&class, members) in self.edge_class_index() {
                let member = members.contains(&id);
                if class == edge.label_class() && !member {
                    diagnostics.push(format!(
                        "edge {id} is missing from the index entry for its class {class}"
                    ));
                } else if class != edge.label_class() && member {
                    diagnostics.push(format!(
                        "edge {id} of class {} also appears under class {class}",
                        edge.label_class()
                    ));
                }
            }
            if !self
                .edge_class_index()
                .contains_key(&edge.label_class())
            {
                diagnostics.push(format!(
                    "edge {id} is missing from the index entry for its class {}",
                    edge.label_class()
                ));
            }
        }

        // Stale index entries: every member must be live
        for (&class, members) in self.node_class_index() {
            if members.is_empty() {
                diagnostics.push(format!("empty node index entry for class {class}"));
            }
            for &member in members {
                if !self.contains_node(member) {
                    diagnostics.push(format!(
                        "node index entry for class {class} holds dead node {member}"
                    ));
                }
            }
        }
        for (&class, members) in self.edge_class_index() {
            if members.is_empty() {
                diagnostics.push(format!("empty edge index entry for class {class}"));
            }
            for &member in members {
                if !self.contains_edge(member) {
                    diagnostics.push(format!(
                        "edge index entry for class {class} holds dead edge {member}"
                    ));
                }
            }
        }

        // Every listed root must be live (flag agreement was checked above)
        for &root in self.root_nodes() {
            if !self.contains_node(root) {
                diagnostics.push(format!("root list holds dead node {root}"));
            }
        }

        diagnostics
    }

    /// True when [`validate`](Self::validate) finds nothing; each diagnostic
    /// is reported through the log stream.
    pub fn is_valid(&self) -> bool {
        let diagnostics = self.validate();
        for diagnostic in &diagnostics {
            warn!("graph invariant violated: {diagnostic}");
        }
        diagnostics.is_empty()
    }
}
