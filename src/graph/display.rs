//! Textual forms of the host graph
//!
//! The compact form is the GP 2 host-graph concrete syntax consumed by the
//! front-end and by tests; the verbose form is a human-readable dump used
//! when debugging rule applications.

use std::fmt;

use super::store::Graph;
use crate::label::{fmt_list, Mark};

impl fmt::Display for Graph {
    /// Compact host-graph form: `[ (n0(R), empty) (n1, 42) | (e0, n0, n1, empty) ]`,
    /// five nodes per line, three edges per line, `[ | ]` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number_of_nodes() == 0 {
            return write!(f, "[ | ]");
        }

        write!(f, "[ ")?;
        for (count, (id, node)) in self.nodes().enumerate() {
            if count != 0 && count % 5 == 0 {
                write!(f, "\n  ")?;
            }
            let root = if node.is_root() { "(R)" } else { "" };
            write!(f, "({}{}, {}) ", id, root, node.label())?;
        }

        if self.number_of_edges() == 0 {
            return write!(f, "| ]");
        }

        write!(f, "|\n  ")?;
        for (count, (id, edge)) in self.edges().enumerate() {
            if count != 0 && count % 3 == 0 {
                write!(f, "\n  ")?;
            }
            let arrows = if edge.is_bidirectional() { "(B)" } else { "" };
            write!(
                f,
                "({}{}, {}, {}, {}) ",
                id,
                arrows,
                edge.source(),
                edge.target(),
                edge.label()
            )?;
        }
        write!(f, "]")
    }
}

impl Graph {
    /// Human-readable dump of every node, edge and the root list
    pub fn verbose(&self) -> VerboseGraph<'_> {
        VerboseGraph(self)
    }
}

/// [`Display`] wrapper produced by [`Graph::verbose`]
pub struct VerboseGraph<'a>(&'a Graph);

fn verbose_mark(f: &mut fmt::Formatter<'_>, mark: Mark) -> fmt::Result {
    let name = match mark {
        Mark::None => return Ok(()),
        Mark::Red => "Red",
        Mark::Green => "Green",
        Mark::Blue => "Blue",
        Mark::Grey => "Grey",
        Mark::Dashed => "Dashed",
        Mark::Any => "Any",
    };
    writeln!(f, "Mark: {}", name)
}

fn verbose_node(f: &mut fmt::Formatter<'_>, node: &super::node::Node) -> fmt::Result {
    write!(f, "Index: {}", node.index().as_usize())?;
    if node.is_root() {
        write!(f, " (Root)")?;
    }
    writeln!(f)?;
    writeln!(f, "Label Class: {}", node.label_class())?;
    write!(f, "Label: ")?;
    if node.label().is_empty() {
        writeln!(f, "empty")?;
    } else {
        fmt_list(f, &node.label().atoms)?;
        writeln!(f)?;
    }
    verbose_mark(f, node.label().mark)?;
    writeln!(
        f,
        "Indegree: {}. Outdegree: {}",
        node.indegree(),
        node.outdegree()
    )?;
    writeln!(f)
}

fn verbose_edge(f: &mut fmt::Formatter<'_>, edge: &super::edge::Edge) -> fmt::Result {
    write!(f, "Index: {}", edge.index().as_usize())?;
    if edge.is_bidirectional() {
        write!(f, " (Bidirectional)")?;
    }
    writeln!(f)?;
    writeln!(f, "Label Class: {}", edge.label_class())?;
    write!(f, "Label: ")?;
    if edge.label().is_empty() {
        writeln!(f, "empty")?;
    } else {
        fmt_list(f, &edge.label().atoms)?;
        writeln!(f)?;
    }
    verbose_mark(f, edge.label().mark)?;
    writeln!(
        f,
        "Source: {}. Target: {}",
        edge.source().as_usize(),
        edge.target().as_usize()
    )?;
    writeln!(f)
}

impl fmt::Display for VerboseGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes\n=====")?;
        for (_, node) in self.0.nodes() {
            verbose_node(f, node)?;
        }

        writeln!(f, "Edges\n=====")?;
        for (_, edge) in self.0.edges() {
            verbose_edge(f, edge)?;
        }

        writeln!(f, "Root Node List\n==============")?;
        for &root in self.0.root_nodes() {
            if let Ok(node) = self.0.get_node(root) {
                verbose_node(f, node)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{Atom, Label};

    fn normalise(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_empty_graph_display() {
        assert_eq!(format!("{}", Graph::new()), "[ | ]");
    }

    #[test]
    fn test_nodes_only_display() {
        let mut graph = Graph::new();
        graph.add_node(true, None).unwrap();
        graph
            .add_node(false, Some(Label::new(Mark::None, vec![Atom::Integer(3)])))
            .unwrap();

        assert_eq!(
            normalise(&graph.to_string()),
            "[ (n0(R), empty) (n1, 3) | ]"
        );
    }

    #[test]
    fn test_full_graph_display() {
        let mut graph = Graph::new();
        let n0 = graph.add_node(true, None).unwrap();
        let n1 = graph
            .add_node(
                false,
                Some(Label::new(Mark::Red, vec![Atom::Integer(1)])),
            )
            .unwrap();
        graph.add_edge(false, None, n0, n1).unwrap();
        graph
            .add_edge(
                true,
                Some(Label::new(
                    Mark::None,
                    vec![Atom::String("x".to_string())],
                )),
                n1,
                n0,
            )
            .unwrap();

        assert_eq!(
            normalise(&graph.to_string()),
            "[ (n0(R), empty) (n1, 1 # red) | (e0, n0, n1, empty) (e1(B), n1, n0, \"x\") ]"
        );
    }

    #[test]
    fn test_line_wrapping() {
        let mut graph = Graph::new();
        for _ in 0..6 {
            graph.add_node(false, None).unwrap();
        }
        let rendered = graph.to_string();

        // Five nodes on the first line, the sixth wraps
        let first_line = rendered.lines().next().unwrap();
        assert_eq!(first_line.matches("(n").count(), 5);
        assert_eq!(normalise(&rendered).matches("(n").count(), 6);
    }

    #[test]
    fn test_verbose_dump() {
        let mut graph = Graph::new();
        let n0 = graph.add_node(true, None).unwrap();
        let n1 = graph
            .add_node(
                false,
                Some(Label::new(Mark::Blue, vec![Atom::Integer(9)])),
            )
            .unwrap();
        graph.add_edge(false, None, n0, n1).unwrap();

        let dump = graph.verbose().to_string();
        assert!(dump.contains("Nodes\n====="));
        assert!(dump.contains("Index: 0 (Root)"));
        assert!(dump.contains("Label Class: int"));
        assert!(dump.contains("Mark: Blue"));
        assert!(dump.contains("Indegree: 1. Outdegree: 0"));
        assert!(dump.contains("Edges\n====="));
        assert!(dump.contains("Source: 0. Target: 1"));
        assert!(dump.contains("Root Node List"));
    }
}
