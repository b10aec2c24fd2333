//! Graphviz renderer.
//!
//! This module converts a [`Graph`] into the DOT language understood by
//! Graphviz. Nodes and edges are sorted by node identity so the output is
//! byte-for-byte stable between runs.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

use crate::model::Graph;

/// Render `graph` as a DOT digraph.
#[must_use]
pub fn render(graph: &Graph) -> String {
    DotGraph::new(graph).to_string()
}

/// Escape a string for use inside a double-quoted DOT identifier.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Sorted view of a graph ready for printing.
struct DotGraph<'a> {
    name: &'a str,
    nodes: BTreeMap<String, String>,
    edges: BTreeSet<(String, String)>,
}

impl<'a> DotGraph<'a> {
    fn new(graph: &'a Graph) -> Self {
        let mut nodes = BTreeMap::new();
        let mut edges = BTreeSet::new();
        for (from, to) in graph.dependencies() {
            let from_id = from.identity();
            nodes
                .entry(from_id.clone())
                .or_insert_with(|| from.to_string());
            for node in to {
                let to_id = node.identity();
                nodes.entry(to_id.clone()).or_insert_with(|| node.to_string());
                edges.insert((from_id.clone(), to_id));
            }
        }
        Self {
            name: graph.name(),
            nodes,
            edges,
        }
    }
}

impl Display for DotGraph<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph \"{}\" {{", escape(self.name))?;
        for (id, label) in &self.nodes {
            writeln!(f, "  \"{}\" [label=\"{}\"];", escape(id), escape(label))?;
        }
        for (from, to) in &self.edges {
            writeln!(f, "  \"{}\" -> \"{}\";", escape(from), escape(to))?;
        }
        writeln!(f, "}}")
    }
}
