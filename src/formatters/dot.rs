use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::core::graph::{DepGraph, EdgeView, Node, NodeKind, Relation, Space};

/// Graphviz DOT rendering: nodes colored and shaped by kind, edges
/// colored by relation. Statement ids are namespace-qualified, so a
/// name present as both a module and an attribute renders as two
/// nodes.
pub struct DotFormatter;

impl DotFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, graph: &DepGraph, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_to_string(graph))?;
        Ok(())
    }

    pub fn format_to_string(&self, graph: &DepGraph) -> String {
        // statements are sorted so equal graphs print identically
        // regardless of insertion or merge order
        let mut node_statements: Vec<String> = graph.nodes().map(node_statement).collect();
        node_statements.sort();
        let mut edge_statements: Vec<String> = graph.edges().map(edge_statement).collect();
        edge_statements.sort();

        let mut out = String::from("digraph dependencies {\n");
        for statement in node_statements.iter().chain(edge_statements.iter()) {
            out.push_str(statement);
        }
        out.push_str("}\n");
        out
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn node_id(node: &Node) -> String {
    match node.space() {
        Space::Attribute => format!("attr:{}", node.name),
        Space::Entity => format!("node:{}", node.name),
    }
}

fn node_statement(node: &Node) -> String {
    let (color, shape) = match node.kind {
        Some(NodeKind::Root) => ("blue", "box"),
        Some(NodeKind::Module) => ("black", "ellipse"),
        Some(NodeKind::Attribute) => ("black", "ellipse"),
        Some(NodeKind::Library) => ("purple", "ellipse"),
        None => ("gray", "ellipse"),
    };
    format!(
        "    \"{}\" [label=\"{}\", color={}, shape={}];\n",
        escape(&node_id(node)),
        escape(&node.name),
        color,
        shape
    )
}

fn edge_statement(edge: EdgeView<'_>) -> String {
    let attrs = match edge.relation {
        Some(Relation::Imports) => " [color=blue]",
        Some(Relation::HasAttribute) => " [color=black]",
        None => "",
    };
    format!(
        "    \"{}\" -> \"{}\"{};\n",
        escape(&node_id(edge.from)),
        escape(&node_id(edge.to)),
        attrs
    )
}

fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
