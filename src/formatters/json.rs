use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::core::graph::DepGraph;

/// Compact JSON dump of the graph: roots, nodes, edges.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, graph: &DepGraph, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_to_string(graph)?)?;
        Ok(())
    }

    pub fn format_to_string(&self, graph: &DepGraph) -> Result<String> {
        let nodes: Vec<_> = graph
            .nodes()
            .map(|node| {
                json!({
                    "name": node.name,
                    "kind": node.kind,
                    "origin": node.origin,
                    "space": node.space(),
                })
            })
            .collect();

        let edges: Vec<_> = graph
            .edges()
            .map(|edge| {
                json!({
                    "from": { "name": edge.from.name, "space": edge.from.space() },
                    "to": { "name": edge.to.name, "space": edge.to.space() },
                    "relation": edge.relation,
                })
            })
            .collect();

        let output = json!({
            "roots": graph.roots(),
            "nodes": nodes,
            "edges": edges,
        });

        let mut rendered = serde_json::to_string_pretty(&output)?;
        rendered.push('\n');
        Ok(rendered)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
