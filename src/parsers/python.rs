use tree_sitter::Node as TSNode;

use super::common::{node_text, TreeSitterParser};
use super::ExtractError;
use crate::core::alias::{AliasResolver, ModuleLocator};
use crate::core::graph::DepGraph;
use std::path::Path;

/// Extracts the import structure of one Python source file into a
/// dependency graph rooted at the file's name.
pub struct ImportExtractor {
    parser: TreeSitterParser,
}

impl ImportExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        let parser = TreeSitterParser::new(tree_sitter_python::language())?;
        Ok(Self { parser })
    }

    /// Parse `source` and graph every import statement under
    /// `root_name`. The whole tree is walked, so imports nested inside
    /// functions or conditionals count the same as top-level ones.
    /// Source that does not parse is a hard error; no partial graph is
    /// returned.
    pub fn extract<L: ModuleLocator>(
        &mut self,
        root_name: &str,
        source: &str,
        aliases: &mut AliasResolver<L>,
    ) -> Result<DepGraph, ExtractError> {
        let tree = self.parser.parse(source, root_name)?;
        let root_node = tree.root_node();
        if root_node.has_error() {
            return Err(ExtractError::Syntax {
                root: root_name.to_string(),
                line: first_error_line(&root_node),
            });
        }

        let mut graph = DepGraph::new();
        graph.add_root(root_name);
        self.walk(&root_node, source.as_bytes(), root_name, aliases, &mut graph);
        Ok(graph)
    }

    /// Read a file and extract it, with the path string as the root.
    pub fn scan_file<L: ModuleLocator>(
        &mut self,
        path: &Path,
        aliases: &mut AliasResolver<L>,
    ) -> Result<DepGraph, ExtractError> {
        let source = TreeSitterParser::read_source(path)?;
        self.extract(&path.to_string_lossy(), &source, aliases)
    }

    fn walk<L: ModuleLocator>(
        &self,
        node: &TSNode,
        source: &[u8],
        root_name: &str,
        aliases: &mut AliasResolver<L>,
        graph: &mut DepGraph,
    ) {
        match node.kind() {
            "import_statement" => self.plain_import(node, source, root_name, aliases, graph),
            "import_from_statement" => self.from_import(node, source, root_name, aliases, graph),
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(&child, source, root_name, aliases, graph);
        }
    }

    /// `import X` / `import X as y, Z`: one import edge per named
    /// module. Aliases graph the real module name, not the local one.
    fn plain_import<L: ModuleLocator>(
        &self,
        node: &TSNode,
        source: &[u8],
        root_name: &str,
        aliases: &mut AliasResolver<L>,
        graph: &mut DepGraph,
    ) {
        let mut cursor = node.walk();
        for child in node.children_by_field_name("name", &mut cursor) {
            if let Some(spelling) = imported_name(&child, source) {
                self.graph_import(root_name, spelling, aliases, graph);
            }
        }
    }

    /// `from M import a, b` / `from M import *`: an import edge to `M`
    /// plus one attribute edge per imported name. `from . import x`
    /// keeps the literal relative-import text ("." or "..pkg") as the
    /// module identity.
    fn from_import<L: ModuleLocator>(
        &self,
        node: &TSNode,
        source: &[u8],
        root_name: &str,
        aliases: &mut AliasResolver<L>,
        graph: &mut DepGraph,
    ) {
        let module_spelling = node
            .child_by_field_name("module_name")
            .map(|module| node_text(&module, source).to_string())
            .unwrap_or_default();
        let module = self.graph_import(root_name, &module_spelling, aliases, graph);

        let mut cursor = node.walk();
        if node
            .children(&mut cursor)
            .any(|child| child.kind() == "wildcard_import")
        {
            // the literal token, never an expansion of M's exports
            graph.add_attribute_edge(&module, "*");
            return;
        }

        let mut cursor = node.walk();
        for child in node.children_by_field_name("name", &mut cursor) {
            if let Some(attr) = imported_name(&child, source) {
                graph.add_attribute_edge(&module, attr);
            }
        }
    }

    fn graph_import<L: ModuleLocator>(
        &self,
        root_name: &str,
        spelling: &str,
        aliases: &mut AliasResolver<L>,
        graph: &mut DepGraph,
    ) -> String {
        let origin = aliases.classify(spelling);
        let resolved = aliases.lookup(spelling);
        graph.add_import_edge(root_name, &resolved, origin);
        resolved
    }
}

/// The real name behind an import-list entry: the dotted name itself,
/// or the pre-`as` name of an aliased import.
fn imported_name<'a>(node: &TSNode, source: &'a [u8]) -> Option<&'a str> {
    match node.kind() {
        "aliased_import" => node
            .child_by_field_name("name")
            .map(|name| node_text(&name, source)),
        _ => Some(node_text(node, source)),
    }
}

fn first_error_line(root: &TSNode) -> usize {
    fn find(node: &TSNode) -> Option<usize> {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position().row + 1);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.has_error() {
                if let Some(line) = find(&child) {
                    return Some(line);
                }
            }
        }
        None
    }
    find(root).unwrap_or(1)
}
