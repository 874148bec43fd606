use std::fs;
use udon::core::{
    AliasResolver, DepGraph, ModuleIdentity, ModuleRegistry, NodeKind, Relation,
};
use udon::parsers::{ExtractError, ImportExtractor};

fn extract(source: &str) -> DepGraph {
    let mut extractor = ImportExtractor::new().unwrap();
    let mut aliases = AliasResolver::new(ModuleRegistry::new());
    extractor.extract("r", source, &mut aliases).unwrap()
}

#[test]
fn plain_import() {
    let graph = extract("import os\n");

    assert_eq!(graph.node("r").unwrap().kind, Some(NodeKind::Root));
    assert_eq!(graph.node("os").unwrap().kind, Some(NodeKind::Module));
    assert!(graph.has_edge("r", "os", Some(Relation::Imports)));
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn selective_import() {
    let graph = extract("from tempfile import NamedTemporaryFile, mkstemp\n");

    assert_eq!(graph.node("tempfile").unwrap().kind, Some(NodeKind::Module));
    assert!(graph.has_edge("r", "tempfile", Some(Relation::Imports)));

    for attr in ["NamedTemporaryFile", "mkstemp"] {
        assert_eq!(
            graph.attribute(attr).unwrap().kind,
            Some(NodeKind::Attribute)
        );
        assert!(graph.has_edge("tempfile", attr, Some(Relation::HasAttribute)));
    }

    // the module also shows up as the attribute-space source node
    assert!(graph.attribute("tempfile").is_some());
}

#[test]
fn multiple_modules_in_one_statement() {
    let graph = extract("import os, sys\n");

    assert!(graph.has_edge("r", "os", Some(Relation::Imports)));
    assert!(graph.has_edge("r", "sys", Some(Relation::Imports)));
}

#[test]
fn aliased_imports_graph_the_real_name() {
    let graph = extract("import os as operating_system\nfrom collections import OrderedDict as OD\n");

    assert!(graph.node("os").is_some());
    assert!(graph.node("operating_system").is_none());
    assert!(graph.attribute("OrderedDict").is_some());
    assert!(graph.attribute("OD").is_none());
}

#[test]
fn nested_imports_are_counted() {
    let source = "\
def f():
    import json

if True:
    from csv import reader
";
    let graph = extract(source);

    assert!(graph.has_edge("r", "json", Some(Relation::Imports)));
    assert!(graph.has_edge("r", "csv", Some(Relation::Imports)));
    assert!(graph.has_edge("csv", "reader", Some(Relation::HasAttribute)));
}

#[test]
fn bare_relative_import_uses_the_relative_text_as_module() {
    let graph = extract("from . import helpers\n");

    assert_eq!(graph.node(".").unwrap().kind, Some(NodeKind::Module));
    assert!(graph.has_edge("r", ".", Some(Relation::Imports)));
    assert!(graph.has_edge(".", "helpers", Some(Relation::HasAttribute)));
}

#[test]
fn dotted_relative_import_keeps_its_prefix() {
    let graph = extract("from ..pkg import thing\n");

    assert!(graph.node("..pkg").is_some());
    assert!(graph.has_edge("..pkg", "thing", Some(Relation::HasAttribute)));
}

#[test]
fn star_import_graphs_the_literal_wildcard() {
    let graph = extract("from os import *\n");

    assert!(graph.has_edge("r", "os", Some(Relation::Imports)));
    assert_eq!(graph.attribute("*").unwrap().kind, Some(NodeKind::Attribute));
    assert!(graph.has_edge("os", "*", Some(Relation::HasAttribute)));
}

#[test]
fn source_without_imports_yields_just_the_root() {
    let graph = extract("x = 1\n\ndef f(y):\n    return y\n");

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.roots().contains("r"));
}

#[test]
fn invalid_syntax_is_a_hard_error() {
    let mut extractor = ImportExtractor::new().unwrap();
    let mut aliases = AliasResolver::new(ModuleRegistry::new());
    let result = extractor.extract("r", "import (((\n", &mut aliases);

    assert!(matches!(result, Err(ExtractError::Syntax { .. })));
}

#[test]
fn aliases_collapse_within_one_file() {
    let mut registry = ModuleRegistry::new();
    registry.insert("os.path", ModuleIdentity::new("mod:posixpath"));
    registry.insert("path", ModuleIdentity::new("mod:posixpath"));

    let mut extractor = ImportExtractor::new().unwrap();
    let mut aliases = AliasResolver::new(registry);
    let graph = extractor
        .extract("r", "import os.path\nimport path\n", &mut aliases)
        .unwrap();

    assert!(graph.node("os.path").is_some());
    assert!(graph.node("path").is_none());
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn shared_resolver_collapses_aliases_across_files() {
    let mut registry = ModuleRegistry::new();
    registry.insert("os.path", ModuleIdentity::new("mod:posixpath"));
    registry.insert("path", ModuleIdentity::new("mod:posixpath"));

    let mut extractor = ImportExtractor::new().unwrap();
    let mut aliases = AliasResolver::new(registry);
    let first = extractor
        .extract("a.py", "import os.path\n", &mut aliases)
        .unwrap();
    let second = extractor
        .extract("b.py", "import path\n", &mut aliases)
        .unwrap();

    let combined = DepGraph::merge(&first, &second);
    assert!(combined.node("os.path").is_some());
    assert!(combined.node("path").is_none());
    assert!(combined.has_edge("a.py", "os.path", Some(Relation::Imports)));
    assert!(combined.has_edge("b.py", "os.path", Some(Relation::Imports)));
}

#[test]
fn scan_file_roots_the_graph_at_the_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("sample.py");
    fs::write(&file, "import os\nfrom tempfile import mkstemp\n").unwrap();

    let mut extractor = ImportExtractor::new().unwrap();
    let mut aliases = AliasResolver::new(ModuleRegistry::new());
    let graph = extractor.scan_file(&file, &mut aliases).unwrap();

    let root = file.to_string_lossy();
    assert!(graph.roots().contains(root.as_ref()));
    assert!(graph.has_edge(&root, "os", Some(Relation::Imports)));
    assert!(graph.has_edge("tempfile", "mkstemp", Some(Relation::HasAttribute)));
}

#[test]
fn scan_file_reports_missing_files() {
    let mut extractor = ImportExtractor::new().unwrap();
    let mut aliases = AliasResolver::new(ModuleRegistry::new());
    let result = extractor.scan_file("/no/such/file.py".as_ref(), &mut aliases);

    assert!(matches!(result, Err(ExtractError::Io { .. })));
}
