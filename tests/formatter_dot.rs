use udon::core::{DepGraph, ModuleOrigin};
use udon::formatters::DotFormatter;

fn sample_graph() -> DepGraph {
    let mut graph = DepGraph::new();
    graph.add_root("r");
    graph.add_import_edge("r", "os", ModuleOrigin::Unknown);
    graph.add_import_edge("r", "tempfile", ModuleOrigin::Unknown);
    graph.add_attribute_edge("tempfile", "mkstemp");
    graph.add_library_edge("r", "hello==1.0");
    graph
}

#[test]
fn dot_output_is_a_digraph_with_styled_statements() {
    let dot = DotFormatter::new().format_to_string(&sample_graph());

    assert!(dot.starts_with("digraph dependencies {\n"));
    assert!(dot.ends_with("}\n"));

    // roots are blue boxes, libraries purple
    assert!(dot.contains("\"node:r\" [label=\"r\", color=blue, shape=box];"));
    assert!(dot.contains("\"node:hello==1.0\" [label=\"hello==1.0\", color=purple, shape=ellipse];"));

    // import edges blue, attribute edges black, library edges unlabeled
    assert!(dot.contains("\"node:r\" -> \"node:os\" [color=blue];"));
    assert!(dot.contains("\"attr:tempfile\" -> \"attr:mkstemp\" [color=black];"));
    assert!(dot.contains("\"node:r\" -> \"node:hello==1.0\";"));
}

#[test]
fn both_namespaces_of_a_name_render() {
    let dot = DotFormatter::new().format_to_string(&sample_graph());

    assert!(dot.contains("\"node:tempfile\""));
    assert!(dot.contains("\"attr:tempfile\""));
}

#[test]
fn rendering_is_stable_under_merge_order() {
    let mut a = DepGraph::new();
    a.add_root("a.py");
    a.add_import_edge("a.py", "os", ModuleOrigin::Unknown);
    let mut b = DepGraph::new();
    b.add_root("b.py");
    b.add_import_edge("b.py", "json", ModuleOrigin::Unknown);

    let formatter = DotFormatter::new();
    let ab = formatter.format_to_string(&DepGraph::merge(&a, &b));
    let ba = formatter.format_to_string(&DepGraph::merge(&b, &a));
    assert_eq!(ab, ba);
}

#[test]
fn quotes_in_names_are_escaped() {
    let mut graph = DepGraph::new();
    graph.add_module("weird\"name", ModuleOrigin::Unknown);

    let dot = DotFormatter::new().format_to_string(&graph);
    assert!(dot.contains("label=\"weird\\\"name\""));
}
