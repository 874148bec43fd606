use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Root,
    Module,
    Attribute,
    Library,
}

/// Whether a module ships with the Python distribution or was installed
/// separately. Best-effort: the two are often indistinguishable without
/// an interpreter at hand, so `Unknown` is the default.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum ModuleOrigin {
    Standard,
    External,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    Imports,
    HasAttribute,
}

/// Node key namespace. Attribute nodes are keyed apart from everything
/// else, so a name imported both as a module and out of a module yields
/// two nodes. `Root`, `Module`, and `Library` share the entity space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Space {
    Entity,
    Attribute,
}

impl Space {
    fn of(kind: Option<NodeKind>) -> Space {
        match kind {
            Some(NodeKind::Attribute) => Space::Attribute,
            _ => Space::Entity,
        }
    }
}

/// A graph node. `kind` is `None` for a bare node: an edge endpoint
/// inserted before any caller declared it. Inserts are idempotent, so a
/// bare node stays bare and a kinded node keeps its first kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: Option<NodeKind>,
    pub origin: ModuleOrigin,
}

impl Node {
    pub fn space(&self) -> Space {
        Space::of(self.kind)
    }
}

/// Edge weight. `relation` is `None` for library edges, which carry no
/// import/attribute distinction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Link {
    pub relation: Option<Relation>,
}

/// Borrowed view of one edge, endpoints resolved to their nodes.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'g> {
    pub from: &'g Node,
    pub to: &'g Node,
    pub relation: Option<Relation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NodeKey {
    space: Space,
    name: String,
}

impl NodeKey {
    fn new(name: &str, kind: Option<NodeKind>) -> Self {
        Self {
            space: Space::of(kind),
            name: name.to_string(),
        }
    }
}

/// Directed dependency graph with deduplicated, name-keyed nodes.
///
/// All insertion operations are total: any string is a valid name,
/// including the empty string. Re-adding an existing node is a no-op;
/// duplicate edges (same endpoints, same relation) collapse to one.
#[derive(Debug, Clone, Default)]
pub struct DepGraph {
    graph: Graph<Node, Link, Directed>,
    index: HashMap<NodeKey, NodeIndex>,
    seen_edges: HashSet<(NodeIndex, NodeIndex, Option<Relation>)>,
    roots: BTreeSet<String>,
}

impl DepGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, name: &str, kind: Option<NodeKind>, origin: ModuleOrigin) -> NodeIndex {
        let key = NodeKey::new(name, kind);
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(Node {
            name: name.to_string(),
            kind,
            origin,
        });
        self.index.insert(key, idx);
        idx
    }

    fn link(&mut self, from: NodeIndex, to: NodeIndex, relation: Option<Relation>) {
        if self.seen_edges.insert((from, to, relation)) {
            self.graph.add_edge(from, to, Link { relation });
        }
    }

    pub fn add_root(&mut self, name: &str) {
        self.intern(name, Some(NodeKind::Root), ModuleOrigin::Unknown);
        self.roots.insert(name.to_string());
    }

    pub fn add_module(&mut self, name: &str, origin: ModuleOrigin) {
        self.intern(name, Some(NodeKind::Module), origin);
    }

    /// Ensures `to` exists as a module, then records `from -> to`.
    /// `from` is expected to be present already (a root or module); a
    /// missing `from` is inserted bare, without a kind.
    pub fn add_import_edge(&mut self, from: &str, to: &str, origin: ModuleOrigin) {
        let target = self.intern(to, Some(NodeKind::Module), origin);
        let source = self.intern(from, None, ModuleOrigin::Unknown);
        self.link(source, target, Some(Relation::Imports));
    }

    pub fn add_attribute(&mut self, name: &str) {
        self.intern(name, Some(NodeKind::Attribute), ModuleOrigin::Unknown);
    }

    /// Ensures both endpoints exist as attribute nodes, then records
    /// `from -> to`. Attribute nodes are keyed apart from modules, so
    /// `from` here never collides with a module of the same name.
    pub fn add_attribute_edge(&mut self, from: &str, to: &str) {
        let source = self.intern(from, Some(NodeKind::Attribute), ModuleOrigin::Unknown);
        let target = self.intern(to, Some(NodeKind::Attribute), ModuleOrigin::Unknown);
        self.link(source, target, Some(Relation::HasAttribute));
    }

    pub fn add_library(&mut self, name: &str) {
        self.intern(name, Some(NodeKind::Library), ModuleOrigin::Unknown);
    }

    /// Library edges carry no relation label.
    pub fn add_library_edge(&mut self, parent: &str, lib: &str) {
        let source = self.intern(parent, None, ModuleOrigin::Unknown);
        let target = self.intern(lib, Some(NodeKind::Library), ModuleOrigin::Unknown);
        self.link(source, target, None);
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.graph.edge_references().map(|edge| EdgeView {
            from: &self.graph[edge.source()],
            to: &self.graph[edge.target()],
            relation: edge.weight().relation,
        })
    }

    pub fn out_edges(&self, name: &str) -> Vec<EdgeView<'_>> {
        self.edges().filter(|edge| edge.from.name == name).collect()
    }

    /// The entity-space node (root, module, or library) of this name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index
            .get(&NodeKey::new(name, None))
            .map(|&idx| &self.graph[idx])
    }

    /// The attribute-space node of this name.
    pub fn attribute(&self, name: &str) -> Option<&Node> {
        self.index
            .get(&NodeKey::new(name, Some(NodeKind::Attribute)))
            .map(|&idx| &self.graph[idx])
    }

    pub fn roots(&self) -> &BTreeSet<String> {
        &self.roots
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn has_edge(&self, from: &str, to: &str, relation: Option<Relation>) -> bool {
        self.edges()
            .any(|e| e.from.name == from && e.to.name == to && e.relation == relation)
    }

    /// Structural union of two graphs. Node and edge sets are unioned;
    /// when a node exists in both, the `a` version wins (nodes are
    /// immutable once first inserted, and `a` inserts first). Roots are
    /// the union of both roots sets.
    pub fn merge(a: &DepGraph, b: &DepGraph) -> DepGraph {
        let mut combined = DepGraph::new();
        for side in [a, b] {
            for node in side.nodes() {
                combined.intern(&node.name, node.kind, node.origin);
            }
        }
        for side in [a, b] {
            for edge in side.edges() {
                let from = combined.intern(&edge.from.name, edge.from.kind, edge.from.origin);
                let to = combined.intern(&edge.to.name, edge.to.kind, edge.to.origin);
                combined.link(from, to, edge.relation);
            }
        }
        combined.roots = a.roots.union(&b.roots).cloned().collect();
        combined
    }

    /// The backing petgraph graph, for rendering collaborators and
    /// graph algorithms.
    pub fn petgraph(&self) -> &Graph<Node, Link, Directed> {
        &self.graph
    }
}
