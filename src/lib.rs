//! # UDON
//!
//! Python import dependency graphing for code inspection.
//!
//! UDON scans Python sources for `import` statements, graphs what they
//! import (modules, and the names pulled out of them), folds the
//! per-file graphs into one combined dependency graph, and renders it
//! for inspection.
//!
//! ## Output Formats
//!
//! - **DOT**: Graphviz digraph, nodes colored by kind and edges by
//!   relation
//! - **JSON**: compact roots/nodes/edges dump for programmatic
//!   consumption
//!
//! A requirements manifest can be graphed alongside the sources,
//! rooted at a package name.

pub mod core;
pub mod formatters;
pub mod parsers;
