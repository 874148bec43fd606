pub mod alias;
pub mod composer;
pub mod graph;
pub mod requirements;
pub mod scanner;

pub use alias::{AliasResolver, FsModuleLocator, ModuleIdentity, ModuleLocator, ModuleRegistry};
pub use composer::{ComposeOutcome, Composer};
pub use graph::{DepGraph, EdgeView, ModuleOrigin, Node, NodeKind, Relation, Space};
pub use requirements::{graph_requirements, parse_requirements_file, ManifestError};
pub use scanner::FileScanner;
