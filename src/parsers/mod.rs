pub mod common;
pub mod python;

use std::path::PathBuf;

pub use python::ImportExtractor;

/// Why a file's extraction failed. Extraction is all-or-nothing per
/// file: no partial graph escapes a failed parse.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid python syntax in {root} (first error near line {line})")]
    Syntax { root: String, line: usize },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tree-sitter rejected the python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("tree-sitter produced no tree for {root}")]
    Parse { root: String },
}
