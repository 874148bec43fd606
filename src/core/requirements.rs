use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::graph::DepGraph;

/// The requirements manifest could not be read at all. Malformed lines
/// inside a readable manifest are skipped, not fatal.
#[derive(Debug, thiserror::Error)]
#[error("cannot read requirements manifest {}: {source}", .path.display())]
pub struct ManifestError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Read a line-oriented requirements manifest into specifier strings.
pub fn parse_requirements_file(path: &Path) -> Result<Vec<String>, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_requirements(&content))
}

/// One specifier per line; blank lines, `#` comments, and `-` option
/// lines (pip syntax, not specifiers) are skipped. Specifier text is
/// opaque here, passed through verbatim.
pub fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .map(str::to_string)
        .collect()
}

/// Build the small graph rooted at `package`: one library node and one
/// edge per requirement. An empty requirement list yields just the
/// root.
pub fn graph_requirements<I, S>(package: &str, requirements: I) -> DepGraph
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut graph = DepGraph::new();
    graph.add_root(package);
    for requirement in requirements {
        graph.add_library_edge(package, requirement.as_ref());
    }
    graph
}
