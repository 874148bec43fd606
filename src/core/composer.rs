use anyhow::Result;
use std::path::PathBuf;

use super::alias::{AliasResolver, ModuleLocator};
use super::graph::DepGraph;
use super::scanner::FileScanner;
use crate::parsers::{ExtractError, ImportExtractor};

/// The combined graph plus whatever failed along the way. A failed file
/// skips that file's extraction only; callers decide whether that
/// sinks the run.
pub struct ComposeOutcome {
    pub graph: DepGraph,
    pub failures: Vec<(PathBuf, ExtractError)>,
}

impl ComposeOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives extraction over a batch of files and folds the per-file
/// graphs into one. The alias resolver is shared across the whole
/// batch, so one module imported under different spellings in
/// different files still lands on a single node.
pub struct Composer<L> {
    scanner: FileScanner,
    extractor: ImportExtractor,
    aliases: AliasResolver<L>,
}

impl<L: ModuleLocator> Composer<L> {
    pub fn new(locator: L) -> Result<Self, ExtractError> {
        Ok(Self {
            scanner: FileScanner::new(),
            extractor: ImportExtractor::new()?,
            aliases: AliasResolver::new(locator),
        })
    }

    /// Extract every file reachable from `paths` and merge the results
    /// as a strict left fold in path-sorted order. Merge is associative
    /// and commutative on node/edge sets, but attribute ties break
    /// toward the earlier graph, so the fixed ordering keeps provenance
    /// reproducible.
    pub fn compose(&mut self, paths: &[PathBuf]) -> Result<ComposeOutcome> {
        let files = self.scanner.expand_paths(paths)?;

        let mut graph = DepGraph::new();
        let mut failures = Vec::new();
        for file in files {
            match self.extractor.scan_file(&file, &mut self.aliases) {
                Ok(per_file) => graph = DepGraph::merge(&graph, &per_file),
                Err(err) => failures.push((file, err)),
            }
        }

        Ok(ComposeOutcome { graph, failures })
    }
}
