use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const PYTHON_EXTENSIONS: [&str; 3] = ["py", "pyi", "pyw"];

pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Expand a mix of file and directory arguments into a sorted,
    /// deduplicated file list. Explicit file arguments are kept as
    /// given; directories are walked for Python sources. The ordering
    /// fixes the compose fold order, so repeated runs over the same
    /// tree produce the same combined graph.
    pub fn expand_paths(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for path in paths {
            if path.is_dir() {
                files.extend(self.scan_directory(path)?);
            } else {
                files.push(path.clone());
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    pub fn scan_directory(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let entries: Vec<_> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.path().is_file())
            .collect();

        let files: Vec<PathBuf> = entries
            .par_iter()
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| PYTHON_EXTENSIONS.contains(&ext))
                    .unwrap_or(false)
            })
            .map(|entry| entry.path().to_path_buf())
            .collect();

        Ok(files)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
