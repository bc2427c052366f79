//! Filesystem scanner - builds a TreeNode graph from a live directory tree

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::filter::should_ignore;
use super::node::TreeNode;
use super::progress::{NoopProgress, ProgressReporter};

/// Configuration for a filesystem scan.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// The subtree to scan. Supplied explicitly by the caller; the scanner
    /// has no ambient default.
    pub root: PathBuf,
    /// Entry names (literal or glob) excluded from the scan.
    pub ignore_patterns: Vec<String>,
}

/// The result of a scan: the tree plus a count of entries that were
/// dropped because they could not be read.
pub struct ScanOutcome {
    pub root: TreeNode,
    pub skipped: u64,
}

/// Walks a directory tree and builds an unresolved [`TreeNode`] graph.
///
/// Symbolic links are skipped entirely. Any error classifying or
/// descending into a single entry drops that entry from its parent's
/// children and the scan continues; only an unreadable scan root is
/// fatal. Sizes are left unresolved for consumers to compute lazily.
pub struct Scanner {
    config: ScanConfig,
    progress: Box<dyn ProgressReporter>,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            progress: Box::new(NoopProgress),
        }
    }

    /// Report progress through `reporter` while enumerating the root
    /// directory level.
    pub fn with_progress(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.progress = reporter;
        self
    }

    pub fn scan(&self) -> Result<ScanOutcome> {
        let root_path = &self.config.root;
        let is_file = root_path.is_file();
        let mut root = TreeNode::new(root_path.clone(), is_file);
        root.is_root = true;
        let mut skipped = 0u64;

        if !is_file {
            let entries = read_entries(root_path)
                .with_context(|| format!("cannot read directory {}", root_path.display()))?;
            let handle = self
                .progress
                .start(&root_path.display().to_string(), entries.len() as u64);
            for path in entries {
                if let Some(child) = self.scan_entry(&path, &mut skipped) {
                    root.push_child(child);
                }
                handle.inc(1);
            }
            handle.finish();
        }

        Ok(ScanOutcome { root, skipped })
    }

    /// Build the node for one directory entry, or `None` if the entry is
    /// ignored, a symlink, or unreadable. Classification is re-checked
    /// here rather than trusted from the parent's listing; an entry that
    /// changed or vanished in between is simply dropped.
    fn scan_entry(&self, path: &Path, skipped: &mut u64) -> Option<TreeNode> {
        if should_ignore(path, &self.config.ignore_patterns) {
            return None;
        }
        if path.is_symlink() {
            return None;
        }

        let is_file = path.is_file();
        let mut node = TreeNode::new(path.to_path_buf(), is_file);
        if !is_file {
            if !path.is_dir() {
                // Neither file nor directory: vanished or inaccessible
                *skipped += 1;
                return None;
            }
            let entries = match read_entries(path) {
                Ok(entries) => entries,
                Err(_) => {
                    *skipped += 1;
                    return None;
                }
            };
            for entry_path in entries {
                if let Some(child) = self.scan_entry(&entry_path, skipped) {
                    node.push_child(child);
                }
            }
        }
        Some(node)
    }
}

/// List a directory's entry paths in name order.
fn read_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    entries.sort();
    Ok(entries)
}
