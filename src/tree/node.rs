//! The size-annotated tree node

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// A node in the directory tree: one filesystem entry plus its lazily
/// computed aggregate size.
///
/// The size starts out unresolved and is memoized on first access: for a
/// file it is the byte length on disk, for a directory the sum of its
/// children's resolved sizes. Once resolved it never changes for the
/// lifetime of the node.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub path: PathBuf,
    pub is_file: bool,
    size: Option<u64>,
    pub children: Vec<TreeNode>,
    /// Set only on the top node of a live scan; gates progress reporting.
    pub is_root: bool,
}

impl TreeNode {
    /// Create a node with an unresolved size.
    pub fn new(path: impl Into<PathBuf>, is_file: bool) -> Self {
        Self {
            path: path.into(),
            is_file,
            size: None,
            children: Vec::new(),
            is_root: false,
        }
    }

    /// Create a node whose size is already known (cache decoding).
    pub fn with_size(path: impl Into<PathBuf>, is_file: bool, size: u64) -> Self {
        Self {
            size: Some(size),
            ..Self::new(path, is_file)
        }
    }

    /// The display name: the final path segment, or the full path when
    /// there is none (e.g. "/").
    pub fn name(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.path.to_string_lossy(),
        }
    }

    /// The memoized size, if it has been resolved yet.
    pub fn size_if_resolved(&self) -> Option<u64> {
        self.size
    }

    /// Resolve and memoize this node's size.
    ///
    /// Files read their byte length from disk; a failed read (vanished or
    /// unreadable entry) resolves to 0 rather than aborting the containing
    /// directory's aggregation. Directories sum their children. Idempotent
    /// after the first call.
    pub fn resolve_size(&mut self) -> u64 {
        if let Some(size) = self.size {
            return size;
        }
        let size = if self.is_file {
            fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        } else {
            self.children.iter_mut().map(|c| c.resolve_size()).sum()
        };
        self.size = Some(size);
        size
    }

    pub fn push_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Whether `query` names this node, either by full path or by final
    /// path segment.
    pub fn matches(&self, query: &str) -> bool {
        self.path == Path::new(query) || self.name() == query
    }

    /// Sort children largest-first by resolved size. The sort is stable,
    /// so equally sized siblings keep their enumeration order. The new
    /// order is retained on the node.
    pub fn sort_children_by_size(&mut self) {
        for child in &mut self.children {
            child.resolve_size();
        }
        self.children
            .sort_by_key(|c| std::cmp::Reverse(c.size_if_resolved().unwrap_or(0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dir_with_children(path: &str, children: Vec<TreeNode>) -> TreeNode {
        let mut node = TreeNode::new(path, false);
        node.children = children;
        node
    }

    #[test]
    fn test_directory_size_is_sum_of_children() {
        let mut root = dir_with_children(
            "root",
            vec![
                TreeNode::with_size("root/a", true, 300),
                dir_with_children(
                    "root/b",
                    vec![
                        TreeNode::with_size("root/b/x", true, 70),
                        TreeNode::with_size("root/b/y", true, 30),
                    ],
                ),
            ],
        );

        assert_eq!(root.resolve_size(), 400);
        assert_eq!(root.children[1].size_if_resolved(), Some(100));
    }

    #[test]
    fn test_file_size_read_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, vec![b'x'; 2048]).unwrap();

        let mut node = TreeNode::new(&path, true);
        assert_eq!(node.size_if_resolved(), None);
        assert_eq!(node.resolve_size(), 2048);
    }

    #[test]
    fn test_size_memoized_after_first_resolve() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, vec![b'x'; 100]).unwrap();

        let mut node = TreeNode::new(&path, true);
        assert_eq!(node.resolve_size(), 100);

        // Growing the file must not change the memoized size
        fs::write(&path, vec![b'x'; 5000]).unwrap();
        assert_eq!(node.resolve_size(), 100);
    }

    #[test]
    fn test_unreadable_file_resolves_to_zero() {
        let mut node = TreeNode::new("/nonexistent/definitely/missing.bin", true);
        assert_eq!(node.resolve_size(), 0);
    }

    #[test]
    fn test_name_is_final_segment() {
        let node = TreeNode::new("/home/user/docs", false);
        assert_eq!(node.name(), "docs");

        let root = TreeNode::new("/", false);
        assert_eq!(root.name(), "/");
    }

    #[test]
    fn test_matches_by_path_or_name() {
        let node = TreeNode::new("/home/user/docs", false);
        assert!(node.matches("/home/user/docs"));
        assert!(node.matches("docs"));
        assert!(!node.matches("user"));
        assert!(!node.matches("doc"));
    }

    #[test]
    fn test_sort_children_stable_on_ties() {
        let mut root = dir_with_children(
            "root",
            vec![
                TreeNode::with_size("root/a", true, 10),
                TreeNode::with_size("root/b", true, 50),
                TreeNode::with_size("root/c", true, 50),
                TreeNode::with_size("root/d", true, 90),
            ],
        );
        root.sort_children_by_size();

        let order: Vec<_> = root.children.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(order, ["d", "b", "c", "a"]);
    }
}
