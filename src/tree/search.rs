//! Subtree lookup by name or path

use super::node::TreeNode;

/// Find the node named by `query` (full path or final path segment)
/// anywhere below `node`.
///
/// Direct children are checked before any deeper level, and siblings are
/// tried in order, so of two same-named entries at different depths the
/// shallower one wins. The node itself is never a candidate. Returns
/// `None` if nothing in the subtree matches.
pub fn find<'a>(node: &'a mut TreeNode, query: &str) -> Option<&'a mut TreeNode> {
    if let Some(i) = node.children.iter().position(|c| c.matches(query)) {
        return Some(&mut node.children[i]);
    }
    let i = node
        .children
        .iter()
        .position(|c| subtree_contains(c, query))?;
    find(&mut node.children[i], query)
}

/// Whether any descendant of `node` (excluding `node` itself) matches.
fn subtree_contains(node: &TreeNode, query: &str) -> bool {
    node.children
        .iter()
        .any(|c| c.matches(query) || subtree_contains(c, query))
}
