//! Line-based cache encoding and decoding
//!
//! The cache is a flat text format, one node per line, in pre-order
//! depth-first order (a parent's line always precedes its descendants'):
//!
//! ```text
//! <size> | <True|False> | <path>
//! ```
//!
//! The format carries no depth marker; parent/child linkage is
//! reconstructed purely from the path structure of each record.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::tree::TreeNode;

/// Field separator; the path field is the remainder of the line after the
/// second occurrence, so paths containing the separator sequence are
/// ambiguous and unsupported.
pub const FIELD_SEPARATOR: &str = " | ";

/// Marker for records written in place of an unreadable entry. The
/// current encoder never emits these, but decoding still discards them so
/// caches written by older versions load cleanly.
pub const ERROR_MARKER: &str = "<error>";

/// Serialize a tree, resolving sizes as a side effect.
///
/// Any node whose resolved size is strictly below `threshold` is omitted
/// together with its whole subtree: its bytes stay counted in the
/// ancestors' sums but it produces no lines. The root line is always
/// emitted regardless of its size.
pub fn serialize(root: &mut TreeNode, threshold: u64) -> String {
    root.resolve_size();
    let mut out = String::new();
    write_node(root, threshold, &mut out);
    out
}

fn write_node(node: &TreeNode, threshold: u64, out: &mut String) {
    let size = node.size_if_resolved().unwrap_or(0);
    let flag = if node.is_file { "True" } else { "False" };
    out.push_str(&format!(
        "{size}{FIELD_SEPARATOR}{flag}{FIELD_SEPARATOR}{}\n",
        node.path.display()
    ));
    for child in &node.children {
        // Threshold short-circuits the whole subtree: a pruned node's
        // descendants are never visited for output.
        if child.size_if_resolved().unwrap_or(0) < threshold {
            continue;
        }
        write_node(child, threshold, out);
    }
}

/// An arena record: a decoded node plus the indices of the children that
/// attached to it. Path-derived keys are used only at this boundary; the
/// in-memory linkage is index-based.
struct Slot {
    node: TreeNode,
    children: Vec<usize>,
}

/// Reconstruct a tree from cache text.
///
/// The first valid line establishes the root. Every later record attaches
/// to the node registered under `dirname(path)` if one exists; otherwise
/// it stays standalone and is discarded when the root is extracted.
/// Malformed lines and error-marker lines are skipped, not fatal; an
/// empty cache (no valid root line) is.
pub fn deserialize(text: &str) -> Result<TreeNode> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut root: Option<usize> = None;
    let mut malformed = 0usize;

    for line in text.lines() {
        if line.is_empty() || line.contains(ERROR_MARKER) {
            continue;
        }
        let Some((size, is_file, path)) = parse_line(line) else {
            malformed += 1;
            continue;
        };

        let idx = slots.len();
        slots.push(Slot {
            node: TreeNode::with_size(path, is_file, size),
            children: Vec::new(),
        });
        if root.is_none() {
            root = Some(idx);
        } else if let Some(&parent) = parent_key(path).and_then(|key| index.get(key)) {
            slots[parent].children.push(idx);
        }
        index.insert(path.to_string(), idx);
    }

    if malformed > 0 {
        eprintln!("heft: warning: skipped {malformed} malformed cache line(s)");
    }

    let root = root.context("no root found in cache")?;
    extract(slots, root).context("no root found in cache")
}

/// Split one record into its fields. Returns `None` for lines with the
/// wrong number of fields or an unparseable size.
fn parse_line(line: &str) -> Option<(u64, bool, &str)> {
    let mut fields = line.splitn(3, FIELD_SEPARATOR);
    let size = fields.next()?.parse::<u64>().ok()?;
    let is_file = fields.next()? == "True";
    let path = fields.next()?;
    Some((size, is_file, path))
}

/// The parent key of a record: the directory name of its path. Two
/// unrelated records sharing a derived parent key will both attach to it;
/// dirname equality is the sole parenthood test.
fn parent_key(path: &str) -> Option<&str> {
    Path::new(path).parent().and_then(|p| p.to_str())
}

/// Assemble the owned tree out of the arena and return the root's
/// subtree. Children always carry a higher index than their parent, so a
/// single reverse pass sees every child built before its parent needs it.
fn extract(slots: Vec<Slot>, root: usize) -> Option<TreeNode> {
    let total = slots.len();
    let mut built: HashMap<usize, TreeNode> = HashMap::with_capacity(total);
    for (offset, slot) in slots.into_iter().rev().enumerate() {
        let idx = total - 1 - offset;
        let Slot { mut node, children } = slot;
        node.children = children
            .into_iter()
            .filter_map(|c| built.remove(&c))
            .collect();
        built.insert(idx, node);
    }
    built.remove(&root)
}
