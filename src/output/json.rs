//! JSON output formatting

use std::io;
use std::path::PathBuf;

use serde::Serialize;

use crate::tree::TreeNode;

/// Serializable mirror of the tree for JSON output. Sizes are resolved
/// while building it, so the emitted numbers are final.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonNode {
    File {
        name: String,
        path: PathBuf,
        size: u64,
    },
    Dir {
        name: String,
        path: PathBuf,
        size: u64,
        children: Vec<JsonNode>,
    },
}

impl JsonNode {
    pub fn from_tree(node: &mut TreeNode) -> Self {
        let size = node.resolve_size();
        let name = node.name().into_owned();
        let path = node.path.clone();
        if node.is_file {
            JsonNode::File { name, path, size }
        } else {
            JsonNode::Dir {
                name,
                path,
                size,
                children: node.children.iter_mut().map(Self::from_tree).collect(),
            }
        }
    }
}

/// Print a tree as pretty-printed JSON to stdout.
pub fn print_json(node: &mut TreeNode) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&JsonNode::from_tree(node))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}
