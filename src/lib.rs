//! Heft - A tree command that shows where the bytes went

pub mod cache;
pub mod output;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use cache::{deserialize, load, save, serialize};
pub use output::{JsonNode, RenderConfig, TreeRenderer, format_size, print_json};
pub use tree::{
    IndicatifProgress, NoopProgress, ScanConfig, ScanOutcome, Scanner, TreeNode, find,
};
