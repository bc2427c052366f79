//! Tree formatting and display
//!
//! This module provides the human-oriented and machine-oriented views of
//! a size-annotated tree:
//!
//! - `format` - byte counts as human-readable strings
//! - `render` - console output, largest entries first (colored or plain)
//! - `json` - JSON output

mod format;
mod json;
mod render;

// Re-export public types and functions
pub use format::format_size;
pub use json::{JsonNode, print_json};
pub use render::{RenderConfig, TreeRenderer};
