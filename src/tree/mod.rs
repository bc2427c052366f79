//! Size-annotated directory tree model
//!
//! This module provides the tree entity and the machinery that produces
//! and queries it:
//!
//! - `TreeNode`: a filesystem entry with a lazily computed, memoized size
//! - `Scanner`: builds a tree from the live filesystem
//! - `find`: subtree lookup by name or full path

mod filter;
mod node;
mod progress;
mod scanner;
mod search;

// Re-export public types
pub use filter::{glob_match, should_ignore};
pub use node::TreeNode;
pub use progress::{IndicatifProgress, NoopProgress, ProgressHandle, ProgressReporter};
pub use scanner::{ScanConfig, ScanOutcome, Scanner};
pub use search::find;
