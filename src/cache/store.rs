//! Whole-file cache I/O
//!
//! The cache file is read and written wholesale; failures here are fatal
//! and surfaced to the caller, never retried.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read the entire cache file into memory.
pub fn load(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("cannot read cache file {}", path.display()))
}

/// Write the full cache contents, creating parent directories as needed.
pub fn save(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create cache directory {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("cannot write cache file {}", path.display()))
}
