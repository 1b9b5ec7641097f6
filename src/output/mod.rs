//! Output for decoded reports.
//!
//! This module handles:
//! - Mapping decoded messages to a generic JSON tree
//! - Writing JSON files (pretty and compact)

pub mod json;
pub mod tree;

// Re-export main functions
pub use json::{read_json, write_json, JsonStyle};
pub use tree::to_tree;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
