//! JSON output writer.
//!
//! Writes the converted tree to disk with 2-space indentation. The file is
//! staged next to its destination and renamed into place, so a failed run
//! never leaves a half-written output.

use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::{File, Permissions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Layout of the written JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// 2-space indentation
    #[default]
    Pretty,

    /// Single line
    Compact,
}

/// Write a value to a JSON file, replacing any existing file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `value` - Tree (or any serializable value) to write
/// * `output_path` - Path to output JSON file
/// * `style` - Pretty or compact layout
///
/// # Returns
/// Size of the written file in bytes
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write or rename
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let tree = to_tree(&record)?;
/// write_json(&tree, "report.json", JsonStyle::Pretty)?;
/// ```
pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    output_path: impl AsRef<Path>,
    style: JsonStyle,
) -> Result<u64, OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON to: {}", output_path.display());

    super::validate_path(output_path)?;

    // Write through a symlink to the file it points at
    let target = if output_path.exists() {
        std::fs::canonicalize(output_path)?
    } else {
        output_path.to_path_buf()
    };

    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !parent.exists() {
        debug!("Creating parent directories: {}", parent.display());
        std::fs::create_dir_all(parent).map_err(|e| {
            OutputError::InvalidPath(format!(
                "Cannot create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut staged = NamedTempFile::new_in(parent).map_err(OutputError::WriteFailed)?;

    {
        let mut writer = BufWriter::new(staged.as_file_mut());

        match style {
            JsonStyle::Pretty => serde_json::to_writer_pretty(&mut writer, value)?,
            JsonStyle::Compact => serde_json::to_writer(&mut writer, value)?,
        }

        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    if let Some(permissions) = output_permissions(&target)? {
        staged.as_file().set_permissions(permissions)?;
    }

    staged
        .persist(&target)
        .map_err(|e| OutputError::WriteFailed(e.error))?;

    let size = calculate_file_size(&target);
    info!("JSON written successfully ({} bytes)", size);

    Ok(size)
}

/// Permissions the written file should end up with
///
/// **Private** - an existing file keeps its mode; a new one gets the usual
/// 0644 instead of the staging file's 0600
fn output_permissions(target: &Path) -> std::io::Result<Option<Permissions>> {
    if target.exists() {
        return Ok(Some(std::fs::metadata(target)?.permissions()));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Ok(Some(Permissions::from_mode(0o644)))
    }

    #[cfg(not(unix))]
    {
        Ok(None)
    }
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a JSON file back into a tree
///
/// **Public** - useful for validation and testing
pub fn read_json(input_path: impl AsRef<Path>) -> Result<serde_json::Value, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading JSON from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let value = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(value)
}
