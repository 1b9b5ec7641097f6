//! Scratch directory for generated decoders.

use crate::utils::config::SCRATCH_DIR_PREFIX;
use log::debug;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Where the schema compiler writes its output
///
/// An ephemeral directory is removed when this value is dropped, so every
/// exit path after creation cleans it up. An explicit one is left in place.
#[derive(Debug)]
pub enum ScratchDir {
    Explicit(PathBuf),
    Ephemeral(TempDir),
}

impl ScratchDir {
    /// Use `explicit` if given, otherwise create a fresh temp directory
    pub fn new(explicit: Option<&Path>) -> std::io::Result<Self> {
        match explicit {
            Some(dir) => Ok(ScratchDir::Explicit(dir.to_path_buf())),
            None => {
                let dir = tempfile::Builder::new().prefix(SCRATCH_DIR_PREFIX).tempdir()?;
                debug!("Created scratch directory {}", dir.path().display());
                Ok(ScratchDir::Ephemeral(dir))
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ScratchDir::Explicit(dir) => dir,
            ScratchDir::Ephemeral(dir) => dir.path(),
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, ScratchDir::Ephemeral(_))
    }
}
