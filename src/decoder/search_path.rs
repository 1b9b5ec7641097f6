//! Ordered directory list consulted when loading a decoder by identifier.

use crate::utils::config::DESCRIPTOR_SET_EXTENSION;
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Directories searched for `<identifier>.binpb`, first match wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Build from a platform path list (e.g. `FLARE_DECODER_PATH`)
    ///
    /// **Public** - used by main.rs
    ///
    /// Empty entries are skipped. The current directory is always searched
    /// last.
    pub fn from_path_list(list: Option<&OsStr>) -> Self {
        let mut dirs: Vec<PathBuf> = list
            .map(|value| {
                std::env::split_paths(value)
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        dirs.push(PathBuf::from("."));
        Self { dirs }
    }

    /// Put a directory in front of every other entry
    pub fn prepend(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.insert(0, dir.into());
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Find the descriptor set for `module`
    ///
    /// # Returns
    /// Path of the first `<dir>/<module>.binpb` that is a regular file
    pub fn locate(&self, module: &str) -> Option<PathBuf> {
        let file_name = descriptor_file_name(module);

        self.dirs.iter().find_map(|dir| {
            let candidate = dir.join(&file_name);
            debug!("Looking for decoder at {}", candidate.display());
            candidate.is_file().then_some(candidate)
        })
    }
}

/// `<module>.binpb`
pub fn descriptor_file_name(module: &str) -> String {
    format!("{}.{}", module, DESCRIPTOR_SET_EXTENSION)
}

/// Where a compiled schema lands inside `out_dir`
pub fn generated_descriptor_path(schema: &Path, out_dir: &Path) -> PathBuf {
    let stem = schema
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schema".to_string());

    out_dir.join(descriptor_file_name(&stem))
}
