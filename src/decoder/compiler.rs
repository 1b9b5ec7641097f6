//! Schema compilation into loadable descriptor sets.
//!
//! The compiler is an external collaborator. `protoc` is run as a blocking
//! subprocess and asked for a self-contained `FileDescriptorSet`, which is
//! all the dynamic decoder needs.

use super::search_path::generated_descriptor_path;
use crate::utils::config::DEFAULT_PROTOC;
use crate::utils::error::DecoderError;
use log::{debug, warn};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Anything that can turn a schema file into a descriptor set on disk
pub trait SchemaCompiler {
    /// Compile `schema` into `out_dir`
    ///
    /// # Returns
    /// Path of the descriptor set that was written
    fn compile(&self, schema: &Path, out_dir: &Path) -> Result<PathBuf, DecoderError>;
}

/// The `protoc` binary
#[derive(Debug, Clone)]
pub struct Protoc {
    program: PathBuf,
}

impl Protoc {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments passed to `protoc` for one schema
    ///
    /// **Private** - split out so the command line can be tested without a compiler
    fn arguments(schema: &Path, output: &Path) -> Vec<OsString> {
        let include_dir = schema
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut include = OsString::from("-I");
        include.push(include_dir);

        let mut descriptor_out = OsString::from("--descriptor_set_out=");
        descriptor_out.push(output);

        vec![
            include,
            OsString::from("--include_imports"),
            descriptor_out,
            schema.as_os_str().to_os_string(),
        ]
    }
}

impl Default for Protoc {
    fn default() -> Self {
        Self::new(DEFAULT_PROTOC)
    }
}

impl SchemaCompiler for Protoc {
    fn compile(&self, schema: &Path, out_dir: &Path) -> Result<PathBuf, DecoderError> {
        let output = generated_descriptor_path(schema, out_dir);
        let args = Protoc::arguments(schema, &output);

        debug!("Running {} {:?}", self.program.display(), args);

        let result = Command::new(&self.program).args(&args).output();

        let finished = match result {
            Ok(finished) => finished,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DecoderError::MissingCompiler {
                    program: self.program.display().to_string(),
                    source: e,
                });
            }
            Err(e) => return Err(DecoderError::IoError(e)),
        };

        if !finished.status.success() {
            let stderr = String::from_utf8_lossy(&finished.stderr).trim().to_string();
            warn!("{} failed: {}", self.program.display(), stderr);
            return Err(DecoderError::CompilerFailed {
                program: self.program.display().to_string(),
                status: finished.status.to_string(),
                stderr,
            });
        }

        debug!("Descriptor set written to {}", output.display());

        Ok(output)
    }
}
