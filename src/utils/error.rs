//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving the report decoder
#[derive(Error, Debug)]
pub enum DecoderError {
    #[error("Schema compiler '{program}' is not available: {source}")]
    MissingCompiler {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema compiler '{program}' exited with {status}: {stderr}")]
    CompilerFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Unable to resolve decoder '{module}': {reason}")]
    Unresolvable { module: String, reason: String },

    #[error("Invalid descriptor set {}: {source}", .path.display())]
    InvalidDescriptor {
        path: PathBuf,
        #[source]
        source: prost_reflect::DescriptorError,
    },

    #[error("Message type '{message}' not found in decoder '{module}'")]
    MessageNotFound { module: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DecoderError {
    /// Shorthand for the unresolvable case
    pub fn unresolvable(module: &str, reason: impl Into<String>) -> Self {
        DecoderError::Unresolvable {
            module: module.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while reading the compressed report
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file is empty: {}", .0.display())]
    Empty(PathBuf),

    #[error("Input is not a valid zstd stream: {0}")]
    Decompress(#[source] std::io::Error),
}

/// Errors that can occur while decoding protobuf bytes
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Bytes do not match message '{message}': {source}")]
    Malformed {
        message: String,
        #[source]
        source: prost::DecodeError,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
