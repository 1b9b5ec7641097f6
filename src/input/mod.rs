//! Reading compressed report files.
//!
//! A `.flarereport` is a single zstd frame wrapping the protobuf payload.

pub mod zstd;

pub use self::zstd::decompress;

use crate::utils::error::InputError;
use log::{debug, info};
use std::path::Path;

/// Read a report file and return the decompressed payload
///
/// **Public** - main entry point for input
///
/// # Errors
/// * `InputError::ReadFailed` - file missing or unreadable
/// * `InputError::Empty` - file has no bytes
/// * `InputError::Decompress` - not a valid zstd stream
pub fn read_report(input_path: impl AsRef<Path>) -> Result<Vec<u8>, InputError> {
    let input_path = input_path.as_ref();

    info!("Reading report: {}", input_path.display());

    let compressed = std::fs::read(input_path).map_err(|source| InputError::ReadFailed {
        path: input_path.to_path_buf(),
        source,
    })?;

    if compressed.is_empty() {
        return Err(InputError::Empty(input_path.to_path_buf()));
    }

    let payload = decompress(&compressed)?;

    debug!(
        "Decompressed {} bytes into {} bytes",
        compressed.len(),
        payload.len()
    );

    Ok(payload)
}
