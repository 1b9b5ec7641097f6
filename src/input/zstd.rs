//! Zstandard decompression.

use crate::utils::error::InputError;

/// Decompress a complete zstd buffer
///
/// Concatenated frames are decoded back to back. Truncated frames and
/// non-zstd input fail with `InputError::Decompress`.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, InputError> {
    zstd::stream::decode_all(data).map_err(InputError::Decompress)
}
