//! The resolved decoder: a descriptor pool and the root message to decode.

use crate::utils::error::{DecodeError, DecoderError};
use log::{debug, warn};
use prost_reflect::{DescriptorPool, DynamicMessage, MessageDescriptor};
use std::path::{Path, PathBuf};

/// Where a decoder was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderOrigin {
    /// Found on the search path before any compilation
    Prebuilt(PathBuf),

    /// Produced by the schema compiler during this run
    Generated(PathBuf),
}

impl DecoderOrigin {
    pub fn path(&self) -> &Path {
        match self {
            DecoderOrigin::Prebuilt(path) | DecoderOrigin::Generated(path) => path,
        }
    }
}

/// Decodes report bytes into a dynamic message
#[derive(Debug, Clone)]
pub struct Decoder {
    module: String,
    descriptor: MessageDescriptor,
    origin: DecoderOrigin,
}

impl Decoder {
    /// Load a serialized `FileDescriptorSet` and pick the root message
    ///
    /// **Public** - used by the resolver
    ///
    /// # Arguments
    /// * `module` - Decoder identifier (for diagnostics)
    /// * `origin` - Descriptor set file and how it was found
    /// * `message` - Fully-qualified or simple name of the root message
    ///
    /// # Errors
    /// * `DecoderError::IoError` - descriptor set unreadable
    /// * `DecoderError::InvalidDescriptor` - not a valid descriptor set
    /// * `DecoderError::MessageNotFound` - root message missing from the set
    pub fn load(module: &str, origin: DecoderOrigin, message: &str) -> Result<Self, DecoderError> {
        let path = origin.path();
        debug!("Loading descriptor set from {}", path.display());

        let bytes = std::fs::read(path)?;
        let pool = DescriptorPool::decode(bytes.as_slice()).map_err(|source| {
            DecoderError::InvalidDescriptor {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Self::from_pool(module, &pool, message, origin)
    }

    /// Build a decoder from an already-populated pool
    pub fn from_pool(
        module: &str,
        pool: &DescriptorPool,
        message: &str,
        origin: DecoderOrigin,
    ) -> Result<Self, DecoderError> {
        let descriptor =
            find_message(pool, message).ok_or_else(|| DecoderError::MessageNotFound {
                module: module.to_string(),
                message: message.to_string(),
            })?;

        debug!("Root message resolved to {}", descriptor.full_name());

        Ok(Self {
            module: module.to_string(),
            descriptor,
            origin,
        })
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn origin(&self) -> &DecoderOrigin {
        &self.origin
    }

    /// Fully-qualified name of the root message
    pub fn message_name(&self) -> &str {
        self.descriptor.full_name()
    }

    /// Parse protobuf wire bytes as the root message
    ///
    /// # Errors
    /// * `DecodeError::Malformed` - bytes inconsistent with the schema
    pub fn decode(&self, bytes: &[u8]) -> Result<DynamicMessage, DecodeError> {
        DynamicMessage::decode(self.descriptor.clone(), bytes).map_err(|source| {
            DecodeError::Malformed {
                message: self.descriptor.full_name().to_string(),
                source,
            }
        })
    }
}

/// Look up by full name, then by unique simple name
///
/// **Private** - internal lookup helper
fn find_message(pool: &DescriptorPool, name: &str) -> Option<MessageDescriptor> {
    let name = name.trim_start_matches('.');

    if let Some(descriptor) = pool.get_message_by_name(name) {
        return Some(descriptor);
    }

    if name.contains('.') {
        return None;
    }

    let mut matches = pool.all_messages().filter(|m| m.name() == name);
    let first = matches.next()?;

    if let Some(other) = matches.next() {
        warn!(
            "Message name '{}' is ambiguous ({} and {}); use the fully-qualified name",
            name,
            first.full_name(),
            other.full_name()
        );
        return None;
    }

    Some(first)
}
