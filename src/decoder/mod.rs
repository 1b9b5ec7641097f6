//! Decoder resolution for report payloads.
//!
//! This module handles:
//! - Locating prebuilt descriptor sets on a search path
//! - Compiling the schema with an external compiler when none exist
//! - Managing the scratch directory for generated output
//! - Decoding protobuf bytes into dynamic messages

pub mod compiler;
pub mod descriptor;
pub mod resolver;
pub mod scratch;
pub mod search_path;

// Re-export main types
pub use compiler::{Protoc, SchemaCompiler};
pub use descriptor::{Decoder, DecoderOrigin};
pub use resolver::{remediation_hint, resolve_decoder, DecoderRequest};
pub use scratch::ScratchDir;
pub use search_path::SearchPath;
