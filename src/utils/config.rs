//! Configuration and constants for the CLI.

/// Default schema location, relative to the working directory
pub const DEFAULT_PROTO_PATH: &str = "proto/flare_report.proto";

/// Default decoder identifier (looked up as `<identifier>.binpb`)
pub const DEFAULT_DECODER_MODULE: &str = "flare_report";

/// Root message of a flare report
pub const DEFAULT_ROOT_MESSAGE: &str = "ProfilerData";

/// Schema compiler invoked when no prebuilt decoder is found
pub const DEFAULT_PROTOC: &str = "protoc";

/// File extension of serialized `FileDescriptorSet`s
pub const DESCRIPTOR_SET_EXTENSION: &str = "binpb";

// Environment overrides (also wired into the CLI flags)
pub const DECODER_PATH_ENV: &str = "FLARE_DECODER_PATH";
pub const PROTOC_ENV: &str = "FLARE_PROTOC";

/// Prefix for the implicit scratch directory
pub const SCRATCH_DIR_PREFIX: &str = "flare-decoder-";
