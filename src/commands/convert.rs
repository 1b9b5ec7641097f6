//! Convert command implementation.
//!
//! The convert command:
//! 1. Resolves the decoder (prebuilt or compiled from the schema)
//! 2. Reads and decompresses the report
//! 3. Decodes the protobuf payload
//! 4. Maps the record to a JSON tree
//! 5. Writes the JSON file

use crate::decoder::{
    resolve_decoder, DecoderOrigin, DecoderRequest, Protoc, SchemaCompiler, ScratchDir, SearchPath,
};
use crate::input::read_report;
use crate::output::{to_tree, write_json, JsonStyle};
use crate::utils::config::{
    DEFAULT_DECODER_MODULE, DEFAULT_PROTOC, DEFAULT_PROTO_PATH, DEFAULT_ROOT_MESSAGE,
};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the compressed report
    pub input: PathBuf,

    /// Path to write JSON
    pub output: PathBuf,

    /// Schema compiled when no prebuilt decoder is found
    pub proto: PathBuf,

    /// Decoder identifier
    pub module: String,

    /// Root message name
    pub message: String,

    /// Directory for generated decoders (None = ephemeral)
    pub gen_dir: Option<PathBuf>,

    /// Schema compiler program
    pub protoc: PathBuf,

    /// Where prebuilt decoders are looked up
    pub search_path: SearchPath,

    /// Output layout
    pub style: JsonStyle,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            proto: PathBuf::from(DEFAULT_PROTO_PATH),
            module: DEFAULT_DECODER_MODULE.to_string(),
            message: DEFAULT_ROOT_MESSAGE.to_string(),
            gen_dir: None,
            protoc: PathBuf::from(DEFAULT_PROTOC),
            search_path: SearchPath::from_path_list(None),
            style: JsonStyle::Pretty,
        }
    }
}

/// What a successful conversion did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Decoder that was used
    pub decoder: DecoderOrigin,

    /// Fully-qualified root message
    pub message: String,

    /// Size of the decompressed payload
    pub payload_bytes: usize,

    /// Size of the JSON file
    pub output_bytes: u64,
}

/// Execute the convert command with the `protoc` from `args`
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Decoder resolution failures (missing compiler, unresolvable decoder)
/// * Input read or decompression errors
/// * Protobuf decode errors
/// * File write errors
pub fn execute_convert(args: &ConvertArgs) -> Result<ConvertSummary> {
    let compiler = Protoc::new(&args.protoc);
    execute_convert_with(args, &compiler)
}

/// Execute the convert command with an explicit schema compiler
///
/// **Public** - lets callers substitute the compiler
pub fn execute_convert_with(
    args: &ConvertArgs,
    compiler: &dyn SchemaCompiler,
) -> Result<ConvertSummary> {
    let start_time = Instant::now();

    // Dropped on every return below, which removes an ephemeral directory
    let scratch = ScratchDir::new(args.gen_dir.as_deref())
        .context("Failed to create scratch directory")?;

    debug!(
        "Scratch directory: {} (ephemeral: {})",
        scratch.path().display(),
        scratch.is_ephemeral()
    );

    // Step 1: Resolve decoder
    info!("Step 1/5: Resolving decoder '{}'...", args.module);
    let request = DecoderRequest {
        module: &args.module,
        message: &args.message,
        proto: &args.proto,
        gen_dir: scratch.path(),
    };
    let decoder = resolve_decoder(&request, &args.search_path, compiler)
        .context("Failed to resolve protobuf decoder")?;

    // Step 2: Read and decompress
    info!("Step 2/5: Decompressing {}...", args.input.display());
    let payload = read_report(&args.input).context("Failed to read report")?;

    // Step 3: Decode
    info!("Step 3/5: Decoding {}...", decoder.message_name());
    let record = decoder
        .decode(&payload)
        .context("Failed to decode report payload")?;

    // Step 4: Transform
    info!("Step 4/5: Mapping record to JSON tree...");
    let tree = to_tree(&record).context("Failed to convert record to JSON")?;

    // Step 5: Write
    info!("Step 5/5: Writing {}...", args.output.display());
    let output_bytes =
        write_json(&tree, &args.output, args.style).context("Failed to write JSON output")?;

    let elapsed = start_time.elapsed();
    info!("Conversion completed in {:.2}s", elapsed.as_secs_f64());

    Ok(ConvertSummary {
        decoder: decoder.origin().clone(),
        message: decoder.message_name().to_string(),
        payload_bytes: payload.len(),
        output_bytes,
    })
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.output.is_dir() {
        anyhow::bail!("Output path is a directory: {}", args.output.display());
    }

    if args.input == args.output {
        anyhow::bail!("Output path must differ from the input path");
    }

    validate_identifier("Decoder module", &args.module)?;
    validate_identifier("Message name", &args.message)?;

    Ok(())
}

/// Reject empty names and anything that would escape a search directory
///
/// **Private** - internal validation
fn validate_identifier(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", what);
    }

    if value.contains('/') || value.contains('\\') {
        anyhow::bail!("{} must not contain path separators: {}", what, value);
    }

    Ok(())
}
