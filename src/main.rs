//! Flare report converter CLI
//!
//! Converts a `.flarereport` (protobuf + zstd) into pretty-printed JSON.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use flare_report::commands::{execute_convert, validate_args, ConvertArgs};
use flare_report::decoder::{remediation_hint, SearchPath};
use flare_report::output::JsonStyle;
use flare_report::utils::config::{
    DECODER_PATH_ENV, DEFAULT_DECODER_MODULE, DEFAULT_PROTOC, DEFAULT_PROTO_PATH,
    DEFAULT_ROOT_MESSAGE, PROTOC_ENV,
};
use flare_report::utils::error::DecoderError;

/// Convert .flarereport protobuf+zstd to JSON
#[derive(Parser, Debug)]
#[command(name = "flare-convert")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to .flarereport
    input: PathBuf,

    /// Path to output JSON
    output: PathBuf,

    /// Path to flare_report.proto (used for auto-generation)
    #[arg(long, default_value = DEFAULT_PROTO_PATH)]
    proto: PathBuf,

    /// Decoder identifier, looked up as <module>.binpb
    #[arg(long, default_value = DEFAULT_DECODER_MODULE)]
    module: String,

    /// Directory to place generated decoders (defaults to a temp dir)
    #[arg(long)]
    gen_dir: Option<PathBuf>,

    /// Root message to decode
    #[arg(long, default_value = DEFAULT_ROOT_MESSAGE)]
    message: String,

    /// Schema compiler to run when no prebuilt decoder is found
    #[arg(long, env = PROTOC_ENV, default_value = DEFAULT_PROTOC)]
    protoc: PathBuf,

    /// Extra directories searched for prebuilt decoders
    #[arg(long, env = DECODER_PATH_ENV)]
    decoder_path: Option<OsString>,

    /// Write single-line JSON instead of indented
    #[arg(long)]
    compact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = ConvertArgs {
        input: cli.input,
        output: cli.output,
        proto: cli.proto,
        module: cli.module,
        message: cli.message,
        gen_dir: cli.gen_dir,
        protoc: cli.protoc,
        search_path: SearchPath::from_path_list(cli.decoder_path.as_deref()),
        style: if cli.compact {
            JsonStyle::Compact
        } else {
            JsonStyle::Pretty
        },
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, &args);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &ConvertArgs) -> Result<()> {
    validate_args(args)?;

    let summary = execute_convert(args)?;

    info!(
        "✓ {} -> {} ({} payload bytes, {} JSON bytes)",
        args.input.display(),
        args.output.display(),
        summary.payload_bytes,
        summary.output_bytes
    );

    Ok(())
}

/// Print the failure and, for decoder problems, how to fix it
///
/// **Private** - internal error reporting
fn report_error(err: &anyhow::Error, args: &ConvertArgs) {
    eprintln!("Error: {:#}", err);

    if err.downcast_ref::<DecoderError>().is_some() {
        eprintln!();
        eprintln!("Unable to load the '{}' protobuf decoder.", args.module);
        eprintln!("{}", remediation_hint(&args.proto, &args.module));
    }
}
