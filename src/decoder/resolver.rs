//! Decoder resolution: prebuilt lookup, then on-demand schema compilation.

use super::compiler::SchemaCompiler;
use super::descriptor::{Decoder, DecoderOrigin};
use super::search_path::SearchPath;
use crate::utils::error::DecoderError;
use log::{debug, info};
use std::path::Path;

/// What to resolve and where generated output may go
#[derive(Debug, Clone, Copy)]
pub struct DecoderRequest<'a> {
    /// Decoder identifier, looked up as `<module>.binpb`
    pub module: &'a str,

    /// Root message name
    pub message: &'a str,

    /// Schema compiled when no prebuilt decoder exists
    pub proto: &'a Path,

    /// Directory receiving compiler output
    pub gen_dir: &'a Path,
}

/// Resolve a decoder for one run
///
/// **Public** - main entry point for decoder loading
///
/// Order:
/// 1. `<module>.binpb` on the search path
/// 2. compile `proto` into `gen_dir`, then look up again with `gen_dir` first
/// 3. load the compiler's output file directly
///
/// # Errors
/// * `DecoderError::Unresolvable` - no prebuilt decoder and no usable schema,
///   or the compiler failed
/// * `DecoderError::MissingCompiler` - the compiler binary is not installed
/// * `DecoderError::InvalidDescriptor` / `MessageNotFound` - a decoder was
///   found but cannot decode the requested message
pub fn resolve_decoder(
    request: &DecoderRequest<'_>,
    search_path: &SearchPath,
    compiler: &dyn SchemaCompiler,
) -> Result<Decoder, DecoderError> {
    let module = request.module;

    if let Some(path) = search_path.locate(module) {
        info!("Using prebuilt decoder: {}", path.display());
        return Decoder::load(module, DecoderOrigin::Prebuilt(path), request.message);
    }

    debug!("No prebuilt decoder '{}' on search path", module);

    if !request.proto.is_file() {
        return Err(DecoderError::unresolvable(
            module,
            format!(
                "no prebuilt decoder found and schema {} does not exist",
                request.proto.display()
            ),
        ));
    }

    std::fs::create_dir_all(request.gen_dir)?;

    info!(
        "Compiling {} into {}",
        request.proto.display(),
        request.gen_dir.display()
    );

    let generated = compiler
        .compile(request.proto, request.gen_dir)
        .map_err(|e| match e {
            DecoderError::CompilerFailed { .. } => DecoderError::unresolvable(module, e.to_string()),
            other => other,
        })?;

    let mut search_path = search_path.clone();
    search_path.prepend(request.gen_dir);

    if let Some(path) = search_path.locate(module) {
        return Decoder::load(module, DecoderOrigin::Generated(path), request.message);
    }

    if generated.is_file() {
        debug!(
            "'{}' not on search path, loading {} directly",
            module,
            generated.display()
        );
        return Decoder::load(module, DecoderOrigin::Generated(generated), request.message);
    }

    Err(DecoderError::unresolvable(
        module,
        format!(
            "schema compiler reported success but {} was not written",
            generated.display()
        ),
    ))
}

/// Manual steps printed when resolution fails
///
/// **Public** - used by main.rs for the failure diagnostic
pub fn remediation_hint(proto: &Path, module: &str) -> String {
    let include_dir = proto
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    format!(
        "Ensure protoc is installed and on PATH, or point --protoc (FLARE_PROTOC) at it.\n\
         You can also generate the decoder manually with:\n  \
         protoc -I {} --include_imports --descriptor_set_out={} {}\n\
         and place the file in the working directory or a directory listed in FLARE_DECODER_PATH.",
        include_dir.display(),
        super::search_path::descriptor_file_name(module),
        proto.display()
    )
}
