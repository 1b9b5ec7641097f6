//! Flare report converter
//!
//! Turns compressed `.flarereport` profiler reports (zstd-wrapped
//! protobuf) into readable JSON.
//!
//! This crate provides the core implementation for the
//! `flare-convert` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! flare-convert profile_2026-01-01_12-00-00.flarereport profile.json
//! flare-convert --help
//! ```

pub mod commands;
pub mod decoder;
pub mod input;
pub mod output;
pub mod utils;
