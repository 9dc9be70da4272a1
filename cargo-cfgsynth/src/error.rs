//! Error types for `cargo-cfgsynth`.

use cfgsynth_codegen::GenerateError;
use thiserror::Error;

/// Errors surfaced by the `cargo-cfgsynth` pipeline.
#[derive(Debug, Error)]
pub enum CliError {
    /// Extraction, identifier derivation or file output failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Another global `tracing` subscriber was already installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
