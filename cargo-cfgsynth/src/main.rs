//! CLI entrypoint for `cargo-cfgsynth`.

use std::process::ExitCode;

use cargo_cfgsynth::cli::Args;
use cargo_cfgsynth::error::CliError;
use tracing::error;

fn main() -> Result<ExitCode, CliError> {
    let args = Args::from_env();
    cargo_cfgsynth::init_logging()?;
    match cargo_cfgsynth::run(&args) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            error!(error = %err, "generation failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
