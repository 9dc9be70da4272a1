//! Command-line interface definitions for `cargo-cfgsynth`.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::Parser;

/// Parsed CLI arguments for `cargo-cfgsynth`.
#[derive(Debug, Clone, Parser)]
#[command(name = "cargo-cfgsynth")]
#[command(about = "Generate environment, YAML, mock and composite adapters for a configuration trait")]
#[command(version)]
pub struct Args {
    /// Trait to generate adapters for.
    #[arg(long, value_name = "Name")]
    pub interface: String,
    /// Rust file declaring the trait.
    #[arg(long, value_name = "path")]
    pub source: Utf8PathBuf,
    /// Directory receiving `<id>.gen.rs`; the trait's directory when absent.
    ///
    /// Output placed elsewhere references the trait through its module path.
    #[arg(long, value_name = "dir")]
    pub output: Option<Utf8PathBuf>,
    /// Also emit the registration function and the facade accessor.
    #[arg(long = "registry")]
    pub has_registry: bool,
    /// Package identifier to use instead of the one derived from the path.
    #[arg(long, value_name = "id")]
    pub name: Option<String>,
    /// Alias directive (repeatable): `env.<method>=A,B`, `yaml.section=A,B`
    /// or `yaml.key.<method>=A,B`.
    #[arg(long = "alias", value_name = "directive")]
    pub aliases: Vec<String>,
    /// Directory receiving `<id>_example.yaml`.
    #[arg(long, value_name = "dir")]
    pub example: Option<Utf8PathBuf>,
    /// Path of the runtime crate as seen from the generated code.
    #[arg(long, value_name = "path")]
    pub runtime_crate: Option<String>,
    /// Module path of the trait (for example, `crate::server`) when it
    /// cannot be derived from the source file.
    #[arg(long, value_name = "path")]
    pub source_module: Option<String>,
    /// Leave the generated file as emitted instead of running `rustfmt`.
    #[arg(long = "no-format")]
    pub should_skip_format: bool,
}

impl Args {
    /// Parses process arguments, accepting both `cargo cfgsynth ...` and
    /// `cargo-cfgsynth ...` invocations.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse_from(cargo_args(std::env::args_os()))
    }

    /// Parses `args` without exiting the process.
    ///
    /// # Errors
    ///
    /// Returns the `clap` error for missing or malformed arguments.
    pub fn parse_cargo<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(cargo_args(args))
    }
}

/// Drops the `cfgsynth` argument Cargo inserts when running a subcommand.
fn cargo_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.get(1).is_some_and(|arg| arg == "cfgsynth") {
        args.remove(1);
    }
    args
}
