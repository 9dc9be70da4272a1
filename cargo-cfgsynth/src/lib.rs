//! Library interface for the `cargo-cfgsynth` generator.
//!
//! The binary parses [`cli::Args`], installs logging and calls [`run`]. The
//! same entry point is available to tests and wrapper tools.

pub mod cli;
pub mod error;
mod format;

use camino::{Utf8Path, Utf8PathBuf};
use cfgsynth_codegen::{
    AliasTable, GenerateRequest, PackageIdentity, Placement, generate, output,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Args;
use crate::error::CliError;

/// Environment variable holding the log filter, for example
/// `CFGSYNTH_LOG=cfgsynth_codegen=debug`.
pub const LOG_ENV: &str = "CFGSYNTH_LOG";

/// What one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Package the adapters were generated for.
    pub package: PackageIdentity,
    /// Trait methods, in declaration order.
    pub methods: Vec<String>,
    /// Written `<id>.gen.rs`.
    pub source: Utf8PathBuf,
    /// Written `<id>_example.yaml`, when requested.
    pub example: Option<Utf8PathBuf>,
}

/// Installs a stderr `tracing` subscriber filtered by [`LOG_ENV`], defaulting
/// to `info`.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when a global subscriber already exists.
pub fn init_logging() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
        .try_init()?;
    Ok(())
}

/// Generates adapters as directed by `args` and writes them to disk.
///
/// # Errors
///
/// Returns [`CliError::Generate`] when extraction, identifier derivation or
/// writing fails. Nothing is written unless generation succeeds.
pub fn run(args: &Args) -> Result<Report, CliError> {
    let unit = generate(&request(args))?;
    let out_dir = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.source));

    let source = output::write_source(&unit, &out_dir)?;
    if !args.should_skip_format {
        format::rustfmt(&source);
    }
    let example = args
        .example
        .as_deref()
        .map(|dir| output::write_example(&unit, dir))
        .transpose()?;

    let methods: Vec<String> = unit
        .interface()
        .methods
        .iter()
        .map(|method| method.name.clone())
        .collect();
    info!(
        package = %unit.package().declared_name,
        id = %unit.package().id,
        methods = %methods.join(", "),
        source = %source,
        example = example.as_ref().map_or("-", |path| path.as_str()),
        "wrote configuration adapters"
    );
    Ok(Report {
        package: unit.package().clone(),
        methods,
        source,
        example,
    })
}

/// Translates CLI flags into a generation request.
///
/// Output written anywhere other than next to the trait, or an explicit
/// module path, switches to qualified references.
fn request(args: &Args) -> GenerateRequest {
    let mut request = GenerateRequest::new(args.source.clone(), args.interface.clone())
        .with_aliases(AliasTable::parse(&args.aliases))
        .with_registry(args.has_registry);
    if let Some(id) = &args.name {
        request = request.with_package_id(id.clone());
    }
    if let Some(runtime) = &args.runtime_crate {
        request = request.with_runtime_crate(runtime.clone());
    }
    if args.output.is_some() || args.source_module.is_some() {
        request = request.with_placement(Placement::External {
            source_module: args.source_module.clone(),
        });
    }
    request
}

fn default_output_dir(source: &Utf8Path) -> Utf8PathBuf {
    source.parent().map(Utf8Path::to_path_buf).unwrap_or_default()
}
