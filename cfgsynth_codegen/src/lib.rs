//! Generates configuration adapters from a Rust trait.
//!
//! Given a trait whose methods look like
//! `fn host(&self, default: String) -> (String, bool)`, [`generate`] emits
//! four implementations backed by the `cfgsynth` runtime:
//!
//! - `<Package>EnvConfig` reads environment variables,
//! - `<Package>YamlConfig` reads one parsed YAML document,
//! - `<Package>MockConfig` always reports "not found",
//! - `<Package>AllConfig` asks several sources in order.
//!
//! With the registry enabled it also emits a `register_<package>` function
//! and a typed accessor on `cfgsynth::GlobalConfig`.
//!
//! The crate is usable from a build script:
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use cfgsynth_codegen::{AliasTable, GenerateRequest, generate, output};
//!
//! # fn main() -> Result<(), cfgsynth_codegen::GenerateError> {
//! let request = GenerateRequest::new("src/database/mod.rs", "Config")
//!     .with_package_id("db")
//!     .with_aliases(AliasTable::parse(["env.host=SERVER_ADDRESS_ALIASE"]));
//! let unit = generate(&request)?;
//! let out_dir = Utf8PathBuf::from(std::env::var("OUT_DIR").unwrap_or_default());
//! output::write_source(&unit, &out_dir)?;
//! # Ok(())
//! # }
//! ```

pub mod alias;
mod error;
pub mod example;
pub mod extract;
pub mod ident;
pub mod output;
pub mod project;
pub mod registry;
pub mod synth;

use camino::{Utf8Path, Utf8PathBuf};
use proc_macro2::TokenStream;
use tracing::{debug, info, warn};

pub use alias::AliasTable;
pub use error::{GenerateError, GenerateResult, SignatureIssue};
pub use extract::{Interface, MethodDescriptor, ValueKind};
pub use synth::SynthContext;

/// Where generated code will be compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Placement {
    /// Included into the module that declares the trait.
    #[default]
    SourceModule,
    /// Included into another module of the same crate. The trait and
    /// element structs are referenced through `source_module`, or through
    /// the module path derived from the source file when it is `None`.
    External {
        /// Explicit `crate::…` path of the trait's module.
        source_module: Option<String>,
    },
}

/// Everything [`generate`] needs.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    source: Utf8PathBuf,
    interface: String,
    package_id: Option<String>,
    aliases: AliasTable,
    registry: bool,
    placement: Placement,
    runtime_crate: Option<String>,
}

impl GenerateRequest {
    /// Generates adapters for trait `interface` declared in `source`.
    pub fn new(source: impl Into<Utf8PathBuf>, interface: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            interface: interface.into(),
            package_id: None,
            aliases: AliasTable::default(),
            registry: false,
            placement: Placement::SourceModule,
            runtime_crate: None,
        }
    }

    /// Uses `id` instead of the identifier derived from the source path.
    #[must_use]
    pub fn with_package_id(mut self, id: impl Into<String>) -> Self {
        self.package_id = Some(id.into());
        self
    }

    /// Sets the alias directives.
    #[must_use]
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Enables or disables the registry glue.
    #[must_use]
    pub const fn with_registry(mut self, enabled: bool) -> Self {
        self.registry = enabled;
        self
    }

    /// Sets where the generated code will be compiled.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// References the runtime through `path` instead of `::cfgsynth`.
    #[must_use]
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = Some(path.into());
        self
    }
}

/// Who the generated code belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    /// Name of the module declaring the trait.
    pub declared_name: String,
    /// Collision-free identifier prefixing generated names and keys.
    pub id: String,
    /// Project root the identifier was derived against.
    pub project_root: Utf8PathBuf,
    /// Source file relative to the project root.
    pub relative_source: Utf8PathBuf,
}

/// Start of the first line of every rendered source file.
pub(crate) const BANNER_PREFIX: &str = "// @generated by cfgsynth from ";

/// The result of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    package: PackageIdentity,
    interface: Interface,
    tokens: TokenStream,
}

impl GeneratedUnit {
    /// Package identity.
    #[must_use]
    pub const fn package(&self) -> &PackageIdentity {
        &self.package
    }

    /// The extracted trait.
    #[must_use]
    pub const fn interface(&self) -> &Interface {
        &self.interface
    }

    /// Generated items.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// `<id>.gen.rs`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.gen.rs", self.package.id)
    }

    /// `<id>_example.yaml`.
    #[must_use]
    pub fn example_file_name(&self) -> String {
        format!("{}_example.yaml", self.package.id)
    }

    /// Source text suitable for `include!`, headed by a generated-code
    /// banner.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{BANNER_PREFIX}`{}` (trait `{}`, package `{}`).\n\
             // Do not edit by hand; rerun the generator instead.\n\n{}\n",
            self.package.relative_source,
            self.interface.name(),
            self.package.id,
            self.tokens
        )
    }

    /// Example YAML document for the package.
    #[must_use]
    pub fn example(&self) -> String {
        example::render(&self.interface, &self.package.id)
    }
}

/// Extracts the trait, derives the package identity, and synthesises every
/// adapter.
///
/// # Errors
///
/// Any [`GenerateError`]; nothing is produced when one occurs.
pub fn generate(request: &GenerateRequest) -> GenerateResult<GeneratedUnit> {
    let source = request
        .source
        .canonicalize_utf8()
        .map_err(|source| GenerateError::ReadSource {
            path: request.source.clone(),
            source,
        })?;
    let interface = extract::extract_from_path(&source, &request.interface)?;
    let project_root = project::find_project_root(&source)?;
    let relative_source = source
        .strip_prefix(&project_root)
        .map_err(|_| GenerateError::OutsideRoot {
            path: source.clone(),
            root: project_root.clone(),
        })?
        .to_path_buf();
    let package_id = match &request.package_id {
        Some(id) => id.clone(),
        None => ident::unique_package_id(&project_root, &source)?,
    };
    ident::validate_package_id(&package_id)?;
    warn_unknown_alias_methods(&interface, &request.aliases);

    let runtime = request
        .runtime_crate
        .as_deref()
        .map(|path| parse_path("runtime crate", path))
        .transpose()?;
    let source_module = match &request.placement {
        Placement::SourceModule => None,
        Placement::External {
            source_module: Some(path),
        } => Some(parse_path("source module", path)?),
        Placement::External {
            source_module: None,
        } => Some(derive_source_module(&source, &interface)?),
    };

    let mut ctx = SynthContext::new(&interface, &package_id, &request.aliases);
    if let Some(runtime) = &runtime {
        ctx = ctx.with_runtime(runtime);
    }
    if let Some(module) = source_module {
        ctx = ctx.with_source_module(module);
    }
    let mut tokens = synth::adapters(&ctx);
    if request.registry {
        tokens.extend(registry::synthesize(&ctx));
    }

    let declared_name = declared_name(&relative_source);
    info!(
        package = %declared_name,
        id = %package_id,
        interface = %interface.name(),
        methods = interface.methods.len(),
        registry = request.registry,
        "generated configuration adapters"
    );
    Ok(GeneratedUnit {
        package: PackageIdentity {
            declared_name,
            id: package_id,
            project_root,
            relative_source,
        },
        interface,
        tokens,
    })
}

fn declared_name(relative_source: &Utf8Path) -> String {
    let path = ident::package_path(relative_source);
    path.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(ident::ROOT_PACKAGE_ID)
        .to_owned()
}

fn derive_source_module(source: &Utf8Path, interface: &Interface) -> GenerateResult<syn::Path> {
    let krate = project::find_crate_root(source)?;
    let mut segments = vec![String::from("crate")];
    segments.extend(krate.module_segments(source)?);
    segments.extend(interface.nesting.iter().cloned());
    let path = segments.join("::");
    debug!(module = %path, "derived source module");
    parse_path("source module", &path)
}

fn parse_path(what: &'static str, path: &str) -> GenerateResult<syn::Path> {
    syn::parse_str(path).map_err(|source| GenerateError::InvalidPath {
        what,
        path: path.to_owned(),
        source,
    })
}

fn warn_unknown_alias_methods(interface: &Interface, aliases: &AliasTable) {
    for method in aliases.methods() {
        if interface.method(method).is_none() {
            warn!(
                method,
                interface = %interface.name(),
                "alias directive names a method the trait does not declare"
            );
        }
    }
}
