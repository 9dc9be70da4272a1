//! Project and crate discovery on disk.
//!
//! The project root anchors package identifiers; the crate root anchors the
//! `crate::…` module path used when adapters are generated into another
//! module.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::{GenerateError, GenerateResult};

const MANIFEST: &str = "Cargo.toml";

/// Nearest ancestor of `source` whose manifest declares `[workspace]`, or
/// failing that the nearest ancestor with any manifest.
///
/// # Errors
///
/// Returns [`GenerateError::ProjectRootNotFound`] when no ancestor has a
/// manifest, and manifest read or parse errors.
pub fn find_project_root(source: &Utf8Path) -> GenerateResult<Utf8PathBuf> {
    let mut nearest = None;
    for dir in source.ancestors().skip(1) {
        let manifest = dir.join(MANIFEST);
        if !manifest.is_file() {
            continue;
        }
        if read_manifest(&manifest)?.contains_key("workspace") {
            debug!(root = %dir, "found workspace root");
            return Ok(dir.to_path_buf());
        }
        nearest.get_or_insert_with(|| dir.to_path_buf());
    }
    nearest.ok_or_else(|| GenerateError::ProjectRootNotFound {
        path: source.to_path_buf(),
    })
}

/// Nearest ancestor of `source` whose manifest declares `[package]`.
///
/// # Errors
///
/// Returns [`GenerateError::ProjectRootNotFound`] when no such ancestor
/// exists, and manifest read or parse errors.
pub fn find_crate_root(source: &Utf8Path) -> GenerateResult<CrateRoot> {
    for dir in source.ancestors().skip(1) {
        let manifest = dir.join(MANIFEST);
        if !manifest.is_file() {
            continue;
        }
        let table = read_manifest(&manifest)?;
        let Some(package) = table.get("package").and_then(toml::Value::as_table) else {
            continue;
        };
        let name = package
            .get("name")
            .and_then(toml::Value::as_str)
            .map(|name| name.replace('-', "_"));
        return Ok(CrateRoot {
            dir: dir.to_path_buf(),
            name,
        });
    }
    Err(GenerateError::ProjectRootNotFound {
        path: source.to_path_buf(),
    })
}

/// A crate's directory and its library name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrateRoot {
    /// Directory holding the crate manifest.
    pub dir: Utf8PathBuf,
    /// `package.name` with `-` replaced by `_`, when declared.
    pub name: Option<String>,
}

impl CrateRoot {
    /// Module segments of `source` below the crate root, without `crate`.
    ///
    /// `src/server/mod.rs` and `src/server.rs` both yield `["server"]`;
    /// `src/lib.rs` yields no segments.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::OutsideRoot`] when `source` is not inside
    /// the crate.
    pub fn module_segments(&self, source: &Utf8Path) -> GenerateResult<Vec<String>> {
        let relative = source
            .strip_prefix(&self.dir)
            .map_err(|_| GenerateError::OutsideRoot {
                path: source.to_path_buf(),
                root: self.dir.clone(),
            })?;
        let relative = relative.strip_prefix("src").unwrap_or(relative);
        let path = crate::ident::package_path(relative);
        Ok(path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect())
    }
}

fn read_manifest(path: &Utf8Path) -> GenerateResult<toml::Table> {
    let contents = std::fs::read_to_string(path).map_err(|source| GenerateError::ReadManifest {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|err| GenerateError::ParseManifest {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
