//! Throwaway Cargo project layouts for generator tests.
//!
//! ```
//! use cfgsynth_test_helpers::project::TempProject;
//!
//! # fn main() -> anyhow::Result<()> {
//! let project = TempProject::workspace()?
//!     .file("app/Cargo.toml", "[package]\nname = \"app\"\n")?
//!     .file("app/src/server/mod.rs", "pub trait Config {}\n")?;
//! assert!(project.path("app/src/server/mod.rs").is_file());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory removed on drop, addressed with UTF-8 paths.
#[derive(Debug)]
pub struct TempProject {
    root: Utf8PathBuf,
    _dir: TempDir,
}

impl TempProject {
    /// An empty directory with no manifest.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created or its path is not UTF-8.
    pub fn bare() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary project")?;
        let canonical = dir
            .path()
            .canonicalize()
            .context("canonicalise temporary project")?;
        let root = Utf8PathBuf::from_path_buf(canonical)
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        Ok(Self { root, _dir: dir })
    }

    /// A directory whose manifest declares an empty `[workspace]`.
    ///
    /// # Errors
    ///
    /// See [`TempProject::bare`].
    pub fn workspace() -> Result<Self> {
        Self::bare()?.file("Cargo.toml", "[workspace]\nmembers = []\n")
    }

    /// A single-crate project named `name`.
    ///
    /// # Errors
    ///
    /// See [`TempProject::bare`].
    pub fn single_crate(name: &str) -> Result<Self> {
        Self::bare()?.file(
            "Cargo.toml",
            &format!("[package]\nname = \"{name}\"\nversion = \"0.1.0\"\n"),
        )
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails when the file or its parents cannot be written.
    pub fn file(self, relative: &str, contents: &str) -> Result<Self> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(self)
    }

    /// The project root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `relative` inside the project.
    #[must_use]
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }
}
