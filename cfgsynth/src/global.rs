//! Application-wide configuration facade.
//!
//! A [`GlobalConfig`] is built once per run from a [`Registry`] and a list of
//! [`GlobalSource`]s. It parses the YAML document (if any) exactly once and
//! then hands out composite adapters for registered packages. The sources
//! only decide which inputs exist; precedence between environment and
//! document is fixed inside every generated composite adapter.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::document::Document;
use crate::error::CfgsynthResult;
use crate::mapper::KeyMapper;
use crate::registry::Registry;

/// An input handed to [`GlobalConfig::new`].
#[derive(Debug, Clone)]
pub enum GlobalSource {
    /// Environment variables, read through the given key mapper.
    Env(KeyMapper),
    /// A YAML document on disk. An empty path means "no document".
    Yaml(PathBuf),
}

impl GlobalSource {
    /// Environment source with a custom key mapper.
    pub fn env(mapper: impl Into<KeyMapper>) -> Self {
        Self::Env(mapper.into())
    }

    /// Environment source that leaves keys untouched.
    #[must_use]
    pub fn raw_env() -> Self {
        Self::Env(KeyMapper::identity())
    }

    /// YAML document source.
    pub fn yaml(path: impl Into<PathBuf>) -> Self {
        Self::Yaml(path.into())
    }
}

/// Hands out per-package composite adapters backed by one parsed document
/// and one key mapper.
///
/// ```rust
/// use std::sync::Arc;
///
/// use cfgsynth::{GlobalConfig, GlobalSource, Registry};
///
/// # fn main() -> Result<(), cfgsynth::CfgsynthError> {
/// let registry = Arc::new(Registry::new());
/// registry.register("db", |document, _mapper| Arc::clone(document));
///
/// let global = GlobalConfig::new(Arc::clone(&registry), [GlobalSource::raw_env()])?;
/// let document: Option<Arc<cfgsynth::Document>> = global.get("db");
/// assert!(document.is_some_and(|doc| doc.is_empty()));
/// assert!(global.get::<Arc<cfgsynth::Document>>("cache").is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    registry: Arc<Registry>,
    document: Arc<Document>,
    mapper: KeyMapper,
}

impl GlobalConfig {
    /// Builds the facade.
    ///
    /// Without an environment source the identity mapper is used. Without a
    /// non-empty YAML path the document is empty. When several sources of
    /// one kind are given, the last one applies, and only that document is
    /// read.
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be read or parsed; no
    /// partially built facade is produced.
    pub fn new<I>(registry: Arc<Registry>, sources: I) -> CfgsynthResult<Self>
    where
        I: IntoIterator<Item = GlobalSource>,
    {
        let mut mapper = KeyMapper::identity();
        let mut document_path = None;
        for source in sources {
            match source {
                GlobalSource::Env(source_mapper) => mapper = source_mapper,
                GlobalSource::Yaml(path) if path.as_os_str().is_empty() => {
                    debug!("empty document path; no document source");
                }
                GlobalSource::Yaml(path) => document_path = Some(path),
            }
        }

        let document = match document_path {
            Some(path) => {
                let document = Document::from_path(&path)?;
                info!(path = %path.display(), "loaded configuration document");
                document
            }
            None => Document::empty(),
        };

        Ok(Self {
            registry,
            document: Arc::new(document),
            mapper,
        })
    }

    /// Builds the composite adapter registered for `package_id`.
    ///
    /// Returns `None` when the package is not registered or when its provider
    /// produces a different type than `T`.
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self, package_id: &str) -> Option<T> {
        let Some(provider) = self.registry.provider(package_id) else {
            debug!(package = package_id, "package not registered");
            return None;
        };
        provider(&self.document, &self.mapper)
            .downcast::<T>()
            .map(|adapter| *adapter)
            .inspect_err(|_| debug!(package = package_id, "provider produced an unexpected type"))
            .ok()
    }

    /// The parsed document shared with every adapter.
    #[must_use]
    pub const fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// The key mapper shared with every environment adapter.
    #[must_use]
    pub const fn mapper(&self) -> &KeyMapper {
        &self.mapper
    }

    /// The registry this facade reads from.
    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}
