//! Explicit, lock-protected map from package identifier to adapter provider.
//!
//! Generated `register_<package>` functions insert one provider each during
//! application start-up. Afterwards the map is only read. Writers take the
//! write lock for the duration of one insert; readers clone the provider
//! handle and release the read lock before invoking it.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::document::Document;
use crate::mapper::KeyMapper;

/// Builds a package's composite adapter from the facade's parsed document
/// and key mapper. The adapter is type-erased; typed accessors downcast it.
pub type Provider =
    Arc<dyn Fn(&Arc<Document>, &KeyMapper) -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// Registered providers, keyed by package identifier.
#[derive(Default)]
pub struct Registry {
    providers: RwLock<HashMap<String, Provider>>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a provider for `package_id` unless one is already present.
    ///
    /// Returns `true` when this call inserted the provider. Repeated or
    /// racing registrations of the same package keep the first provider, so
    /// running a registration step twice is harmless.
    pub fn register<T, F>(&self, package_id: &str, factory: F) -> bool
    where
        T: Any + Send + Sync,
        F: Fn(&Arc<Document>, &KeyMapper) -> T + Send + Sync + 'static,
    {
        let mut providers = self.providers.write();
        if providers.contains_key(package_id) {
            debug!(package = package_id, "package already registered; keeping first provider");
            return false;
        }
        let provider: Provider = Arc::new(move |document: &Arc<Document>, mapper: &KeyMapper| {
            Box::new(factory(document, mapper)) as Box<dyn Any + Send + Sync>
        });
        providers.insert(package_id.to_owned(), provider);
        debug!(package = package_id, "registered configuration provider");
        true
    }

    /// Returns a handle to the provider registered for `package_id`.
    ///
    /// The read lock is released before this returns.
    #[must_use]
    pub fn provider(&self, package_id: &str) -> Option<Provider> {
        self.providers.read().get(package_id).cloned()
    }

    /// Whether `package_id` has a provider.
    #[must_use]
    pub fn contains(&self, package_id: &str) -> bool {
        self.providers.read().contains_key(package_id)
    }

    /// Registered package identifiers, sorted.
    #[must_use]
    pub fn package_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.read().keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    /// Whether no package is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("packages", &self.package_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn second_registration_keeps_first_provider() {
        let registry = Registry::new();
        assert!(registry.register("server", |_, _| 1_u8));
        assert!(!registry.register("server", |_, _| 2_u8));

        let document = Arc::new(Document::empty());
        let built = registry
            .provider("server")
            .map(|provider| provider(&document, &KeyMapper::identity()));
        let value = built.and_then(|boxed| boxed.downcast::<u8>().ok());
        assert_eq!(value.as_deref(), Some(&1));
    }

    #[rstest]
    fn package_ids_are_sorted() {
        let registry = Registry::new();
        registry.register("zeta", |_, _| ());
        registry.register("alpha", |_, _| ());
        assert_eq!(registry.package_ids(), vec!["alpha", "zeta"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("alpha"));
        assert!(!registry.contains("beta"));
    }

    #[rstest]
    fn provider_receives_document_and_mapper() {
        let registry = Registry::new();
        registry.register("db", |document: &Arc<Document>, mapper: &KeyMapper| {
            (document.is_empty(), mapper.map("HOST"))
        });
        let document = Arc::new(Document::empty());
        let built = registry
            .provider("db")
            .map(|provider| provider(&document, &KeyMapper::prefixed("DB_")))
            .and_then(|boxed| boxed.downcast::<(bool, String)>().ok());
        assert_eq!(built.map(|pair| *pair), Some((true, String::from("DB_HOST"))));
    }
}
