//! Environment key remapping.

use std::fmt;
use std::sync::Arc;

/// Rewrites a candidate environment key before the process environment is
/// consulted.
///
/// Cloning is cheap; the function is shared behind an [`Arc`].
///
/// ```rust
/// use cfgsynth::KeyMapper;
///
/// let mapper = KeyMapper::prefixed("STAGING_");
/// assert_eq!(mapper.map("DB_HOST"), "STAGING_DB_HOST");
/// assert_eq!(KeyMapper::identity().map("DB_HOST"), "DB_HOST");
/// ```
#[derive(Clone)]
pub struct KeyMapper {
    map_fn: Arc<dyn Fn(&str) -> String + Send + Sync>,
}

impl KeyMapper {
    /// Wraps an arbitrary key rewriting function.
    pub fn new<F>(map_fn: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            map_fn: Arc::new(map_fn),
        }
    }

    /// Leaves keys untouched.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(|key| key.to_owned())
    }

    /// Prepends `prefix` to every key.
    #[must_use]
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self::new(move |key| format!("{prefix}{key}"))
    }

    /// Applies the mapping to `key`.
    #[must_use]
    pub fn map(&self, key: &str) -> String {
        (self.map_fn)(key)
    }
}

impl Default for KeyMapper {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for KeyMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMapper").finish_non_exhaustive()
    }
}

impl<F> From<F> for KeyMapper
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    fn from(map_fn: F) -> Self {
        Self::new(map_fn)
    }
}
