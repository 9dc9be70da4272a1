//! Serialised environment-variable mutation for tests.
//!
//! Every test in a binary shares one process environment. [`overlay`] takes
//! a global re-entrant lock, applies a batch of changes, and keeps the lock
//! until the returned guard drops. Previous values are then restored in
//! reverse order, so reads made while the guard is alive see exactly the
//! overlay.
//!
//! ```
//! use cfgsynth_test_helpers::env;
//!
//! let _env = env::overlay([("DB_HOST", Some("foo")), ("DB_PORT", None)]);
//! assert_eq!(std::env::var("DB_HOST").as_deref(), Ok("foo"));
//! assert!(std::env::var("DB_PORT").is_err());
//! ```

use std::ffi::OsString;
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores overlaid variables and releases the environment lock on drop.
#[must_use = "dropping the overlay restores the previous environment"]
pub struct EnvOverlay {
    saved: Vec<(String, Option<OsString>)>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvOverlay {
    /// Sets `key` to `value` until the overlay drops.
    pub fn set(&mut self, key: &str, value: &str) {
        self.apply(key, Some(value));
    }

    /// Removes `key` until the overlay drops.
    pub fn remove(&mut self, key: &str) {
        self.apply(key, None);
    }

    fn apply(&mut self, key: &str, value: Option<&str>) {
        self.saved.push((key.to_owned(), std::env::var_os(key)));
        // SAFETY: every mutation goes through `ENV_LOCK`, held by this overlay.
        unsafe { write_var(key, value.map(OsString::from)) };
    }
}

impl Drop for EnvOverlay {
    fn drop(&mut self) {
        while let Some((key, original)) = self.saved.pop() {
            // SAFETY: `_lock` is released only after this body returns.
            unsafe { write_var(&key, original) };
        }
    }
}

impl fmt::Debug for EnvOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.saved.iter().map(|(key, _)| key.as_str()).collect();
        f.debug_struct("EnvOverlay").field("keys", &keys).finish()
    }
}

/// # Safety
///
/// Callers must hold `ENV_LOCK`.
unsafe fn write_var(key: &str, value: Option<OsString>) {
    match value {
        Some(value) => unsafe { std::env::set_var(key, value) },
        None => unsafe { std::env::remove_var(key) },
    }
}

/// Applies `changes` (`Some` sets, `None` removes) and returns the guard.
pub fn overlay<'a, I>(changes: I) -> EnvOverlay
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut guard = EnvOverlay {
        saved: Vec::new(),
        _lock: ENV_LOCK.lock(),
    };
    for (key, value) in changes {
        guard.apply(key, value);
    }
    guard
}

/// Removes every key in `keys` until the guard drops.
pub fn cleared<'a, I>(keys: I) -> EnvOverlay
where
    I: IntoIterator<Item = &'a str>,
{
    overlay(keys.into_iter().map(|key| (key, None)))
}

/// Sets a single variable until the guard drops.
pub fn set_var(key: &str, value: &str) -> EnvOverlay {
    overlay([(key, Some(value))])
}
