//! Ordered fallback across same-contract adapters.

use std::sync::Arc;

/// Queries `sources` in order and returns the first value reported as found.
///
/// Each source receives its own clone of `default`. Sources after the first
/// hit are never consulted. When no source reports a value the result is
/// `(default, false)`.
///
/// ```rust
/// use std::sync::Arc;
///
/// let sources: Vec<Arc<dyn Fn(u16) -> (u16, bool)>> = vec![
///     Arc::new(|fallback| (fallback, false)),
///     Arc::new(|_| (8443, true)),
///     Arc::new(|_| (9000, true)),
/// ];
/// let result = cfgsynth::first_found(&sources, 8080, |source, fallback| source(fallback));
/// assert_eq!(result, (8443, true));
/// ```
#[must_use]
pub fn first_found<S, T, F>(sources: &[Arc<S>], default: T, lookup: F) -> (T, bool)
where
    S: ?Sized,
    T: Clone,
    F: Fn(&S, T) -> (T, bool),
{
    for source in sources {
        let (value, found) = lookup(source.as_ref(), default.clone());
        if found {
            return (value, true);
        }
    }
    (default, false)
}
