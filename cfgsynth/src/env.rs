//! Ordered environment-variable lookups used by generated environment
//! adapters.
//!
//! Each helper receives the full candidate list for one method: configured
//! aliases first, canonical key last. Every candidate is passed through the
//! adapter's [`KeyMapper`] and read from the process environment. The first
//! candidate holding a non-empty value that decodes for the requested type
//! wins. A value that fails to decode counts as absent for that key only.

use tracing::debug;

use crate::codec::ElementCodec;
use crate::mapper::KeyMapper;

/// First non-empty value among `keys`.
#[must_use]
pub fn lookup_string(mapper: &KeyMapper, keys: &[&str]) -> Option<String> {
    find(mapper, keys, |raw| Some(raw.to_owned()))
}

/// First value among `keys` that parses as a base-10 `i64`.
#[must_use]
pub fn lookup_int(mapper: &KeyMapper, keys: &[&str]) -> Option<i64> {
    find(mapper, keys, |raw| raw.parse().ok())
}

/// First value among `keys` that `T`'s [`ElementCodec`] accepts.
#[must_use]
pub fn lookup_slice<T: ElementCodec>(mapper: &KeyMapper, keys: &[&str]) -> Option<Vec<T>> {
    find(mapper, keys, T::decode_env)
}

/// Reads one mapped key, treating unset, empty, and non-Unicode values as
/// absent.
fn read(mapper: &KeyMapper, key: &str) -> Option<(String, String)> {
    let mapped = mapper.map(key);
    let raw = std::env::var(&mapped).ok().filter(|value| !value.is_empty())?;
    Some((mapped, raw))
}

fn find<T, F>(mapper: &KeyMapper, keys: &[&str], decode: F) -> Option<T>
where
    F: Fn(&str) -> Option<T>,
{
    keys.iter().find_map(|key| {
        let (mapped, raw) = read(mapper, key)?;
        let decoded = decode(&raw);
        if decoded.is_none() {
            debug!(key = %mapped, "environment value rejected; trying next candidate");
        }
        decoded
    })
}
