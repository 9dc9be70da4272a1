//! Pure identifier derivation: environment keys, document keys and
//! collision-free package identifiers.

use camino::{Utf8Component, Utf8Path};

use crate::error::{GenerateError, GenerateResult};

/// Package identifier used when the defining module is the project root.
pub const ROOT_PACKAGE_ID: &str = "root";

/// File stems that name their parent module rather than a module of their own.
const MODULE_ROOT_STEMS: &[&str] = &["mod", "lib", "main"];

/// Source directories that do not contribute to the package path.
const SOURCE_DIRS: &[&str] = &["src"];

/// Converts a method name to the upper snake case segment of its environment
/// key.
///
/// An underscore is inserted before every uppercase character that is not
/// first and is followed by a lowercase character, so acronyms stay glued
/// together.
///
/// ```
/// use cfgsynth_codegen::ident::env_segment;
///
/// assert_eq!(env_segment("SSLMode"), "SSL_MODE");
/// assert_eq!(env_segment("UserName"), "USER_NAME");
/// assert_eq!(env_segment("max_connections"), "MAX_CONNECTIONS");
/// ```
#[must_use]
pub fn env_segment(method: &str) -> String {
    let mut segment = String::with_capacity(method.len() + 4);
    let mut chars = method.chars().enumerate().peekable();
    while let Some((index, ch)) = chars.next() {
        let starts_word = index > 0
            && ch.is_ascii_uppercase()
            && chars.peek().is_some_and(|(_, next)| next.is_ascii_lowercase());
        if starts_word {
            segment.push('_');
        }
        segment.push(ch);
    }
    segment.to_uppercase()
}

/// Canonical environment variable for `method` in package `package_id`.
#[must_use]
pub fn env_key(package_id: &str, method: &str) -> String {
    format!("{}_{}", package_id.to_uppercase(), env_segment(method))
}

/// Canonical in-section document key for `method`.
#[must_use]
pub fn document_key(method: &str) -> String {
    method.to_lowercase()
}

/// Module-like path of a source file relative to its project root.
///
/// The extension is removed, `src` directories are dropped, and a trailing
/// `mod`, `lib` or `main` stem is dropped because such files define their
/// parent. Components are joined with `/`.
#[must_use]
pub fn package_path(relative: &Utf8Path) -> String {
    let mut parts: Vec<&str> = relative
        .parent()
        .into_iter()
        .flat_map(Utf8Path::components)
        .filter_map(|component| match component {
            Utf8Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();
    if let Some(stem) = relative.file_stem() {
        parts.push(stem);
    }
    parts.retain(|part| !SOURCE_DIRS.contains(part));
    if parts.last().is_some_and(|stem| MODULE_ROOT_STEMS.contains(stem)) {
        parts.pop();
    }
    parts.join("/")
}

/// Turns arbitrary text into an identifier-shaped package id.
///
/// Every character other than an ASCII letter, digit or `_` becomes `_`,
/// runs of `_` collapse, and leading and trailing `_` are trimmed. Case is
/// preserved. An empty result becomes [`ROOT_PACKAGE_ID`].
#[must_use]
pub fn sanitize_package_id(raw: &str) -> String {
    let mut id = String::with_capacity(raw.len());
    for ch in raw.chars() {
        let ch = if ch.is_ascii_alphanumeric() { ch } else { '_' };
        if ch == '_' && id.ends_with('_') {
            continue;
        }
        id.push(ch);
    }
    let trimmed = id.trim_matches('_');
    if trimmed.is_empty() {
        ROOT_PACKAGE_ID.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Derives the collision-free package identifier for `source`.
///
/// Two modules with the same name at different paths receive different
/// identifiers; the same path always yields the same identifier.
///
/// # Errors
///
/// Returns [`GenerateError::OutsideRoot`] when `source` is not inside
/// `project_root`.
pub fn unique_package_id(project_root: &Utf8Path, source: &Utf8Path) -> GenerateResult<String> {
    let relative = source
        .strip_prefix(project_root)
        .map_err(|_| GenerateError::OutsideRoot {
            path: source.to_path_buf(),
            root: project_root.to_path_buf(),
        })?;
    Ok(sanitize_package_id(&package_path(relative)))
}

/// Checks that `id` can prefix generated item names.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidPackageId`] unless `id` starts with an
/// ASCII letter, continues with ASCII letters, digits or `_`, and is not a
/// keyword.
pub fn validate_package_id(id: &str) -> GenerateResult<()> {
    let valid = id.starts_with(|ch: char| ch.is_ascii_alphabetic())
        && id.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        && syn::parse_str::<syn::Ident>(id).is_ok();
    if valid {
        Ok(())
    } else {
        Err(GenerateError::InvalidPackageId { id: id.to_owned() })
    }
}
