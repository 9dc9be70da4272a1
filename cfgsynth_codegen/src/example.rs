//! Example YAML document for a generated package.

use crate::extract::{Interface, ValueKind};
use crate::ident;

/// Renders an example document with the package's canonical section and
/// one placeholder per method.
///
/// ```
/// use camino::Utf8Path;
/// use cfgsynth_codegen::{example, extract};
///
/// # fn main() -> Result<(), cfgsynth_codegen::GenerateError> {
/// let interface = extract::extract_from_source(
///     Utf8Path::new("db.rs"),
///     "trait Config {\n    /// Database host.\n    fn host(&self, d: String) -> (String, bool);\n}",
///     "Config",
/// )?;
/// let yaml = example::render(&interface, "db");
/// assert!(yaml.contains("db:\n  # host: String. Database host.\n  host: \"\"\n"));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn render(interface: &Interface, package_id: &str) -> String {
    let mut lines = vec![format!("# Example configuration for the `{package_id}` package.")];
    if let Some(first) = interface.methods.first() {
        lines.push(format!(
            "# Environment variables such as {} take precedence over this file.",
            ident::env_key(package_id, &first.name)
        ));
    }
    lines.push(String::new());
    lines.push(format!("{package_id}:"));
    for method in &interface.methods {
        lines.push(match &method.doc {
            Some(doc) => format!("  # {}: {}. {doc}", method.name, method.kind),
            None => format!("  # {}: {}", method.name, method.kind),
        });
        lines.push(format!(
            "  {}: {}",
            ident::document_key(&method.name),
            placeholder(&method.kind)
        ));
    }
    let mut document = lines.join("\n");
    document.push('\n');
    document
}

const fn placeholder(kind: &ValueKind) -> &'static str {
    match kind {
        ValueKind::String => "\"\"",
        ValueKind::Integer => "0",
        ValueKind::StructSlice(_) => "[]",
    }
}
