//! Alias directives supplied with `--alias`.
//!
//! Three forms are recognised, each repeatable:
//!
//! - `env.<method>=A,B` adds environment keys tried before the canonical key.
//! - `yaml.section=A,B` adds document sections tried before the package's own.
//! - `yaml.key.<method>=A,B` adds in-section keys tried before the canonical key.
//!
//! Anything else is ignored. Values are trimmed and empty values dropped.
//! Aliases never replace the canonical key; it is always tried last.

use std::collections::BTreeMap;

use tracing::debug;

/// Parsed alias directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    env: BTreeMap<String, Vec<String>>,
    sections: Vec<String>,
    keys: BTreeMap<String, Vec<String>>,
}

impl AliasTable {
    /// Parses every directive in order.
    ///
    /// ```
    /// use cfgsynth_codegen::AliasTable;
    ///
    /// let table = AliasTable::parse([
    ///     "env.host=SERVER_ADDRESS_ALIASE",
    ///     "env.host= LEGACY_HOST , ",
    ///     "yaml.section=svc",
    ///     "nonsense",
    /// ]);
    /// assert_eq!(table.env_aliases("host"), ["SERVER_ADDRESS_ALIASE", "LEGACY_HOST"]);
    /// assert_eq!(table.section_aliases(), ["svc"]);
    /// ```
    pub fn parse<I, S>(directives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for directive in directives {
            table.apply(directive.as_ref());
        }
        table
    }

    /// Applies one directive and reports whether it was recognised.
    pub fn apply(&mut self, directive: &str) -> bool {
        let Some((target, values)) = directive.split_once('=') else {
            debug!(directive, "ignoring alias directive without '='");
            return false;
        };
        let values: Vec<String> = values
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .collect();
        let segments: Vec<&str> = target.trim().split('.').collect();
        let recognised = match segments.as_slice() {
            ["env", method] if !method.is_empty() => {
                append(&mut self.env, method, values);
                true
            }
            ["yaml", "section"] => {
                self.sections.extend(values);
                true
            }
            ["yaml", "key", method] if !method.is_empty() => {
                append(&mut self.keys, method, values);
                true
            }
            _ => false,
        };
        if !recognised {
            debug!(directive, "ignoring unrecognised alias directive");
        }
        recognised
    }

    /// Extra environment keys for `method`, in configured order.
    #[must_use]
    pub fn env_aliases(&self, method: &str) -> &[String] {
        self.env.get(method).map(Vec::as_slice).unwrap_or_default()
    }

    /// Extra document sections, in configured order.
    #[must_use]
    pub fn section_aliases(&self) -> &[String] {
        &self.sections
    }

    /// Extra in-section keys for `method`, in configured order.
    #[must_use]
    pub fn key_aliases(&self, method: &str) -> &[String] {
        self.keys.get(method).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every method name mentioned by an `env.` or `yaml.key.` directive.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.env.keys().chain(self.keys.keys()).map(String::as_str)
    }

    /// Whether no alias was configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.env.is_empty() && self.sections.is_empty() && self.keys.is_empty()
    }
}

fn append(table: &mut BTreeMap<String, Vec<String>>, method: &str, values: Vec<String>) {
    if values.is_empty() {
        return;
    }
    table.entry(method.to_owned()).or_default().extend(values);
}
