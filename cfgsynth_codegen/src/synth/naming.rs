//! Names of generated items, all derived from the package identifier.

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::Ident;
use quote::format_ident;

/// Identifiers of every item generated for one package.
#[derive(Debug, Clone)]
pub(crate) struct Names {
    pub(crate) env: Ident,
    pub(crate) yaml: Ident,
    pub(crate) mock: Ident,
    pub(crate) all: Ident,
    pub(crate) source: Ident,
    pub(crate) package_const: Ident,
    pub(crate) register_fn: Ident,
    pub(crate) global_trait: Ident,
    pub(crate) getter: Ident,
}

impl Names {
    /// `package_id` must already have passed
    /// [`crate::ident::validate_package_id`].
    pub(crate) fn new(package_id: &str) -> Self {
        let pascal = package_id.to_upper_camel_case();
        let snake = package_id.to_snake_case();
        let shouty = package_id.to_shouty_snake_case();
        Self {
            env: format_ident!("{pascal}EnvConfig"),
            yaml: format_ident!("{pascal}YamlConfig"),
            mock: format_ident!("{pascal}MockConfig"),
            all: format_ident!("{pascal}AllConfig"),
            source: format_ident!("{pascal}Source"),
            package_const: format_ident!("{shouty}_PACKAGE"),
            register_fn: format_ident!("register_{snake}"),
            global_trait: format_ident!("{pascal}Global"),
            getter: format_ident!("get_{snake}"),
        }
    }

    /// Whether two packages would define an item with the same name.
    ///
    /// Type names share one camel-case prefix and functions share one
    /// snake-case suffix, so one name from each family covers the rest.
    pub(crate) fn collides_with(&self, other: &Self) -> bool {
        self.all == other.all
            || self.package_const == other.package_const
            || self.register_fn == other.register_fn
    }
}
