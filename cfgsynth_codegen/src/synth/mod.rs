//! Adapter synthesis.
//!
//! Every generated method body delegates to a `cfgsynth` runtime helper and
//! bakes the complete candidate list in as string literals, so the lookup
//! order for each method can be read straight from the generated file:
//! configured aliases first, canonical key last.

mod composite;
mod document;
mod env;
mod mock;
pub(crate) mod naming;

use proc_macro2::TokenStream;
use quote::quote;

use crate::alias::AliasTable;
use crate::extract::{Interface, MethodDescriptor, ValueKind};
use crate::ident;
use naming::Names;

/// Inputs shared by every synthesiser.
#[derive(Debug, Clone)]
pub struct SynthContext<'a> {
    interface: &'a Interface,
    package_id: &'a str,
    aliases: &'a AliasTable,
    runtime: TokenStream,
    source_module: Option<syn::Path>,
    names: Names,
}

impl<'a> SynthContext<'a> {
    /// Context for adapters generated into the trait's own module, using
    /// the `::cfgsynth` runtime.
    ///
    /// `package_id` must already be a valid identifier; see
    /// [`crate::ident::validate_package_id`].
    #[must_use]
    pub fn new(interface: &'a Interface, package_id: &'a str, aliases: &'a AliasTable) -> Self {
        Self {
            interface,
            package_id,
            aliases,
            runtime: quote! { ::cfgsynth },
            source_module: None,
            names: Names::new(package_id),
        }
    }

    /// Routes runtime references through `path`, for crates that rename the
    /// runtime dependency.
    #[must_use]
    pub fn with_runtime(mut self, path: &syn::Path) -> Self {
        self.runtime = quote! { #path };
        self
    }

    /// Generates into another module; the trait and element structs are
    /// then referenced through `module`.
    #[must_use]
    pub fn with_source_module(mut self, module: syn::Path) -> Self {
        self.source_module = Some(module);
        self
    }

    /// Environment keys tried for `method`, in order.
    #[must_use]
    pub fn env_candidates(&self, method: &MethodDescriptor) -> Vec<String> {
        let mut keys = self.aliases.env_aliases(&method.name).to_vec();
        keys.push(ident::env_key(self.package_id, &method.name));
        keys
    }

    /// Document sections tried for every method, in order.
    #[must_use]
    pub fn section_candidates(&self) -> Vec<String> {
        let mut sections = self.aliases.section_aliases().to_vec();
        sections.push(self.package_id.to_owned());
        sections
    }

    /// In-section document keys tried for `method`, in order.
    #[must_use]
    pub fn key_candidates(&self, method: &MethodDescriptor) -> Vec<String> {
        let mut keys = self.aliases.key_aliases(&method.name).to_vec();
        keys.push(ident::document_key(&method.name));
        keys
    }

    pub(crate) const fn interface(&self) -> &Interface {
        self.interface
    }

    pub(crate) const fn package_id(&self) -> &str {
        self.package_id
    }

    pub(crate) const fn runtime(&self) -> &TokenStream {
        &self.runtime
    }

    pub(crate) const fn names(&self) -> &Names {
        &self.names
    }

    /// Path of the configuration trait as seen from the generated code.
    pub(crate) fn trait_path(&self) -> TokenStream {
        let trait_ident = &self.interface.ident;
        match &self.source_module {
            Some(module) => quote! { #module::#trait_ident },
            None => quote! { #trait_ident },
        }
    }

    /// `Arc<dyn Trait + Send + Sync>`, the element type of composites.
    pub(crate) fn shared_source(&self) -> TokenStream {
        let trait_path = self.trait_path();
        quote! {
            ::std::sync::Arc<dyn #trait_path + ::core::marker::Send + ::core::marker::Sync>
        }
    }

    /// Element struct path as seen from the generated code.
    ///
    /// Single-segment and `self::` paths are resolved against the source
    /// module; other paths are emitted as written.
    pub(crate) fn element_type(&self, path: &syn::Path) -> TokenStream {
        let Some(module) = &self.source_module else {
            return quote! { #path };
        };
        if path.leading_colon.is_some() {
            return quote! { #path };
        }
        let mut segments = path.segments.iter().peekable();
        if segments.peek().is_some_and(|first| first.ident == "self") {
            segments.next();
            return quote! { #module #(:: #segments)* };
        }
        if path.segments.len() == 1 {
            quote! { #module::#path }
        } else {
            quote! { #path }
        }
    }

    /// The Rust type carried by `kind`.
    pub(crate) fn value_type(&self, kind: &ValueKind) -> TokenStream {
        match kind {
            ValueKind::String => quote! { ::std::string::String },
            ValueKind::Integer => quote! { i64 },
            ValueKind::StructSlice(path) => {
                let element = self.element_type(path);
                quote! { ::std::vec::Vec<#element> }
            }
        }
    }

    /// `fn name(&self, default: T) -> (T, bool)` for `method`.
    pub(crate) fn signature(&self, method: &MethodDescriptor) -> TokenStream {
        let ident = &method.ident;
        let value = self.value_type(&method.kind);
        quote! { fn #ident(&self, default: #value) -> (#value, bool) }
    }
}

/// Emits the environment, document, mock and composite adapters.
#[must_use]
pub fn adapters(ctx: &SynthContext<'_>) -> TokenStream {
    let env = env::synthesize(ctx);
    let document = document::synthesize(ctx);
    let mock = mock::synthesize(ctx);
    let composite = composite::synthesize(ctx);
    quote! {
        #env
        #document
        #mock
        #composite
    }
}
