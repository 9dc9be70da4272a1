//! Registry glue: a package constant, a registration function, and a typed
//! accessor on the runtime's `GlobalConfig`.
//!
//! Registration is an explicit step. An application calls every generated
//! `register_<package>` function on one `Registry` before building its
//! `GlobalConfig`; repeated calls keep the first provider.

use proc_macro2::TokenStream;
use quote::quote;

use crate::synth::SynthContext;

/// Emits the registry items for the package described by `ctx`.
///
/// The provider builds the package's composite adapter with the environment
/// adapter first and the document adapter second.
#[must_use]
pub fn synthesize(ctx: &SynthContext<'_>) -> TokenStream {
    let rt = ctx.runtime();
    let names = ctx.names();
    let package_id = ctx.package_id();
    let package_const = &names.package_const;
    let register_fn = &names.register_fn;
    let global_trait = &names.global_trait;
    let getter = &names.getter;
    let env = &names.env;
    let yaml = &names.yaml;
    let all = &names.all;

    let const_doc = format!("Registry identifier of the `{package_id}` package.");
    let register_doc = format!(
        "Registers the `{package_id}` provider. Returns `false` when the package was already registered."
    );
    let trait_doc = format!("Typed access to the `{package_id}` package through the global facade.");
    let getter_doc = format!(
        "Builds the `{package_id}` composite adapter, or `None` when the package is not registered."
    );

    quote! {
        #[doc = #const_doc]
        pub const #package_const: &str = #package_id;

        #[doc = #register_doc]
        #[must_use = "the result reports whether this call registered the package"]
        pub fn #register_fn(registry: &#rt::Registry) -> bool {
            registry.register(#package_const, |document, mapper| {
                let mut adapter = #all::default();
                adapter.push(::std::sync::Arc::new(#env::with_mapper(mapper.clone())));
                adapter.push(::std::sync::Arc::new(#yaml::from_document(
                    ::std::sync::Arc::clone(document),
                )));
                adapter
            })
        }

        #[doc = #trait_doc]
        pub trait #global_trait {
            #[doc = #getter_doc]
            #[must_use]
            fn #getter(&self) -> ::core::option::Option<#all>;
        }

        impl #global_trait for #rt::GlobalConfig {
            fn #getter(&self) -> ::core::option::Option<#all> {
                self.get::<#all>(#package_const)
            }
        }
    }
}
