//! Composite adapter: first source with a real value wins.

use proc_macro2::TokenStream;
use quote::quote;

use super::SynthContext;

pub(super) fn synthesize(ctx: &SynthContext<'_>) -> TokenStream {
    let rt = ctx.runtime();
    let names = ctx.names();
    let ident = &names.all;
    let source = &names.source;
    let label = ident.to_string();
    let trait_path = ctx.trait_path();
    let shared = ctx.shared_source();
    let methods = ctx.interface().methods.iter().map(|method| {
        let signature = ctx.signature(method);
        let method_ident = &method.ident;
        quote! {
            #signature {
                #rt::first_found(&self.sources, default, |source, fallback| source.#method_ident(fallback))
            }
        }
    });
    let interface = ctx.interface().name();
    let source_doc = format!("A shared `{interface}` implementation usable as a composite source.");
    let doc = format!(
        "Queries `{interface}` sources in order; the first one reporting a value wins."
    );

    quote! {
        #[doc = #source_doc]
        pub type #source = #shared;

        #[doc = #doc]
        #[derive(Clone, Default)]
        pub struct #ident {
            sources: ::std::vec::Vec<#source>,
        }

        impl #ident {
            /// Wraps `sources`, highest precedence first.
            #[must_use]
            pub const fn new(sources: ::std::vec::Vec<#source>) -> Self {
                Self { sources }
            }

            /// Appends a source with the lowest precedence so far.
            pub fn push(&mut self, source: #source) {
                self.sources.push(source);
            }

            /// Number of sources.
            #[must_use]
            pub const fn len(&self) -> usize {
                self.sources.len()
            }

            /// Whether there are no sources.
            #[must_use]
            pub const fn is_empty(&self) -> bool {
                self.sources.is_empty()
            }
        }

        impl ::core::fmt::Debug for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct(#label)
                    .field("sources", &self.sources.len())
                    .finish()
            }
        }

        impl #trait_path for #ident {
            #(#methods)*
        }
    }
}
