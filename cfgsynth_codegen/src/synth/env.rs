//! Environment adapter: ordered environment-variable lookups.

use proc_macro2::TokenStream;
use quote::quote;

use super::SynthContext;
use crate::extract::{MethodDescriptor, ValueKind};

pub(super) fn synthesize(ctx: &SynthContext<'_>) -> TokenStream {
    let rt = ctx.runtime();
    let ident = &ctx.names().env;
    let trait_path = ctx.trait_path();
    let methods = ctx.interface().methods.iter().map(|method| method_body(ctx, method));
    let doc = format!(
        "Reads `{}` values from environment variables named `{}_<METHOD>` unless an alias is set first.",
        ctx.interface().name(),
        ctx.package_id().to_uppercase()
    );

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Default)]
        pub struct #ident {
            mapper: #rt::KeyMapper,
        }

        impl #ident {
            /// Reads variable names as generated.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Passes every candidate variable name through `mapper` first.
            #[must_use]
            pub const fn with_mapper(mapper: #rt::KeyMapper) -> Self {
                Self { mapper }
            }
        }

        impl #trait_path for #ident {
            #(#methods)*
        }
    }
}

fn method_body(ctx: &SynthContext<'_>, method: &MethodDescriptor) -> TokenStream {
    let rt = ctx.runtime();
    let signature = ctx.signature(method);
    let keys = ctx.env_candidates(method);
    let lookup = match &method.kind {
        ValueKind::String => quote! { #rt::env::lookup_string },
        ValueKind::Integer => quote! { #rt::env::lookup_int },
        ValueKind::StructSlice(path) => {
            let element = ctx.element_type(path);
            quote! { #rt::env::lookup_slice::<#element> }
        }
    };
    quote! {
        #signature {
            #lookup(&self.mapper, &[#(#keys),*]).map_or((default, false), |value| (value, true))
        }
    }
}
