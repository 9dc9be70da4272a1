//! Mock adapter: every lookup reports "not found".

use proc_macro2::TokenStream;
use quote::quote;

use super::SynthContext;

pub(super) fn synthesize(ctx: &SynthContext<'_>) -> TokenStream {
    let ident = &ctx.names().mock;
    let trait_path = ctx.trait_path();
    let methods = ctx.interface().methods.iter().map(|method| {
        let signature = ctx.signature(method);
        quote! {
            #signature {
                (default, false)
            }
        }
    });
    let doc = format!(
        "`{}` implementation that always answers with the caller's default.",
        ctx.interface().name()
    );

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct #ident;

        impl #ident {
            /// The mock adapter.
            #[must_use]
            pub const fn new() -> Self {
                Self
            }
        }

        impl #trait_path for #ident {
            #(#methods)*
        }
    }
}
