//! Document adapter: section and key search over one parsed YAML document.

use proc_macro2::TokenStream;
use quote::quote;

use super::SynthContext;
use crate::extract::{MethodDescriptor, ValueKind};

pub(super) fn synthesize(ctx: &SynthContext<'_>) -> TokenStream {
    let rt = ctx.runtime();
    let ident = &ctx.names().yaml;
    let trait_path = ctx.trait_path();
    let methods = ctx.interface().methods.iter().map(|method| method_body(ctx, method));
    let doc = format!(
        "Reads `{}` values from the `{}` section of a YAML document.",
        ctx.interface().name(),
        ctx.package_id()
    );

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Default)]
        pub struct #ident {
            document: ::std::sync::Arc<#rt::Document>,
        }

        impl #ident {
            /// Parses `bytes` as a YAML document.
            ///
            /// # Errors
            ///
            /// Fails when `bytes` is not UTF-8, not YAML, or not a mapping.
            pub fn from_bytes(bytes: &[u8]) -> ::core::result::Result<Self, #rt::CfgsynthError> {
                #rt::Document::parse(bytes)
                    .map(|document| Self::from_document(::std::sync::Arc::new(document)))
            }

            /// Reads and parses the YAML document at `path`.
            ///
            /// # Errors
            ///
            /// Fails when the file cannot be read or parsed.
            pub fn from_path<P>(path: P) -> ::core::result::Result<Self, #rt::CfgsynthError>
            where
                P: ::core::convert::AsRef<::std::path::Path>,
            {
                #rt::Document::from_path(path)
                    .map(|document| Self::from_document(::std::sync::Arc::new(document)))
            }

            /// Shares an already parsed document.
            #[must_use]
            pub const fn from_document(document: ::std::sync::Arc<#rt::Document>) -> Self {
                Self { document }
            }
        }

        impl #trait_path for #ident {
            #(#methods)*
        }
    }
}

fn method_body(ctx: &SynthContext<'_>, method: &MethodDescriptor) -> TokenStream {
    let signature = ctx.signature(method);
    let sections = ctx.section_candidates();
    let keys = ctx.key_candidates(method);
    let getter = match &method.kind {
        ValueKind::String => quote! { get_string },
        ValueKind::Integer => quote! { get_int },
        ValueKind::StructSlice(path) => {
            let element = ctx.element_type(path);
            quote! { get_slice::<#element> }
        }
    };
    quote! {
        #signature {
            self.document
                .#getter(&[#(#sections),*], &[#(#keys),*])
                .map_or((default, false), |value| (value, true))
        }
    }
}
