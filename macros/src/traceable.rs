use crate::case::snake_case_ident;
use crate::input::{EntryEnum, EntryVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

fn has_no_source(variant: &EntryVariant) -> bool {
    variant.has_attribute("no_source")
}

pub fn traceable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as EntryEnum);

    let enum_name = &input.name;
    let variants = &input.variants;

    let enum_variants = variants.iter().map(|variant| {
        let name = &variant.name;
        let message = &variant.message;
        let fields = variant.fields.iter().map(|(field, ty)| quote! { #field: #ty });

        match (has_no_source(variant), variant.fields.is_empty()) {
            (true, true) => quote! {
                #[error(#message)]
                #name
            },
            (true, false) => quote! {
                #[error(#message)]
                #name { #(#fields,)* }
            },
            (false, _) => quote! {
                #[error(#message)]
                #name { #(#fields,)* err: String }
            },
        }
    });

    let level_match_arms = variants.iter().map(|variant| {
        let name = &variant.name;
        let level = &variant.level;
        if has_no_source(variant) && variant.fields.is_empty() {
            quote! { Self::#name => #level }
        } else {
            quote! { Self::#name { .. } => #level }
        }
    });

    let constructors = variants.iter().filter_map(|variant| {
        let no_source = has_no_source(variant);
        if no_source && variant.fields.is_empty() {
            return None;
        }

        let name = &variant.name;
        let constructor = snake_case_ident(name);
        let params = variant
            .fields
            .iter()
            .map(|(field, ty)| quote! { #field: impl Into<#ty> });
        let assignments = variant
            .fields
            .iter()
            .map(|(field, _)| quote! { #field: #field.into() });

        if no_source {
            Some(quote! {
                pub fn #constructor(#(#params),*) -> Self {
                    Self::#name { #(#assignments,)* }
                }
            })
        } else {
            Some(quote! {
                pub fn #constructor(#(#params,)* source: impl std::fmt::Display) -> Self {
                    Self::#name {
                        #(#assignments,)*
                        err: source.to_string(),
                    }
                }
            })
        }
    });

    quote! {
        #[allow(dead_code)]
        #[derive(Debug, Clone, PartialEq, thiserror::Error, serde::Serialize, serde::Deserialize)]
        pub enum #enum_name {
            #(#enum_variants,)*
        }

        #[allow(dead_code)]
        impl #enum_name {
            pub fn level(&self) -> tracing::Level {
                match self {
                    #(#level_match_arms,)*
                }
            }

            #(#constructors)*
        }
    }
    .into()
}
