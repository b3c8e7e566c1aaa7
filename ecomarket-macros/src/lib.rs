//! Procedural macros for the EcoMarket backend
//!
//! - `mutation_result!` - Generate GraphQL mutation result types

use proc_macro::TokenStream;
use quote::quote;
use syn::{Ident, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input};

/// Generate a GraphQL mutation result type carrying a success flag, a
/// human-readable message and, optionally, one payload field.
///
/// # Usage
///
/// ```ignore
/// // Flag + message only
/// mutation_result!(MutationResult);
///
/// // With a payload field
/// mutation_result!(DeletionResult, id: String);
/// ```
///
/// # Generated Code
///
/// For `mutation_result!(DeletionResult, id: String)`:
///
/// ```ignore
/// #[derive(Debug, Clone, async_graphql::SimpleObject)]
/// pub struct DeletionResult {
///     pub success: bool,
///     pub message: String,
///     pub id: Option<String>,
/// }
///
/// impl DeletionResult {
///     pub fn done(message: impl Into<String>, id: String) -> Self { .. }
///     pub fn failed(message: impl Into<String>) -> Self { .. }
/// }
/// ```
#[proc_macro]
pub fn mutation_result(input: TokenStream) -> TokenStream {
    let parsed = parse_macro_input!(input as MutationResultInput);

    let struct_name = &parsed.name;

    let output = match parsed.field {
        Some((field_name, field_type)) => quote! {
            #[derive(Debug, Clone, async_graphql::SimpleObject)]
            pub struct #struct_name {
                pub success: bool,
                pub message: String,
                pub #field_name: Option<#field_type>,
            }

            impl #struct_name {
                pub fn done(message: impl Into<String>, #field_name: #field_type) -> Self {
                    Self {
                        success: true,
                        message: message.into(),
                        #field_name: Some(#field_name),
                    }
                }

                pub fn failed(message: impl Into<String>) -> Self {
                    Self {
                        success: false,
                        message: message.into(),
                        #field_name: None,
                    }
                }
            }
        },
        None => quote! {
            #[derive(Debug, Clone, async_graphql::SimpleObject)]
            pub struct #struct_name {
                pub success: bool,
                pub message: String,
            }

            impl #struct_name {
                pub fn done(message: impl Into<String>) -> Self {
                    Self {
                        success: true,
                        message: message.into(),
                    }
                }

                pub fn failed(message: impl Into<String>) -> Self {
                    Self {
                        success: false,
                        message: message.into(),
                    }
                }
            }
        },
    };

    output.into()
}

/// Input for mutation_result! macro
struct MutationResultInput {
    name: Ident,
    field: Option<(Ident, Type)>,
}

impl Parse for MutationResultInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;

        let field = if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            let field_name: Ident = input.parse()?;
            input.parse::<Token![:]>()?;
            let field_type: Type = input.parse()?;
            Some((field_name, field_type))
        } else {
            None
        };

        Ok(MutationResultInput { name, field })
    }
}
