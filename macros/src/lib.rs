//! Derive macros for the todo store
//!
//! This crate provides procedural macros to reduce boilerplate when declaring
//! slice actions.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `todo_store_core::action::Action` for an action enum
//!
//! # Example
//!
//! ```ignore
//! use todo_store_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(slice = "todos")]
//! enum TodoAction {
//!     Create { desc: String },
//!     Remove { id: String },
//! }
//!
//! // Generated implementation:
//! assert_eq!(TodoAction::Create { desc: "x".into() }.action_type(), "todos/create");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive macro for Action enums
///
/// Implements `todo_store_core::action::Action`, mapping every variant to the
/// type string `"<slice>/<kind>"`, where `kind` is the variant name in
/// lowerCamelCase (`Create` → `create`, `SetFilter` → `setFilter`).
///
/// # Attributes
///
/// - `#[action(slice = "...")]` - Required on the enum; names the state slice
///   that owns these actions
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - The `#[action(slice = "...")]` attribute is missing or malformed
///
/// # Example
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(slice = "selectedTodo")]
/// enum SelectionAction {
///     Select { id: String },
/// }
///
/// let action = SelectionAction::Select { id: "a".into() };
/// assert_eq!(action.action_type(), "selectedTodo/select");
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_action(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Builds the `Action` impl for a parsed enum
fn expand_action(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    let slice = slice_name(&input.attrs)?.ok_or_else(|| {
        syn::Error::new_spanned(
            name,
            "#[derive(Action)] requires #[action(slice = \"...\")] on the enum",
        )
    })?;

    // Generate action_type() match arms
    let action_type_arms = data_enum.variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let type_name = format!("{slice}/{}", lower_camel_case(&variant_name.to_string()));
        match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } => #type_name, },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) => #type_name, },
            Fields::Unit => quote! { Self::#variant_name => #type_name, },
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics todo_store_core::action::Action for #name #ty_generics #where_clause {
            fn action_type(&self) -> &'static str {
                match self {
                    #(#action_type_arms)*
                }
            }
        }
    })
}

/// Reads the `slice` value out of `#[action(slice = "...")]`
fn slice_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut slice = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("action")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("slice") {
                let value: LitStr = meta.value()?.parse()?;
                slice = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported action attribute, expected `slice`"))
            }
        })?;
    }

    Ok(slice)
}

/// `CreateTodo` → `createTodo`
fn lower_camel_case(ident: &str) -> String {
    let mut chars = ident.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests can unwrap
mod tests {
    use super::{expand_action, lower_camel_case};
    use syn::{DeriveInput, parse_quote};

    #[test]
    fn expands_match_arm_per_variant() {
        let input: DeriveInput = parse_quote! {
            #[action(slice = "todos")]
            enum TodoAction {
                Create { desc: String },
                Remove(String),
                Clear,
            }
        };

        let expanded = expand_action(&input).unwrap().to_string();
        assert!(expanded.contains("\"todos/create\""));
        assert!(expanded.contains("\"todos/remove\""));
        assert!(expanded.contains("\"todos/clear\""));
    }

    #[test]
    fn rejects_structs() {
        let input: DeriveInput = parse_quote! {
            #[action(slice = "todos")]
            struct NotAnEnum;
        };

        let error = expand_action(&input).unwrap_err();
        assert!(error.to_string().contains("can only be used on enums"));
    }

    #[test]
    fn rejects_missing_slice() {
        let input: DeriveInput = parse_quote! {
            enum Unsliced {
                Go,
            }
        };

        let error = expand_action(&input).unwrap_err();
        assert!(error.to_string().contains("requires #[action(slice"));
    }

    #[test]
    fn rejects_unknown_attribute_key() {
        let input: DeriveInput = parse_quote! {
            #[action(prefix = "todos")]
            enum Misnamed {
                Go,
            }
        };

        let error = expand_action(&input).unwrap_err();
        assert!(error.to_string().contains("expected `slice`"));
    }

    #[test]
    fn lower_camel_case_lowers_first_letter_only() {
        assert_eq!(lower_camel_case("Create"), "create");
        assert_eq!(lower_camel_case("SetFilter"), "setFilter");
        assert_eq!(lower_camel_case(""), "");
    }
}
