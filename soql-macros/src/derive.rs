//! #[derive(Soql)] implementation.
//!
//! Generates `Record` (a `OnceLock`-cached schema plus indexed field access),
//! `ToValue` and `AsRecord` for a struct with named fields. Annotation strings
//! are passed through verbatim; the runtime crate parses and validates them.

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, Ident, LitStr, Token, Type, parse_macro_input,
};

use crate::diagnostics::{dump_expansion, trace_field};
use crate::errors::{duplicate_attr, expected_syntax, unsupported};

const ATTR: &str = "soql";
const EXAMPLE: &str = "#[soql(\"equalsClause,fieldName=Status__c\")]";

// ============================================================================
// DERIVE SOQL
// ============================================================================

pub fn derive_soql_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => {
            dump_expansion(&input.ident, &expanded);
            expanded.into()
        },
        Err(err) => err.to_compile_error().into(),
    }
}

/// A field carrying a `#[soql("...")]` annotation.
struct Annotated<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    tag: LitStr,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(unsupported(
            input.generics.span(),
            "Soql derive does not support generic parameters or lifetimes.",
            "declare a concrete struct with owned field types",
        ));
    }

    let fields = extract_named_fields(input)?;
    let mut annotated = Vec::new();
    for field in fields {
        let (Some(ident), Some(tag)) = (&field.ident, parse_soql_attr(&field.attrs)?) else {
            continue;
        };
        trace_field!(name, ident, tag.value());
        annotated.push(Annotated {
            ident,
            ty: &field.ty,
            tag,
        });
    }

    let name_str = name.unraw().to_string();
    let defs = annotated.iter().map(|Annotated { ident, ty, tag }| {
        let field_name = ident.unraw().to_string();
        quote! {
            ::soql::FieldDef::new(#field_name, #tag, <#ty as ::soql::ToValue>::shape)
        }
    });
    let arms = annotated.iter().enumerate().map(|(index, Annotated { ident, .. })| {
        let index = Literal::usize_unsuffixed(index);
        quote! { #index => ::soql::ToValue::to_value(&self.#ident), }
    });

    Ok(quote! {
        impl ::soql::Record for #name {
            fn describe() -> &'static ::soql::Schema {
                static SCHEMA: ::std::sync::OnceLock<::soql::Schema> = ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| ::soql::Schema::build(#name_str, &[#(#defs),*]))
            }

            fn schema(&self) -> &'static ::soql::Schema {
                <Self as ::soql::Record>::describe()
            }

            fn field(&self, index: usize) -> ::soql::Value<'_> {
                match index {
                    #(#arms)*
                    _ => ::soql::Value::Unsupported,
                }
            }
        }

        impl ::soql::ToValue for #name {
            fn to_value(&self) -> ::soql::Value<'_> {
                ::soql::Value::Record(self)
            }

            fn shape() -> ::soql::Shape {
                ::soql::Shape::Record(<Self as ::soql::Record>::describe)
            }
        }

        impl ::soql::AsRecord for #name {
            fn as_record(&self) -> ::std::option::Option<&dyn ::soql::Record> {
                ::std::option::Option::Some(self as &dyn ::soql::Record)
            }
        }
    })
}

// ============================================================================
// INPUT VALIDATION
// ============================================================================

fn extract_named_fields(input: &DeriveInput) -> syn::Result<&Punctuated<Field, Token![,]>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(unsupported(
                input.ident.span(),
                "Soql derive only supports structs with named fields.",
                "struct HostCriteria { #[soql(\"likeClause,fieldName=Name\")] names: Vec<String> }",
            )),
        },
        _ => Err(unsupported(
            input.ident.span(),
            "Soql derive only supports structs.",
            "use #[derive(Soql)] on a struct whose fields carry #[soql(\"...\")] annotations",
        )),
    }
}

/// The single `#[soql("...")]` string on a field, if any.
fn parse_soql_attr(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut tag: Option<LitStr> = None;
    for attr in attrs {
        if !attr.path().is_ident(ATTR) {
            continue;
        }
        let lit = attr.parse_args::<LitStr>().map_err(|_| {
            expected_syntax(attr.span(), "a single string literal", "in #[soql(...)]", EXAMPLE)
        })?;
        if tag.replace(lit).is_some() {
            return Err(duplicate_attr(attr.span(), ATTR));
        }
    }
    Ok(tag)
}
