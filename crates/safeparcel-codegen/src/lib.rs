// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use std::collections::HashMap;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitInt, LitStr};

/// Parsed `#[safeparcel(...)]` field declaration.
struct FieldInfo {
    ident: syn::Ident,
    ty: syn::Type,
    id: u32,
    required: bool,
}

/// `#[derive(SafeParcelable)]` macro: generates the descriptor table and the
/// `ParcelField` impl that nests the record as an envelope.
///
/// Type attribute: `#[safeparcel(token = "...")]` (defaults to the type name).
/// Field attribute: `#[safeparcel(id = N)]` or `#[safeparcel(id = N, required)]`.
///
/// The type must implement `Default` and `Debug`; every field type must
/// implement `ParcelField`. `Option<Option<T>>` is rejected.
///
/// Example:
/// ```ignore
/// use safeparcel::SafeParcelable;
///
/// #[derive(Debug, Default, SafeParcelable)]
/// #[safeparcel(token = "com.google.android.gms.common.api.Status")]
/// struct Status {
///     #[safeparcel(id = 1, required)]
///     status_code: i32,
///     #[safeparcel(id = 2)]
///     status_message: String,
/// }
/// ```
#[proc_macro_derive(SafeParcelable, attributes(safeparcel))]
pub fn derive_safe_parcelable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "SafeParcelable cannot be derived for generic types",
        ));
    }

    let token = parse_type_token(input)?.unwrap_or_else(|| LitStr::new(&name.to_string(), name.span()));
    if token.value().is_empty() {
        return Err(syn::Error::new_spanned(&token, "type token must not be empty"));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => parse_fields(named.named.iter())?,
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    // Accessor functions, one pair per field
    let accessors: Vec<_> = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let getter = format_ident!("__safeparcel_get_{}", index);
            let setter = format_ident!("__safeparcel_set_{}", index);
            let ident = &field.ident;
            let ty = &field.ty;
            quote! {
                fn #getter(target: &#name) -> &dyn ::safeparcel::ParcelField {
                    &target.#ident
                }

                fn #setter(
                    target: &mut #name,
                    reader: &mut ::safeparcel::ParcelReader<'_>,
                    ctx: ::safeparcel::DecodeContext<'_>,
                ) -> ::safeparcel::ParcelResult<()> {
                    target.#ident = <#ty as ::safeparcel::ParcelField>::read_field(reader, ctx)?;
                    ::std::result::Result::Ok(())
                }
            }
        })
        .collect();

    let descriptors: Vec<_> = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let getter = format_ident!("__safeparcel_get_{}", index);
            let setter = format_ident!("__safeparcel_set_{}", index);
            let id = field.id;
            let field_name = field.ident.to_string();
            let field_name = field_name.trim_start_matches("r#");
            let ty = &field.ty;
            let required = field.required.then(|| quote! { .required() });
            quote! {
                ::safeparcel::FieldDescriptor::new(
                    #id,
                    #field_name,
                    <#ty as ::safeparcel::ParcelField>::field_type(),
                    #getter,
                    #setter,
                )
                #required
            }
        })
        .collect();

    Ok(quote! {
        impl ::safeparcel::SafeParcelable for #name {
            const TYPE_TOKEN: &'static str = #token;

            fn descriptors() -> ::safeparcel::ParcelResult<&'static ::safeparcel::DescriptorTable<Self>> {
                #(#accessors)*

                static TABLE: ::std::sync::OnceLock<
                    ::safeparcel::ParcelResult<::safeparcel::DescriptorTable<#name>>,
                > = ::std::sync::OnceLock::new();

                TABLE
                    .get_or_init(|| {
                        ::safeparcel::DescriptorTable::<#name>::new(
                            #token,
                            ::std::vec![#(#descriptors),*],
                        )
                    })
                    .as_ref()
                    .map_err(::std::clone::Clone::clone)
            }
        }

        impl ::safeparcel::ParcelField for #name {
            fn field_type() -> ::safeparcel::FieldType {
                ::safeparcel::FieldType::Parcelable(#token)
            }

            fn write_field(&self, writer: &mut ::safeparcel::ParcelWriter) -> ::safeparcel::ParcelResult<()> {
                ::safeparcel::encode_into(self, writer).map(|_| ())
            }

            fn read_field(
                reader: &mut ::safeparcel::ParcelReader<'_>,
                ctx: ::safeparcel::DecodeContext<'_>,
            ) -> ::safeparcel::ParcelResult<Self> {
                ::safeparcel::decode_from(reader, ctx)
            }
        }
    })
}

/// Read `#[safeparcel(token = "...")]` from the type attributes.
fn parse_type_token(input: &DeriveInput) -> syn::Result<Option<LitStr>> {
    let mut token = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("safeparcel")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("token") {
                token = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported type attribute, expected `token = \"...\"`"))
            }
        })?;
    }
    Ok(token)
}

fn parse_fields<'a>(fields: impl Iterator<Item = &'a syn::Field>) -> syn::Result<Vec<FieldInfo>> {
    let mut infos = Vec::new();
    let mut seen: HashMap<u32, syn::Ident> = HashMap::new();

    for field in fields {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };

        let mut id: Option<(u32, LitInt)> = None;
        let mut required = false;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("safeparcel")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    let lit = meta.value()?.parse::<LitInt>()?;
                    id = Some((lit.base10_parse::<u32>()?, lit));
                    Ok(())
                } else if meta.path.is_ident("required") {
                    required = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported field attribute, expected `id = N` or `required`"))
                }
            })?;
        }

        let Some((id, lit)) = id else {
            return Err(syn::Error::new_spanned(
                field,
                format!("field `{}` needs #[safeparcel(id = N)]", ident),
            ));
        };
        if id == 0 {
            return Err(syn::Error::new_spanned(
                lit,
                "field id 0 is reserved for the type token",
            ));
        }
        if let Some(previous) = seen.insert(id, ident.clone()) {
            return Err(syn::Error::new_spanned(
                lit,
                format!("duplicate field id {} (already used by `{}`)", id, previous),
            ));
        }

        if let Some(nested) = find_nested_option(&field.ty) {
            return Err(syn::Error::new_spanned(
                nested,
                "nested Option is not supported: Some(None) and None encode identically",
            ));
        }

        infos.push(FieldInfo {
            ident,
            ty: field.ty.clone(),
            id,
            required,
        });
    }

    Ok(infos)
}

/// Type argument of `Option<..>`, if `ty` is one.
fn option_argument(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

/// First `Option<Option<..>>` inside `ty`, looking through generic arguments.
fn find_nested_option(ty: &syn::Type) -> Option<&syn::Type> {
    if option_argument(ty).and_then(option_argument).is_some() {
        return Some(ty);
    }
    let syn::Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(inner) => find_nested_option(inner),
        _ => None,
    })
}
