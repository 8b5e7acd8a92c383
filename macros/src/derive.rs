//! Expansion of `#[derive(CStruct)]`.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Attribute, Data, DeriveInput, Fields, LitStr, Path};

/// Primitive names accepted by `#[ctype(...)]`, with their `Primitive` variant.
const PRIMITIVES: [(&str, &str); 11] = [
    ("bool", "Bool"),
    ("u8", "U8"),
    ("i8", "I8"),
    ("u16", "U16"),
    ("i16", "I16"),
    ("u32", "U32"),
    ("i32", "I32"),
    ("u64", "U64"),
    ("i64", "I64"),
    ("f32", "F32"),
    ("f64", "F64"),
];

/// Collects the `#[ctype(...)]` metadata entries of a field, in order.
fn metadata(attrs: &[Attribute]) -> Result<Vec<TokenStream>, syn::Error> {
    let mut entries = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("ctype")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("with") {
                let provider: Path = meta.value()?.parse()?;
                entries.push(quote! { ::cstruct::TypeRef::Provider(#provider) });
                return Ok(());
            }

            let name = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();
            let Some((_, variant)) = PRIMITIVES.iter().find(|(primitive, _)| *primitive == name)
            else {
                return Err(meta.error(format!(
                    "unsupported ctype; expected `with = path` or one of {:?}",
                    PRIMITIVES.map(|(primitive, _)| primitive)
                )));
            };
            let variant = Ident::new(variant, meta.path.span());
            entries.push(quote! { ::cstruct::TypeRef::of(::cstruct::Primitive::#variant) });
            Ok(())
        })?;
    }
    Ok(entries)
}

pub(crate) fn expand(input: DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let name_str = LitStr::new(&name.to_string(), Span::call_site());

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "CStruct cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "CStruct can only be derived for structs",
            ))
        }
    };

    let mut descriptors = Vec::new();
    let mut bindings = Vec::new();
    let mut conversions = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let ty = &field.ty;
        let field_name = match &field.ident {
            Some(ident) => ident.to_string(),
            None => index.to_string(),
        };

        let metadata = metadata(&field.attrs)?;
        let nominal = if metadata.is_empty() {
            quote! { <#ty as ::cstruct::AsCType>::type_ref() }
        } else {
            let ty_str = LitStr::new(&quote!(#ty).to_string(), ty.span());
            quote! { ::cstruct::TypeRef::Opaque(#ty_str) }
        };
        descriptors.push(quote! {
            ::cstruct::FieldDescriptor::new(#field_name, #nominal)
                #( .with_metadata(#metadata) )*
        });

        let binding = format_ident!("__value{}", index);
        let conversion = quote! { <#ty as ::cstruct::FromValue>::from_value(#binding)? };
        conversions.push(match &field.ident {
            Some(ident) => quote! { #ident: #conversion },
            None => conversion,
        });
        bindings.push(binding);
    }

    let arity = bindings.len();
    let construct = match fields {
        Fields::Named(_) => quote! { Self { #( #conversions ),* } },
        Fields::Unnamed(_) => quote! { Self( #( #conversions ),* ) },
        Fields::Unit => quote! { Self },
    };

    Ok(quote! {
        impl ::cstruct::CStruct for #name {
            const NAME: &'static str = #name_str;

            fn fields() -> ::std::vec::Vec<::cstruct::FieldDescriptor> {
                ::std::vec![ #( #descriptors ),* ]
            }

            fn constructor() -> ::cstruct::Constructor<Self> {
                ::cstruct::Constructor::new(#name_str, #arity, |values| {
                    let [ #( #bindings ),* ]: [::cstruct::Value; #arity] =
                        ::core::convert::TryInto::try_into(values).map_err(
                            |values: ::std::vec::Vec<::cstruct::Value>| {
                                ::cstruct::Error::ArityMismatch {
                                    record: ::std::string::String::from(#name_str),
                                    expected: #arity,
                                    found: values.len(),
                                }
                            },
                        )?;
                    ::core::result::Result::Ok(#construct)
                })
            }

            fn record_type() -> ::core::result::Result<
                ::std::sync::Arc<::cstruct::RecordType<Self>>,
                ::cstruct::Error,
            > {
                static RECORD: ::std::sync::OnceLock<
                    ::core::result::Result<
                        ::std::sync::Arc<::cstruct::RecordType<#name>>,
                        ::cstruct::Error,
                    >,
                > = ::std::sync::OnceLock::new();
                RECORD
                    .get_or_init(|| ::cstruct::register::<#name>().map(::std::sync::Arc::new))
                    .clone()
            }
        }

        impl ::cstruct::AsCType for #name {
            fn type_ref() -> ::cstruct::TypeRef {
                ::cstruct::TypeRef::Provider(|| {
                    let record = <#name as ::cstruct::CStruct>::record_type()?;
                    let ctype: ::std::sync::Arc<dyn ::cstruct::CType> = record;
                    ::core::result::Result::Ok(ctype)
                })
            }
        }

        impl ::cstruct::FromValue for #name {
            fn from_value(
                value: ::cstruct::Value,
            ) -> ::core::result::Result<Self, ::cstruct::Error> {
                value.into_record::<#name>()
            }
        }
    })
}
