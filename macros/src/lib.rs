//! Procedural macros for declaring C struct records and traced tests.

extern crate proc_macro;

mod derive;
mod traced;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, ItemFn};

/// `#[derive(CStruct)]`: declares a struct as a C struct record.
///
/// Fields are laid out in declaration order. A field's wire type is taken
/// from its `#[ctype(...)]` attributes when present (first one wins),
/// otherwise from its Rust type through `cstruct::AsCType`.
///
/// Supported attributes:
/// - `#[ctype(u8)]` (any of `bool`, `u8`, `i8`, `u16`, `i16`, `u32`, `i32`,
///   `u64`, `i64`, `f32`, `f64`): decode the field as that primitive.
/// - `#[ctype(with = path::to::provider)]`: decode the field with the type
///   returned by `fn() -> Result<Arc<dyn CType>, Error>`.
///
/// The derive implements `CStruct`, `AsCType` (so the record can be nested in
/// another record) and `FromValue`.
///
/// # Example
///
/// ```ignore
/// use cstruct::CStruct;
///
/// #[derive(CStruct)]
/// struct Header {
///     #[ctype(u16)]
///     kind: u64,
///     len: u32,
/// }
/// ```
#[proc_macro_derive(CStruct, attributes(ctype))]
pub fn derive_cstruct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Run a test with a `tracing` subscriber printing to the test output.
///
/// The maximum level defaults to `DEBUG` and may be given as a string:
/// `#[test_traced("INFO")]`.
#[proc_macro_attribute]
pub fn test_traced(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    traced::expand(attr.into(), input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
