use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{ItemFn, LitStr};

const LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

fn parse_level(attr: TokenStream) -> Result<Ident, syn::Error> {
    if attr.is_empty() {
        return Ok(Ident::new("DEBUG", Span::call_site()));
    }
    let literal: LitStr = syn::parse2(attr)?;
    let level = literal.value().to_ascii_uppercase();
    if !LEVELS.contains(&level.as_str()) {
        return Err(syn::Error::new(
            literal.span(),
            format!("unknown level `{}`; expected one of {:?}", literal.value(), LEVELS),
        ));
    }
    Ok(Ident::new(&level, literal.span()))
}

pub(crate) fn expand(attr: TokenStream, input: ItemFn) -> Result<TokenStream, syn::Error> {
    let level = parse_level(attr)?;
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;

    Ok(quote! {
        #[test]
        #(#attrs)*
        #vis #sig {
            let subscriber = ::tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(::tracing::Level::#level)
                .with_line_number(true)
                .finish();
            let dispatcher = ::tracing::Dispatch::new(subscriber);
            ::tracing::dispatcher::with_default(&dispatcher, || #block)
        }
    })
}
