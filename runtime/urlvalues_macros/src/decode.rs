//! A derive macro for implementing the `Decode` trait on top of a custom decoder.
use darling::{FromDeriveInput, util::Flag};
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

#[derive(FromDeriveInput)]
#[darling(attributes(urlvalue))]
struct DecodeInput {
    ident: syn::Ident,
    generics: syn::Generics,
    text: Flag,
    binary: Flag,
}

pub(super) fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match _derive_decode(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into(),
    }
}

fn _derive_decode(input: DeriveInput) -> Result<proc_macro2::TokenStream, darling::Error> {
    let input = DecodeInput::from_derive_input(&input)?;
    let name = &input.ident;

    // Text decoding takes precedence when both are requested.
    let decoder = if input.text.is_present() {
        quote! { ::urlvalues::TextDecode::decode_text(self, value.as_bytes()) }
    } else if input.binary.is_present() {
        quote! { ::urlvalues::BinaryDecode::decode_binary(self, value.as_bytes()) }
    } else {
        return Err(darling::Error::custom(format!(
            "`#[derive(Decode)]` needs to know which decoder `{name}` implements.\n\n\
            help: Add `#[urlvalue(text)]` if `{name}` implements `TextDecode`, \
            or `#[urlvalue(binary)]` if it implements `BinaryDecode`.",
        ))
        .with_span(name));
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let tokens = quote! {
        #[automatically_derived]
        impl #impl_generics ::urlvalues::Decode for #name #ty_generics #where_clause {
            fn kind() -> ::urlvalues::FieldKind {
                ::urlvalues::FieldKind::Custom(::core::stringify!(#name))
            }

            fn decode(
                &mut self,
                value: &str,
                _ctx: &::urlvalues::DecodeContext<'_>,
            ) -> ::core::result::Result<(), ::urlvalues::CoerceError> {
                #decoder.map_err(::urlvalues::CoerceError::custom)
            }
        }
    };

    Ok(tokens)
}
