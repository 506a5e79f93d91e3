use darling::{FromDeriveInput, FromField, util::Ignored};
use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::{DeriveInput, Ident, LitStr, Type, ext::IdentExt, parse_macro_input, spanned::Spanned};

#[derive(FromDeriveInput)]
#[darling(supports(struct_named))]
struct UnmarshalInput {
    data: darling::ast::Data<Ignored, ParsedField>,
    generics: syn::Generics,
    ident: Ident,
}

struct ParsedField {
    ident: Ident,
    ty: Type,
    /// The raw `#[urlvalue("...")]` directive. Empty if the field isn't annotated.
    directive: String,
}

impl ParsedField {
    fn is_skipped(&self) -> bool {
        self.directive == "-"
    }
}

impl FromField for ParsedField {
    fn from_field(field: &syn::Field) -> darling::Result<Self> {
        let Some(ident) = field.ident.clone() else {
            return Err(darling::Error::custom("Expected a named field.").with_span(field));
        };

        let mut directives = Vec::new();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("urlvalue")) {
            let directive = attr.parse_args::<LitStr>().map_err(|_| {
                darling::Error::custom(
                    "Invalid `urlvalue` attribute. Expected a string literal, \
                    e.g. `#[urlvalue(\"key,default:value\")]`.",
                )
                .with_span(&attr.meta)
            })?;
            directives.push(directive);
        }
        if directives.len() > 1 {
            return Err(darling::Error::custom(format!(
                "Field `{ident}` has more than one `#[urlvalue(..)]` attribute.\n\
                help: Merge them into a single directive.",
            ))
            .with_span(&ident));
        }

        Ok(Self {
            directive: directives.pop().map(|d| d.value()).unwrap_or_default(),
            ty: field.ty.clone(),
            ident,
        })
    }
}

pub(super) fn derive_unmarshal(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match _derive_unmarshal(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into(),
    }
}

fn _derive_unmarshal(input: DeriveInput) -> Result<proc_macro2::TokenStream, darling::Error> {
    reject_unsupported_shapes(&input)?;
    let input = UnmarshalInput::from_derive_input(&input)?;
    reject_invalid_inputs(&input)?;

    let struct_ident = &input.ident;
    let Some(fields) = input.data.take_struct() else {
        return Err(darling::Error::unsupported_shape("enum").with_span(struct_ident));
    };

    let fields_ident = quote! { __fields };
    let registrations = fields.iter().filter(|f| !f.is_skipped()).map(|field| {
        let field_ident = &field.ident;
        let name = field_ident.unraw().to_string();
        let directive = &field.directive;
        let ty_span = field.ty.span();
        quote_spanned! { ty_span =>
            #fields_ident.field(#name, #directive, &mut self.#field_ident)?;
        }
    });

    let tokens = quote! {
        #[automatically_derived]
        impl ::urlvalues::Unmarshal for #struct_ident {
            fn collect_fields<'__urlvalues>(
                &'__urlvalues mut self,
                #fields_ident: &mut ::urlvalues::Fields<'__urlvalues>,
            ) -> ::core::result::Result<(), ::urlvalues::DirectiveError> {
                #(#registrations)*
                ::core::result::Result::Ok(())
            }
        }

        #[automatically_derived]
        impl ::urlvalues::Decode for #struct_ident {
            fn kind() -> ::urlvalues::FieldKind {
                ::urlvalues::FieldKind::Record(::core::stringify!(#struct_ident))
            }

            fn decode(
                &mut self,
                _value: &str,
                _ctx: &::urlvalues::DecodeContext<'_>,
            ) -> ::core::result::Result<(), ::urlvalues::CoerceError> {
                ::core::result::Result::Ok(())
            }

            fn collect<'__urlvalues>(
                &'__urlvalues mut self,
                _name: &'static str,
                _options: ::urlvalues::FieldOptions,
                #fields_ident: &mut ::urlvalues::Fields<'__urlvalues>,
            ) -> ::core::result::Result<(), ::urlvalues::DirectiveError> {
                ::urlvalues::Unmarshal::collect_fields(self, #fields_ident)
            }
        }
    };

    Ok(tokens)
}

fn reject_unsupported_shapes(input: &DeriveInput) -> Result<(), darling::Error> {
    let shape = match &input.data {
        syn::Data::Struct(data) => match data.fields {
            syn::Fields::Named(_) => return Ok(()),
            syn::Fields::Unnamed(_) => "a tuple struct",
            syn::Fields::Unit => "a unit struct",
        },
        syn::Data::Enum(_) => "an enum",
        syn::Data::Union(_) => "a union",
    };
    let ident = &input.ident;
    Err(darling::Error::custom(format!(
        "`#[derive(Unmarshal)]` can only be applied to structs with named fields, but `{ident}` is {shape}.",
    ))
    .with_span(ident))
}

fn reject_invalid_inputs(input: &UnmarshalInput) -> Result<(), darling::Error> {
    let struct_ident = &input.ident;
    if let Some(generic) = input.generics.type_params().next() {
        return Err(darling::Error::custom(format!(
            "`#[derive(Unmarshal)]` can't be applied to structs with generic type parameters, such as `{struct_ident}`.\n\n\
            help: Consider using concrete types instead.",
        ))
        .with_span(&generic.ident));
    }
    if input.generics.lifetimes().next().is_some() {
        return Err(darling::Error::custom(format!(
            "`#[derive(Unmarshal)]` can't be applied to structs with generic lifetimes, such as `{struct_ident}`.\n\n\
            help: Use owned types for the fields of `{struct_ident}`.",
        ))
        .with_span(struct_ident));
    }
    if let Some(param) = input.generics.const_params().next() {
        return Err(darling::Error::custom(format!(
            "`#[derive(Unmarshal)]` can't be applied to structs with const generic parameters, such as `{struct_ident}`.",
        ))
        .with_span(&param.ident));
    }
    Ok(())
}
