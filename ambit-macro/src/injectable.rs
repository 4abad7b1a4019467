use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, Data, DeriveInput, Fields, Ident, Token,
    Type,
};

/// Parsed `#[inject(Key)]` or `#[inject(Key, optional)]`
struct InjectArgs {
    key: Type,
    optional: bool,
}

impl Parse for InjectArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Type = input.parse()?;
        let mut optional = false;

        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            let flag: Ident = input.parse()?;
            if flag != "optional" {
                return Err(syn::Error::new(
                    flag.span(),
                    "expected `optional` after the key type",
                ));
            }
            optional = true;
        }

        Ok(InjectArgs { key, optional })
    }
}

pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_injectable_impl(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn generate_injectable_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "#[derive(Injectable)] only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "#[derive(Injectable)] can only be applied to structs",
            ))
        }
    };

    let mut assignments = Vec::new();
    for field in fields {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("inject")) else {
            continue;
        };
        let args: InjectArgs = attr.parse_args()?;
        let field_name = &field.ident;
        let key = &args.key;

        let assignment = if args.optional {
            quote! {
                self.#field_name = container.try_get::<#key>().cloned();
            }
        } else {
            quote! {
                self.#field_name = ::core::clone::Clone::clone(container.get::<#key>());
            }
        };
        assignments.push(assignment);
    }

    Ok(quote! {
        impl #impl_generics ::ambit::Injectable for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn configure(&mut self, container: &::ambit::Container) {
                #(#assignments)*
            }
        }
    })
}
