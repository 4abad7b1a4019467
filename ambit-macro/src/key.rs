use darling::FromDeriveInput;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Generics, Ident, Path, Type};

#[derive(FromDeriveInput)]
#[darling(attributes(key), supports(struct_any, enum_any))]
struct KeyArgs {
    ident: Ident,
    generics: Generics,
    value: Type,
    #[darling(default)]
    default: Option<Path>,
}

pub fn derive_dependency_key(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match KeyArgs::from_derive_input(&input) {
        Ok(args) => TokenStream::from(generate_key_impl(&args)),
        Err(err) => TokenStream::from(err.write_errors()),
    }
}

fn generate_key_impl(args: &KeyArgs) -> TokenStream2 {
    let key_name = &args.ident;
    let value_type = &args.value;
    let (impl_generics, ty_generics, where_clause) = args.generics.split_for_impl();

    let factory = match &args.default {
        Some(path) => quote!(#path()),
        None => quote!(<#value_type as ::core::default::Default>::default()),
    };

    quote! {
        impl #impl_generics ::ambit::DependencyKey for #key_name #ty_generics #where_clause {
            type Value = #value_type;

            fn default_value() -> Self::Value {
                #factory
            }
        }
    }
}
