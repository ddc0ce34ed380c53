use darling::FromDeriveInput;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

#[derive(FromDeriveInput)]
#[darling(attributes(unit), supports(struct_any, enum_any))]
struct UnitArgs {
    ident: syn::Ident,
    generics: syn::Generics,
    #[darling(default)]
    name: Option<String>,
}

pub fn derive_unit(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let args = match UnitArgs::from_derive_input(&input) {
        Ok(args) => args,
        Err(err) => return TokenStream::from(err.write_errors()),
    };

    match generate_unit_impl(&args) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn generate_unit_impl(args: &UnitArgs) -> syn::Result<TokenStream2> {
    let ident = &args.ident;
    let (impl_generics, ty_generics, where_clause) = args.generics.split_for_impl();

    let name = args.name.clone().unwrap_or_else(|| ident.to_string());
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(syn::Error::new(
            ident.span(),
            "unit name must be non-empty and contain no whitespace",
        ));
    }

    Ok(quote! {
        impl #impl_generics ::callbridge::loader::Unit for #ident #ty_generics #where_clause {
            const QUALIFIED_NAME: &'static str = #name;
        }
    })
}
