use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, Attribute, ItemStruct, LitStr, Path,
    Token,
};

struct CatalogItem {
    attrs: Vec<Attribute>,
    path: Path,
}

impl Parse for CatalogItem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let path = input.parse()?;
        Ok(CatalogItem { attrs, path })
    }
}

#[derive(Default)]
struct CatalogArgs {
    archive: Option<LitStr>,
    imports: Vec<CatalogItem>,
    applications: Vec<CatalogItem>,
    shared: Vec<CatalogItem>,
    handlers: Vec<CatalogItem>,
}

impl Parse for CatalogArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = CatalogArgs::default();

        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            if name == "archive" {
                args.archive = Some(input.parse()?);
            } else {
                // Parse array: [Item1, Item2, ...]
                let content;
                syn::bracketed!(content in input);
                let items: Vec<CatalogItem> = content
                    .parse_terminated(CatalogItem::parse, Token![,])?
                    .into_iter()
                    .collect();

                if name == "imports" {
                    args.imports = items;
                } else if name == "applications" {
                    args.applications = items;
                } else if name == "shared" {
                    args.shared = items;
                } else if name == "handlers" {
                    args.handlers = items;
                } else {
                    return Err(syn::Error::new(
                        name.span(),
                        "expected one of: archive, imports, applications, shared, handlers",
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

pub fn catalog_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as CatalogArgs);
    let input = parse_macro_input!(item as ItemStruct);
    let expanded = generate_catalog_impl(&args, &input);

    TokenStream::from(expanded)
}

fn registrations<'a>(
    items: &'a [CatalogItem],
    method: &'a TokenStream2,
) -> impl Iterator<Item = TokenStream2> + 'a {
    items.iter().map(move |item| {
        let path = &item.path;
        let attrs = &item.attrs;
        quote! {
            #(#attrs)*
            registrar.#method::<#path>();
        }
    })
}

fn generate_catalog_impl(args: &CatalogArgs, input: &ItemStruct) -> TokenStream2 {
    let catalog_name = &input.ident;

    let import_registrations = args.imports.iter().map(|item| {
        let path = &item.path;
        let attrs = &item.attrs;
        quote! {
            #(#attrs)*
            #path::register(catalog)?;
        }
    });

    let registrar = match &args.archive {
        Some(path) => quote!(catalog.archive(#path)),
        None => quote!(catalog.classpath()),
    };

    let application = quote!(application);
    let shared = quote!(shared);
    let handler = quote!(handler);
    let application_registrations = registrations(&args.applications, &application);
    let shared_registrations = registrations(&args.shared, &shared);
    let handler_registrations = registrations(&args.handlers, &handler);

    quote! {
        #input

        impl #catalog_name {
            /// Register this catalog's units, imports first.
            pub fn register(
                catalog: &::callbridge::loader::Catalog
            ) -> ::callbridge::error::Result<()> {
                #(#import_registrations)*

                let registrar = #registrar;
                #(#application_registrations)*
                #(#shared_registrations)*
                #(#handler_registrations)*
                let _ = registrar;

                Ok(())
            }

            /// Create a new catalog holding this catalog's units
            pub fn create_catalog() -> ::callbridge::error::Result<::callbridge::loader::Catalog> {
                let catalog = ::callbridge::loader::Catalog::new();
                Self::register(&catalog)?;
                Ok(catalog)
            }
        }
    }
}
