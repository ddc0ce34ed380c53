use proc_macro::TokenStream;

mod catalog;
mod unit;

/// Derive macro that gives a type its qualified name
///
/// The name defaults to the type identifier.
///
/// # Example
/// ```ignore
/// use callbridge::Unit;
///
/// #[derive(Unit, Default)]
/// #[unit(name = "org.example.Voicemail")]
/// pub struct Voicemail;
/// ```
#[proc_macro_derive(Unit, attributes(unit))]
pub fn derive_unit(input: TokenStream) -> TokenStream {
    unit::derive_unit(input)
}

/// Attribute macro that lists the units a catalog is made of
///
/// Generates `register(&Catalog)` and `create_catalog()` on the annotated
/// struct. `imports` are other `#[catalog]` structs registered first;
/// `archive` scopes this struct's own units to an archive.
///
/// # Example
/// ```ignore
/// use callbridge::catalog;
///
/// #[catalog(
///     imports = [CoreUnits],
///     applications = [Voicemail, IvrMenu],
///     shared = [ConferenceBridge],
///     handlers = [CallDetailRecorder],
/// )]
/// pub struct AppCatalog;
/// ```
#[proc_macro_attribute]
pub fn catalog(attr: TokenStream, item: TokenStream) -> TokenStream {
    catalog::catalog_attribute(attr, item)
}
