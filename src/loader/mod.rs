//! Code Loading
//!
//! Maps qualified names to construction paths. Nothing here looks code up
//! by reflection: units are registered explicitly, either by hand through a
//! [`Catalog`] registrar or with the `#[catalog(...)]` attribute, and
//! resolved through the narrow [`Loader`] interface.

mod catalog;
mod factory;
mod unit;

pub use catalog::{Catalog, Registrar};
pub use factory::{Factory, Instance, Shared};
pub use unit::{Application, Unit};

use crate::resolver::SourceKind;

/// Resolves a qualified name to its [`Factory`].
///
/// Closures implement this trait, which keeps fakes in tests short:
///
/// ```rust,ignore
/// let loader = |_: &SourceKind, name: &str| {
///     (name == "org.Echo").then(|| Factory::application::<Echo>(name))
/// };
/// ```
pub trait Loader: Send + Sync {
    fn resolve(&self, source: &SourceKind, name: &str) -> Option<Factory>;
}

impl<F> Loader for F
where
    F: Fn(&SourceKind, &str) -> Option<Factory> + Send + Sync,
{
    fn resolve(&self, source: &SourceKind, name: &str) -> Option<Factory> {
        self(source, name)
    }
}
