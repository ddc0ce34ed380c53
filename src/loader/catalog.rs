use super::{Application, Factory, Loader, Unit};
use crate::lifecycle::LifecycleHandler;
use crate::resolver::SourceKind;
use dashmap::DashMap;
use std::sync::Arc;

/// Thread-safe registry of named units, the default [`Loader`].
///
/// Units live either on the classpath or inside a named archive scope.
/// Resolving an archive-scoped name consults that archive first and then
/// the classpath; the first hit wins. Resolving a classpath name never sees
/// archive-scoped units.
///
/// # Example
/// ```rust,ignore
/// let catalog = Catalog::new();
/// catalog
///     .classpath()
///     .application::<Voicemail>()
///     .shared::<ConferenceBridge>();
/// catalog.archive("/opt/apps/ivr.jar").application::<IvrMenu>();
/// ```
#[derive(Clone, Default)]
pub struct Catalog {
    units: Arc<DashMap<(SourceKind, String), Factory>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar for the normal search locations.
    pub fn classpath(&self) -> Registrar<'_> {
        Registrar {
            catalog: self,
            source: SourceKind::Classpath,
        }
    }

    /// Registrar for units packaged in the archive at `path`.
    pub fn archive(&self, path: impl Into<String>) -> Registrar<'_> {
        Registrar {
            catalog: self,
            source: SourceKind::Archive(path.into()),
        }
    }

    fn insert(&self, source: &SourceKind, factory: Factory) {
        let key = (source.clone(), factory.name().to_string());
        if self.units.insert(key, factory).is_some() {
            tracing::warn!(
                archive = source.archive_path(),
                "Replaced an already registered unit"
            );
        }
    }

    pub fn contains(&self, source: &SourceKind, name: &str) -> bool {
        self.units.contains_key(&(source.clone(), name.to_string()))
    }

    /// Qualified names registered in `source`, sorted.
    pub fn names(&self, source: &SourceKind) -> Vec<String> {
        let mut names: Vec<String> = self
            .units
            .iter()
            .filter(|entry| &entry.key().0 == source)
            .map(|entry| entry.key().1.clone())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl Loader for Catalog {
    fn resolve(&self, source: &SourceKind, name: &str) -> Option<Factory> {
        if let SourceKind::Archive(_) = source {
            if let Some(factory) = self.units.get(&(source.clone(), name.to_string())) {
                return Some(factory.clone());
            }
        }
        self.units
            .get(&(SourceKind::Classpath, name.to_string()))
            .map(|factory| factory.clone())
    }
}

/// Adds units to one scope of a [`Catalog`].
pub struct Registrar<'a> {
    catalog: &'a Catalog,
    source: SourceKind,
}

impl Registrar<'_> {
    pub fn application<T: Unit + Application + Default>(&self) -> &Self {
        self.factory(Factory::application::<T>(T::QUALIFIED_NAME))
    }

    /// Register `T` as a singleton shared by every session.
    pub fn shared<T: Unit + Application + Default>(&self) -> &Self {
        self.factory(Factory::shared::<T>(T::QUALIFIED_NAME))
    }

    pub fn handler<T: Unit + LifecycleHandler + Default>(&self) -> &Self {
        self.factory(Factory::handler::<T>(T::QUALIFIED_NAME))
    }

    pub fn factory(&self, factory: Factory) -> &Self {
        tracing::debug!(
            name = factory.name(),
            archive = self.source.archive_path(),
            "Registering unit"
        );
        self.catalog.insert(&self.source, factory);
        self
    }

    pub fn source(&self) -> &SourceKind {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Instance;

    struct Tagged(&'static str);

    impl Application for Tagged {
        fn run(&self, _session_id: &str, _args: &str) -> anyhow::Result<()> {
            anyhow::bail!("{}", self.0)
        }
    }

    fn origin(instance: &Instance) -> String {
        instance
            .entry_point()
            .unwrap()
            .run("s", "")
            .unwrap_err()
            .to_string()
    }

    fn catalog() -> Catalog {
        let catalog = Catalog::new();
        catalog
            .classpath()
            .factory(Factory::application_with("org.App", || Ok(Tagged("classpath"))))
            .factory(Factory::application_with("org.Common", || Ok(Tagged("common"))));
        catalog
            .archive("apps.jar")
            .factory(Factory::application_with("org.App", || Ok(Tagged("archive"))))
            .factory(Factory::application_with("org.Packed", || Ok(Tagged("packed"))));
        catalog
    }

    #[test]
    fn test_archive_unit_shadows_classpath_unit() {
        let catalog = catalog();
        let archive = SourceKind::Archive("apps.jar".to_string());

        let instance = catalog.resolve(&archive, "org.App").unwrap().instantiate().unwrap();
        assert_eq!(origin(&instance), "archive");

        let instance = catalog
            .resolve(&SourceKind::Classpath, "org.App")
            .unwrap()
            .instantiate()
            .unwrap();
        assert_eq!(origin(&instance), "classpath");
    }

    #[test]
    fn test_archive_resolution_falls_through_to_classpath() {
        let catalog = catalog();
        let archive = SourceKind::Archive("apps.jar".to_string());
        let instance = catalog
            .resolve(&archive, "org.Common")
            .unwrap()
            .instantiate()
            .unwrap();
        assert_eq!(origin(&instance), "common");
    }

    #[test]
    fn test_classpath_never_sees_archive_units() {
        let catalog = catalog();
        assert!(catalog.resolve(&SourceKind::Classpath, "org.Packed").is_none());
        let other = SourceKind::Archive("other.jar".to_string());
        assert!(catalog.resolve(&other, "org.Packed").is_none());
    }

    #[test]
    fn test_names_and_len() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.names(&SourceKind::Classpath),
            vec!["org.App".to_string(), "org.Common".to_string()]
        );
        assert!(catalog.contains(&SourceKind::Archive("apps.jar".to_string()), "org.Packed"));
    }

    #[test]
    fn test_clones_share_units() {
        let catalog = Catalog::new();
        let view = catalog.clone();
        catalog
            .classpath()
            .factory(Factory::unconstructible("org.Late", "abstract"));
        assert!(view.resolve(&SourceKind::Classpath, "org.Late").is_some());
    }
}
