use super::Application;
use crate::error::{BridgeError, Result};
use crate::lifecycle::{CapabilitySet, LifecycleHandler};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

type Construct<T> = Arc<dyn Fn() -> anyhow::Result<Arc<T>> + Send + Sync>;

/// A single instance shared by every session that activates the unit.
///
/// Construction happens at most once. The check and the store happen under
/// one lock, so two sessions racing on first activation still observe the
/// same instance. A failed construction leaves the slot empty and the next
/// activation tries again.
pub struct Shared<T: ?Sized + Send + Sync + 'static> {
    construct: Construct<T>,
    instance: Mutex<Option<Arc<T>>>,
}

impl<T: ?Sized + Send + Sync + 'static> Shared<T> {
    pub fn new(construct: impl Fn() -> anyhow::Result<Arc<T>> + Send + Sync + 'static) -> Self {
        Self {
            construct: Arc::new(construct),
            instance: Mutex::new(None),
        }
    }

    /// A shared slot that is already filled (eager construction).
    pub fn eager(instance: Arc<T>) -> Self {
        let fallback = Arc::clone(&instance);
        Self {
            construct: Arc::new(move || -> anyhow::Result<Arc<T>> { Ok(Arc::clone(&fallback)) }),
            instance: Mutex::new(Some(instance)),
        }
    }

    pub fn get(&self) -> anyhow::Result<Arc<T>> {
        let mut slot = self.instance.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(instance) = slot.as_ref() {
            return Ok(Arc::clone(instance));
        }
        let instance = (self.construct)()?;
        *slot = Some(Arc::clone(&instance));
        Ok(instance)
    }

    pub fn is_initialized(&self) -> bool {
        self.instance
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[derive(Clone)]
enum FactoryKind {
    Application(Construct<dyn Application>),
    Shared(Arc<Shared<dyn Application>>),
    Handler(Construct<dyn LifecycleHandler>),
    Abstract { reason: String },
}

/// The zero-argument construction path of a resolved unit.
#[derive(Clone)]
pub struct Factory {
    name: String,
    kind: FactoryKind,
}

impl Factory {
    /// A fresh instance per activation, built with `T::default()`.
    pub fn application<T: Application + Default>(name: impl Into<String>) -> Self {
        Self::application_with(name, || Ok(T::default()))
    }

    /// A fresh instance per activation from a fallible constructor.
    pub fn application_with<T, F>(name: impl Into<String>, construct: F) -> Self
    where
        T: Application,
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let construct: Construct<dyn Application> =
            Arc::new(move || -> anyhow::Result<Arc<dyn Application>> {
                Ok(Arc::new(construct()?))
            });
        Self {
            name: name.into(),
            kind: FactoryKind::Application(construct),
        }
    }

    /// One instance for all sessions, built lazily with `T::default()`.
    pub fn shared<T: Application + Default>(name: impl Into<String>) -> Self {
        Self::shared_with(name, || Ok(T::default()))
    }

    pub fn shared_with<T, F>(name: impl Into<String>, construct: F) -> Self
    where
        T: Application,
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let shared = Shared::<dyn Application>::new(move || {
            Ok(Arc::new(construct()?) as Arc<dyn Application>)
        });
        Self {
            name: name.into(),
            kind: FactoryKind::Shared(Arc::new(shared)),
        }
    }

    /// One instance for all sessions, constructed up front.
    pub fn shared_instance<T: Application>(name: impl Into<String>, instance: T) -> Self {
        let instance: Arc<dyn Application> = Arc::new(instance);
        Self {
            name: name.into(),
            kind: FactoryKind::Shared(Arc::new(Shared::eager(instance))),
        }
    }

    /// A handler-only unit: capabilities, no entry method.
    pub fn handler<T: LifecycleHandler + Default>(name: impl Into<String>) -> Self {
        let construct: Construct<dyn LifecycleHandler> =
            Arc::new(|| -> anyhow::Result<Arc<dyn LifecycleHandler>> {
                Ok(Arc::new(T::default()))
            });
        Self {
            name: name.into(),
            kind: FactoryKind::Handler(construct),
        }
    }

    /// A unit that is known by name but has no zero-argument construction.
    pub fn unconstructible(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FactoryKind::Abstract {
                reason: reason.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_shared(&self) -> bool {
        matches!(self.kind, FactoryKind::Shared(_))
    }

    /// Construct (or fetch the shared) instance.
    ///
    /// # Errors
    /// [`BridgeError::NotInstantiable`] if the unit has no construction path
    /// or its constructor fails.
    pub fn instantiate(&self) -> Result<Instance> {
        let not_instantiable = |reason: String| BridgeError::NotInstantiable {
            name: self.name.clone(),
            reason,
        };

        match &self.kind {
            FactoryKind::Application(construct) => construct()
                .map(Instance::Application)
                .map_err(|e| not_instantiable(format!("{e:#}"))),
            FactoryKind::Shared(shared) => shared
                .get()
                .map(Instance::Application)
                .map_err(|e| not_instantiable(format!("{e:#}"))),
            FactoryKind::Handler(construct) => construct()
                .map(Instance::Handler)
                .map_err(|e| not_instantiable(format!("{e:#}"))),
            FactoryKind::Abstract { reason } => Err(not_instantiable(reason.clone())),
        }
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            FactoryKind::Application(_) => "application",
            FactoryKind::Shared(_) => "shared",
            FactoryKind::Handler(_) => "handler",
            FactoryKind::Abstract { .. } => "abstract",
        };
        f.debug_struct("Factory")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

/// A constructed unit.
#[derive(Clone)]
pub enum Instance {
    Application(Arc<dyn Application>),
    Handler(Arc<dyn LifecycleHandler>),
}

impl Instance {
    /// The entry method, if this unit has one.
    pub fn entry_point(&self) -> Option<&Arc<dyn Application>> {
        match self {
            Instance::Application(app) => Some(app),
            Instance::Handler(_) => None,
        }
    }

    pub fn capabilities(&self) -> CapabilitySet {
        match self {
            Instance::Application(app) => Arc::clone(app).capabilities(),
            Instance::Handler(handler) => Arc::clone(handler).capabilities(),
        }
    }
}
