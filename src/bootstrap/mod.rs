//! Session Activation
//!
//! Turns a raw activation string into a running application instance for one
//! session.
//!
//! # Activation steps
//!
//! ```text
//! 1. Resolve the activation string     → MalformedArguments / MissingQualifiedName
//!    ↓
//! 2. Resolve the qualified name        → CodeNotFound
//!    ↓
//! 3. Instantiate (zero-argument)       → NotInstantiable
//!    ↓
//! 4. Locate the entry method           → EntryPointNotFound
//!    ↓
//! 5. run(session_id, residual_args)    → ApplicationError
//!    ↓
//! 6. Register exposed capabilities
//! ```
//!
//! Activation either completes all six steps or leaves no registry entries
//! behind for the session.

use crate::error::{BridgeError, Result};
use crate::lifecycle::{CapabilitySet, Tag};
use crate::loader::{Catalog, Loader};
use crate::registry::HandlerRegistry;
use crate::resolver::{EntryPointResolver, EntryPointSpec, SourceKind};
use std::sync::Arc;

/// What a successful activation produced.
#[derive(Debug, Clone)]
pub struct Activation {
    pub session_id: String,
    pub spec: EntryPointSpec,
    /// Tags registered for the session once activation finished.
    pub registered: Vec<Tag>,
}

pub struct Bootstrap {
    loader: Arc<dyn Loader>,
    registry: Arc<HandlerRegistry>,
}

impl Bootstrap {
    pub fn new(loader: Arc<dyn Loader>, registry: Arc<HandlerRegistry>) -> Self {
        Self { loader, registry }
    }

    /// Bootstrap against the process-wide registry.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::new(Arc::new(catalog), HandlerRegistry::global())
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    /// Activate the application named by `raw_args` for `session_id`.
    ///
    /// # Errors
    /// Every step's failure is fatal to this activation; see the module
    /// docs for which error each step raises.
    pub fn activate(&self, session_id: &str, raw_args: &str) -> Result<Activation> {
        let spec = EntryPointResolver::resolve(raw_args)?;
        let name = spec.qualified_name.as_str();

        let factory = self.loader.resolve(&spec.source, name).ok_or_else(|| {
            BridgeError::CodeNotFound {
                name: name.to_string(),
                archive: spec.source.archive_path().map(str::to_string),
            }
        })?;

        let instance = factory.instantiate()?;
        let app = instance
            .entry_point()
            .ok_or_else(|| BridgeError::EntryPointNotFound {
                name: name.to_string(),
            })?;

        tracing::debug!(session_id, unit = %spec, "Invoking entry method");
        if let Err(source) = app.run(session_id, &spec.residual_args) {
            // Drop anything the application registered for itself before failing.
            self.registry.release(session_id);
            return Err(BridgeError::ApplicationError {
                name: name.to_string(),
                session_id: session_id.to_string(),
                source,
            });
        }

        let capabilities = instance.capabilities();
        self.registry.register_set(session_id, &capabilities);
        let registered = self.registry.registered_tags(session_id);

        tracing::info!(
            session_id,
            unit = %spec,
            capabilities = registered.len(),
            "Application activated"
        );

        Ok(Activation {
            session_id: session_id.to_string(),
            spec,
            registered,
        })
    }

    /// Install the capabilities of the named unit as process-wide defaults.
    ///
    /// Both handler-only units and applications qualify; the entry method of
    /// an application is not invoked. Returns the installed capabilities.
    pub fn install_defaults(&self, qualified_name: &str) -> Result<CapabilitySet> {
        let factory = self
            .loader
            .resolve(&SourceKind::Classpath, qualified_name)
            .ok_or_else(|| BridgeError::CodeNotFound {
                name: qualified_name.to_string(),
                archive: None,
            })?;
        let capabilities = factory.instantiate()?.capabilities();
        self.registry.set_defaults(&capabilities);

        tracing::info!(
            unit = qualified_name,
            capabilities = ?capabilities,
            "Installed default handlers"
        );
        Ok(capabilities)
    }
}
