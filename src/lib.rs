//! # Callbridge
//!
//! An embedding bridge between a call-processing engine and application logic
//! loaded at runtime.
//!
//! When the engine routes a call to an application it hands over a session id
//! and an activation string. Callbridge resolves the string to a registered
//! unit, constructs it, invokes its entry method and records which lifecycle
//! notifications the unit wants. Later notifications for that session are
//! routed to the unit, or to the process-wide defaults when it registered none.
//!
//! ## Features
//!
//! - **Explicit code loading**: units are registered in a [`Catalog`] by
//!   qualified name, optionally scoped to an archive
//! - **Capability sets**: a unit exposes any subset of the twelve lifecycle
//!   notifications, no empty stubs required
//! - **Concurrent registry**: per-session handler entries behind a sharded map
//! - **Event records**: immutable header/body records with the engine's plain
//!   and JSON wire forms
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use callbridge::prelude::*;
//!
//! #[derive(Unit, Default)]
//! #[unit(name = "org.example.Voicemail")]
//! pub struct Voicemail;
//!
//! impl Application for Voicemail {
//!     fn run(&self, session_id: &str, args: &str) -> anyhow::Result<()> {
//!         tracing::info!(session_id, args, "Answering with voicemail");
//!         Ok(())
//!     }
//!
//!     fn capabilities(self: Arc<Self>) -> CapabilitySet {
//!         CapabilitySet::new().on_hangup(|session_id, cause| {
//!             tracing::info!(session_id, cause, "Caller left");
//!             Status::Continue
//!         })
//!     }
//! }
//!
//! #[catalog(applications = [Voicemail])]
//! pub struct AppCatalog;
//!
//! fn main() -> callbridge::Result<()> {
//!     let runtime = Runtime::initialize(BridgeConfig::default(), AppCatalog::create_catalog()?)?;
//!
//!     let host = runtime.host();
//!     host.activate("6f1c2c1e", "org.example.Voicemail greeting=busy");
//!     host.on_hangup("6f1c2c1e", "NORMAL_CLEARING");
//!     host.on_state("6f1c2c1e", Tag::Destroy);
//!     Ok(())
//! }
//! ```

extern crate self as callbridge;

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod lifecycle;
pub mod loader;
pub mod logging;
pub mod registry;
pub mod resolver;
pub mod runtime;

// Re-export core types
pub use bootstrap::{Activation, Bootstrap};
pub use config::{BridgeConfig, ConfigService};
pub use error::{BridgeError, Result};
pub use event::{EventBuilder, EventRecord};
pub use host::HostAdapter;
pub use lifecycle::{CapabilitySet, LifecycleHandler, Notification, Status, StatusCodes, Tag};
pub use loader::{Application, Catalog, Factory, Loader, Unit};
pub use registry::HandlerRegistry;
pub use resolver::{EntryPointResolver, EntryPointSpec, SourceKind};
pub use runtime::Runtime;

// Re-export macros
pub use callbridge_macro::{Unit, catalog};

/// Prelude module for convenient imports
///
/// ```
/// use callbridge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bootstrap::{Activation, Bootstrap};
    pub use crate::config::{BridgeConfig, ConfigService};
    pub use crate::error::{BridgeError, Result};
    pub use crate::event::{EventBuilder, EventRecord};
    pub use crate::host::HostAdapter;
    pub use crate::lifecycle::{
        CapabilitySet, LifecycleHandler, Notification, Status, StatusCodes, Tag,
    };
    pub use crate::loader::{Application, Catalog, Factory, Loader};
    pub use crate::logging::{LoggingConfig, setup_logging};
    pub use crate::registry::HandlerRegistry;
    pub use crate::runtime::Runtime;
    // Both the trait and the derive
    pub use crate::{Unit, catalog};
    pub use std::sync::Arc;
}
