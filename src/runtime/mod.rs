//! Process-wide runtime
//!
//! The host brings the bridge up once per process. [`Runtime::initialize`]
//! locates the native bridge library, installs configured default handlers
//! into the process-wide registry and builds the [`HostAdapter`] every later
//! host call goes through.

use crate::bootstrap::Bootstrap;
use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::host::HostAdapter;
use crate::loader::Catalog;
use crate::registry::HandlerRegistry;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

/// Platform file name of a native library with base name `base`.
pub fn library_file_name(base: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{base}.dll")
    } else if cfg!(target_os = "macos") {
        format!("lib{base}.dylib")
    } else {
        format!("lib{base}.so")
    }
}

/// First directory in `search_paths` that holds the library, in order.
pub fn locate_library<P: AsRef<Path>>(search_paths: &[P], base: &str) -> Option<PathBuf> {
    let file_name = library_file_name(base);
    search_paths
        .iter()
        .map(|dir| dir.as_ref().join(&file_name))
        .find(|candidate| candidate.is_file())
}

pub struct Runtime {
    config: BridgeConfig,
    library: Option<PathBuf>,
    catalog: Catalog,
    host: HostAdapter,
}

impl Runtime {
    /// Initialize the process-wide runtime.
    ///
    /// # Errors
    /// [`BridgeError::AlreadyInitialized`] on every call after the first
    /// successful one. A configured default handler that cannot be resolved
    /// or constructed fails initialization and leaves the runtime unset.
    pub fn initialize(config: BridgeConfig, catalog: Catalog) -> Result<&'static Runtime> {
        let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
        if RUNTIME.get().is_some() {
            return Err(BridgeError::AlreadyInitialized);
        }

        let runtime = Self::build(config, catalog, HandlerRegistry::global())?;
        RUNTIME
            .set(runtime)
            .map_err(|_| BridgeError::AlreadyInitialized)?;
        RUNTIME.get().ok_or(BridgeError::AlreadyInitialized)
    }

    pub fn get() -> Option<&'static Runtime> {
        RUNTIME.get()
    }

    fn build(
        config: BridgeConfig,
        catalog: Catalog,
        registry: Arc<HandlerRegistry>,
    ) -> Result<Self> {
        let library = locate_library(config.search_paths.as_slice(), &config.library_name);
        match &library {
            Some(path) => {
                tracing::info!(library = %path.display(), "Located native bridge library")
            }
            None => tracing::warn!(
                library = %library_file_name(&config.library_name),
                searched = config.search_paths.len(),
                "Native bridge library not found on the search path"
            ),
        }

        let bootstrap = Bootstrap::new(Arc::new(catalog.clone()), registry);
        for name in &config.default_handlers {
            bootstrap.install_defaults(name)?;
        }

        let host = HostAdapter::new(bootstrap, config.status_codes);
        tracing::info!(
            defaults = config.default_handlers.len(),
            "Bridge runtime initialized"
        );

        Ok(Self {
            config,
            library,
            catalog,
            host,
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn library(&self) -> Option<&Path> {
        self.library.as_deref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        self.host.registry()
    }

    pub fn host(&self) -> &HostAdapter {
        &self.host
    }
}
