use strum_macros::{AsRefStr, Display};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Malformed activation arguments: {input:?}")]
    MalformedArguments { input: String },

    #[error("Archive '{archive}' given without a qualified name")]
    MissingQualifiedName { archive: String },

    #[error("Code unit not found: {name}{}", archive_suffix(.archive))]
    CodeNotFound {
        name: String,
        archive: Option<String>,
    },

    #[error("Code unit '{name}' is not instantiable: {reason}")]
    NotInstantiable { name: String, reason: String },

    #[error("Code unit '{name}' has no entry method 'run(session_id, args)'")]
    EntryPointNotFound { name: String },

    #[error("Application '{name}' failed for session {session_id}: {source}")]
    ApplicationError {
        name: String,
        session_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid configuration for '{key}': {message}")]
    Config { key: String, message: String },

    #[error("Event error: {0}")]
    Event(String),

    #[error("Runtime already initialized")]
    AlreadyInitialized,
}

fn archive_suffix(archive: &Option<String>) -> String {
    match archive {
        Some(path) => format!(" (archive '{path}')"),
        None => String::new(),
    }
}

/// Stable, payload-free classification of a [`BridgeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ErrorKind {
    MalformedArguments,
    MissingQualifiedName,
    CodeNotFound,
    NotInstantiable,
    EntryPointNotFound,
    ApplicationError,
    Config,
    Event,
    AlreadyInitialized,
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::MalformedArguments { .. } => ErrorKind::MalformedArguments,
            BridgeError::MissingQualifiedName { .. } => ErrorKind::MissingQualifiedName,
            BridgeError::CodeNotFound { .. } => ErrorKind::CodeNotFound,
            BridgeError::NotInstantiable { .. } => ErrorKind::NotInstantiable,
            BridgeError::EntryPointNotFound { .. } => ErrorKind::EntryPointNotFound,
            BridgeError::ApplicationError { .. } => ErrorKind::ApplicationError,
            BridgeError::Config { .. } => ErrorKind::Config,
            BridgeError::Event(_) => ErrorKind::Event,
            BridgeError::AlreadyInitialized => ErrorKind::AlreadyInitialized,
        }
    }

    /// True for the errors raised while parsing the activation string.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            BridgeError::MalformedArguments { .. } | BridgeError::MissingQualifiedName { .. }
        )
    }

    pub(crate) fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        BridgeError::Config {
            key: key.into(),
            message: message.into(),
        }
    }
}
