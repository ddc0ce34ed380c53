//! Logging setup for hosts that do not bring their own subscriber.

use crate::error::{BridgeError, Result};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
    pub file_info: bool,
    pub log_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: Level::INFO,
            json: false,
            file_info: false,
            log_spans: false,
        }
    }
}

impl LoggingConfig {
    pub fn new(level: Level) -> Self {
        LoggingConfig {
            level,
            ..Default::default()
        }
    }

    pub fn with_json(mut self) -> Self {
        self.json = true;
        self
    }

    pub fn with_file_info(mut self) -> Self {
        self.file_info = true;
        self
    }

    pub fn with_spans(mut self) -> Self {
        self.log_spans = true;
        self
    }
}

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` directives are honoured on top of the configured level.
///
/// # Errors
/// Returns [`BridgeError::Config`] if a global subscriber is already set.
pub fn setup_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(config.level.into());

    let span_events = if config.log_spans {
        FmtSpan::ACTIVE
    } else {
        FmtSpan::NONE
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(span_events)
        .with_file(config.file_info)
        .with_line_number(config.file_info);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| BridgeError::config("logging", e.to_string()))
}

/// Parse a log level from a string
pub fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim())
        .map_err(|_| BridgeError::config("log_level", format!("invalid log level: {level}")))
}
