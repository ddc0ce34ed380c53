use crate::error::{BridgeError, Result};
use crate::lifecycle::StatusCodes;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Key/value configuration store
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the environment variables that start with `prefix`.
    ///
    /// Keys are stored without the prefix and lower-cased, so
    /// `CALLBRIDGE_LOG_LEVEL` read with prefix `CALLBRIDGE_` becomes `log_level`.
    pub fn from_env(prefix: &str) -> Self {
        let service = Self::new();
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix(prefix) {
                service.set(&stripped.to_lowercase(), &value);
            }
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse the value under `key`, if present.
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| BridgeError::config(key, format!("{raw:?}: {e}"))),
            None => Ok(None),
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// Settings the host supplies when it brings the bridge up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Directories searched, in order, for the native bridge library.
    pub search_paths: Vec<PathBuf>,
    /// Base name of the native bridge library, without prefix or extension.
    pub library_name: String,
    pub status_codes: StatusCodes,
    pub log_level: String,
    /// Units whose capabilities are installed as process-wide defaults.
    pub default_handlers: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            library_name: "callbridge".to_string(),
            status_codes: StatusCodes::default(),
            log_level: "info".to_string(),
            default_handlers: Vec::new(),
        }
    }
}

impl BridgeConfig {
    /// Build from a [`ConfigService`]; absent keys keep their defaults.
    ///
    /// Recognised keys: `search_path` (a platform path list),
    /// `library_name`, `status_continue`, `status_stop`, `status_error`,
    /// `log_level`, `default_handlers` (comma separated).
    pub fn from_service(service: &ConfigService) -> Result<Self> {
        let mut config = Self::default();

        if let Some(paths) = service.get("search_path") {
            config.search_paths = env::split_paths(&paths).collect();
        }
        if let Some(name) = service.get("library_name") {
            config.library_name = name;
        }
        if let Some(code) = service.get_parsed::<i32>("status_continue")? {
            config.status_codes.continue_code = code;
        }
        if let Some(code) = service.get_parsed::<i32>("status_stop")? {
            config.status_codes.stop_code = code;
        }
        if let Some(code) = service.get_parsed::<i32>("status_error")? {
            config.status_codes.error_code = code;
        }
        if let Some(level) = service.get("log_level") {
            config.log_level = level;
        }
        if let Some(handlers) = service.get("default_handlers") {
            config.default_handlers = handlers
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(config)
    }

    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| BridgeError::config("<json>", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_get_set() {
        let service = ConfigService::new();
        service.set("log_level", "debug");
        assert_eq!(service.get("log_level").as_deref(), Some("debug"));
        assert_eq!(service.get_or("missing", "fallback"), "fallback");

        let view = service.clone();
        service.set("late", "1");
        assert_eq!(view.get("late").as_deref(), Some("1"));
    }

    #[test]
    fn test_get_parsed_reports_key() {
        let service = ConfigService::new();
        service.set("status_stop", "one");
        match service.get_parsed::<i32>("status_stop") {
            Err(BridgeError::Config { key, .. }) => assert_eq!(key, "status_stop"),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(service.get_parsed::<i32>("absent").unwrap(), None);
    }

    #[test]
    fn test_bridge_config_from_service() {
        let service = ConfigService::new();
        let joined = env::join_paths(["/opt/a", "/opt/b"]).unwrap();
        service.set("search_path", joined.to_str().unwrap());
        service.set("status_continue", "10");
        service.set("status_error", " 99 ");
        service.set("default_handlers", "org.Cdr, org.Audit,");

        let config = BridgeConfig::from_service(&service).unwrap();

        assert_eq!(
            config.search_paths,
            vec![PathBuf::from("/opt/a"), PathBuf::from("/opt/b")]
        );
        assert_eq!(config.status_codes, StatusCodes::new(10, 1, 99));
        assert_eq!(config.library_name, "callbridge");
        assert_eq!(config.default_handlers, vec!["org.Cdr", "org.Audit"]);
    }

    #[test]
    fn test_bridge_config_from_json() {
        let config = BridgeConfig::from_json(
            r#"{"library_name": "bridge", "status_codes": {"error_code": 2}}"#,
        )
        .unwrap();
        assert_eq!(config.library_name, "bridge");
        assert_eq!(config.status_codes, StatusCodes::new(0, 1, 2));
        assert_eq!(config.log_level, "info");

        assert!(BridgeConfig::from_json("{").is_err());
    }
}
