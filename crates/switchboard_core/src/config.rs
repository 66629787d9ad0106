//! Core configuration defaults.
//!
//! # Responsibility
//! - Describe the knobs a bootstrap layer seeds before units register.
//! - Parse them from JSON so hosts can ship one config document.
//!
//! # Invariants
//! - Every field has a default; an empty document is a valid config.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// File logging settings forwarded to `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Absolute directory for rolling log files.
    pub dir: String,
}

fn default_level() -> String {
    default_log_level().to_string()
}

/// Top-level core configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Exposes the introspection surface when set.
    pub debug: bool,
    pub log: Option<LogConfig>,
}

impl CoreConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}

/// Configuration load/apply errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Logging(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid core config: {message}"),
            Self::Logging(message) => write!(f, "failed to initialize logging: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};
    use crate::logging::default_log_level;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CoreConfig::from_json_str("{}").expect("empty config should parse");
        assert_eq!(config, CoreConfig::default());
        assert!(!config.debug);
        assert!(config.log.is_none());
    }

    #[test]
    fn parses_debug_and_log_settings() {
        let config = CoreConfig::from_json_str(
            r#"{"debug": true, "log": {"dir": "/tmp/switchboard-logs"}}"#,
        )
        .expect("config should parse");
        assert!(config.debug);
        let log = config.log.expect("log config");
        assert_eq!(log.dir, "/tmp/switchboard-logs");
        assert_eq!(log.level, default_log_level());
    }

    #[test]
    fn rejects_malformed_documents() {
        let err = CoreConfig::from_json_str(r#"{"debug": "yes"}"#).expect_err("bad type");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
