//! Configuration structures
//!
//! Every field has a default so that an empty file (or no file at all)
//! yields a working configuration. Loading lives in `axbridge-infra`.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PERMISSION_CACHE_TTL_SECS, DEFAULT_SEARCH_MAX_DEPTH};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxConfig {
    pub search: SearchConfig,
    pub permission: PermissionConfig,
    pub transport: TransportConfig,
    pub logging: LoggingConfig,
}

/// Tree search settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth budget in edges from the search root.
    pub max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_SEARCH_MAX_DEPTH }
    }
}

/// Permission gate settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionConfig {
    /// Show the system trust prompt when the session is created.
    pub prompt_on_start: bool,
    /// How long a permission check result is reused before asking the OS
    /// again.
    pub cache_ttl_secs: u64,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self { prompt_on_start: false, cache_ttl_secs: DEFAULT_PERMISSION_CACHE_TTL_SECS }
    }
}

/// Remote call settings
///
/// The accessibility service itself blocks until the remote application
/// answers. `messaging_timeout_secs` asks the OS to give up earlier;
/// `call_timeout_ms` bounds how long an async caller waits for a blocking
/// call to come back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub messaging_timeout_secs: Option<f32>,
    pub call_timeout_ms: Option<u64>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AxConfig::default();
        assert_eq!(config.search.max_depth, 10);
        assert_eq!(config.permission.cache_ttl_secs, 300);
        assert!(!config.permission.prompt_on_start);
        assert_eq!(config.transport.call_timeout_ms, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AxConfig = toml::from_str(
            r#"
[search]
max_depth = 4

[transport]
messaging_timeout_secs = 1.5
"#,
        )
        .expect("partial config should parse");

        assert_eq!(config.search.max_depth, 4);
        assert_eq!(config.transport.messaging_timeout_secs, Some(1.5));
        assert_eq!(config.permission, PermissionConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config: AxConfig = serde_json::from_str("{}").expect("empty config should parse");
        assert_eq!(config, AxConfig::default());
    }
}
