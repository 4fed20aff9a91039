//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and the
//! process environment.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use axbridge_domain::AxConfig;
use axbridge_infra::config;
use axbridge_infra::InfraError;
use once_cell::sync::Lazy;
use tempfile::NamedTempFile;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const OVERRIDE_VARS: [&str; 7] = [
    "AXBRIDGE_SEARCH_MAX_DEPTH",
    "AXBRIDGE_PERMISSION_PROMPT",
    "AXBRIDGE_PERMISSION_CACHE_TTL_SECS",
    "AXBRIDGE_MESSAGING_TIMEOUT_SECS",
    "AXBRIDGE_CALL_TIMEOUT_MS",
    "AXBRIDGE_LOG_LEVEL",
    "AXBRIDGE_LOG_JSON",
];

fn config_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("axbridge")
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    file
}

fn clear_overrides() {
    for var in OVERRIDE_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_load_config_from_toml_file() {
    let file = config_file(
        ".toml",
        r#"
[search]
max_depth = 6

[permission]
prompt_on_start = true
cache_ttl_secs = 30

[transport]
messaging_timeout_secs = 1.5
call_timeout_ms = 2000

[logging]
level = "debug"
json = true
"#,
    );

    let config = config::load_from_file(file.path()).expect("Failed to load TOML config");

    assert_eq!(config.search.max_depth, 6);
    assert!(config.permission.prompt_on_start);
    assert_eq!(config.permission.cache_ttl_secs, 30);
    assert_eq!(config.transport.messaging_timeout_secs, Some(1.5));
    assert_eq!(config.transport.call_timeout_ms, Some(2000));
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn test_load_config_with_minimal_fields() {
    let file = config_file(".json", r#"{ "search": { "max_depth": 2 } }"#);

    let config = config::load_from_file(file.path()).expect("Failed to load JSON config");

    assert_eq!(config.search.max_depth, 2);
    assert_eq!(config.permission, AxConfig::default().permission);
    assert_eq!(config.logging, AxConfig::default().logging);
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Path::new("/nonexistent/path/axbridge.toml"));
    assert!(matches!(result, Err(InfraError::Config(msg)) if msg.contains("not found")));
}

#[test]
fn test_load_config_with_invalid_format() {
    let file = config_file(".json", "{ this is not json }");
    let result = config::load_from_file(file.path());
    assert!(matches!(result, Err(InfraError::Config(msg)) if msg.contains("Invalid JSON")));
}

#[test]
fn test_load_config_with_wrong_field_type() {
    let file = config_file(".toml", "[search]\nmax_depth = \"deep\"\n");
    let result = config::load_from_file(file.path());
    assert!(matches!(result, Err(InfraError::Config(msg)) if msg.contains("Invalid TOML")));
}

#[test]
fn test_load_config_with_negative_messaging_timeout() {
    let file = config_file(".toml", "[transport]\nmessaging_timeout_secs = -5.0\n");
    let result = config::load_from_file(file.path());
    assert!(
        matches!(result, Err(InfraError::Config(msg)) if msg.contains("messaging_timeout_secs"))
    );
}

#[test]
fn test_load_config_with_nan_messaging_timeout() {
    let file = config_file(".toml", "[transport]\nmessaging_timeout_secs = nan\n");
    let result = config::load_from_file(file.path());
    assert!(matches!(result, Err(InfraError::Config(_))));
}

#[test]
fn test_env_overrides_win_over_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_overrides();

    let file = config_file(".toml", "[search]\nmax_depth = 6\n[logging]\nlevel = \"warn\"\n");
    let from_file = config::load_from_file(file.path()).unwrap();

    std::env::set_var("AXBRIDGE_SEARCH_MAX_DEPTH", "15");
    std::env::set_var("AXBRIDGE_CALL_TIMEOUT_MS", "500");
    let result = config::load_from_env_overrides(from_file);
    clear_overrides();

    let config = result.expect("Overrides should apply");
    assert_eq!(config.search.max_depth, 15);
    assert_eq!(config.transport.call_timeout_ms, Some(500));
    // Not overridden
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_invalid_env_override_fails() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_overrides();

    std::env::set_var("AXBRIDGE_PERMISSION_CACHE_TTL_SECS", "soon");
    let result = config::load_from_env_overrides(AxConfig::default());
    clear_overrides();

    assert!(matches!(result, Err(InfraError::Config(msg)) if msg.contains("AXBRIDGE_PERMISSION_CACHE_TTL_SECS")));
}
