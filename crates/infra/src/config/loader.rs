//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Probe the standard locations for a config file
//! 2. If one exists, parse it (JSON or TOML, by extension); otherwise start
//!    from defaults
//! 3. Apply `AXBRIDGE_*` environment overrides on top
//!
//! ## Environment Variables
//! - `AXBRIDGE_SEARCH_MAX_DEPTH`: Default search depth budget
//! - `AXBRIDGE_PERMISSION_PROMPT`: Show the trust prompt on start (true/false)
//! - `AXBRIDGE_PERMISSION_CACHE_TTL_SECS`: Permission cache lifetime
//! - `AXBRIDGE_MESSAGING_TIMEOUT_SECS`: Per-element messaging timeout
//! - `AXBRIDGE_CALL_TIMEOUT_MS`: Async call timeout
//! - `AXBRIDGE_LOG_LEVEL`: Default log filter
//! - `AXBRIDGE_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./axbridge.toml` or `./axbridge.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use axbridge_domain::AxConfig;

use crate::errors::{InfraError, InfraResult};

const FILE_NAMES: [&str; 4] = ["axbridge.toml", "axbridge.json", "config.toml", "config.json"];

/// Load configuration: file (if any), then environment overrides.
///
/// # Errors
/// Returns `InfraError::Config` if a config file exists but cannot be read
/// or parsed, or if an override variable holds an invalid value.
pub fn load() -> InfraResult<AxConfig> {
    let config = match probe_config_paths() {
        Some(path) => load_from_file(&path)?,
        None => {
            tracing::debug!("No config file found, using defaults");
            AxConfig::default()
        }
    };
    load_from_env_overrides(config)
}

/// Load configuration from one file.
///
/// Format is detected by extension (`.json` or `.toml`). Missing sections
/// and fields take their defaults.
///
/// # Errors
/// Returns `InfraError::Config` if the file is missing, unreadable, in an
/// unsupported format, or malformed.
pub fn load_from_file(path: &Path) -> InfraResult<AxConfig> {
    if !path.exists() {
        return Err(InfraError::config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| InfraError::config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, path)?;
    validate(&config)?;
    Ok(config)
}

/// Apply `AXBRIDGE_*` environment variables on top of `config`.
///
/// # Errors
/// Returns `InfraError::Config` if a variable is set to a value that does
/// not parse.
pub fn load_from_env_overrides(config: AxConfig) -> InfraResult<AxConfig> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`.
///
/// Split out from [`load_from_env_overrides`] so callers (and tests) can
/// supply variables without touching the process environment.
///
/// # Errors
/// Same as [`load_from_env_overrides`].
pub fn apply_overrides(
    mut config: AxConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> InfraResult<AxConfig> {
    if let Some(depth) = parse_var::<usize>(&lookup, "AXBRIDGE_SEARCH_MAX_DEPTH")? {
        config.search.max_depth = depth;
    }
    if let Some(prompt) = bool_var(&lookup, "AXBRIDGE_PERMISSION_PROMPT")? {
        config.permission.prompt_on_start = prompt;
    }
    if let Some(ttl) = parse_var::<u64>(&lookup, "AXBRIDGE_PERMISSION_CACHE_TTL_SECS")? {
        config.permission.cache_ttl_secs = ttl;
    }
    if let Some(secs) = parse_var::<f32>(&lookup, "AXBRIDGE_MESSAGING_TIMEOUT_SECS")? {
        config.transport.messaging_timeout_secs = Some(secs);
    }
    if let Some(ms) = parse_var::<u64>(&lookup, "AXBRIDGE_CALL_TIMEOUT_MS")? {
        config.transport.call_timeout_ms = Some(ms);
    }
    if let Some(level) = lookup("AXBRIDGE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = bool_var(&lookup, "AXBRIDGE_LOG_JSON")? {
        config.logging.json = json;
    }
    validate(&config)?;
    Ok(config)
}

/// Check values that deserialize fine but cannot be applied.
///
/// # Errors
/// Returns `InfraError::Config` naming the offending field.
pub fn validate(config: &AxConfig) -> InfraResult<()> {
    if let Some(secs) = config.transport.messaging_timeout_secs {
        if !secs.is_finite() || secs < 0.0 {
            return Err(InfraError::config(format!(
                "Invalid transport.messaging_timeout_secs: {secs} (must be a non-negative number)"
            )));
        }
    }
    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `InfraError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> InfraResult<AxConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| InfraError::config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| InfraError::config(format!("Invalid JSON format: {e}"))),
        _ => Err(InfraError::config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> InfraResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| InfraError::config(format!("Invalid {key}: {e}")))
        })
        .transpose()
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn bool_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> InfraResult<Option<bool>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        other => Err(InfraError::config(format!("Invalid {key}: expected a boolean, got '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = apply_overrides(AxConfig::default(), lookup(&[])).unwrap();
        assert_eq!(config, AxConfig::default());
    }

    #[test]
    fn test_all_overrides() {
        let config = apply_overrides(
            AxConfig::default(),
            lookup(&[
                ("AXBRIDGE_SEARCH_MAX_DEPTH", "25"),
                ("AXBRIDGE_PERMISSION_PROMPT", "yes"),
                ("AXBRIDGE_PERMISSION_CACHE_TTL_SECS", "60"),
                ("AXBRIDGE_MESSAGING_TIMEOUT_SECS", "2.5"),
                ("AXBRIDGE_CALL_TIMEOUT_MS", "750"),
                ("AXBRIDGE_LOG_LEVEL", "axbridge_core=trace"),
                ("AXBRIDGE_LOG_JSON", "ON"),
            ]),
        )
        .unwrap();

        assert_eq!(config.search.max_depth, 25);
        assert!(config.permission.prompt_on_start);
        assert_eq!(config.permission.cache_ttl_secs, 60);
        assert_eq!(config.transport.messaging_timeout_secs, Some(2.5));
        assert_eq!(config.transport.call_timeout_ms, Some(750));
        assert_eq!(config.logging.level, "axbridge_core=trace");
        assert!(config.logging.json);
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let err =
            apply_overrides(AxConfig::default(), lookup(&[("AXBRIDGE_SEARCH_MAX_DEPTH", "deep")]))
                .unwrap_err();
        assert!(matches!(err, InfraError::Config(ref msg) if msg.contains("AXBRIDGE_SEARCH_MAX_DEPTH")));
    }

    #[test]
    fn test_invalid_bool_is_config_error() {
        let err = apply_overrides(AxConfig::default(), lookup(&[("AXBRIDGE_LOG_JSON", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, InfraError::Config(_)));
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let err = apply_overrides(
            AxConfig::default(),
            lookup(&[("AXBRIDGE_MESSAGING_TIMEOUT_SECS", "-1")]),
        )
        .unwrap_err();
        assert!(matches!(err, InfraError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_unusable_timeout() {
        for secs in [-5.0, f32::NAN, f32::INFINITY] {
            let mut config = AxConfig::default();
            config.transport.messaging_timeout_secs = Some(secs);
            let err = validate(&config).unwrap_err();
            assert!(matches!(err, InfraError::Config(ref msg) if msg.contains("messaging_timeout_secs")));
        }

        let mut config = AxConfig::default();
        config.transport.messaging_timeout_secs = Some(0.0);
        assert!(validate(&config).is_ok());
        assert!(validate(&AxConfig::default()).is_ok());
    }

    #[test]
    fn test_parse_config_by_extension() {
        let toml = parse_config("[search]\nmax_depth = 3\n", Path::new("axbridge.toml")).unwrap();
        assert_eq!(toml.search.max_depth, 3);

        let json = parse_config(r#"{"logging": {"json": true}}"#, Path::new("axbridge.json")).unwrap();
        assert!(json.logging.json);

        assert!(parse_config("a: b", Path::new("axbridge.yaml")).is_err());
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Path::new("/nonexistent/axbridge.toml"));
        assert!(matches!(result, Err(InfraError::Config(_))));
    }
}
