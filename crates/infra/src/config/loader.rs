//! Configuration loader
//!
//! Loads the API configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SALESDESK_API_BASE_URL`: Backend base URL
//! - `SALESDESK_API_TIMEOUT_SECS`: Request timeout in seconds (optional)
//! - `SALESDESK_HTTP_MAX_ATTEMPTS`: Attempts per request (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./salesdesk.json` or `./salesdesk.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use salesdesk_domain::{ApiConfig, CrmError, Result};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL is
/// missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CrmError::Config` if configuration cannot be loaded from either
/// source or the file format is invalid.
pub fn load() -> Result<ApiConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `SALESDESK_API_BASE_URL` must be present; the timeout and attempt count
/// fall back to their defaults when unset.
///
/// # Errors
/// Returns `CrmError::Config` if the base URL is missing or a numeric
/// variable has an invalid value.
pub fn load_from_env() -> Result<ApiConfig> {
    let base_url = env_var("SALESDESK_API_BASE_URL")?;

    let defaults = ApiConfig::default();
    let timeout_secs = env_parse("SALESDESK_API_TIMEOUT_SECS", defaults.timeout_secs)?;
    let max_attempts = env_parse("SALESDESK_HTTP_MAX_ATTEMPTS", defaults.max_attempts)?;

    Ok(ApiConfig { base_url, timeout_secs, max_attempts })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CrmError::Config` if no file is found or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ApiConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CrmError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CrmError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CrmError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<ApiConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CrmError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CrmError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(CrmError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("salesdesk.json"),
            cwd.join("salesdesk.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("salesdesk.json"),
                exe_dir.join("salesdesk.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| CrmError::Config(format!("Missing required environment variable: {key}")))
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|e| CrmError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("SALESDESK_API_BASE_URL", "https://crm.example.com");
        std::env::set_var("SALESDESK_API_TIMEOUT_SECS", "15");
        std::env::set_var("SALESDESK_HTTP_MAX_ATTEMPTS", "5");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.base_url, "https://crm.example.com");
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.max_attempts, 5);

        std::env::remove_var("SALESDESK_API_BASE_URL");
        std::env::remove_var("SALESDESK_API_TIMEOUT_SECS");
        std::env::remove_var("SALESDESK_HTTP_MAX_ATTEMPTS");
    }

    #[test]
    fn load_from_env_uses_defaults_for_optional_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("SALESDESK_API_BASE_URL", "https://crm.example.com");
        std::env::remove_var("SALESDESK_API_TIMEOUT_SECS");
        std::env::remove_var("SALESDESK_HTTP_MAX_ATTEMPTS");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_attempts, 3);

        std::env::remove_var("SALESDESK_API_BASE_URL");
    }

    #[test]
    fn load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::remove_var("SALESDESK_API_BASE_URL");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CrmError::Config(_)));
    }

    #[test]
    fn load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("SALESDESK_API_BASE_URL", "https://crm.example.com");
        std::env::set_var("SALESDESK_API_TIMEOUT_SECS", "not-a-number");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CrmError::Config(_)));

        std::env::remove_var("SALESDESK_API_BASE_URL");
        std::env::remove_var("SALESDESK_API_TIMEOUT_SECS");
    }

    #[test]
    fn load_from_file_json() {
        let json_content = r#"{
            "base_url": "https://crm.example.com",
            "timeout_secs": 20,
            "max_attempts": 4
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("config from json");
        assert_eq!(config.base_url, "https://crm.example.com");
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.max_attempts, 4);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn load_from_file_toml_with_defaults() {
        let toml_content = r#"
base_url = "https://crm.example.com"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("config from toml");
        assert_eq!(config.base_url, "https://crm.example.com");
        assert_eq!(config.timeout_secs, 30);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/config.json"))).unwrap_err();
        assert!(matches!(err, CrmError::Config(_)));
    }

    #[test]
    fn load_from_file_invalid_json() {
        let invalid_json = r#"{ "this is": "not valid json" "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_json.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        assert!(load_from_file(Some(path.clone())).is_err());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn parse_config_rejects_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(result.is_err());
    }
}
