//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `PARTNER_ONBOARDING_BASE_URL`: Partner API base URL
//! - `PARTNER_ONBOARDING_ACCOUNT_ID_REF`: secret reference for the partner account id
//! - `PARTNER_ONBOARDING_API_KEY_REF`: secret reference for the partner API key
//! - `PARTNER_ONBOARDING_ARTIFACT_ROOT`: directory templates are written to
//! - `PARTNER_ONBOARDING_ARTIFACT_BASE_URL`: public URL serving that directory
//! - `PARTNER_ONBOARDING_SIGNING_KEY_REF`: secret reference for the URL signing key
//!
//! Optional:
//! - `PARTNER_ONBOARDING_TIMEOUT_SECS` (default 30)
//! - `PARTNER_ONBOARDING_READ_ATTEMPTS` (default 3)
//! - `PARTNER_ONBOARDING_ACCOUNT_NAME_SUFFIX`
//! - `PARTNER_ONBOARDING_SECRET_BACKEND`: `env` or `keyring` (default `env`)
//! - `PARTNER_ONBOARDING_KEYRING_SERVICE` (default `partner-onboarding`)
//! - `PARTNER_ONBOARDING_TEMPLATE_KEY_PREFIX` (default empty)
//! - `PARTNER_ONBOARDING_URL_TTL_SECS` (default 3600)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./partner-onboarding.json` or `./partner-onboarding.toml`
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use onboarding_domain::constants::{
    DEFAULT_KEYRING_SERVICE, DEFAULT_READ_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_URL_TTL_SECS,
};
use onboarding_domain::{
    ArtifactSettings, Config, OnboardingError, PartnerApiSettings, Result, SecretBackend,
    SecretSettings,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `OnboardingError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `OnboardingError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let partner = PartnerApiSettings {
        base_url: env_var("PARTNER_ONBOARDING_BASE_URL")?,
        timeout_secs: env_parse("PARTNER_ONBOARDING_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
        read_attempts: env_parse("PARTNER_ONBOARDING_READ_ATTEMPTS", DEFAULT_READ_ATTEMPTS)?,
        account_name_suffix: env_optional("PARTNER_ONBOARDING_ACCOUNT_NAME_SUFFIX"),
    };

    let backend = match env_optional("PARTNER_ONBOARDING_SECRET_BACKEND") {
        Some(raw) => SecretBackend::from_str(&raw).map_err(OnboardingError::Config)?,
        None => SecretBackend::default(),
    };
    let secrets = SecretSettings {
        backend,
        partner_account_id_ref: env_var("PARTNER_ONBOARDING_ACCOUNT_ID_REF")?,
        partner_api_key_ref: env_var("PARTNER_ONBOARDING_API_KEY_REF")?,
        keyring_service: env_optional("PARTNER_ONBOARDING_KEYRING_SERVICE")
            .unwrap_or_else(|| DEFAULT_KEYRING_SERVICE.to_string()),
    };

    let artifacts = ArtifactSettings {
        root_dir: env_var("PARTNER_ONBOARDING_ARTIFACT_ROOT")?,
        public_base_url: env_var("PARTNER_ONBOARDING_ARTIFACT_BASE_URL")?,
        key_prefix: env_optional("PARTNER_ONBOARDING_TEMPLATE_KEY_PREFIX").unwrap_or_default(),
        url_ttl_secs: env_parse("PARTNER_ONBOARDING_URL_TTL_SECS", DEFAULT_URL_TTL_SECS)?,
        signing_key_ref: env_var("PARTNER_ONBOARDING_SIGNING_KEY_REF")?,
    };

    let config = Config { partner, secrets, artifacts };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `OnboardingError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(OnboardingError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            OnboardingError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| OnboardingError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: Config = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| OnboardingError::Config(format!("Invalid TOML format: {}", e)))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| OnboardingError::Config(format!("Invalid JSON format: {}", e)))?,
        _ => {
            return Err(OnboardingError::Config(format!(
                "Unsupported config format: {}",
                extension
            )))
        }
    };

    config.validate()?;
    Ok(config)
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] =
        ["config.json", "config.toml", "partner-onboarding.json", "partner-onboarding.toml"];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
        candidates.extend([cwd.join("../config.json"), cwd.join("../config.toml")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `OnboardingError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_optional(key).ok_or_else(|| {
        OnboardingError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Non-blank value of an optional environment variable
fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse an optional environment variable, using `default` when unset
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_optional(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| OnboardingError::Config(format!("Invalid value for {}: {}", key, e))),
        None => Ok(default),
    }
}
