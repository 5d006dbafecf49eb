//! Configuration structures
//!
//! Loaded by `onboarding_infra::config` from the environment or a JSON/TOML
//! file. Secret material is never stored here, only references to it.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_KEYRING_SERVICE, DEFAULT_READ_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_URL_TTL_SECS, MAX_URL_TTL_SECS,
};
use crate::errors::{OnboardingError, Result};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Partner API endpoint and transport settings.
    pub partner: PartnerApiSettings,
    /// Where the partner credentials are read from.
    pub secrets: SecretSettings,
    /// Where templates are published.
    pub artifacts: ArtifactSettings,
}

impl Config {
    /// Reject values no invocation could work with.
    ///
    /// # Errors
    /// `Config` for a zero request timeout, or a URL validity outside
    /// `1..=MAX_URL_TTL_SECS`.
    pub fn validate(&self) -> Result<()> {
        if self.partner.timeout_secs == 0 {
            return Err(OnboardingError::Config("partner.timeout_secs must be positive".into()));
        }
        if !(1..=MAX_URL_TTL_SECS).contains(&self.artifacts.url_ttl_secs) {
            return Err(OnboardingError::Config(format!(
                "artifacts.url_ttl_secs must be between 1 and {MAX_URL_TTL_SECS}, got {}",
                self.artifacts.url_ttl_secs
            )));
        }
        Ok(())
    }
}

/// Partner API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerApiSettings {
    /// Base URL without trailing `/org` segment, e.g. `https://api.partner.example`
    pub base_url: String,
    /// Transport timeout per request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts for idempotent reads. Mutating calls are always sent once.
    #[serde(default = "default_read_attempts")]
    pub read_attempts: usize,
    /// Appended to every customer account name, e.g. `c/o Reseller Inc`.
    #[serde(default)]
    pub account_name_suffix: Option<String>,
}

/// Where partner credentials come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretBackend {
    /// References name environment variables.
    #[default]
    Env,
    /// References name OS keyring entries under `keyring_service`.
    Keyring,
}

crate::impl_status_conversions!(SecretBackend {
    Env => "env",
    Keyring => "keyring",
});

/// Secret references for the partner account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretSettings {
    /// Secret store the references are resolved against.
    #[serde(default)]
    pub backend: SecretBackend,
    /// Reference to the partner account id.
    pub partner_account_id_ref: String,
    /// Reference to the partner API key.
    pub partner_api_key_ref: String,
    /// Keyring service name, used by the `keyring` backend.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

/// Template publishing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSettings {
    /// Directory the filesystem artifact store writes under.
    pub root_dir: String,
    /// Public URL that serves `root_dir`.
    pub public_base_url: String,
    /// Prefix prepended to the child account id to form the artifact key.
    #[serde(default)]
    pub key_prefix: String,
    /// Validity of a published template URL, in seconds.
    #[serde(default = "default_url_ttl_secs")]
    pub url_ttl_secs: u64,
    /// Secret reference for the URL signing key.
    pub signing_key_ref: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_read_attempts() -> usize {
    DEFAULT_READ_ATTEMPTS
}

fn default_keyring_service() -> String {
    DEFAULT_KEYRING_SERVICE.to_string()
}

fn default_url_ttl_secs() -> u64 {
    DEFAULT_URL_TTL_SECS
}
