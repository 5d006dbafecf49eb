//! Secrets read from process environment variables

use async_trait::async_trait;
use onboarding_core::SecretStore;
use onboarding_domain::{OnboardingError, Result, SecretValue};
use tracing::debug;

use crate::errors::IntoSecretError;

/// Treats each reference as the name of an environment variable.
///
/// Values that parse as a JSON object become structured secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn get_secret(&self, reference: &str) -> Result<SecretValue> {
        if reference.trim().is_empty() {
            return Err(OnboardingError::Config("secret reference is empty".into()));
        }

        debug!(variable = %reference, "reading secret from environment");

        let raw = std::env::var(reference).map_err(|err| err.into_secret_error(reference))?;
        if raw.trim().is_empty() {
            return Err(OnboardingError::SecretNotFound { reference: reference.to_string() });
        }

        Ok(SecretValue::from_raw(raw))
    }
}
