//! Secrets read from the platform keychain

use async_trait::async_trait;
use keyring::Entry;
use onboarding_core::SecretStore;
use onboarding_domain::{OnboardingError, Result, SecretValue};
use tracing::debug;

use crate::errors::IntoSecretError;

/// Looks references up as keychain entries under one service name
/// (macOS Keychain, Windows Credential Manager, Secret Service on Linux).
#[derive(Debug, Clone)]
pub struct KeyringSecretStore {
    service_name: String,
}

impl KeyringSecretStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn read(service_name: &str, reference: &str) -> Result<String> {
        let entry =
            Entry::new(service_name, reference).map_err(|e| e.into_secret_error(reference))?;
        entry.get_password().map_err(|e| e.into_secret_error(reference))
    }
}

#[async_trait]
impl SecretStore for KeyringSecretStore {
    async fn get_secret(&self, reference: &str) -> Result<SecretValue> {
        debug!(service = %self.service_name, key = %reference, "retrieving secret from keychain");

        let service_name = self.service_name.clone();
        let key = reference.to_string();
        // Keychain backends block on IPC.
        let raw = tokio::task::spawn_blocking(move || Self::read(&service_name, &key))
            .await
            .map_err(|e| OnboardingError::Internal(format!("keychain lookup panicked: {e}")))??;

        Ok(SecretValue::from_raw(raw))
    }
}
