//! Port interfaces for secret storage

use async_trait::async_trait;
use onboarding_domain::{Result, SecretValue};

/// Read-only access to a secret store.
///
/// Implementations map their backend failures onto
/// `OnboardingError::SecretNotFound` and `OnboardingError::SecretAccessDenied`.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Look up a secret by its opaque parameter reference
    async fn get_secret(&self, reference: &str) -> Result<SecretValue>;
}
