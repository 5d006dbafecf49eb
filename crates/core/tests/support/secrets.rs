//! In-memory secret store

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use onboarding_core::SecretStore;
use onboarding_domain::{OnboardingError, Result as DomainResult, SecretValue};

/// Secret store backed by a map; missing references are `SecretNotFound`.
#[derive(Default)]
pub struct InMemorySecretStore {
    values: HashMap<String, SecretValue>,
    denied: Vec<String>,
    reads: AtomicUsize,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, reference: &str, value: &str) -> Self {
        self.values.insert(reference.to_string(), SecretValue::Text(value.to_string()));
        self
    }

    pub fn with_structured(mut self, reference: &str, value: serde_json::Value) -> Self {
        self.values.insert(reference.to_string(), SecretValue::Structured(value));
        self
    }

    /// Reads of `reference` fail with `SecretAccessDenied`.
    pub fn deny(mut self, reference: &str) -> Self {
        self.denied.push(reference.to_string());
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get_secret(&self, reference: &str) -> DomainResult<SecretValue> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if self.denied.iter().any(|r| r == reference) {
            return Err(OnboardingError::SecretAccessDenied {
                reference: reference.to_string(),
                message: "not authorized".into(),
            });
        }

        self.values
            .get(reference)
            .cloned()
            .ok_or_else(|| OnboardingError::SecretNotFound { reference: reference.to_string() })
    }
}
