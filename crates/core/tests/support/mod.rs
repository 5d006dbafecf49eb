//! Shared test helpers for `onboarding-core` integration tests.
//!
//! In-memory fakes for every core port so the flow tests can script
//! failures at any step and inspect what was written where.

#![allow(dead_code)]

pub mod artifacts;
pub mod partner;
pub mod secrets;

use std::sync::Arc;
use std::time::Duration;

use onboarding_core::{
    ArtifactPublisher, CredentialReferences, CredentialResolver, OnboardingOptions,
    OnboardingService, VerificationService,
};

pub use artifacts::InMemoryArtifactStore;
pub use partner::{ScriptedConnector, ScriptedPartnerApi};
pub use secrets::InMemorySecretStore;

pub const ACCOUNT_ID_REF: &str = "/partner/org-id";
pub const API_KEY_REF: &str = "/partner/api-key";
pub const PARTNER_ACCOUNT_ID: &str = "org-42";
pub const PARTNER_API_KEY: &str = "key-abc";
pub const KEY_PREFIX: &str = "templates/";

/// Fakes wired into real services
pub struct Harness {
    pub secrets: Arc<InMemorySecretStore>,
    pub partner: Arc<ScriptedPartnerApi>,
    pub connector: Arc<ScriptedConnector>,
    pub artifacts: Arc<InMemoryArtifactStore>,
    pub options: OnboardingOptions,
    pub url_ttl: Duration,
}

impl Harness {
    /// Harness with valid credentials and a cooperative Partner API.
    pub fn new() -> Self {
        let secrets = Arc::new(
            InMemorySecretStore::new()
                .with_text(ACCOUNT_ID_REF, PARTNER_ACCOUNT_ID)
                .with_text(API_KEY_REF, PARTNER_API_KEY),
        );
        let partner = Arc::new(ScriptedPartnerApi::new());
        let connector = Arc::new(ScriptedConnector::new(Arc::clone(&partner)));

        Self {
            secrets,
            partner,
            connector,
            artifacts: Arc::new(InMemoryArtifactStore::new()),
            options: OnboardingOptions {
                account_name_suffix: None,
                template_key_prefix: KEY_PREFIX.to_string(),
            },
            url_ttl: Duration::from_secs(3600),
        }
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.options.account_name_suffix = Some(suffix.to_string());
        self
    }

    pub fn with_url_ttl(mut self, url_ttl: Duration) -> Self {
        self.url_ttl = url_ttl;
        self
    }

    pub fn with_secrets(mut self, secrets: InMemorySecretStore) -> Self {
        self.secrets = Arc::new(secrets);
        self
    }

    pub fn resolver(&self) -> Arc<CredentialResolver> {
        Arc::new(CredentialResolver::new(
            self.secrets.clone(),
            CredentialReferences {
                partner_account_id_ref: ACCOUNT_ID_REF.to_string(),
                partner_api_key_ref: API_KEY_REF.to_string(),
            },
        ))
    }

    pub fn onboarding(&self) -> OnboardingService {
        OnboardingService::new(
            self.resolver(),
            self.connector.clone(),
            Arc::new(ArtifactPublisher::with_ttl(self.artifacts.clone(), self.url_ttl)),
        )
        .with_options(self.options.clone())
    }

    pub fn verification(&self) -> VerificationService {
        VerificationService::new(self.resolver(), self.connector.clone())
    }
}
