//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use onboarding_core::{
    ArtifactPublisher, CredentialReferences, CredentialResolver, OnboardingOptions,
    OnboardingService, SecretStore, VerificationService,
};
use onboarding_domain::{
    Config, OnboardingOutcome, OnboardingProgress, OnboardingStep, SecretBackend,
};
use onboarding_infra::{
    EnvSecretStore, FilesystemArtifactStore, KeyringSecretStore, PartnerApiClientFactory,
    PartnerApiConfig, UrlSigner,
};
use tracing::{error, info};

/// Holds configuration and the long-lived collaborators.
///
/// One context per process: the credential resolver caches the partner
/// credentials for every invocation served by this process.
pub struct AppContext {
    /// Configuration this context was built from.
    pub config: Config,
    credentials: Arc<CredentialResolver>,
    connector: Arc<PartnerApiClientFactory>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let store: Arc<dyn SecretStore> = match config.secrets.backend {
            SecretBackend::Env => Arc::new(EnvSecretStore::new()),
            SecretBackend::Keyring => {
                Arc::new(KeyringSecretStore::new(config.secrets.keyring_service.clone()))
            }
        };
        info!(backend = %config.secrets.backend, "secret store selected");

        let credentials = Arc::new(CredentialResolver::new(
            store,
            CredentialReferences {
                partner_account_id_ref: config.secrets.partner_account_id_ref.clone(),
                partner_api_key_ref: config.secrets.partner_api_key_ref.clone(),
            },
        ));
        let connector =
            Arc::new(PartnerApiClientFactory::new(PartnerApiConfig::from(&config.partner)));

        Self { config, credentials, connector }
    }

    /// Onboarding service with a publisher bound to the configured store.
    ///
    /// # Errors
    /// When the URL signing key cannot be resolved or the artifact store
    /// settings are invalid.
    pub async fn onboarding_service(&self) -> anyhow::Result<OnboardingService> {
        let artifacts = &self.config.artifacts;

        let signing_key = self
            .credentials
            .resolve(&artifacts.signing_key_ref)
            .await?
            .into_text(&artifacts.signing_key_ref)?;
        let signer = UrlSigner::new(signing_key.into_bytes()).context("invalid URL signing key")?;
        let store = FilesystemArtifactStore::new(&artifacts.root_dir, &artifacts.public_base_url, signer)?;
        let publisher = ArtifactPublisher::with_ttl(
            Arc::new(store),
            Duration::from_secs(artifacts.url_ttl_secs),
        );

        Ok(OnboardingService::new(self.credentials.clone(), self.connector.clone(), Arc::new(publisher))
            .with_options(self.onboarding_options()))
    }

    fn onboarding_options(&self) -> OnboardingOptions {
        OnboardingOptions {
            account_name_suffix: self.config.partner.account_name_suffix.clone(),
            template_key_prefix: self.config.artifacts.key_prefix.clone(),
        }
    }

    pub fn verification_service(&self) -> VerificationService {
        VerificationService::new(self.credentials.clone(), self.connector.clone())
    }

    /// Onboard `account_name`.
    ///
    /// The request is validated before anything is assembled; a publisher
    /// setup failure is reported as a failed `prepare_artifact_store` step
    /// rather than aborting the invocation.
    pub async fn onboard(&self, account_name: &str) -> OnboardingOutcome {
        if let Err(err) = self.onboarding_options().customer_name(account_name) {
            error!(error = %err, error_type = err.label(), "onboarding request rejected");
            return OnboardingProgress::default().fail(OnboardingStep::ValidateRequest);
        }

        match self.onboarding_service().await {
            Ok(service) => service.onboard(account_name).await,
            Err(err) => {
                error!(error = %format!("{err:#}"), "artifact publishing is not available");
                OnboardingProgress::default().fail(OnboardingStep::PrepareArtifactStore)
            }
        }
    }
}
