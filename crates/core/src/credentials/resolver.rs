//! Credential resolver - reads partner credentials once per process

use std::sync::Arc;

use onboarding_domain::{PartnerCredentials, Result, SecretValue};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::ports::SecretStore;

/// Parameter references naming the partner credentials in the secret store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialReferences {
    /// Reference to the partner account id.
    pub partner_account_id_ref: String,
    /// Reference to the partner API key.
    pub partner_api_key_ref: String,
}

/// Resolves partner credentials through a [`SecretStore`].
///
/// The first successful resolution is cached for the lifetime of this
/// resolver (a warm process); failures are not cached. Build one resolver per
/// partner/region configuration and never share it across configurations.
pub struct CredentialResolver {
    store: Arc<dyn SecretStore>,
    references: CredentialReferences,
    cached: OnceCell<PartnerCredentials>,
}

impl CredentialResolver {
    pub fn new(store: Arc<dyn SecretStore>, references: CredentialReferences) -> Self {
        Self { store, references, cached: OnceCell::new() }
    }

    /// Read a single parameter from the backing store, uncached.
    ///
    /// # Errors
    /// `SecretNotFound` or `SecretAccessDenied` when the store cannot produce
    /// the value.
    pub async fn resolve(&self, reference: &str) -> Result<SecretValue> {
        debug!(reference, "resolving secret parameter");
        self.store.get_secret(reference).await
    }

    /// Partner credentials, resolved on first use and reused afterwards.
    ///
    /// # Errors
    /// Propagates store failures, and `Config` when either secret holds a
    /// structured value instead of text.
    #[instrument(skip(self))]
    pub async fn credentials(&self) -> Result<PartnerCredentials> {
        let credentials = self.cached.get_or_try_init(|| self.fetch()).await?;
        Ok(credentials.clone())
    }

    async fn fetch(&self) -> Result<PartnerCredentials> {
        let refs = &self.references;

        let account_id = self
            .resolve(&refs.partner_account_id_ref)
            .await?
            .into_text(&refs.partner_account_id_ref)?;
        let api_key =
            self.resolve(&refs.partner_api_key_ref).await?.into_text(&refs.partner_api_key_ref)?;

        info!(partner_account_id = %account_id.trim(), "partner credentials resolved");
        Ok(PartnerCredentials::new(account_id.trim(), api_key.trim()))
    }
}
