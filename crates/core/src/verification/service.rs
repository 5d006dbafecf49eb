//! Verification service - confirm a customer completed the deployment

use std::sync::Arc;

use onboarding_domain::{OnboardingError, OnboardingSession, Result, VerificationOutcome};
use tracing::{info, instrument, warn};

use crate::credentials::CredentialResolver;
use crate::partner::PartnerApiConnector;

/// Asks the Partner API whether an onboarding completed.
///
/// "Not yet deployed" and "Partner API unavailable" look the same from here,
/// so every failure collapses to [`VerificationOutcome::Unverified`]. The
/// caller retries out-of-band; there is no retry loop.
pub struct VerificationService {
    credentials: Arc<CredentialResolver>,
    connector: Arc<dyn PartnerApiConnector>,
}

impl VerificationService {
    pub fn new(credentials: Arc<CredentialResolver>, connector: Arc<dyn PartnerApiConnector>) -> Self {
        Self { credentials, connector }
    }

    /// Verify using identifiers stored from a previous onboarding.
    #[instrument(skip(self))]
    pub async fn verify(
        &self,
        child_account_id: &str,
        onboarding_id: &str,
        external_account_id: &str,
    ) -> VerificationOutcome {
        match OnboardingSession::from_stored(child_account_id, onboarding_id) {
            Ok(session) => self.verify_session(&session, external_account_id).await,
            Err(err) => {
                warn!(error = %err, "verification request rejected");
                VerificationOutcome::Unverified
            }
        }
    }

    /// Verify a session returned by a successful initiation.
    pub async fn verify_session(
        &self,
        session: &OnboardingSession,
        external_account_id: &str,
    ) -> VerificationOutcome {
        match self.confirm(session, external_account_id).await {
            Ok(true) => {
                info!(
                    child_account_id = %session.child_account_id,
                    onboarding_id = %session.onboarding_id,
                    "onboarding verified"
                );
                VerificationOutcome::Verified
            }
            Ok(false) => {
                warn!(
                    child_account_id = %session.child_account_id,
                    "partner API did not confirm onboarding"
                );
                VerificationOutcome::Unverified
            }
            Err(err) => {
                warn!(
                    child_account_id = %session.child_account_id,
                    error = %err,
                    error_type = err.label(),
                    transient = err.is_transient(),
                    "onboarding could not be verified"
                );
                VerificationOutcome::Unverified
            }
        }
    }

    async fn confirm(&self, session: &OnboardingSession, external_account_id: &str) -> Result<bool> {
        let external_account_id = external_account_id.trim();
        if external_account_id.is_empty() {
            return Err(OnboardingError::InvalidInput("account_id is required".into()));
        }

        let credentials = self.credentials.credentials().await?;
        let partner = self.connector.connect(credentials)?;
        partner.verify_onboarding(session, external_account_id).await
    }
}
