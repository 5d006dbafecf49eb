//! Onboarding service - the create-account chain
//!
//! Steps run strictly in order, each consuming the previous step's output:
//! credentials → child account → onboarding session → deployment template →
//! published template. Identifiers are merged into the outcome as soon as
//! they exist, so a failure part-way still reports what was created on the
//! Partner API side. Nothing is rolled back and nothing is retried here.

use std::sync::Arc;

use onboarding_domain::{
    OnboardingError, OnboardingOutcome, OnboardingProgress, OnboardingStep, Result,
};
use tracing::{error, info, instrument, warn};

use crate::artifacts::ArtifactPublisher;
use crate::credentials::CredentialResolver;
use crate::partner::PartnerApiConnector;

/// Tunables for the onboarding chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingOptions {
    /// Appended to the customer name with a single space, when set.
    pub account_name_suffix: Option<String>,
    /// Prepended to the child account id to form the template key.
    pub template_key_prefix: String,
}

impl OnboardingOptions {
    /// Account name as registered with the Partner API.
    ///
    /// # Errors
    /// `InvalidInput` when `account_name` is blank.
    pub fn customer_name(&self, account_name: &str) -> Result<String> {
        let name = account_name.trim();
        if name.is_empty() {
            return Err(OnboardingError::InvalidInput("account_name is required".into()));
        }

        Ok(match self.account_name_suffix.as_deref().map(str::trim) {
            Some(suffix) if !suffix.is_empty() => format!("{name} {suffix}"),
            _ => name.to_string(),
        })
    }
}

/// A step that failed, with the error that stopped the chain
#[derive(Debug)]
pub struct StepFailure {
    /// Where the chain stopped.
    pub step: OnboardingStep,
    /// Why it stopped.
    pub error: OnboardingError,
}

impl StepFailure {
    fn at(step: OnboardingStep) -> impl FnOnce(OnboardingError) -> Self {
        move |error| Self { step, error }
    }
}

/// How the publish step ended when it did not fail outright
enum Published {
    Retrievable,
    Degraded,
}

/// Runs the onboarding chain for one customer at a time
pub struct OnboardingService {
    credentials: Arc<CredentialResolver>,
    connector: Arc<dyn PartnerApiConnector>,
    publisher: Arc<ArtifactPublisher>,
    options: OnboardingOptions,
}

impl OnboardingService {
    pub fn new(
        credentials: Arc<CredentialResolver>,
        connector: Arc<dyn PartnerApiConnector>,
        publisher: Arc<ArtifactPublisher>,
    ) -> Self {
        Self { credentials, connector, publisher, options: OnboardingOptions::default() }
    }

    pub fn with_options(mut self, options: OnboardingOptions) -> Self {
        self.options = options;
        self
    }

    /// Onboard `account_name` and report how far the chain got.
    ///
    /// Never returns an error: every failure is folded into a `FAILED`
    /// outcome that still carries the identifiers created before it.
    #[instrument(skip(self))]
    pub async fn onboard(&self, account_name: &str) -> OnboardingOutcome {
        let mut progress = OnboardingProgress::default();

        match self.run(account_name, &mut progress).await {
            Ok(Published::Retrievable) => {
                info!(
                    child_account_id = progress.child_account_id.as_deref(),
                    "onboarding completed"
                );
                progress.succeed()
            }
            Ok(Published::Degraded) => {
                warn!(
                    child_account_id = progress.child_account_id.as_deref(),
                    onboarding_id = progress.onboarding_id.as_deref(),
                    "onboarding succeeded remotely but the template is not retrievable"
                );
                progress.needs_investigation()
            }
            Err(StepFailure { step, error }) => {
                error!(
                    %step,
                    error = %error,
                    error_type = error.label(),
                    transient = error.is_transient(),
                    partner_operation = error.operation().map(tracing::field::display),
                    child_account_id = progress.child_account_id.as_deref(),
                    onboarding_id = progress.onboarding_id.as_deref(),
                    "onboarding aborted"
                );
                progress.fail(step)
            }
        }
    }

    async fn run(
        &self,
        account_name: &str,
        progress: &mut OnboardingProgress,
    ) -> std::result::Result<Published, StepFailure> {
        let customer_name = self
            .options
            .customer_name(account_name)
            .map_err(StepFailure::at(OnboardingStep::ValidateRequest))?;

        let credentials = self
            .credentials
            .credentials()
            .await
            .map_err(StepFailure::at(OnboardingStep::ResolveCredentials))?;
        let partner_account_id = credentials.partner_account_id().to_string();
        let partner = self
            .connector
            .connect(credentials)
            .map_err(StepFailure::at(OnboardingStep::ResolveCredentials))?;

        let child = partner
            .create_child_account(&partner_account_id, &customer_name)
            .await
            .map_err(StepFailure::at(OnboardingStep::CreateChildAccount))?;
        progress.record_child_account(&child);
        info!(child_account_id = %child.child_account_id, "child account created");

        let session = partner
            .initiate_onboarding(&child)
            .await
            .map_err(StepFailure::at(OnboardingStep::InitiateOnboarding))?;
        progress.record_session(&session);
        info!(onboarding_id = %session.onboarding_id, "onboarding initiated");

        let template = partner
            .fetch_deployment_template(&child)
            .await
            .map_err(StepFailure::at(OnboardingStep::FetchTemplate))?;
        let content = template.to_bytes().map_err(StepFailure::at(OnboardingStep::FetchTemplate))?;

        let key = format!("{}{}", self.options.template_key_prefix, child.child_account_id);
        let handle = self
            .publisher
            .publish(&content, &key)
            .await
            .map_err(StepFailure::at(OnboardingStep::PublishTemplate))?;

        Ok(match handle {
            Some(handle) => {
                progress.record_template_handle(&handle);
                Published::Retrievable
            }
            None => Published::Degraded,
        })
    }
}
