//! Port interfaces for the Partner API
//!
//! The infra crate provides the HTTP implementation; tests substitute
//! scripted fakes.

use std::sync::Arc;

use async_trait::async_trait;
use onboarding_domain::{
    ChildAccount, DeploymentTemplate, OnboardingSession, PartnerCredentials, Result,
};

/// Calls against the Partner API made on behalf of one set of credentials
#[async_trait]
pub trait PartnerApi: Send + Sync {
    /// Create a child account under `partner_account_id`.
    ///
    /// Not idempotent: two calls with the same name create two accounts.
    async fn create_child_account(
        &self,
        partner_account_id: &str,
        account_name: &str,
    ) -> Result<ChildAccount>;

    /// Start onboarding for a previously created child account.
    async fn initiate_onboarding(&self, child: &ChildAccount) -> Result<OnboardingSession>;

    /// Fetch the account-specific deployment template.
    async fn fetch_deployment_template(&self, child: &ChildAccount) -> Result<DeploymentTemplate>;

    /// Ask the Partner API whether the customer completed the deployment.
    ///
    /// `Ok(true)` only on an explicit success status. Errors mean "could not
    /// confirm", never "confirmed false".
    async fn verify_onboarding(
        &self,
        session: &OnboardingSession,
        external_account_id: &str,
    ) -> Result<bool>;
}

/// Builds a [`PartnerApi`] client from resolved credentials
pub trait PartnerApiConnector: Send + Sync {
    /// # Errors
    /// Client-construction failures; callers treat them as fatal.
    fn connect(&self, credentials: PartnerCredentials) -> Result<Arc<dyn PartnerApi>>;
}
