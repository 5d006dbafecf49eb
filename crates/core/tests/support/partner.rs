//! Scripted Partner API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use onboarding_core::{PartnerApi, PartnerApiConnector};
use onboarding_domain::{
    ChildAccount, DeploymentTemplate, OnboardingError, OnboardingSession, PartnerCredentials,
    PartnerOperation, Result as DomainResult,
};
use serde_json::json;

/// Partner API fake.
///
/// Each create call mints a fresh id (`c-1`, `c-2`, ...), mirroring the real
/// API's lack of idempotency. Any operation can be scripted to fail.
pub struct ScriptedPartnerApi {
    next_child: AtomicUsize,
    failure: Mutex<Option<(PartnerOperation, OnboardingError)>>,
    verified: Mutex<bool>,
    created_names: Mutex<Vec<String>>,
    calls: Mutex<Vec<PartnerOperation>>,
}

impl ScriptedPartnerApi {
    pub fn new() -> Self {
        Self {
            next_child: AtomicUsize::new(1),
            failure: Mutex::new(None),
            verified: Mutex::new(true),
            created_names: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make `operation` fail with `error` on every call.
    pub fn fail_on(&self, operation: PartnerOperation, error: OnboardingError) {
        *self.failure.lock().unwrap() = Some((operation, error));
    }

    /// Make `operation` fail with an HTTP 500.
    pub fn fail_with_server_error(&self, operation: PartnerOperation) {
        self.fail_on(
            operation,
            OnboardingError::PartnerApi {
                operation,
                status: 500,
                message: "Error: internal.".into(),
            },
        );
    }

    pub fn set_verified(&self, verified: bool) {
        *self.verified.lock().unwrap() = verified;
    }

    pub fn created_names(&self) -> Vec<String> {
        self.created_names.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<PartnerOperation> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, operation: PartnerOperation) -> DomainResult<()> {
        self.calls.lock().unwrap().push(operation);
        match &*self.failure.lock().unwrap() {
            Some((failing, error)) if *failing == operation => Err(error.clone()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PartnerApi for ScriptedPartnerApi {
    async fn create_child_account(
        &self,
        _partner_account_id: &str,
        account_name: &str,
    ) -> DomainResult<ChildAccount> {
        self.enter(PartnerOperation::CreateChildAccount)?;
        self.created_names.lock().unwrap().push(account_name.to_string());
        let n = self.next_child.fetch_add(1, Ordering::SeqCst);
        Ok(ChildAccount::new(format!("c-{n}")))
    }

    async fn initiate_onboarding(&self, child: &ChildAccount) -> DomainResult<OnboardingSession> {
        self.enter(PartnerOperation::InitiateOnboarding)?;
        Ok(OnboardingSession::new(
            child.child_account_id.clone(),
            format!("o-{}", child.child_account_id),
        ))
    }

    async fn fetch_deployment_template(
        &self,
        child: &ChildAccount,
    ) -> DomainResult<DeploymentTemplate> {
        self.enter(PartnerOperation::FetchDeploymentTemplate)?;
        Ok(DeploymentTemplate::new(json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Description": format!("Partner access for {}", child.child_account_id),
        })))
    }

    async fn verify_onboarding(
        &self,
        _session: &OnboardingSession,
        _external_account_id: &str,
    ) -> DomainResult<bool> {
        self.enter(PartnerOperation::VerifyOnboarding)?;
        Ok(*self.verified.lock().unwrap())
    }
}

/// Connector handing out the shared scripted API and recording which
/// partner account each connection was made for.
pub struct ScriptedConnector {
    api: Arc<ScriptedPartnerApi>,
    connections: Mutex<Vec<String>>,
}

impl ScriptedConnector {
    pub fn new(api: Arc<ScriptedPartnerApi>) -> Self {
        Self { api, connections: Mutex::new(Vec::new()) }
    }

    pub fn connections(&self) -> Vec<String> {
        self.connections.lock().unwrap().clone()
    }
}

impl PartnerApiConnector for ScriptedConnector {
    fn connect(&self, credentials: PartnerCredentials) -> DomainResult<Arc<dyn PartnerApi>> {
        self.connections.lock().unwrap().push(credentials.partner_account_id().to_string());
        Ok(self.api.clone())
    }
}
