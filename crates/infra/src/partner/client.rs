//! Partner API client
//!
//! One client per set of resolved credentials. Mutating calls are sent
//! exactly once; only the template download goes through the retrying
//! transport.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use onboarding_core::{PartnerApi, PartnerApiConnector};
use onboarding_domain::{
    ChildAccount, DeploymentTemplate, OnboardingError, OnboardingSession, PartnerApiSettings,
    PartnerCredentials, PartnerOperation, Result,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::errors::describe_error_body;
use crate::errors::InfraError;
use crate::http::{HttpClient, TransportError};

/// Connection settings for [`PartnerApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerApiConfig {
    /// Base URL, e.g. `https://api.partner.example`
    pub base_url: String,
    /// Transport timeout for each request
    pub timeout: Duration,
    /// Total attempts for the template download
    pub read_attempts: usize,
}

impl From<&PartnerApiSettings> for PartnerApiConfig {
    fn from(settings: &PartnerApiSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            read_attempts: settings.read_attempts,
        }
    }
}

/// `Authorization` header value for an API key.
///
/// Deterministic and free of side effects: `"Basic " + base64(api_key)`.
pub fn build_auth_header(api_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(api_key.as_bytes()))
}

/// `User-Agent` sent with every Partner API request
pub const USER_AGENT: &str = concat!("partner-onboarding/", env!("CARGO_PKG_VERSION"));

/// HTTP implementation of the [`PartnerApi`] port
pub struct PartnerApiClient {
    http: HttpClient,
    base_url: Url,
}

impl PartnerApiClient {
    /// Build a client that authenticates every request with `credentials`.
    ///
    /// # Errors
    /// `Config` when the base URL is invalid or the HTTP client cannot be
    /// built.
    pub fn new(config: &PartnerApiConfig, credentials: &PartnerCredentials) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(InfraError::from)?;
        if base_url.cannot_be_a_base() {
            return Err(OnboardingError::Config(format!(
                "Partner API base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let mut auth = HeaderValue::from_str(&build_auth_header(credentials.partner_api_key()))
            .map_err(|_| OnboardingError::Config("Partner API key is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.read_attempts)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, account_id: &str, tail: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| OnboardingError::Config("Partner API base URL cannot carry a path".into()))?
            .pop_if_empty()
            .push("org")
            .push(account_id)
            .extend(["partners", "onboarding"])
            .extend(tail);
        Ok(url)
    }

    /// Read the body of a response, turning error statuses into `PartnerApi`.
    async fn read_json(&self, operation: PartnerOperation, response: Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await.map_err(|err| transport_failure(operation, err.into()))?;

        if !status.is_success() {
            let message = describe_error_body(status, &body);
            warn!(%operation, status = status.as_u16(), %message, "Partner API returned an error");
            return Err(OnboardingError::PartnerApi { operation, status: status.as_u16(), message });
        }

        serde_json::from_str(&body).map_err(|err| OnboardingError::UnexpectedResponse {
            operation,
            message: format!("response body is not JSON: {err}"),
        })
    }
}

#[async_trait]
impl PartnerApi for PartnerApiClient {
    #[instrument(skip(self))]
    async fn create_child_account(
        &self,
        partner_account_id: &str,
        account_name: &str,
    ) -> Result<ChildAccount> {
        let operation = PartnerOperation::CreateChildAccount;
        let url = self.endpoint(partner_account_id, &["register_child"])?;

        let request = self.http.request(Method::POST, url).json(&json!({ "company": account_name }));
        let response =
            self.http.send_once(request).await.map_err(|err| transport_failure(operation, err))?;
        let body = self.read_json(operation, response).await?;

        let child_account_id = identifier(&body, "org_id", operation)?;
        info!(%child_account_id, "child account registered");
        Ok(ChildAccount::new(child_account_id))
    }

    #[instrument(skip(self), fields(child_account_id = %child.child_account_id))]
    async fn initiate_onboarding(&self, child: &ChildAccount) -> Result<OnboardingSession> {
        let operation = PartnerOperation::InitiateOnboarding;
        let url = self.endpoint(&child.child_account_id, &["start"])?;

        let response = self
            .http
            .send_once(self.http.request(Method::POST, url))
            .await
            .map_err(|err| transport_failure(operation, err))?;
        let body = self.read_json(operation, response).await?;

        let onboarding_id = identifier(&body, "onboarding_id", operation)?;
        info!(%onboarding_id, "onboarding started");
        Ok(OnboardingSession::new(child.child_account_id.clone(), onboarding_id))
    }

    #[instrument(skip(self), fields(child_account_id = %child.child_account_id))]
    async fn fetch_deployment_template(&self, child: &ChildAccount) -> Result<DeploymentTemplate> {
        let operation = PartnerOperation::FetchDeploymentTemplate;
        let url = self.endpoint(&child.child_account_id, &["aws", "cloudformation_template"])?;

        let response = self
            .http
            .send(self.http.request(Method::GET, url))
            .await
            .map_err(|err| transport_failure(operation, err))?;
        let mut body = self.read_json(operation, response).await?;

        match body.get_mut("template").map(Value::take) {
            Some(template) if !template.is_null() => {
                debug!("deployment template downloaded");
                Ok(DeploymentTemplate::new(template))
            }
            _ => Err(OnboardingError::UnexpectedResponse {
                operation,
                message: "response has no template field".into(),
            }),
        }
    }

    #[instrument(skip(self), fields(child_account_id = %session.child_account_id))]
    async fn verify_onboarding(
        &self,
        session: &OnboardingSession,
        external_account_id: &str,
    ) -> Result<bool> {
        let operation = PartnerOperation::VerifyOnboarding;
        let url = self.endpoint(&session.child_account_id, &["aws", "verify"])?;

        let request = self.http.request(Method::POST, url).json(&json!({
            "onboarding_id": session.onboarding_id,
            "account_id": external_account_id,
        }));
        let response =
            self.http.send_once(request).await.map_err(|err| transport_failure(operation, err))?;

        if response.status().is_success() {
            return Ok(true);
        }

        // Error statuses go through the shared body classification.
        self.read_json(operation, response).await.map(|_| false)
    }
}

/// Builds a [`PartnerApiClient`] once credentials are known
#[derive(Debug, Clone)]
pub struct PartnerApiClientFactory {
    config: PartnerApiConfig,
}

impl PartnerApiClientFactory {
    pub fn new(config: PartnerApiConfig) -> Self {
        Self { config }
    }
}

impl PartnerApiConnector for PartnerApiClientFactory {
    fn connect(&self, credentials: PartnerCredentials) -> Result<Arc<dyn PartnerApi>> {
        Ok(Arc::new(PartnerApiClient::new(&self.config, &credentials)?))
    }
}

fn transport_failure(operation: PartnerOperation, err: TransportError) -> OnboardingError {
    OnboardingError::PartnerApiUnreachable { operation, message: err.to_string() }
}

/// Pull an identifier out of a success body; the API sends strings or numbers.
fn identifier(body: &Value, field: &str, operation: PartnerOperation) -> Result<String> {
    match body.get(field) {
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(id.trim().to_string()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(OnboardingError::UnexpectedResponse {
            operation,
            message: format!("response has no usable {field}"),
        }),
    }
}
