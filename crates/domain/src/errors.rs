//! Error types used throughout the onboarding workflow

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Partner API call that produced an error.
///
/// Carried on every Partner API error so that logs and outcome reports can
/// say which link of the chain broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerOperation {
    /// `POST .../register_child`
    CreateChildAccount,
    /// `POST .../start`
    InitiateOnboarding,
    /// `GET .../aws/cloudformation_template`
    FetchDeploymentTemplate,
    /// `POST .../aws/verify`
    VerifyOnboarding,
}

crate::impl_status_conversions!(PartnerOperation {
    CreateChildAccount => "create_child_account",
    InitiateOnboarding => "initiate_onboarding",
    FetchDeploymentTemplate => "fetch_deployment_template",
    VerifyOnboarding => "verify_onboarding",
});

/// Main error type for partner onboarding
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OnboardingError {
    #[error("Secret not found: {reference}")]
    SecretNotFound { reference: String },

    #[error("Secret access denied for {reference}: {message}")]
    SecretAccessDenied { reference: String, message: String },

    #[error("Partner API {operation} failed with status {status}: {message}")]
    PartnerApi { operation: PartnerOperation, status: u16, message: String },

    #[error("Partner API unreachable during {operation}: {message}")]
    PartnerApiUnreachable { operation: PartnerOperation, message: String },

    #[error("Unexpected Partner API response during {operation}: {message}")]
    UnexpectedResponse { operation: PartnerOperation, message: String },

    #[error("Failed to publish artifact {key}: {message}")]
    ArtifactPublishFailed { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OnboardingError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SecretNotFound { .. } => "secret_not_found",
            Self::SecretAccessDenied { .. } => "secret_access_denied",
            Self::PartnerApi { .. } => "partner_api_error",
            Self::PartnerApiUnreachable { .. } => "partner_api_unreachable",
            Self::UnexpectedResponse { .. } => "unexpected_response",
            Self::ArtifactPublishFailed { .. } => "artifact_publish_failed",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether a later attempt could plausibly succeed without operator action.
    ///
    /// Transport failures, rate limiting and 5xx responses are transient;
    /// everything else is terminal. Callers decide whether to retry; nothing
    /// in this workspace retries a mutating call on their behalf.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::PartnerApiUnreachable { .. } => true,
            Self::PartnerApi { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }

    /// The Partner API call this error came from, if any.
    pub fn operation(&self) -> Option<PartnerOperation> {
        match self {
            Self::PartnerApi { operation, .. }
            | Self::PartnerApiUnreachable { operation, .. }
            | Self::UnexpectedResponse { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Result type alias for onboarding operations
pub type Result<T> = std::result::Result<T, OnboardingError>;
