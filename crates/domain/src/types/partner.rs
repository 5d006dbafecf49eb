//! Identifiers and documents produced by the Partner API

use serde::{Deserialize, Serialize};

use crate::errors::{OnboardingError, Result};

/// A customer sub-account created under the partner account.
///
/// The Partner API is the source of truth; this is only a handle to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildAccount {
    /// Account id issued by the Partner API.
    pub child_account_id: String,
}

impl ChildAccount {
    pub fn new(child_account_id: impl Into<String>) -> Self {
        Self { child_account_id: child_account_id.into() }
    }
}

/// One in-progress onboarding for a child account.
///
/// `onboarding_id` is opaque and issued by the Partner API's start call.
/// Verification only accepts a session, so an id that never came back from
/// a successful initiation (or from a caller that stored one) cannot reach
/// the verify endpoint by accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingSession {
    /// Child account the session belongs to.
    pub child_account_id: String,
    /// Session id issued by the start call.
    pub onboarding_id: String,
}

impl OnboardingSession {
    pub fn new(child_account_id: impl Into<String>, onboarding_id: impl Into<String>) -> Self {
        Self { child_account_id: child_account_id.into(), onboarding_id: onboarding_id.into() }
    }

    /// Rebuild a session from identifiers the caller stored after a previous
    /// onboarding. Blank identifiers are rejected.
    pub fn from_stored(child_account_id: &str, onboarding_id: &str) -> Result<Self> {
        let child = child_account_id.trim();
        let onboarding = onboarding_id.trim();

        if child.is_empty() {
            return Err(OnboardingError::InvalidInput("child_account_id is required".into()));
        }
        if onboarding.is_empty() {
            return Err(OnboardingError::InvalidInput("onboarding_id is required".into()));
        }

        Ok(Self::new(child, onboarding))
    }
}

/// Account-specific deployment template.
///
/// The document format belongs to the Partner API; it is carried as opaque
/// JSON and fetched fresh for every onboarding attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentTemplate(serde_json::Value);

impl DeploymentTemplate {
    pub fn new(document: serde_json::Value) -> Self {
        Self(document)
    }

    /// Serialised template bytes, ready to publish.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.0).map_err(|e| {
            OnboardingError::Internal(format!("Failed to serialise deployment template: {e}"))
        })
    }
}
