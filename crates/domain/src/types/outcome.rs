//! Onboarding and verification outcomes
//!
//! The onboarding chain creates real remote resources before it can fail, so
//! the outcome always carries whatever identifiers were discovered, together
//! with a three-state status. Verification has no "confirmed negative":
//! anything short of an explicit success is `Unverified`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::artifact::PublishedArtifactHandle;
use super::partner::{ChildAccount, OnboardingSession};

/// Final status of an onboarding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnboardingStatus {
    /// Every remote call succeeded and the template is retrievable.
    Success,
    /// Remote onboarding succeeded but the template handle could not be
    /// issued. The child account and session are real; do not retry blindly.
    NeedsInvestigation,
    /// A step failed; see the accumulated identifiers for what exists.
    Failed,
}

crate::impl_status_conversions!(OnboardingStatus {
    Success => "SUCCESS",
    NeedsInvestigation => "NEEDS_INVESTIGATION",
    Failed => "FAILED",
});

/// Steps of the onboarding chain, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    /// The account name was checked.
    ValidateRequest,
    /// The artifact store and URL signer were assembled.
    PrepareArtifactStore,
    /// Partner credentials were read and a client was built.
    ResolveCredentials,
    /// The child account was registered.
    CreateChildAccount,
    /// An onboarding session was started for the child account.
    InitiateOnboarding,
    /// The deployment template was downloaded.
    FetchTemplate,
    /// The template was written and a retrieval URL issued.
    PublishTemplate,
}

crate::impl_status_conversions!(OnboardingStep {
    ValidateRequest => "validate_request",
    PrepareArtifactStore => "prepare_artifact_store",
    ResolveCredentials => "resolve_credentials",
    CreateChildAccount => "create_child_account",
    InitiateOnboarding => "initiate_onboarding",
    FetchTemplate => "fetch_template",
    PublishTemplate => "publish_template",
});

/// Identifiers discovered so far during an onboarding attempt.
///
/// Each step merges its result here as soon as it succeeds; the progress is
/// then sealed into an [`OnboardingOutcome`] whatever happens next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingProgress {
    /// Set once the child account exists on the Partner API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_account_id: Option<String>,
    /// Set once an onboarding session was started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_id: Option<String>,
    /// Signed retrieval URL of the published template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,
    /// When `template_url` stops working.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url_expires_at: Option<DateTime<Utc>>,
}

impl OnboardingProgress {
    pub fn record_child_account(&mut self, child: &ChildAccount) {
        self.child_account_id = Some(child.child_account_id.clone());
    }

    pub fn record_session(&mut self, session: &OnboardingSession) {
        self.onboarding_id = Some(session.onboarding_id.clone());
    }

    pub fn record_template_handle(&mut self, handle: &PublishedArtifactHandle) {
        self.template_url = Some(handle.url.clone());
        self.template_url_expires_at = Some(handle.expires_at);
    }

    /// Seal as a successful onboarding.
    pub fn succeed(self) -> OnboardingOutcome {
        OnboardingOutcome { status: OnboardingStatus::Success, progress: self, failed_step: None }
    }

    /// Seal as a degraded success: remote effects exist, template handle does not.
    pub fn needs_investigation(self) -> OnboardingOutcome {
        OnboardingOutcome {
            status: OnboardingStatus::NeedsInvestigation,
            progress: self,
            failed_step: Some(OnboardingStep::PublishTemplate),
        }
    }

    /// Seal as failed at `step`, keeping everything recorded so far.
    pub fn fail(self, step: OnboardingStep) -> OnboardingOutcome {
        OnboardingOutcome {
            status: OnboardingStatus::Failed,
            progress: self,
            failed_step: Some(step),
        }
    }
}

/// Result of one onboarding attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingOutcome {
    /// Three-state result reported to the caller.
    pub status: OnboardingStatus,
    /// Identifiers discovered before the chain ended.
    #[serde(flatten)]
    pub progress: OnboardingProgress,
    /// Step that failed or degraded; `None` on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_step: Option<OnboardingStep>,
}

impl OnboardingOutcome {
    pub fn child_account_id(&self) -> Option<&str> {
        self.progress.child_account_id.as_deref()
    }

    pub fn onboarding_id(&self) -> Option<&str> {
        self.progress.onboarding_id.as_deref()
    }

    pub fn template_url(&self) -> Option<&str> {
        self.progress.template_url.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status == OnboardingStatus::Success
    }

    /// Flat key/value rendering returned across the invocation boundary.
    ///
    /// Contains `status` plus exactly the identifiers that were discovered.
    pub fn to_flat_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("status".to_string(), self.status.to_string());

        let fields = [
            ("child_account_id", &self.progress.child_account_id),
            ("onboarding_id", &self.progress.onboarding_id),
            ("template_url", &self.progress.template_url),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                map.insert(key.to_string(), value.clone());
            }
        }

        map
    }
}

/// Result of one verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationOutcome {
    /// The Partner API explicitly confirmed the linkage.
    Verified,
    /// Linkage could not be confirmed. The customer may not have deployed
    /// yet, or the Partner API may be unavailable; the two are
    /// indistinguishable, so this is never a confirmed negative.
    Unverified,
}

crate::impl_status_conversions!(VerificationOutcome {
    Verified => "VERIFIED",
    Unverified => "UNVERIFIED",
});

impl VerificationOutcome {
    /// `Some(true)` when verified, `None` when unknown. There is no `Some(false)`.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Verified => Some(true),
            Self::Unverified => None,
        }
    }

    pub fn to_flat_map(self) -> BTreeMap<String, String> {
        BTreeMap::from([("status".to_string(), self.to_string())])
    }
}
