//! Domain types and models
//!
//! Everything here lives for one onboarding or verification attempt and is
//! handed back to the caller; nothing is persisted by this workspace.

pub mod artifact;
pub mod credentials;
pub mod outcome;
pub mod partner;
pub mod secret;

pub use artifact::PublishedArtifactHandle;
pub use credentials::PartnerCredentials;
pub use outcome::{
    OnboardingOutcome, OnboardingProgress, OnboardingStatus, OnboardingStep, VerificationOutcome,
};
pub use partner::{ChildAccount, DeploymentTemplate, OnboardingSession};
pub use secret::SecretValue;
