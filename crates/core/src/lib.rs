//! # Partner Onboarding Core
//!
//! Pure orchestration logic - no HTTP, storage or platform code.
//!
//! This crate contains:
//! - Port interfaces for the secret store, Partner API and artifact store
//! - Credential resolution and artifact publishing
//! - The onboarding and verification services
//!
//! ## Architecture Principles
//! - Only depends on `onboarding-domain`
//! - All external systems reached through traits
//! - Steps run sequentially; nothing is spawned

pub mod artifacts;
pub mod credentials;
pub mod onboarding;
pub mod partner;
pub mod verification;

// Re-export specific items to avoid ambiguity
pub use artifacts::{ArtifactPublisher, ArtifactStore, ArtifactStoreError};
pub use credentials::{CredentialReferences, CredentialResolver, SecretStore};
pub use onboarding::{OnboardingOptions, OnboardingService, StepFailure};
pub use partner::{PartnerApi, PartnerApiConnector};
pub use verification::VerificationService;
