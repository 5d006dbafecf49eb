//! # Partner Onboarding Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP transport and the Partner API client
//! - Secret store adapters (environment, platform keychain)
//! - Filesystem artifact store with signed, expiring URLs
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `onboarding-core`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod artifacts;
pub mod config;
pub mod errors;
pub mod http;
pub mod partner;
pub mod secrets;

// Re-export commonly used items
pub use artifacts::{FilesystemArtifactStore, UrlSigner};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, TransportError};
pub use partner::{build_auth_header, PartnerApiClient, PartnerApiClientFactory, PartnerApiConfig};
pub use secrets::{EnvSecretStore, KeyringSecretStore};
