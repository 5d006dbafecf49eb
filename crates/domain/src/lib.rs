//! # Partner Onboarding Domain
//!
//! Business domain types for onboarding customers into the Partner API.
//!
//! This crate contains:
//! - Onboarding data types (credentials, sessions, templates, outcomes)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
