//! Onboarding orchestration

pub mod service;

pub use service::*;
