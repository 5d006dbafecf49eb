//! Onboarding verification

pub mod service;

pub use service::*;
