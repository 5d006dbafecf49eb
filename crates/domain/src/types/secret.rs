//! Values returned by the secret store

use serde_json::Value;

use crate::errors::{OnboardingError, Result};

/// A secret is either plain text or a structured JSON object.
#[derive(Clone, PartialEq)]
pub enum SecretValue {
    Text(String),
    Structured(Value),
}

impl SecretValue {
    /// Classify raw secret text: JSON objects become `Structured`, anything
    /// else stays text.
    pub fn from_raw(raw: String) -> Self {
        match serde_json::from_str::<Value>(&raw) {
            Ok(value @ Value::Object(_)) => Self::Structured(value),
            _ => Self::Text(raw),
        }
    }

    /// Consume the value as text, failing for structured secrets.
    pub fn into_text(self, reference: &str) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Structured(_) => Err(OnboardingError::Config(format!(
                "Secret {reference} holds a structured value where text was expected"
            ))),
        }
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(_) => f.write_str("SecretValue::Text(<redacted>)"),
            Self::Structured(_) => f.write_str("SecretValue::Structured(<redacted>)"),
        }
    }
}
