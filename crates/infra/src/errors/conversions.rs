//! Conversions from external infrastructure errors into domain errors.

use keyring::Error as KeyringError;
use onboarding_core::ArtifactStoreError;
use onboarding_domain::OnboardingError;
use reqwest::Error as HttpError;

use crate::http::TransportError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub OnboardingError);

impl From<InfraError> for OnboardingError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<OnboardingError> for InfraError {
    fn from(value: OnboardingError) -> Self {
        InfraError(value)
    }
}

/// Conversion for backend errors that only make sense next to the secret
/// reference that produced them.
pub trait IntoSecretError {
    fn into_secret_error(self, reference: &str) -> OnboardingError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → OnboardingError */
/* -------------------------------------------------------------------------- */

impl IntoSecretError for KeyringError {
    fn into_secret_error(self, reference: &str) -> OnboardingError {
        use KeyringError::*;

        let reference = reference.to_string();
        let description = self.to_string();

        match self {
            NoEntry => OnboardingError::SecretNotFound { reference },
            BadEncoding(_) => OnboardingError::SecretAccessDenied {
                reference,
                message: "keychain value is not valid UTF-8".into(),
            },
            Ambiguous(entries) => OnboardingError::SecretAccessDenied {
                reference,
                message: format!("multiple keychain entries matched ({} results)", entries.len()),
            },
            PlatformFailure(err) => OnboardingError::SecretAccessDenied {
                reference,
                message: format!("keychain platform error: {err}"),
            },
            NoStorageAccess(err) => OnboardingError::SecretAccessDenied {
                reference,
                message: format!("unable to access secure storage: {err}"),
            },
            _ => OnboardingError::SecretAccessDenied { reference, message: description },
        }
    }
}

/* -------------------------------------------------------------------------- */
/* std::env::VarError → OnboardingError */
/* -------------------------------------------------------------------------- */

impl IntoSecretError for std::env::VarError {
    fn into_secret_error(self, reference: &str) -> OnboardingError {
        match self {
            Self::NotPresent => OnboardingError::SecretNotFound { reference: reference.to_string() },
            Self::NotUnicode(_) => OnboardingError::SecretAccessDenied {
                reference: reference.to_string(),
                message: "environment value is not valid UTF-8".into(),
            },
        }
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError / OnboardingError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for TransportError {
    fn from(err: HttpError) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }

        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return Self::Connect(err.to_string());
        }

        if err.is_body() || err.is_decode() {
            return Self::Body(err.to_string());
        }

        Self::Request(err.to_string())
    }
}

/// Client construction failures (TLS backend, invalid headers) are
/// configuration problems, not Partner API failures.
impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        InfraError(OnboardingError::Config(format!("failed to build HTTP client: {err}")))
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → OnboardingError */
/* -------------------------------------------------------------------------- */

impl From<url::ParseError> for InfraError {
    fn from(err: url::ParseError) -> Self {
        InfraError(OnboardingError::Config(format!("invalid URL: {err}")))
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ArtifactStoreError */
/* -------------------------------------------------------------------------- */

/// Map a filesystem error for `key` onto the storage port's error.
pub fn artifact_io_error(key: &str, err: &std::io::Error) -> ArtifactStoreError {
    match err.kind() {
        std::io::ErrorKind::NotFound => ArtifactStoreError::NotFound(key.to_string()),
        _ => ArtifactStoreError::Storage(format!("{key}: {err}")),
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
