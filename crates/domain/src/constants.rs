//! Domain-level constants

/// Default transport timeout for Partner API requests.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default attempts for the idempotent template read.
pub const DEFAULT_READ_ATTEMPTS: usize = 3;

/// Default validity of a published template URL.
pub const DEFAULT_URL_TTL_SECS: u64 = 3600;

/// Longest validity accepted for a published template URL (7 days).
pub const MAX_URL_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Default keyring service name for partner secrets.
pub const DEFAULT_KEYRING_SERVICE: &str = "partner-onboarding";

/// Content type used for published deployment templates.
pub const TEMPLATE_CONTENT_TYPE: &str = "application/json";
