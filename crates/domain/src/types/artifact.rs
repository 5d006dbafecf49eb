//! Published artifact handles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time-limited retrieval handle for a published artifact.
///
/// This is a capability, not a record: it stops working at `expires_at` and
/// must not be stored beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedArtifactHandle {
    /// Signed retrieval URL.
    pub url: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

impl PublishedArtifactHandle {
    pub fn new(url: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self { url: url.into(), expires_at }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
