//! Port interfaces for durable artifact storage

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Error type for artifact storage operations
#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Invalid artifact key: {0}")]
    InvalidKey(String),

    #[error("Failed to sign retrieval URL: {0}")]
    Signing(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Durable storage that can hand out time-limited retrieval URLs
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write `content` under `key`, overwriting any existing artifact
    async fn put(
        &self,
        key: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), ArtifactStoreError>;

    /// Check whether an artifact exists.
    ///
    /// Stores may report a missing key either as `Ok(false)` or as
    /// `Err(NotFound)`; the publisher treats both as absent.
    async fn exists(&self, key: &str) -> Result<bool, ArtifactStoreError>;

    /// Issue a retrieval URL for `key` that stops working at `expires_at`
    async fn presign(
        &self,
        key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<String, ArtifactStoreError>;
}
