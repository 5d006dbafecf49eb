//! In-memory artifact store

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use onboarding_core::{ArtifactStore, ArtifactStoreError};

/// Artifact store keeping objects in a map, with switches to fail
/// writes or URL signing.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    fail_put: AtomicBool,
    fail_presign: AtomicBool,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self) {
        self.fail_put.store(true, Ordering::SeqCst);
    }

    pub fn fail_signing(&self) {
        self.fail_presign.store(true, Ordering::SeqCst);
    }

    /// Stored bytes and content type for `key`.
    pub fn object(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn put(
        &self,
        key: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<(), ArtifactStoreError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(ArtifactStoreError::Storage("bucket unavailable".into()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (content.to_vec(), content_type.to_string()));
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, ArtifactStoreError> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn presign(
        &self,
        key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<String, ArtifactStoreError> {
        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(ArtifactStoreError::Signing("signing key unavailable".into()));
        }
        Ok(format!("https://artifacts.test/{key}?expires={}", expires_at.timestamp()))
    }
}
