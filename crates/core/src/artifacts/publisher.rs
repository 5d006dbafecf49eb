//! Artifact publisher - persist a template and hand out a retrieval handle

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use onboarding_domain::constants::{DEFAULT_URL_TTL_SECS, TEMPLATE_CONTENT_TYPE};
use onboarding_domain::{OnboardingError, PublishedArtifactHandle, Result};
use tracing::{debug, error, info, instrument};

use super::ports::{ArtifactStore, ArtifactStoreError};

/// Publishes artifacts to an [`ArtifactStore`]
pub struct ArtifactPublisher {
    store: Arc<dyn ArtifactStore>,
    url_ttl: Duration,
}

impl ArtifactPublisher {
    /// Publisher with the default one-hour URL validity
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self::with_ttl(store, Duration::from_secs(DEFAULT_URL_TTL_SECS))
    }

    pub fn with_ttl(store: Arc<dyn ArtifactStore>, url_ttl: Duration) -> Self {
        Self { store, url_ttl }
    }

    /// Write `content` under `destination_key`, then issue a retrieval handle.
    ///
    /// Returns `Ok(None)` when the write succeeded but the handle could not
    /// be issued: the artifact exists, it just is not reachable yet.
    ///
    /// # Errors
    /// `ArtifactPublishFailed` when the configured URL validity cannot be
    /// represented as an expiry time (nothing is written), or when the write
    /// itself fails.
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn publish(
        &self,
        content: &[u8],
        destination_key: &str,
    ) -> Result<Option<PublishedArtifactHandle>> {
        let expires_at = self.expiry_from(Utc::now()).map_err(|message| {
            OnboardingError::ArtifactPublishFailed { key: destination_key.to_string(), message }
        })?;

        self.store
            .put(destination_key, content, TEMPLATE_CONTENT_TYPE)
            .await
            .map_err(|e| publish_failed(destination_key, &e))?;
        debug!(key = destination_key, "artifact written");

        match self.store.presign(destination_key, expires_at).await {
            Ok(url) => {
                info!(key = destination_key, %expires_at, "artifact published");
                Ok(Some(PublishedArtifactHandle::new(url, expires_at)))
            }
            Err(err) => {
                error!(
                    key = destination_key,
                    error = %err,
                    "artifact written but retrieval URL could not be issued"
                );
                Ok(None)
            }
        }
    }

    /// Check whether an artifact was already published.
    ///
    /// # Errors
    /// `ArtifactPublishFailed` for any store error other than not-found.
    pub async fn exists(&self, key: &str) -> Result<bool> {
        match self.store.exists(key).await {
            Ok(found) => Ok(found),
            Err(ArtifactStoreError::NotFound(_)) => Ok(false),
            Err(err) => Err(publish_failed(key, &err)),
        }
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> std::result::Result<DateTime<Utc>, String> {
        chrono::Duration::from_std(self.url_ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| format!("URL validity of {}s is out of range", self.url_ttl.as_secs()))
    }
}

fn publish_failed(key: &str, err: &ArtifactStoreError) -> OnboardingError {
    OnboardingError::ArtifactPublishFailed { key: key.to_string(), message: err.to_string() }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct ScriptedStore {
        objects: Mutex<HashMap<String, Vec<u8>>>,
        fail_put: bool,
        fail_presign: bool,
        exists_error: Option<fn(String) -> ArtifactStoreError>,
    }

    #[async_trait]
    impl ArtifactStore for ScriptedStore {
        async fn put(
            &self,
            key: &str,
            content: &[u8],
            _content_type: &str,
        ) -> std::result::Result<(), ArtifactStoreError> {
            if self.fail_put {
                return Err(ArtifactStoreError::Storage("bucket unavailable".into()));
            }
            self.objects.lock().unwrap().insert(key.to_string(), content.to_vec());
            Ok(())
        }

        async fn exists(&self, key: &str) -> std::result::Result<bool, ArtifactStoreError> {
            if let Some(make_error) = self.exists_error {
                return Err(make_error(key.to_string()));
            }
            Ok(self.objects.lock().unwrap().contains_key(key))
        }

        async fn presign(
            &self,
            key: &str,
            expires_at: DateTime<Utc>,
        ) -> std::result::Result<String, ArtifactStoreError> {
            if self.fail_presign {
                return Err(ArtifactStoreError::Signing("no signing key".into()));
            }
            Ok(format!("https://artifacts.example.test/{key}?expires={}", expires_at.timestamp()))
        }
    }

    #[tokio::test]
    async fn publish_returns_handle_with_ttl() {
        let store = Arc::new(ScriptedStore::default());
        let publisher = ArtifactPublisher::with_ttl(store.clone(), Duration::from_secs(600));

        let before = Utc::now();
        let handle = publisher.publish(b"{}", "templates/c-1").await.unwrap().unwrap();

        assert!(handle.url.starts_with("https://artifacts.example.test/templates/c-1"));
        assert!(handle.expires_at >= before + chrono::Duration::seconds(600));
        assert!(handle.expires_at <= Utc::now() + chrono::Duration::seconds(600));
        assert_eq!(store.objects.lock().unwrap().get("templates/c-1").unwrap(), b"{}");
    }

    #[tokio::test]
    async fn signing_failure_degrades_to_none() {
        let store = Arc::new(ScriptedStore { fail_presign: true, ..Default::default() });
        let publisher = ArtifactPublisher::new(store.clone());

        let handle = publisher.publish(b"{}", "c-1").await.unwrap();

        assert!(handle.is_none());
        assert!(publisher.exists("c-1").await.unwrap());
    }

    #[tokio::test]
    async fn write_failure_is_an_error() {
        let store = Arc::new(ScriptedStore { fail_put: true, ..Default::default() });
        let publisher = ArtifactPublisher::new(store);

        let err = publisher.publish(b"{}", "c-1").await.unwrap_err();
        assert!(matches!(err, OnboardingError::ArtifactPublishFailed { ref key, .. } if key == "c-1"));
    }

    #[tokio::test]
    async fn unrepresentable_ttl_fails_before_writing() {
        let store = Arc::new(ScriptedStore::default());
        let publisher =
            ArtifactPublisher::with_ttl(store.clone(), Duration::from_secs(10_000_000_000_000));

        let err = publisher.publish(b"{}", "templates/c-1").await.unwrap_err();

        assert!(matches!(
            err,
            OnboardingError::ArtifactPublishFailed { ref key, ref message }
                if key == "templates/c-1" && message.contains("out of range")
        ));
        assert!(store.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn exists_treats_not_found_as_false() {
        let store = Arc::new(ScriptedStore {
            exists_error: Some(ArtifactStoreError::NotFound),
            ..Default::default()
        });
        let publisher = ArtifactPublisher::new(store);

        assert!(!publisher.exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn exists_propagates_other_errors() {
        let store = Arc::new(ScriptedStore {
            exists_error: Some(ArtifactStoreError::Storage),
            ..Default::default()
        });
        let publisher = ArtifactPublisher::new(store);

        assert!(matches!(
            publisher.exists("c-1").await,
            Err(OnboardingError::ArtifactPublishFailed { .. })
        ));
    }
}
