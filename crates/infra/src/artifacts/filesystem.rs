//! Filesystem-backed artifact store
//!
//! Artifacts live under a root directory that some web server exposes at
//! `public_base_url`. Retrieval URLs carry `expires` and `signature` query
//! parameters that the serving side checks with [`UrlSigner::verify`].

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use onboarding_core::{ArtifactStore, ArtifactStoreError};
use onboarding_domain::Result;
use tracing::debug;
use url::Url;

use super::signing::UrlSigner;
use crate::errors::{artifact_io_error, InfraError};

/// [`ArtifactStore`] writing plain files under `root`
#[derive(Debug)]
pub struct FilesystemArtifactStore {
    root: PathBuf,
    public_base_url: Url,
    signer: UrlSigner,
}

impl FilesystemArtifactStore {
    /// # Errors
    /// `Config` when `public_base_url` is not a valid base URL.
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str, signer: UrlSigner) -> Result<Self> {
        let public_base_url = Url::parse(public_base_url).map_err(InfraError::from)?;
        if public_base_url.cannot_be_a_base() {
            return Err(onboarding_domain::OnboardingError::Config(format!(
                "artifact base URL cannot carry a path: {public_base_url}"
            )));
        }
        Ok(Self { root: root.into(), public_base_url, signer })
    }

    /// Map a key onto a path under the root. Keys are relative,
    /// `/`-separated and may not climb out of the root.
    fn path_for(&self, key: &str) -> std::result::Result<PathBuf, ArtifactStoreError> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && !key.ends_with('/')
            && relative.components().all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(ArtifactStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ArtifactStore for FilesystemArtifactStore {
    async fn put(
        &self,
        key: &str,
        content: &[u8],
        content_type: &str,
    ) -> std::result::Result<(), ArtifactStoreError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| artifact_io_error(key, &e))?;
        }

        // Write beside the target and rename so readers never see a partial file.
        let mut staging = path.clone().into_os_string();
        staging.push(".partial");
        let staging = PathBuf::from(staging);

        tokio::fs::write(&staging, content).await.map_err(|e| artifact_io_error(key, &e))?;
        tokio::fs::rename(&staging, &path).await.map_err(|e| artifact_io_error(key, &e))?;

        debug!(key, content_type, bytes = content.len(), path = %path.display(), "artifact stored");
        Ok(())
    }

    async fn exists(&self, key: &str) -> std::result::Result<bool, ArtifactStoreError> {
        let path = self.path_for(key)?;
        tokio::fs::try_exists(&path).await.map_err(|e| artifact_io_error(key, &e))
    }

    async fn presign(
        &self,
        key: &str,
        expires_at: DateTime<Utc>,
    ) -> std::result::Result<String, ArtifactStoreError> {
        self.path_for(key)?;
        let signature = self.signer.sign(key, expires_at)?;

        let mut url = self.public_base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ArtifactStoreError::Signing("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(key.split('/'));
        url.query_pairs_mut()
            .append_pair("expires", &expires_at.timestamp().to_string())
            .append_pair("signature", &signature);

        Ok(url.into())
    }
}
