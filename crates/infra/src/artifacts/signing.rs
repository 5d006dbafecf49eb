//! HMAC-SHA256 signatures for expiring artifact URLs
//!
//! A signature covers the artifact key and the expiry timestamp, so a URL
//! cannot be re-pointed at another artifact or extended past its lifetime.

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use onboarding_core::ArtifactStoreError;
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies `(key, expires)` pairs with a shared secret
#[derive(Clone)]
pub struct UrlSigner {
    secret: Zeroizing<Vec<u8>>,
}

impl UrlSigner {
    /// # Errors
    /// `Signing` when the secret is empty.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, ArtifactStoreError> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(ArtifactStoreError::Signing("signing key is empty".into()));
        }
        Ok(Self { secret })
    }

    /// Hex signature for `key` valid until `expires_at`.
    pub fn sign(&self, key: &str, expires_at: DateTime<Utc>) -> Result<String, ArtifactStoreError> {
        let mac = self.mac(key, expires_at.timestamp())?;
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Check a presented signature. Fails for expired URLs, malformed hex
    /// and mismatches alike; the comparison is constant-time.
    pub fn verify(&self, key: &str, expires: i64, signature: &str, now: DateTime<Utc>) -> bool {
        if now.timestamp() >= expires {
            return false;
        }
        let Ok(presented) = hex::decode(signature) else {
            return false;
        };
        match self.mac(key, expires) {
            Ok(mac) => mac.verify_slice(&presented).is_ok(),
            Err(_) => false,
        }
    }

    fn mac(&self, key: &str, expires: i64) -> Result<HmacSha256, ArtifactStoreError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| ArtifactStoreError::Signing(e.to_string()))?;
        mac.update(key.as_bytes());
        mac.update(b"\n");
        mac.update(expires.to_string().as_bytes());
        Ok(mac)
    }
}

impl fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSigner").field("secret", &"[REDACTED]").finish()
    }
}
