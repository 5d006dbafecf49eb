//! Partner credentials resolved from the secret store

use std::fmt;

use zeroize::Zeroizing;

/// Credentials for the reseller's partner account.
///
/// Immutable once resolved. The API key is wiped from memory on drop and
/// never rendered by `Debug`.
#[derive(Clone)]
pub struct PartnerCredentials {
    partner_account_id: String,
    partner_api_key: Zeroizing<String>,
}

impl PartnerCredentials {
    pub fn new(partner_account_id: impl Into<String>, partner_api_key: impl Into<String>) -> Self {
        Self {
            partner_account_id: partner_account_id.into(),
            partner_api_key: Zeroizing::new(partner_api_key.into()),
        }
    }

    pub fn partner_account_id(&self) -> &str {
        &self.partner_account_id
    }

    /// Raw API key. Only the Partner API client should read this.
    pub fn partner_api_key(&self) -> &str {
        self.partner_api_key.as_str()
    }
}

impl fmt::Debug for PartnerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartnerCredentials")
            .field("partner_account_id", &self.partner_account_id)
            .field("partner_api_key", &"<redacted>")
            .finish()
    }
}
