//! OAuth token types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Deserialize;

/// Successful token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Access token for API requests.
    pub access_token: SecretString,
    /// Token type (usually "bearer").
    #[serde(default)]
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    /// Granted scopes, space separated.
    #[serde(default)]
    pub scope: String,
}

/// Access token held by the cache.
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// Bearer token value.
    pub value: SecretString,
    /// Instant after which the token must not be used.
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// A token is usable strictly before its expiry instant.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
