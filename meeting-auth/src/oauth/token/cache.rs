//! Single-entry access token cache.

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use tracing::{debug, warn};

use super::CachedToken;
use crate::error::{auth_error, Error};

/// Seconds subtracted from the advertised lifetime when a token is stored, so a
/// token is never handed out just before the remote side considers it expired.
pub const SAFETY_MARGIN_SECS: i64 = 60;

/// Holds at most one access token together with its expiry instant.
///
/// A newly stored token always replaces the previous one. Entries are never
/// removed; they are overwritten or left to expire.
#[derive(Debug, Default)]
pub struct TokenCache {
    entry: Option<CachedToken>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token, if there is one and it has not expired.
    pub fn get_valid_token(&self) -> Option<SecretString> {
        self.valid_token_at(Utc::now())
    }

    /// Cache `value` for `lifetime_secs` minus the safety margin.
    ///
    /// Fails with an `Auth` error, leaving the cache untouched, when the lifetime
    /// cannot be represented as an expiry instant.
    pub fn store(&mut self, value: SecretString, lifetime_secs: i64) -> Result<(), Error> {
        self.store_at(value, lifetime_secs, Utc::now())
    }

    pub(crate) fn valid_token_at(&self, now: DateTime<Utc>) -> Option<SecretString> {
        self.entry
            .as_ref()
            .filter(|token| token.is_usable_at(now))
            .map(|token| token.value.clone())
    }

    pub(crate) fn store_at(
        &mut self,
        value: SecretString,
        lifetime_secs: i64,
        now: DateTime<Utc>,
    ) -> Result<(), Error> {
        let expires_at = Duration::try_seconds(lifetime_secs.saturating_sub(SAFETY_MARGIN_SECS))
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                warn!("Token lifetime of {}s is out of range", lifetime_secs);
                auth_error("Invalid response from the Zoom authorization server.")
            })?;

        debug!("Caching access token until {}", expires_at);
        self.entry = Some(CachedToken { value, expires_at });
        Ok(())
    }

    /// Expiry instant of the current entry, valid or not.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|token| token.expires_at)
    }
}
