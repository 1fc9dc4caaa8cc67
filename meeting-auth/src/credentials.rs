//! Server-to-Server OAuth app credentials.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use secrecy::{ExposeSecret, SecretString};

/// Account-level app credentials used for every token exchange.
///
/// Read-only input: never cached by the auth client and never logged.
#[derive(Clone)]
pub struct Credentials {
    /// Zoom account identifier sent as `account_id`.
    pub account_id: String,
    /// OAuth client identifier.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: SecretString,
}

impl Credentials {
    pub fn new(account_id: String, client_id: String, client_secret: SecretString) -> Self {
        Self {
            account_id,
            client_id,
            client_secret,
        }
    }

    /// `Basic base64(client_id:client_secret)` header value.
    pub fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret.expose_secret());
        format!("Basic {}", BASE64.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new(
            "test-account".to_string(),
            "test-client".to_string(),
            SecretString::new("test-secret".to_string()),
        )
    }

    #[test]
    fn test_basic_authorization() {
        // base64("test-client:test-secret")
        assert_eq!(
            credentials().basic_authorization(),
            "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ="
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", credentials());
        assert!(!debug.contains("test-secret"));
        assert!(debug.contains("test-client"));
    }
}
