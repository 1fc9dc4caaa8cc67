//! Client credentials ("account_credentials") token exchange with caching.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use super::token::{TokenCache, TokenResponse};
use crate::credentials::Credentials;
use crate::error::{auth_error, Error};
use crate::http::{auth_status_message, Method, Request, Transport};

/// Zoom OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://zoom.us/oauth/token";

const GRANT_TYPE: &str = "account_credentials";

/// Obtains access tokens for a single account, reusing a cached token while it is valid.
///
/// The cache lock is held across the whole check, exchange and store sequence, so
/// concurrent callers sharing one client wait for a single in-flight exchange
/// instead of each hitting the token endpoint.
pub struct AuthClient<T: Transport> {
    transport: Arc<T>,
    token_url: Url,
    cache: Mutex<TokenCache>,
}

impl<T: Transport> AuthClient<T> {
    /// Create a new auth client with an empty cache.
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport shared with the meetings client
    /// * `token_url` - OAuth token endpoint
    pub fn new(transport: Arc<T>, token_url: Url) -> Self {
        Self {
            transport,
            token_url,
            cache: Mutex::new(TokenCache::new()),
        }
    }

    /// Get a valid access token, exchanging credentials only on a cache miss.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Account and client credentials for the exchange
    ///
    /// # Returns
    ///
    /// A bearer token, or an `Auth` error if the exchange fails.
    pub async fn get_access_token(&self, credentials: &Credentials) -> Result<SecretString, Error> {
        let mut cache = self.cache.lock().await;

        if let Some(token) = cache.get_valid_token() {
            debug!("Using cached access token");
            return Ok(token);
        }

        debug!(
            "Requesting access token for account {}",
            credentials.account_id
        );
        let tokens = self.exchange(credentials).await?;
        let token = tokens.access_token.clone();
        cache.store(tokens.access_token, tokens.expires_in)?;

        Ok(token)
    }

    async fn exchange(&self, credentials: &Credentials) -> Result<TokenResponse, Error> {
        let request = Request::new(Method::Post, self.token_url.clone())
            .header("Authorization", credentials.basic_authorization())
            .form(&[
                ("grant_type", GRANT_TYPE),
                ("account_id", credentials.account_id.as_str()),
            ]);

        let response = self.transport.send(request).await.map_err(|e| {
            warn!("Failed to reach the OAuth token endpoint: {:?}", e);
            auth_error("Failed to reach the Zoom authorization server.").with_source(e)
        })?;

        if !response.is_success() {
            warn!("OAuth token request failed with HTTP {}", response.status);
            return Err(auth_error(auth_status_message(response.status)));
        }

        response.json::<TokenResponse>().map_err(|e| {
            warn!("Failed to parse OAuth token response: {:?}", e);
            auth_error("Invalid response from the Zoom authorization server.").with_source(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::http::{Response, TransportError};
    use async_trait::async_trait;
    use secrecy::ExposeSecret;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    // Replays canned responses in order and records every request.
    struct MockTransport {
        responses: StdMutex<VecDeque<Response>>,
        requests: StdMutex<Vec<Request>>,
    }

    impl MockTransport {
        fn new(responses: Vec<Response>) -> Arc<Self> {
            Arc::new(Self {
                responses: StdMutex::new(responses.into()),
                requests: StdMutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn request(&self, index: usize) -> Request {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(&self, request: Request) -> Result<Response, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| "no canned response left".into())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(&self, _request: Request) -> Result<Response, TransportError> {
            Err("dns error: failed to lookup address".into())
        }
    }

    fn credentials() -> Credentials {
        Credentials::new(
            "test-account-id".to_string(),
            "test-client-id".to_string(),
            SecretString::new("test-client-secret".to_string()),
        )
    }

    fn token_body(token: &str, expires_in: i64) -> String {
        serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": expires_in,
            "scope": "",
        })
        .to_string()
    }

    fn client<T: Transport>(transport: Arc<T>) -> AuthClient<T> {
        AuthClient::new(transport, Url::parse(DEFAULT_TOKEN_URL).unwrap())
    }

    #[tokio::test]
    async fn test_returns_access_token_on_success() {
        let transport = MockTransport::new(vec![Response::new(200, token_body("test-token", 3600))]);
        let auth = client(transport.clone());

        let token = auth.get_access_token(&credentials()).await.unwrap();

        assert_eq!(token.expose_secret(), "test-token");
    }

    #[tokio::test]
    async fn test_sends_basic_auth_form_request() {
        let transport = MockTransport::new(vec![Response::new(200, token_body("t", 3600))]);
        let auth = client(transport.clone());

        auth.get_access_token(&credentials()).await.unwrap();

        let request = transport.request(0);
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.as_str(), DEFAULT_TOKEN_URL);
        // base64("test-client-id:test-client-secret")
        assert_eq!(
            request.header_value("Authorization"),
            Some("Basic dGVzdC1jbGllbnQtaWQ6dGVzdC1jbGllbnQtc2VjcmV0")
        );
        assert_eq!(
            request.header_value("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            request.body.as_deref(),
            Some("grant_type=account_credentials&account_id=test-account-id")
        );
    }

    #[tokio::test]
    async fn test_error_statuses_map_to_auth_errors() {
        let cases = [
            (400, "Invalid request. Check your account ID."),
            (401, "Authentication failed. Check your credentials."),
            (403, "Access denied. Check your app permissions."),
            (429, "Rate limit exceeded. Please try again later."),
            (500, "Authentication failed (HTTP 500)."),
        ];

        for (status, message) in cases {
            let transport = MockTransport::new(vec![Response::new(status, "{}")]);
            let err = client(transport)
                .get_access_token(&credentials())
                .await
                .unwrap_err();

            assert_eq!(err.kind(), ErrorKind::Auth);
            assert_eq!(err.message(), message);
        }
    }

    #[tokio::test]
    async fn test_second_call_uses_cache() {
        let transport = MockTransport::new(vec![Response::new(200, token_body("cached-token", 3600))]);
        let auth = client(transport.clone());

        let token1 = auth.get_access_token(&credentials()).await.unwrap();
        let token2 = auth.get_access_token(&credentials()).await.unwrap();

        assert_eq!(token1.expose_secret(), "cached-token");
        assert_eq!(token2.expose_secret(), "cached-token");
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_refetches_when_cached_token_expired() {
        // 1 second lifetime minus the 60 second margin is already expired.
        let transport = MockTransport::new(vec![
            Response::new(200, token_body("token-1", 1)),
            Response::new(200, token_body("token-2", 3600)),
        ]);
        let auth = client(transport.clone());

        let token1 = auth.get_access_token(&credentials()).await.unwrap();
        let token2 = auth.get_access_token(&credentials()).await.unwrap();

        assert_eq!(token1.expose_secret(), "token-1");
        assert_eq!(token2.expose_secret(), "token-2");
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_exchange_does_not_populate_cache() {
        let transport = MockTransport::new(vec![
            Response::new(401, "{}"),
            Response::new(200, token_body("fresh", 3600)),
        ]);
        let auth = client(transport.clone());

        assert!(auth.get_access_token(&credentials()).await.is_err());
        let token = auth.get_access_token(&credentials()).await.unwrap();

        assert_eq!(token.expose_secret(), "fresh");
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_exchange() {
        let transport = MockTransport::new(vec![Response::new(200, token_body("shared", 3600))]);
        let auth = client(transport.clone());
        let creds = credentials();

        let (a, b) = tokio::join!(
            auth.get_access_token(&creds),
            auth.get_access_token(&creds)
        );

        assert_eq!(a.unwrap().expose_secret(), "shared");
        assert_eq!(b.unwrap().expose_secret(), "shared");
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_auth_error_with_source() {
        let auth = client(Arc::new(FailingTransport));

        let err = auth.get_access_token(&credentials()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(
            err.message(),
            "Failed to reach the Zoom authorization server."
        );
        assert!(err.source.is_some());
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_auth_error() {
        let transport = MockTransport::new(vec![Response::new(200, "not json")]);

        let err = client(transport)
            .get_access_token(&credentials())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(
            err.message(),
            "Invalid response from the Zoom authorization server."
        );
    }

    #[tokio::test]
    async fn test_out_of_range_expires_in_is_auth_error() {
        let transport = MockTransport::new(vec![
            Response::new(200, token_body("tok", 9_000_000_000_000)),
            Response::new(200, token_body("next", 3600)),
        ]);
        let auth = client(transport.clone());

        let err = auth.get_access_token(&credentials()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(
            err.message(),
            "Invalid response from the Zoom authorization server."
        );

        let token = auth.get_access_token(&credentials()).await.unwrap();
        assert_eq!(token.expose_secret(), "next");
        assert_eq!(transport.calls(), 2);
    }
}
