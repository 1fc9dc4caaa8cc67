//! # meeting-auth
//!
//! Authentication foundation for the Zoom meetings client:
//! - Error taxonomy shared with the meetings API layer
//! - HTTP transport abstraction and status classifiers
//! - Server-to-Server OAuth (client credentials) with an expiry-aware token cache
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meeting_auth::{
//!     credentials::Credentials,
//!     http::HttpClientBuilder,
//!     oauth::{AuthClient, DEFAULT_TOKEN_URL},
//! };
//!
//! let transport = Arc::new(HttpClientBuilder::new().build()?);
//! let auth = AuthClient::new(transport, DEFAULT_TOKEN_URL.parse()?);
//! let token = auth.get_access_token(&credentials).await?;
//! ```

pub mod credentials;
pub mod error;
pub mod http;
pub mod oauth;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
