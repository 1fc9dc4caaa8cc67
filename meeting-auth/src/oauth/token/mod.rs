//! OAuth token caching.

mod cache;
mod tokens;

pub use cache::{TokenCache, SAFETY_MARGIN_SECS};
pub use tokens::{CachedToken, TokenResponse};
