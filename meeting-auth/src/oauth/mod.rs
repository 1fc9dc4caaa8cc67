//! OAuth 2.0 client credentials infrastructure.
//!
//! Provides the Server-to-Server token exchange and the expiry-aware token cache in front of it.

mod client;

pub mod token;

pub use client::{AuthClient, DEFAULT_TOKEN_URL};
