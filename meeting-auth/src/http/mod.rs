//! HTTP transport, client building and status classification.

mod client;
mod status;
mod transport;

pub use client::{HttpClientBuilder, HttpClientConfig, ReqwestTransport};
pub use status::{api_status_message, auth_status_message};
pub use transport::{Method, Request, Response, Transport, TransportError};
