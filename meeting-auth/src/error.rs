//! Error types for the `meeting-auth` crate.
//!
//! A root Error struct paired with an error kind enum.
//! Every error carries the human-readable message that is shown to the user; callers
//! discriminate on `error_kind`, never on the message text.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type shared by the auth and meetings API layers.
/// Holds error kind, the user-facing message and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
    message: String,
}

/// Major categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid static configuration.
    Config,
    /// Token exchange against the OAuth endpoint failed.
    Auth,
    /// A meetings API operation failed.
    Api,
    /// Caller supplied input was rejected before any request was made.
    Validation,
}

impl ErrorKind {
    /// Get the error kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "ConfigError",
            ErrorKind::Auth => "AuthError",
            ErrorKind::Api => "ApiError",
            ErrorKind::Validation => "ValidationError",
        }
    }
}

impl Error {
    pub fn new(error_kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind,
            message: message.into(),
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.error_kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Helper function to create configuration errors.
pub fn config_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Config, message)
}

/// Helper function to create token exchange errors.
pub fn auth_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Auth, message)
}

/// Helper function to create meetings API errors.
pub fn api_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Api, message)
}

/// Helper function to create input validation errors.
pub fn validation_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Validation, message)
}
