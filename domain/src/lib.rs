//! Zoom meeting domain: wire types, input validation, topic templating and the
//! meetings API gateway.
//!
//! Errors are shared with `meeting-auth` so the CLI sees a single error type
//! for the whole request path.
pub use meeting_auth::{Error, ErrorKind};

pub mod gateway;
pub mod meeting;
pub mod topic;
pub mod validation;
