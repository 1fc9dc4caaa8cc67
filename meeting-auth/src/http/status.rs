//! HTTP status classifiers.
//!
//! Pure mappings from a non-success status code to the message shown to the user.
//! The auth table covers the OAuth token endpoint; the API table covers meetings
//! operations and is parameterized by the operation name (e.g. "create meeting").

/// Message for a failed token exchange.
pub fn auth_status_message(status: u16) -> String {
    match status {
        400 => "Invalid request. Check your account ID.".to_string(),
        401 => "Authentication failed. Check your credentials.".to_string(),
        403 => "Access denied. Check your app permissions.".to_string(),
        429 => "Rate limit exceeded. Please try again later.".to_string(),
        _ => format!("Authentication failed (HTTP {status})."),
    }
}

/// Message for a failed meetings API operation.
pub fn api_status_message(status: u16, operation: &str) -> String {
    match status {
        400 => format!("Invalid request parameters for {operation}."),
        401 => "Authentication expired. Please try again.".to_string(),
        403 => format!("Insufficient permissions to {operation}."),
        404 => "Resource not found.".to_string(),
        429 => "Rate limit exceeded. Please try again later.".to_string(),
        _ => format!("Failed to {operation} (HTTP {status})."),
    }
}
