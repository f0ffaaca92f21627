//! Canvas API error types.

use thiserror::Error;

/// Result type for Canvas API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors produced while talking to the Canvas API.
///
/// Every variant renders to a human-readable message that is surfaced to
/// MCP clients verbatim inside a failed tool result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No bearer token is configured, so no request was attempted.
    #[error("Configuration error: no API token configured (set CANVAS_API_TOKEN)")]
    MissingToken,

    /// The API rejected the token (HTTP 401).
    #[error("Authentication failed: API token is invalid or expired")]
    Authentication,

    /// The token is valid but lacks access to the resource (HTTP 403).
    #[error("Permission denied: the API token does not grant access to this resource")]
    PermissionDenied,

    /// Any other HTTP error status; the raw body is kept verbatim.
    #[error("API error {status}: {body}")]
    Remote { status: u16, body: String },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network-level failure (connection refused, DNS, TLS, ...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// A successful response whose body is not valid JSON.
    #[error("Invalid response from API: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Map an HTTP error status and its body to the matching error.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            _ => Self::Remote {
                status,
                body: body.into(),
            },
        }
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an invalid response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
