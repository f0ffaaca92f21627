//! Tool-specific error types.

use thiserror::Error;

use crate::core::api::ApiError;

/// Result type for tool handlers.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur during tool operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The requested tool is not in the catalogue.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Required arguments are missing or malformed.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The Canvas API call failed; the message is the API error's own.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A handler failed in an unexpected way.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
