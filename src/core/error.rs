//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type for server setup and lifecycle.
//! Per-call failures never reach it: tool errors are folded into tool results
//! by the router.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the Canvas API client.
    #[error("Canvas API error: {0}")]
    Api(#[from] super::api::ApiError),

    /// Error from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}
