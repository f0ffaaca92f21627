//! Canvas MCP Server Library
//!
//! An MCP (Model Context Protocol) server exposing canvas, node, connection
//! and task management as tools, each fulfilled with authenticated requests
//! against the Canvas REST API.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, the Canvas API client, the MCP server
//!   handler and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool catalogue, router and tool definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use canvas_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
