//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are the commands MCP clients invoke; each one is fulfilled with one
//! or more Canvas API requests.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per family)
//! - `registry.rs` - The closed set of tool names and the static catalogue
//! - `router.rs` - Dispatch from a tool call to its handler
//! - `output.rs` - The uniform `{ok, payload | error}` result envelope
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Define params and a `ToolDefinition` (plus `SimpleTool` for single-request tools)
//! 2. Export it in `definitions/mod.rs`
//! 3. Add a `ToolName` variant in `registry.rs`
//! 4. Add the dispatch arm in `router.rs`

pub mod definitions;
mod error;
mod output;
mod registry;
mod router;

pub use error::{ToolError, ToolResult};
pub use output::ToolOutput;
pub use registry::{ToolName, ToolRegistry};
pub use router::{ToolCall, ToolRouter};
