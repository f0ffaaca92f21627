//! Identity tool.

use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{SimpleTool, ToolDefinition};
use crate::core::api::RemoteRequest;
use crate::domains::tools::error::ToolResult;

/// `whoami` takes no arguments.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WhoamiParams {}

pub struct WhoamiTool;

impl ToolDefinition for WhoamiTool {
    const NAME: &'static str = "whoami";
    const DESCRIPTION: &'static str =
        "Show the user the configured API token belongs to. Useful to verify credentials.";
    type Params = WhoamiParams;
}

impl SimpleTool for WhoamiTool {
    fn request(_params: Self::Params) -> ToolResult<RemoteRequest> {
        Ok(RemoteRequest::get("/auth/me"))
    }
}
