//! Canvas tools.
//!
//! Listing, fetching and creating canvases.
//!
//! Scalar arguments are forwarded as the caller sent them; their schema types
//! are advisory and the API validates them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::common::{ResourceId, SimpleTool, ToolDefinition, compact};
use crate::core::api::RemoteRequest;
use crate::domains::tools::error::ToolResult;

fn default_canvas_limit() -> Value {
    Value::from(20)
}

// ============================================================================
// list_canvases
// ============================================================================

/// Parameters for listing canvases.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCanvasesParams {
    /// Maximum number of canvases to return (default: 20).
    #[schemars(description = "Maximum number of canvases to return (default: 20)")]
    #[schemars(with = "u32")]
    #[serde(default = "default_canvas_limit")]
    pub limit: Value,
}

pub struct ListCanvasesTool;

impl ToolDefinition for ListCanvasesTool {
    const NAME: &'static str = "list_canvases";
    const DESCRIPTION: &'static str =
        "List the canvases available to the authenticated user, with their ids and descriptions.";
    type Params = ListCanvasesParams;
}

impl SimpleTool for ListCanvasesTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        let query = compact(&json!({ "limit": params.limit }))?;
        Ok(RemoteRequest::get("/canvases/").with_query(query))
    }
}

// ============================================================================
// get_canvas
// ============================================================================

/// Parameters for fetching one canvas.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCanvasParams {
    #[schemars(description = "The ID of the canvas to retrieve")]
    pub canvas_id: ResourceId,
}

pub struct GetCanvasTool;

impl ToolDefinition for GetCanvasTool {
    const NAME: &'static str = "get_canvas";
    const DESCRIPTION: &'static str =
        "Get details of a specific canvas including all its nodes and connections.";
    type Params = GetCanvasParams;
}

impl SimpleTool for GetCanvasTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        let id = params.canvas_id.path_segment()?;
        Ok(RemoteRequest::get(format!("/canvases/{}/", id)))
    }
}

// ============================================================================
// create_canvas
// ============================================================================

/// Parameters for creating a canvas.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateCanvasParams {
    #[schemars(description = "Name of the canvas", with = "String")]
    pub name: Value,

    #[schemars(description = "Optional description of the canvas", with = "Option<String>")]
    pub description: Option<Value>,
}

pub struct CreateCanvasTool;

impl ToolDefinition for CreateCanvasTool {
    const NAME: &'static str = "create_canvas";
    const DESCRIPTION: &'static str = "Create a new canvas.";
    type Params = CreateCanvasParams;
}

impl SimpleTool for CreateCanvasTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        Ok(RemoteRequest::post("/canvases/", compact(&params)?))
    }
}
