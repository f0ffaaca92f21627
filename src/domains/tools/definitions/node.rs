//! Node and connection tools.
//!
//! Nodes are typed, positioned vertices on a canvas; connections are directed
//! edges between them. Which node types may be connected is decided by the
//! API, the rules below only appear in tool descriptions.
//!
//! Scalar arguments are forwarded untouched; node types and positions are
//! validated by the API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::common::{NODE_TYPES, ResourceId, SimpleTool, ToolDefinition, compact};
use crate::core::api::RemoteRequest;
use crate::domains::tools::error::ToolResult;

/// Position used when the caller does not place a node.
pub const DEFAULT_POSITION: f64 = 100.0;

/// Body for `POST /nodes/`.
///
/// Shared with the OKR workflow so both paths create nodes identically.
pub fn create_node_body(
    canvas_id: &ResourceId,
    node_type: impl Into<Value>,
    name: impl Into<Value>,
    content: impl Into<Value>,
    position: (impl Into<Value>, impl Into<Value>),
) -> Value {
    json!({
        "canvas_id": canvas_id,
        "node_type": node_type.into(),
        "name": name.into(),
        "content": content.into(),
        "position_x": position.0.into(),
        "position_y": position.1.into(),
    })
}

/// Request connecting `source` to `target`.
pub fn connect_request(source: &ResourceId, target: &ResourceId) -> ToolResult<RemoteRequest> {
    Ok(RemoteRequest::post(
        format!("/nodes/{}/connect/", source.path_segment()?),
        json!({ "target_node_id": target }),
    ))
}

// ============================================================================
// list_nodes
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListNodesParams {
    #[schemars(description = "The ID of the canvas whose nodes to list")]
    pub canvas_id: ResourceId,

    #[schemars(description = "Only return nodes of this type", with = "Option<String>")]
    #[schemars(extend("enum" = NODE_TYPES))]
    pub node_type: Option<Value>,
}

pub struct ListNodesTool;

impl ToolDefinition for ListNodesTool {
    const NAME: &'static str = "list_nodes";
    const DESCRIPTION: &'static str = "List the nodes on a canvas, optionally filtered by node type.";
    type Params = ListNodesParams;
}

impl SimpleTool for ListNodesTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        Ok(RemoteRequest::get("/nodes/").with_query(compact(&params)?))
    }
}

// ============================================================================
// create_node
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateNodeParams {
    #[schemars(description = "The ID of the canvas to add the node to")]
    pub canvas_id: ResourceId,

    #[schemars(description = "Type of node to create", with = "String")]
    #[schemars(extend("enum" = NODE_TYPES))]
    pub node_type: Value,

    #[schemars(description = "Name/title of the node", with = "String")]
    pub name: Value,

    #[schemars(description = "Content or description for the node", with = "Option<String>")]
    pub content: Option<Value>,

    #[schemars(description = "X position on the canvas (default: 100)", with = "Option<f64>")]
    pub position_x: Option<Value>,

    #[schemars(description = "Y position on the canvas (default: 100)", with = "Option<f64>")]
    pub position_y: Option<Value>,
}

pub struct CreateNodeTool;

impl ToolDefinition for CreateNodeTool {
    const NAME: &'static str = "create_node";
    const DESCRIPTION: &'static str = "Create a new node on a canvas. Node types include: problem (problem statement), \
         objective, keyresult (key result), metric, doc (document), agent (AI agent).";
    type Params = CreateNodeParams;
}

impl SimpleTool for CreateNodeTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        let position = (
            params.position_x.unwrap_or_else(|| DEFAULT_POSITION.into()),
            params.position_y.unwrap_or_else(|| DEFAULT_POSITION.into()),
        );
        let body = create_node_body(
            &params.canvas_id,
            params.node_type,
            params.name,
            params.content.unwrap_or_else(|| Value::from("")),
            position,
        );
        Ok(RemoteRequest::post("/nodes/", body))
    }
}

// ============================================================================
// update_node
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateNodeParams {
    #[schemars(description = "The ID of the node to update")]
    #[serde(skip_serializing)]
    pub node_id: ResourceId,

    #[schemars(description = "New name for the node", with = "Option<String>")]
    pub name: Option<Value>,

    #[schemars(description = "New content for the node", with = "Option<String>")]
    pub content: Option<Value>,

    #[schemars(description = "New X position", with = "Option<f64>")]
    pub position_x: Option<Value>,

    #[schemars(description = "New Y position", with = "Option<f64>")]
    pub position_y: Option<Value>,
}

pub struct UpdateNodeTool;

impl ToolDefinition for UpdateNodeTool {
    const NAME: &'static str = "update_node";
    const DESCRIPTION: &'static str =
        "Update an existing node. Only the fields provided are changed.";
    type Params = UpdateNodeParams;
}

impl SimpleTool for UpdateNodeTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        let body = compact(&params)?;
        let id = params.node_id.path_segment()?;
        Ok(RemoteRequest::put(format!("/nodes/{}/", id), body))
    }
}

// ============================================================================
// delete_node
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteNodeParams {
    #[schemars(description = "The ID of the node to delete")]
    pub node_id: ResourceId,
}

pub struct DeleteNodeTool;

impl ToolDefinition for DeleteNodeTool {
    const NAME: &'static str = "delete_node";
    const DESCRIPTION: &'static str = "Delete a node from its canvas.";
    type Params = DeleteNodeParams;
}

impl SimpleTool for DeleteNodeTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        let id = params.node_id.path_segment()?;
        Ok(RemoteRequest::delete(format!("/nodes/{}/", id)))
    }
}

// ============================================================================
// connect_nodes
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConnectNodesParams {
    #[schemars(description = "The ID of the source node")]
    pub source_node_id: ResourceId,

    #[schemars(description = "The ID of the target node")]
    pub target_node_id: ResourceId,
}

pub struct ConnectNodesTool;

impl ToolDefinition for ConnectNodesTool {
    const NAME: &'static str = "connect_nodes";
    const DESCRIPTION: &'static str = "Create a directed connection between two nodes. \
         Connection rules: problem→objective, objective→keyresult, keyresult→metric.";
    type Params = ConnectNodesParams;
}

impl SimpleTool for ConnectNodesTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        connect_request(&params.source_node_id, &params.target_node_id)
    }
}

// ============================================================================
// delete_connection
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteConnectionParams {
    #[schemars(description = "The ID of the connection to delete")]
    pub connection_id: ResourceId,
}

pub struct DeleteConnectionTool;

impl ToolDefinition for DeleteConnectionTool {
    const NAME: &'static str = "delete_connection";
    const DESCRIPTION: &'static str = "Delete a connection between nodes.";
    type Params = DeleteConnectionParams;
}

impl SimpleTool for DeleteConnectionTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        let id = params.connection_id.path_segment()?;
        Ok(RemoteRequest::delete(format!("/nodes/connections/{}", id)))
    }
}
