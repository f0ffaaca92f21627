//! OKR structure tool.
//!
//! Builds a problem → objective → key results tree on a canvas with a
//! strictly sequential series of API calls:
//!
//! 1. create the problem node (required)
//! 2. create the objective node (required)
//! 3. connect problem → objective (best effort)
//! 4. per key result, in order: create the node, then connect
//!    objective → key result (both best effort)
//!
//! A failed required step aborts with that step's error. Nodes already
//! created are left in place; nothing is rolled back. Best-effort failures
//! are recorded (connections) or skipped (key result nodes) and the
//! workflow carries on.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::common::{ResourceId, ToolDefinition};
use super::node::{connect_request, create_node_body};
use crate::core::api::{ApiClient, ApiError, ApiResult, RemoteRequest};
use crate::domains::tools::error::{ToolError, ToolResult};

const PROBLEM_POSITION: (f64, f64) = (100.0, 100.0);
const OBJECTIVE_POSITION: (f64, f64) = (400.0, 100.0);
const KEY_RESULT_X: f64 = 700.0;
const KEY_RESULT_Y: f64 = 100.0;
const KEY_RESULT_SPACING: f64 = 150.0;

/// Layout position of the key result at `index`.
fn key_result_position(index: usize) -> (f64, f64) {
    (KEY_RESULT_X, KEY_RESULT_Y + KEY_RESULT_SPACING * index as f64)
}

// ============================================================================
// Parameters & Output
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateOkrStructureParams {
    #[schemars(description = "The ID of the canvas")]
    pub canvas_id: ResourceId,

    #[schemars(description = "The problem statement")]
    pub problem: String,

    #[schemars(description = "The objective to achieve")]
    pub objective: String,

    #[schemars(description = "List of key results (1-5 recommended)")]
    pub key_results: Vec<String>,
}

/// A node created by the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub id: ResourceId,
    pub name: String,
}

/// An attempted connection and whether the API accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionAttempt {
    pub from: ResourceId,
    pub to: ResourceId,
    pub success: bool,
}

/// Accumulated workflow state, returned as the tool payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OkrStructure {
    pub created_nodes: Vec<CreatedNode>,
    pub connections: Vec<ConnectionAttempt>,
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct CreateOkrStructureTool;

impl ToolDefinition for CreateOkrStructureTool {
    const NAME: &'static str = "create_okr_structure";
    const DESCRIPTION: &'static str = "Create a complete OKR structure on a canvas: a problem statement, an objective, \
         and key results, connected problem → objective → each key result. \
         Returns the created nodes and the outcome of each connection.";
    type Params = CreateOkrStructureParams;
}

impl CreateOkrStructureTool {
    /// Run the workflow.
    #[instrument(skip_all, fields(canvas_id = %params.canvas_id, key_results = params.key_results.len()))]
    pub async fn execute(params: CreateOkrStructureParams, api: &ApiClient) -> ToolResult<Value> {
        info!("Creating OKR structure");
        let canvas_id = &params.canvas_id;
        let mut structure = OkrStructure::default();

        let problem = create_node(
            api,
            canvas_id,
            "problem",
            format!("Problem: {}", params.problem),
            &params.problem,
            PROBLEM_POSITION,
        )
        .await?;

        let objective = create_node(
            api,
            canvas_id,
            "objective",
            format!("Objective: {}", params.objective),
            &params.objective,
            OBJECTIVE_POSITION,
        )
        .await?;

        let problem_id = problem.id.clone();
        let objective_id = objective.id.clone();
        structure.created_nodes.push(problem);
        structure.created_nodes.push(objective);
        structure
            .connections
            .push(connect(api, &problem_id, &objective_id).await);

        for (index, key_result) in params.key_results.iter().enumerate() {
            let node = match create_node(
                api,
                canvas_id,
                "keyresult",
                format!("KR{}: {}", index + 1, key_result),
                key_result,
                key_result_position(index),
            )
            .await
            {
                Ok(node) => node,
                Err(e) => {
                    warn!("Skipping key result {} ('{}'): {}", index + 1, key_result, e);
                    continue;
                }
            };

            let node_id = node.id.clone();
            structure.created_nodes.push(node);
            structure
                .connections
                .push(connect(api, &objective_id, &node_id).await);
        }

        info!(
            "OKR structure created: {} node(s), {}/{} connection(s) succeeded",
            structure.created_nodes.len(),
            structure.connections.iter().filter(|c| c.success).count(),
            structure.connections.len()
        );

        serde_json::to_value(&structure).map_err(|e| ToolError::internal(e.to_string()))
    }
}

/// Create one node and read its id back from the response.
async fn create_node(
    api: &ApiClient,
    canvas_id: &ResourceId,
    node_type: &str,
    name: String,
    content: &str,
    position: (f64, f64),
) -> ApiResult<CreatedNode> {
    let body = create_node_body(canvas_id, node_type, name.as_str(), content, position);
    let response = api.send(RemoteRequest::post("/nodes/", body)).await?;

    let id = ResourceId::from_response(&response)
        .ok_or_else(|| ApiError::invalid_response(format!("created {} node has no id", node_type)))?;

    Ok(CreatedNode {
        node_type: node_type.to_string(),
        id,
        name,
    })
}

/// Attempt a connection, recording the outcome instead of failing.
async fn connect(api: &ApiClient, from: &ResourceId, to: &ResourceId) -> ConnectionAttempt {
    let outcome = match connect_request(from, to) {
        Ok(request) => api.send(request).await.map_err(ToolError::from),
        Err(e) => Err(e),
    };
    let success = match outcome {
        Ok(_) => true,
        Err(e) => {
            warn!("Failed to connect node {} → {}: {}", from, to, e);
            false
        }
    };

    ConnectionAttempt {
        from: from.clone(),
        to: to.clone(),
        success,
    }
}
