//! Task tools.
//!
//! Tasks may hang off a canvas or a node. Every optional field here is
//! filtered through [`compact`] so that absent arguments never reach the API.
//! Values are forwarded as given; status, priority and dates are validated
//! by the API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{ResourceId, SimpleTool, ToolDefinition, compact};
use crate::core::api::RemoteRequest;
use crate::domains::tools::error::ToolResult;

fn default_task_limit() -> Value {
    Value::from(50)
}

/// Optional task fields shared by create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TaskFields {
    #[schemars(description = "Longer description of the task", with = "Option<String>")]
    pub description: Option<Value>,

    #[schemars(description = "Task status", with = "Option<String>")]
    #[schemars(extend("enum" = ["todo", "in_progress", "review", "done"]))]
    pub status: Option<Value>,

    #[schemars(description = "Task priority", with = "Option<String>")]
    #[schemars(extend("enum" = ["low", "medium", "high", "urgent"]))]
    pub priority: Option<Value>,

    #[schemars(description = "Due date (ISO 8601, e.g. 2025-03-31)", with = "Option<String>")]
    pub due_date: Option<Value>,

    #[schemars(description = "Username or ID of the assignee", with = "Option<String>")]
    pub assignee: Option<Value>,

    #[schemars(description = "Canvas the task belongs to")]
    pub canvas_id: Option<ResourceId>,

    #[schemars(description = "Node the task is attached to")]
    pub node_id: Option<ResourceId>,
}

// ============================================================================
// list_tasks
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListTasksParams {
    #[schemars(description = "Only tasks on this canvas")]
    pub canvas_id: Option<ResourceId>,

    #[schemars(description = "Only tasks attached to this node")]
    pub node_id: Option<ResourceId>,

    #[schemars(description = "Only tasks with this status", with = "Option<String>")]
    #[schemars(extend("enum" = ["todo", "in_progress", "review", "done"]))]
    pub status: Option<Value>,

    #[schemars(description = "Only tasks with this priority", with = "Option<String>")]
    #[schemars(extend("enum" = ["low", "medium", "high", "urgent"]))]
    pub priority: Option<Value>,

    #[schemars(description = "Only tasks assigned to this user", with = "Option<String>")]
    pub assignee: Option<Value>,

    #[schemars(description = "Maximum number of tasks to return (default: 50)")]
    #[schemars(with = "u32")]
    #[serde(default = "default_task_limit")]
    pub limit: Value,
}

pub struct ListTasksTool;

impl ToolDefinition for ListTasksTool {
    const NAME: &'static str = "list_tasks";
    const DESCRIPTION: &'static str =
        "List tasks, optionally filtered by canvas, node, status, priority or assignee.";
    type Params = ListTasksParams;
}

impl SimpleTool for ListTasksTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        Ok(RemoteRequest::get("/tasks/").with_query(compact(&params)?))
    }
}

// ============================================================================
// create_task
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    #[schemars(description = "Title of the task", with = "String")]
    pub title: Value,

    #[serde(flatten)]
    pub fields: TaskFields,
}

pub struct CreateTaskTool;

impl ToolDefinition for CreateTaskTool {
    const NAME: &'static str = "create_task";
    const DESCRIPTION: &'static str = "Create a task. Priority is one of low, medium, high, urgent; \
         status is one of todo, in_progress, review, done.";
    type Params = CreateTaskParams;
}

impl SimpleTool for CreateTaskTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        Ok(RemoteRequest::post("/tasks/", compact(&params)?))
    }
}

// ============================================================================
// update_task
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    #[schemars(description = "The ID of the task to update")]
    #[serde(skip_serializing)]
    pub task_id: ResourceId,

    #[schemars(description = "New title", with = "Option<String>")]
    pub title: Option<Value>,

    #[serde(flatten)]
    pub fields: TaskFields,
}

pub struct UpdateTaskTool;

impl ToolDefinition for UpdateTaskTool {
    const NAME: &'static str = "update_task";
    const DESCRIPTION: &'static str = "Update a task. Only the fields provided are changed.";
    type Params = UpdateTaskParams;
}

impl SimpleTool for UpdateTaskTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        let body = compact(&params)?;
        let id = params.task_id.path_segment()?;
        Ok(RemoteRequest::put(format!("/tasks/{}/", id), body))
    }
}

// ============================================================================
// get_task_stats
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaskStatsParams {
    #[schemars(description = "Only count tasks on this canvas")]
    pub canvas_id: Option<ResourceId>,

    #[schemars(description = "Only count tasks assigned to this user", with = "Option<String>")]
    pub assignee: Option<Value>,
}

pub struct GetTaskStatsTool;

impl ToolDefinition for GetTaskStatsTool {
    const NAME: &'static str = "get_task_stats";
    const DESCRIPTION: &'static str =
        "Get task counts grouped by status and priority, optionally scoped to a canvas or assignee.";
    type Params = TaskStatsParams;
}

impl SimpleTool for GetTaskStatsTool {
    fn request(params: Self::Params) -> ToolResult<RemoteRequest> {
        Ok(RemoteRequest::get("/tasks/stats").with_query(compact(&params)?))
    }
}
