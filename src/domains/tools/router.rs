//! Tool Router - dispatches tool calls to their handlers.
//!
//! Dispatch never fails: unknown tools, bad arguments, API errors and even
//! panicking handlers all come back as a [`ToolOutput::Failure`], so a single
//! bad call cannot take down the protocol session.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use rmcp::model::JsonObject;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::definitions::{
    ConnectNodesTool, CreateCanvasTool, CreateNodeTool, CreateOkrStructureTool, CreateTaskTool,
    DeleteConnectionTool, DeleteNodeTool, GetCanvasTool, GetTaskStatsTool, ListCanvasesTool,
    ListNodesTool, ListTasksTool, ToolDefinition, UpdateNodeTool, UpdateTaskTool, WhoamiTool,
    run_simple,
};
use super::error::{ToolError, ToolResult};
use super::output::ToolOutput;
use super::registry::ToolName;
use crate::core::api::ApiClient;

/// An inbound tool invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolCall {
    pub name: String,
    pub arguments: JsonObject,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: JsonObject) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Routes tool calls to handlers backed by a shared [`ApiClient`].
#[derive(Clone)]
pub struct ToolRouter {
    api: ApiClient,
}

impl ToolRouter {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Run a tool call to completion and wrap the outcome.
    #[instrument(skip_all, fields(tool = %call.name))]
    pub async fn dispatch(&self, call: ToolCall) -> ToolOutput {
        let Some(tool) = ToolName::from_name(&call.name) else {
            warn!("Unknown tool requested: {}", call.name);
            return ToolOutput::failure(ToolError::unknown_tool(call.name).to_string());
        };

        info!("Tool call: {}", tool.as_str());

        let outcome = AssertUnwindSafe(self.route(tool, call.arguments))
            .catch_unwind()
            .await;

        match outcome {
            Ok(result) => {
                if let Err(e) = &result {
                    warn!("Tool {} failed: {}", tool.as_str(), e);
                }
                ToolOutput::from(result)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Tool {} panicked: {}", tool.as_str(), message);
                ToolOutput::failure(ToolError::internal(message).to_string())
            }
        }
    }

    async fn route(&self, tool: ToolName, arguments: JsonObject) -> ToolResult<Value> {
        let api = &self.api;
        match tool {
            ToolName::ListCanvases => run_simple::<ListCanvasesTool>(api, arguments).await,
            ToolName::GetCanvas => run_simple::<GetCanvasTool>(api, arguments).await,
            ToolName::CreateCanvas => run_simple::<CreateCanvasTool>(api, arguments).await,
            ToolName::ListNodes => run_simple::<ListNodesTool>(api, arguments).await,
            ToolName::CreateNode => run_simple::<CreateNodeTool>(api, arguments).await,
            ToolName::UpdateNode => run_simple::<UpdateNodeTool>(api, arguments).await,
            ToolName::DeleteNode => run_simple::<DeleteNodeTool>(api, arguments).await,
            ToolName::ConnectNodes => run_simple::<ConnectNodesTool>(api, arguments).await,
            ToolName::DeleteConnection => run_simple::<DeleteConnectionTool>(api, arguments).await,
            ToolName::CreateOkrStructure => {
                let params = CreateOkrStructureTool::parse(arguments)?;
                CreateOkrStructureTool::execute(params, api).await
            }
            ToolName::ListTasks => run_simple::<ListTasksTool>(api, arguments).await,
            ToolName::CreateTask => run_simple::<CreateTaskTool>(api, arguments).await,
            ToolName::UpdateTask => run_simple::<UpdateTaskTool>(api, arguments).await,
            ToolName::GetTaskStats => run_simple::<GetTaskStatsTool>(api, arguments).await,
            ToolName::Whoami => run_simple::<WhoamiTool>(api, arguments).await,
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::testing::{StubExecutor, config_with_token, stub_client};
    use crate::core::api::{
        ApiError, ApiResult, HttpExecutor, HttpMethod, HttpRequest, HttpResponse,
    };
    use crate::core::config::ApiConfig;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    fn call(name: &str, arguments: Value) -> ToolCall {
        ToolCall::new(name, arguments.as_object().cloned().unwrap_or_default())
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (api, stub) = stub_client();
        let router = ToolRouter::new(api);

        for name in ["", "drop_database", "LIST_CANVASES"] {
            let output = router.dispatch(call(name, json!({}))).await;
            assert_eq!(output, ToolOutput::failure(format!("Unknown tool: {}", name)));
        }
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_passes_api_payload_through() {
        let (api, stub) = stub_client();
        stub.push_ok(200, r#"[{"id": 1, "name": "Roadmap"}]"#);
        let router = ToolRouter::new(api);

        let output = router.dispatch(call("list_canvases", json!({}))).await;
        assert_eq!(output, ToolOutput::success(json!([{ "id": 1, "name": "Roadmap" }])));
    }

    #[tokio::test]
    async fn test_create_task_end_to_end() {
        let (api, stub) = stub_client();
        stub.push_ok(201, r#"{"id": 9, "title": "Ship v1"}"#);
        let router = ToolRouter::new(api);

        let output = router
            .dispatch(call("create_task", json!({ "title": "Ship v1" })))
            .await;
        assert!(output.is_ok());

        let sent = stub.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].url, "http://canvas.test/api/v1/tasks/");
        assert_eq!(sent[0].body, Some(json!({ "title": "Ship v1" })));
        assert!(sent[0].query.is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let (api, stub) = stub_client();
        let router = ToolRouter::new(api);

        let output = router.dispatch(call("get_canvas", json!({}))).await;
        let error = output.error().unwrap();
        assert!(error.starts_with("Invalid arguments:"));
        assert!(error.contains("canvas_id"));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_api_errors_become_failures() {
        let (api, stub) = stub_client();
        stub.push_ok(401, "expired");
        let router = ToolRouter::new(api);

        let output = router.dispatch(call("whoami", json!({}))).await;
        assert_eq!(output, ToolOutput::failure(ApiError::Authentication.to_string()));
    }

    #[tokio::test]
    async fn test_missing_token_fails_every_tool_without_network() {
        let stub = StubExecutor::new();
        let api = ApiClient::with_executor(&config_with_token(None), stub.clone());
        let router = ToolRouter::new(api);

        let arguments = json!({
            "canvas_id": 1,
            "node_id": 2,
            "task_id": 3,
            "connection_id": 4,
            "source_node_id": 5,
            "target_node_id": 6,
            "name": "n",
            "node_type": "doc",
            "title": "t",
            "problem": "p",
            "objective": "o",
            "key_results": ["a"]
        });

        for tool in ToolName::ALL {
            let output = router.dispatch(call(tool.as_str(), arguments.clone())).await;
            assert_eq!(
                output,
                ToolOutput::failure(ApiError::MissingToken.to_string()),
                "tool {}",
                tool.as_str()
            );
        }
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_okr_required_failure_is_the_result() {
        let (api, stub) = stub_client();
        stub.push_ok(502, "upstream gone");
        let router = ToolRouter::new(api);

        let output = router
            .dispatch(call(
                "create_okr_structure",
                json!({ "canvas_id": 1, "problem": "p", "objective": "o", "key_results": ["a", "b"] }),
            ))
            .await;

        assert_eq!(output, ToolOutput::failure("API error 502: upstream gone"));
        assert_eq!(stub.call_count(), 1);
    }

    /// Panics on `/auth/me`, answers everything else with `200 {}`.
    struct PanickingExecutor;

    #[async_trait]
    impl HttpExecutor for PanickingExecutor {
        async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
            if request.url.ends_with("/auth/me") {
                panic!("executor exploded");
            }
            Ok(HttpResponse::new(200, "{}"))
        }
    }

    #[tokio::test]
    async fn test_panicking_handler_becomes_failure() {
        let api = ApiClient::with_executor(
            &config_with_token(Some("test-token")),
            Arc::new(PanickingExecutor),
        );
        let router = ToolRouter::new(api);

        let output = router.dispatch(call("whoami", json!({}))).await;
        assert_eq!(
            output,
            ToolOutput::failure("Internal error: executor exploded")
        );

        // The router keeps serving after a panic.
        let output = router.dispatch(call("list_canvases", json!({}))).await;
        assert_eq!(output, ToolOutput::success(json!({})));
    }

    #[tokio::test]
    async fn test_text_id_cannot_redirect_request() {
        let server = MockServer::start_async().await;
        let canvas_delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/v1/canvases/5/");
                then.status(204);
            })
            .await;
        let node_delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path_contains("/api/v1/nodes/");
                then.status(204);
            })
            .await;

        let config = ApiConfig {
            base_url: server.base_url(),
            token: Some("test-token".to_string()),
        };
        let router = ToolRouter::new(ApiClient::new(&config).unwrap());

        let output = router
            .dispatch(call("delete_node", json!({ "node_id": "../canvases/5" })))
            .await;
        assert_eq!(output, ToolOutput::success(Value::Null));
        canvas_delete.assert_hits_async(0).await;
        node_delete.assert_hits_async(1).await;

        let output = router
            .dispatch(call("delete_node", json!({ "node_id": ".." })))
            .await;
        assert!(output.error().unwrap().starts_with("Invalid arguments:"));
        canvas_delete.assert_hits_async(0).await;
        node_delete.assert_hits_async(1).await;
    }

    #[test]
    fn test_panic_message_extraction() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&"boom".to_string()), "boom");
        assert_eq!(panic_message(&42_u8), "tool handler panicked");
    }
}
