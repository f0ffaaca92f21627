//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol. Discovery requests are answered from the static tool catalogue
//! and invocations are handed to the [`ToolRouter`].
//!
//! Every invocation produces exactly one text content item holding the
//! uniform result envelope as indented JSON.
//!
//! Tool calls are serialized per server: rmcp spawns a task for every
//! inbound request, so a call lock makes each invocation run to completion
//! before the next one starts.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::api::ApiClient;
use super::config::Config;
use super::error::Result;
use crate::domains::tools::{ToolCall, ToolOutput, ToolRegistry, ToolRouter};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    router: ToolRouter,

    /// Held for the whole of each tool call.
    call_lock: Arc<Mutex<()>>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured Canvas API.
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        if !api.has_token() {
            warn!(
                "CANVAS_API_TOKEN not set - every Canvas API call will fail \
                 with a configuration error"
            );
        }
        info!("Tools: {}", ToolRegistry::tool_names().join(", "));
        Ok(Self::with_client(config, api))
    }

    /// Create a server around an existing API client.
    pub fn with_client(config: Config, api: ApiClient) -> Self {
        Self {
            config: Arc::new(config),
            router: ToolRouter::new(api),
            call_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// The tool catalogue.
    pub fn tool_catalogue(&self) -> Vec<Tool> {
        ToolRegistry::list().to_vec()
    }

    /// Run one tool call and render it as an MCP tool result.
    ///
    /// Calls wait for any in-flight call on this server to finish first.
    pub async fn invoke_tool(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        let _guard = self.call_lock.lock().await;
        debug!("Acquired call lock for {}", name);
        let output = self.router.dispatch(ToolCall::new(name, arguments)).await;
        render_output(&output)
    }
}

/// Wrap a tool output in a single text content item.
fn render_output(output: &ToolOutput) -> CallToolResult {
    let content = vec![Content::text(output.to_pretty_json())];
    if output.is_ok() {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Manage canvases, nodes, connections and tasks in the Canvas app. \
                 Use create_okr_structure to lay out a problem, objective and key results in one call."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_catalogue(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(self
            .invoke_tool(&request.name, request.arguments.unwrap_or_default())
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::testing::{config_with_token, stub_client};
    use crate::core::api::{ApiResult, HttpExecutor, HttpRequest, HttpResponse};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[tokio::test]
    async fn test_invoke_renders_envelope_as_pretty_json() {
        let (api, stub) = stub_client();
        stub.push_ok(200, r#"{"username": "ada"}"#);
        let server = McpServer::with_client(Config::default(), api);

        let result = server.invoke_tool("whoami", JsonObject::new()).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);

        let text = text_of(&result);
        assert!(text.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(value, json!({ "ok": true, "payload": { "username": "ada" } }));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_normal_result() {
        let (api, _stub) = stub_client();
        let server = McpServer::with_client(Config::default(), api);

        let result = server.invoke_tool("nope", JsonObject::new()).await;
        assert_eq!(result.is_error, Some(true));

        let value: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(value, json!({ "ok": false, "error": "Unknown tool: nope" }));
    }

    /// Sleeps on every request and records the peak number in flight.
    #[derive(Default)]
    struct SlowExecutor {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl HttpExecutor for SlowExecutor {
        async fn execute(&self, _request: HttpRequest) -> ApiResult<HttpResponse> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(HttpResponse::new(200, "{}"))
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_tool_calls_run_one_at_a_time() {
        let executor = Arc::new(SlowExecutor::default());
        let api = ApiClient::with_executor(&config_with_token(Some("t")), executor.clone());
        let server = McpServer::with_client(Config::default(), api);

        let first = tokio::spawn({
            let server = server.clone();
            async move { server.invoke_tool("whoami", JsonObject::new()).await }
        });
        let second = tokio::spawn({
            let server = server.clone();
            async move { server.invoke_tool("whoami", JsonObject::new()).await }
        });

        assert_eq!(first.await.unwrap().is_error, Some(false));
        assert_eq!(second.await.unwrap().is_error, Some(false));
        assert_eq!(executor.peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_server_info_reports_configured_identity() {
        let (api, _stub) = stub_client();
        let mut config = Config::default();
        config.server.name = "canvas-test".to_string();
        let server = McpServer::with_client(config, api);

        let info = server.get_info();
        assert_eq!(info.server_info.name, "canvas-test");
        assert_eq!(info.server_info.version, server.version());
    }

    #[tokio::test]
    async fn test_new_without_token_still_serves_catalogue() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.tool_catalogue().len(), 15);

        let result = server.invoke_tool("whoami", JsonObject::new()).await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("no API token configured"));
    }

    #[test]
    fn test_catalogue_exposed() {
        let (api, _stub) = stub_client();
        let server = McpServer::with_client(Config::default(), api);
        assert_eq!(server.tool_catalogue().len(), 15);
        assert!(server.get_info().capabilities.tools.is_some());
    }
}
