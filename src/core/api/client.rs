//! Canvas API client.
//!
//! Resolves a [`RemoteRequest`] against the configured base URL, attaches the
//! bearer token, and interprets the response into either JSON or an
//! [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::{ApiError, ApiResult};
use super::executor::{HttpExecutor, HttpRequest, HttpResponse, ReqwestExecutor};
use super::request::RemoteRequest;
use crate::core::config::ApiConfig;

/// Version prefix every Canvas API path lives under.
pub const API_PREFIX: &str = "/api/v1";

/// Fixed per-request timeout.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Authenticated client for the Canvas API.
///
/// Holds the process-wide auth context (base URL and optional token); it is
/// read-only once constructed and shared across all tool calls.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    executor: Arc<dyn HttpExecutor>,
}

impl ApiClient {
    /// Create a client backed by `reqwest`.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let executor = ReqwestExecutor::new(Duration::from_secs(REQUEST_TIMEOUT_SECS))?;
        Ok(Self::with_executor(config, Arc::new(executor)))
    }

    /// Create a client with a custom executor.
    pub fn with_executor(config: &ApiConfig, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            executor,
        }
    }

    /// Whether a bearer token is configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Full URL for a path relative to the API prefix.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Send one request and decode the JSON response.
    ///
    /// Fails fast with [`ApiError::MissingToken`] when no token is configured;
    /// no network I/O happens in that case.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: RemoteRequest) -> ApiResult<Value> {
        let Some(token) = self.token.as_ref() else {
            warn!("Refusing to call Canvas API without a token");
            return Err(ApiError::MissingToken);
        };

        let http_request = HttpRequest {
            method: request.method,
            url: self.url_for(&request.path),
            bearer_token: token.clone(),
            query: request.query_pairs(),
            body: request.body,
        };

        debug!("Sending {} {}", http_request.method, http_request.url);
        let response = self.executor.execute(http_request).await?;
        interpret_response(response)
    }
}

/// Turn a raw response into JSON or the matching status error.
fn interpret_response(response: HttpResponse) -> ApiResult<Value> {
    if response.status >= 400 {
        warn!("Canvas API returned status {}", response.status);
        return Err(ApiError::from_status(response.status, response.body));
    }

    // DELETE endpoints answer 204 with an empty body.
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&response.body).map_err(|e| ApiError::invalid_response(e.to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording stub executor shared by tool tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Executor that records requests and replays scripted responses.
    ///
    /// When the script runs out, it answers `200 {}`.
    #[derive(Default)]
    pub struct StubExecutor {
        requests: Mutex<Vec<HttpRequest>>,
        responses: Mutex<VecDeque<ApiResult<HttpResponse>>>,
    }

    impl StubExecutor {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn push_ok(&self, status: u16, body: &str) {
            self.push(Ok(HttpResponse::new(status, body)));
        }

        pub fn push(&self, response: ApiResult<HttpResponse>) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpExecutor for StubExecutor {
        async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
        }
    }

    pub fn config_with_token(token: Option<&str>) -> ApiConfig {
        ApiConfig {
            base_url: "http://canvas.test/".to_string(),
            token: token.map(str::to_string),
        }
    }

    /// Client with a token, wired to a fresh stub.
    pub fn stub_client() -> (ApiClient, Arc<StubExecutor>) {
        let stub = StubExecutor::new();
        let client = ApiClient::with_executor(&config_with_token(Some("test-token")), stub.clone());
        (client, stub)
    }
}
