//! The uniform result envelope returned by every tool.
//!
//! On the wire a result is either `{"ok": true, "payload": ...}` or
//! `{"ok": false, "error": "..."}`. Modelling it as an enum makes a result
//! with both a payload and an error unrepresentable.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ToolResult;

/// Outcome of one tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Envelope", try_from = "Envelope")]
pub enum ToolOutput {
    /// The call succeeded with an arbitrary JSON payload.
    Success(Value),
    /// The call failed with a human-readable message.
    Failure(String),
}

impl ToolOutput {
    /// Create a successful tool output.
    pub fn success(payload: impl Into<Value>) -> Self {
        Self::Success(payload.into())
    }

    /// Create a failed tool output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(error.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(msg) => Some(msg),
            Self::Success(_) => None,
        }
    }

    /// Render as indented JSON, the text body sent back to MCP clients.
    pub fn to_pretty_json(&self) -> String {
        // Serializing a Value-backed envelope cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            format!("{{\n  \"ok\": false,\n  \"error\": \"Failed to encode result: {}\"\n}}", e)
        })
    }
}

impl<T: Into<Value>> From<ToolResult<T>> for ToolOutput {
    fn from(result: ToolResult<T>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

/// Wire shape of [`ToolOutput`].
#[derive(Serialize, Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ToolOutput> for Envelope {
    fn from(output: ToolOutput) -> Self {
        match output {
            ToolOutput::Success(payload) => Self {
                ok: true,
                payload: Some(payload),
                error: None,
            },
            ToolOutput::Failure(error) => Self {
                ok: false,
                payload: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<Envelope> for ToolOutput {
    type Error = String;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        match (envelope.ok, envelope.payload, envelope.error) {
            (true, payload, None) => Ok(Self::Success(payload.unwrap_or(Value::Null))),
            (false, None, Some(error)) => Ok(Self::Failure(error)),
            (true, _, Some(_)) | (false, Some(_), _) => {
                Err("result cannot carry both a payload and an error".to_string())
            }
            (false, None, None) => Err("failed result is missing its error".to_string()),
        }
    }
}
