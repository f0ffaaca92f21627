//! Common utilities shared across Canvas tools.
//!
//! This module provides the tool definition traits, argument parsing, the
//! resource identifier type, and the partial-update helper used by every
//! update and filter tool.

use std::borrow::Cow;
use std::fmt;

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::api::{ApiClient, RemoteRequest};
use crate::domains::tools::error::{ToolError, ToolResult};

/// Node types known to the canvas.
pub const NODE_TYPES: [&str; 11] = [
    "problem",
    "objective",
    "keyresult",
    "metric",
    "doc",
    "agent",
    "webhook",
    "api",
    "mcp",
    "integration",
    "custom",
];

/// Identifier of a canvas, node, task or connection.
///
/// The API uses integer ids, but any scalar is accepted and forwarded so the
/// backend stays the authority on what is valid. Integral floats (`1.0`)
/// collapse to integers; other scalars are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl ResourceId {
    /// Extract the `id` field from an API response object.
    pub fn from_response(value: &Value) -> Option<Self> {
        match value.get("id")? {
            Value::Number(n) => n.as_i64().map(Self::Number),
            Value::String(s) if !s.is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// The id as a single percent-encoded URL path segment.
    ///
    /// Empty ids and the dot segments `.` and `..` are rejected, since the URL
    /// parser would fold them into the surrounding path.
    pub fn path_segment(&self) -> ToolResult<String> {
        match self {
            Self::Number(n) => Ok(n.to_string()),
            Self::Text(s) if s.is_empty() || s == "." || s == ".." => Err(
                ToolError::invalid_arguments(format!("'{}' is not a valid id", s)),
            ),
            Self::Text(s) => Ok(urlencoding::encode(s).into_owned()),
        }
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ResourceIdVisitor)
    }
}

struct ResourceIdVisitor;

impl Visitor<'_> for ResourceIdVisitor {
    type Value = ResourceId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an id (number or string)")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ResourceId, E> {
        Ok(ResourceId::Number(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ResourceId, E> {
        Ok(i64::try_from(v)
            .map(ResourceId::Number)
            .unwrap_or_else(|_| ResourceId::Text(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ResourceId, E> {
        if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(ResourceId::Number(v as i64))
        } else {
            Ok(ResourceId::Text(v.to_string()))
        }
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ResourceId, E> {
        Ok(ResourceId::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ResourceId, E> {
        Ok(ResourceId::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ResourceId, E> {
        Ok(ResourceId::Text(v))
    }
}

impl JsonSchema for ResourceId {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        "ResourceId".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({ "type": ["integer", "string"] })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

/// Static metadata for a tool: name, description and argument type.
pub trait ToolDefinition {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed arguments; the JSON schema is derived from this type.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<Self::Params>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Deserialize call arguments, reporting missing required fields.
    fn parse(arguments: JsonObject) -> ToolResult<Self::Params> {
        serde_json::from_value(Value::Object(arguments))
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))
    }
}

/// A tool that maps its arguments to exactly one Canvas API request and
/// returns the API response unchanged.
pub trait SimpleTool: ToolDefinition {
    /// Build the request for a set of arguments.
    fn request(params: Self::Params) -> ToolResult<RemoteRequest>;
}

/// Parse, build and send a [`SimpleTool`] call.
pub async fn run_simple<T: SimpleTool>(
    api: &ApiClient,
    arguments: JsonObject,
) -> ToolResult<Value> {
    let params = T::parse(arguments)?;
    let request = T::request(params)?;
    Ok(api.send(request).await?)
}

/// Serialize `fields` and drop every key whose value is absent (`null`).
///
/// Partial updates and filters go through this so that unspecified fields
/// never reach the API as explicit nulls.
pub fn compact<T: Serialize>(fields: &T) -> ToolResult<Map<String, Value>> {
    match serde_json::to_value(fields) {
        Ok(Value::Object(map)) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        Ok(other) => Err(ToolError::internal(format!(
            "expected an object of fields, got {}",
            other
        ))),
        Err(e) => Err(ToolError::internal(e.to_string())),
    }
}
