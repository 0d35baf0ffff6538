//! Wire types for the line-delimited JSON-RPC protocol.
//!
//! Types follow the JSON-RPC 2.0 specification. Only the two tool methods
//! are served; there is no capability negotiation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::tool::ToolDescriptor;

// ============================================================================
// JSON-RPC Base Types
// ============================================================================

/// JSON-RPC version constant.
pub const JSON_RPC_VERSION: &str = "2.0";

/// Method listing the registered tools.
pub const METHOD_TOOLS_LIST: &str = "tools/list";
/// Method invoking one tool by name.
pub const METHOD_TOOLS_CALL: &str = "tools/call";

/// JSON-RPC error codes.
pub mod error_codes {
    /// Parse error (-32700): Invalid JSON was received by the server.
    pub const PARSE_ERROR: i32 = -32700;
    /// Method not found (-32601): The method does not exist / is not available.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Internal error (-32603): Tool resolution or execution failed.
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// A JSON-RPC request object.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    /// JSON-RPC version. Not checked; responses always carry "2.0".
    pub jsonrpc: String,
    /// Request identifier (absent or null for notifications).
    pub id: Option<RequestId>,
    /// Method name to invoke. Absent or non-string methods resolve to "" and are not found.
    pub method: String,
    /// Method parameters (optional).
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Read a request out of a parsed line field by field.
    ///
    /// A field of the wrong type degrades to its default instead of
    /// rejecting the whole request, so a readable id is always kept.
    /// Anything other than an object yields an empty request.
    pub fn from_value(value: Value) -> Self {
        let mut object = match value {
            Value::Object(object) => object,
            _ => serde_json::Map::new(),
        };

        Self {
            jsonrpc: match object.remove("jsonrpc") {
                Some(Value::String(version)) => version,
                _ => JSON_RPC_VERSION.to_string(),
            },
            id: object.get("id").and_then(RequestId::from_value),
            method: match object.remove("method") {
                Some(Value::String(method)) => method,
                _ => String::new(),
            },
            params: object.remove("params").filter(|params| !params.is_null()),
        }
    }
}

/// A JSON-RPC response object.
///
/// Exactly one of `result` and `error` is set. `id` is always serialized and
/// is null when the request id could not be determined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Request identifier matching the request.
    pub id: Option<RequestId>,
    /// Result of the method call (if successful).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error object (if the call failed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a successful response.
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    /// Error code (integer).
    pub code: i32,
    /// Error message (short description).
    pub message: String,
    /// Additional error data (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Create a new JSON-RPC error.
    pub fn new(code: i32, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    /// Create a parse error carrying the parser's message.
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::new(
            error_codes::PARSE_ERROR,
            "Parse error",
            Some(detail_data(detail)),
        )
    }

    /// Create a method not found error.
    pub fn method_not_found() -> Self {
        Self::new(error_codes::METHOD_NOT_FOUND, "Method not found", None)
    }

    /// Create an internal error with `{message}` detail.
    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::new(
            error_codes::INTERNAL_ERROR,
            "Internal error",
            Some(detail_data(detail)),
        )
    }
}

fn detail_data(detail: impl Into<String>) -> Value {
    serde_json::json!({ "message": detail.into() })
}

/// Request identifier type (string or number).
///
/// Numbers are kept as parsed, so ids beyond `i64` are echoed unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    /// String identifier.
    String(String),
    /// Numeric identifier.
    Number(serde_json::Number),
}

impl RequestId {
    /// Id carried by a request field; other JSON types are not ids.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(id) => Some(Self::String(id.clone())),
            Value::Number(id) => Some(Self::Number(id.clone())),
            _ => None,
        }
    }
}

// ============================================================================
// Tool Types
// ============================================================================

/// Result of `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListToolsResult {
    pub tools: Vec<ToolDescriptor>,
}

/// Parameters of `tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallParams {
    /// Name of the tool to invoke.
    pub name: String,
    /// Tool arguments (absent means no arguments).
    #[serde(default)]
    pub arguments: Value,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn request_ids_keep_their_type() {
        let numeric = JsonRpcRequest::from_value(
            json!({ "jsonrpc": "2.0", "id": 7, "method": "tools/list" }),
        );
        assert_eq!(numeric.id, Some(RequestId::Number(7.into())));

        let text = JsonRpcRequest::from_value(
            json!({ "jsonrpc": "2.0", "id": "7", "method": "tools/list" }),
        );
        assert_eq!(text.id, Some(RequestId::String("7".to_string())));
    }

    #[test]
    fn large_ids_survive() {
        let request: Value =
            serde_json::from_str(r#"{"id":18446744073709551615,"method":"tools/list"}"#).unwrap();
        let request = JsonRpcRequest::from_value(request);
        assert_eq!(request.id, Some(RequestId::Number(u64::MAX.into())));

        let response = JsonRpcResponse::success(request.id, json!({}));
        assert!(serde_json::to_string(&response)
            .unwrap()
            .contains(r#""id":18446744073709551615"#));
    }

    #[test]
    fn missing_method_and_id_default() {
        let request = JsonRpcRequest::from_value(json!({ "params": {} }));
        assert_eq!(request.method, "");
        assert_eq!(request.id, None);
        assert_eq!(request.jsonrpc, "2.0");
    }

    #[test]
    fn mistyped_fields_keep_the_id() {
        let request = JsonRpcRequest::from_value(
            json!({ "jsonrpc": 2, "id": 7, "method": 5, "params": null }),
        );
        assert_eq!(request.id, Some(RequestId::Number(7.into())));
        assert_eq!(request.method, "");
        assert_eq!(request.jsonrpc, "2.0");
        assert_eq!(request.params, None);

        let request = JsonRpcRequest::from_value(json!({ "id": true, "method": "tools/list" }));
        assert_eq!(request.id, None);
        assert_eq!(request.method, "tools/list");
    }

    #[test]
    fn non_objects_are_empty_requests() {
        let request = JsonRpcRequest::from_value(json!([1, 2]));
        assert_eq!(request.id, None);
        assert_eq!(request.method, "");
        assert_eq!(request.params, None);
    }

    #[test]
    fn response_always_serializes_id() {
        let response = JsonRpcResponse::error(None, JsonRpcError::method_not_found());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": { "code": -32601, "message": "Method not found" }
            })
        );
    }

    #[test]
    fn internal_error_carries_detail() {
        let error = JsonRpcError::internal_error("Unknown tool: nope");
        assert_eq!(error.code, error_codes::INTERNAL_ERROR);
        assert_eq!(error.message, "Internal error");
        assert_eq!(error.data, Some(json!({ "message": "Unknown tool: nope" })));
    }
}
