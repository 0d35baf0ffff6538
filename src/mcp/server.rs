//! Request dispatcher.
//!
//! Turns one input line into at most one response. Every failure becomes a
//! JSON-RPC error envelope; nothing here ends the session.

use serde_json::json;

use crate::mcp::types::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, RequestId, ToolCallParams,
    METHOD_TOOLS_CALL, METHOD_TOOLS_LIST,
};
use crate::tools::{ToolCallInput, ToolContext, ToolError, ToolRegistry};

/// Dispatches requests against a fixed tool registry.
pub struct McpServer {
    registry: ToolRegistry,
    context: ToolContext,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, context: ToolContext) -> Self {
        Self { registry, context }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw input line. Blank lines produce no response.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("unparseable request line: {e}");
                return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error(e.to_string())));
            }
        };

        let request = JsonRpcRequest::from_value(value);
        Some(self.handle(request).await)
    }

    /// Handle a decoded request.
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let JsonRpcRequest {
            id, method, params, ..
        } = request;
        tracing::debug!("request {:?}: {}", id, method);

        match method.as_str() {
            METHOD_TOOLS_LIST => self.handle_tools_list(id),
            METHOD_TOOLS_CALL => self.handle_tools_call(id, params).await,
            _ => JsonRpcResponse::error(id, JsonRpcError::method_not_found()),
        }
    }

    fn handle_tools_list(&self, id: Option<RequestId>) -> JsonRpcResponse {
        let result = ListToolsResult {
            tools: self
                .registry
                .list()
                .iter()
                .map(|descriptor| descriptor.advertised())
                .collect(),
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
        }
    }

    async fn handle_tools_call(
        &self,
        id: Option<RequestId>,
        params: Option<serde_json::Value>,
    ) -> JsonRpcResponse {
        let params: ToolCallParams = match params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| format!("invalid tools/call params: {e}"))
            .and_then(|p| p.ok_or_else(|| "tools/call requires params".to_string()))
        {
            Ok(params) => params,
            Err(message) => return JsonRpcResponse::error(id, JsonRpcError::internal_error(message)),
        };

        let call = ToolCallInput {
            name: params.name,
            args: params.arguments,
        };
        let tool_name = call.name.clone();

        match self.registry.invoke(&self.context, call).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => {
                log_tool_error(&tool_name, &error);
                JsonRpcResponse::error(id, JsonRpcError::internal_error(error.to_string()))
            }
        }
    }
}

fn log_tool_error(tool: &str, error: &ToolError) {
    match error {
        ToolError::UnknownTool(_) | ToolError::InvalidInput(_) => {
            tracing::debug!("tool call {tool} rejected: {error}")
        }
        ToolError::Execution(_) => tracing::warn!("tool {tool} failed: {error}"),
    }
}

/// Serialize a response as a single line (without the trailing newline).
pub fn encode_response(response: &JsonRpcResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": { "code": -32603, "message": "Internal error", "data": { "message": e.to_string() } }
        })
        .to_string()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::testing::{context_with, StubWordPress};

    fn server() -> McpServer {
        McpServer::new(
            ToolRegistry::with_defaults(),
            context_with(Arc::new(StubWordPress::default())),
        )
    }

    async fn respond(line: &str) -> Value {
        let response = server().handle_line(line).await.expect("a response");
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn blank_lines_are_ignored() {
        let server = server();
        assert!(server.handle_line("").await.is_none());
        assert!(server.handle_line("   \t").await.is_none());
    }

    #[tokio::test]
    async fn tools_list_echoes_id_and_erases_schemas() {
        let response = respond(r#"{"jsonrpc":"2.0","id":"abc","method":"tools/list"}"#).await;

        assert_eq!(response["id"], "abc");
        assert!(response.get("error").is_none());
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        assert_eq!(tools[0]["name"], "analyze_keywords");
        assert_eq!(tools[6]["name"], "delete_wordpress_post");
        for tool in tools {
            assert_eq!(tool["inputSchema"], json!({ "type": "object", "properties": {} }));
        }
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let response = respond(r#"{"jsonrpc":"2.0","id":3,"method":"initialize"}"#).await;
        assert_eq!(
            response,
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "error": { "code": -32601, "message": "Method not found" }
            })
        );
    }

    #[tokio::test]
    async fn missing_method_is_method_not_found() {
        let response = respond(r#"{"jsonrpc":"2.0","id":4}"#).await;
        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["id"], 4);
    }

    #[tokio::test]
    async fn malformed_json_is_parse_error_with_null_id() {
        let response = respond("{not json").await;
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["error"]["code"], -32700);
        assert_eq!(response["error"]["message"], "Parse error");
        assert!(response["error"]["data"]["message"].is_string());
    }

    #[tokio::test]
    async fn non_object_json_is_method_not_found() {
        for line in ["[1,2]", "42", "\"tools/list\"", "null"] {
            let response = respond(line).await;
            assert_eq!(response["id"], Value::Null, "{line}");
            assert_eq!(response["error"]["code"], -32601, "{line}");
        }
    }

    #[tokio::test]
    async fn non_string_method_keeps_the_id() {
        let response = respond(r#"{"jsonrpc":"2.0","id":7,"method":5}"#).await;
        assert_eq!(
            response,
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "error": { "code": -32601, "message": "Method not found" }
            })
        );
    }

    #[tokio::test]
    async fn unreadable_id_is_null_but_request_still_runs() {
        let response = respond(r#"{"jsonrpc":"2.0","id":true,"method":"tools/list"}"#).await;
        assert_eq!(response["id"], Value::Null);
        assert!(response["result"]["tools"].is_array());
    }

    #[tokio::test]
    async fn large_integer_ids_are_echoed() {
        let server = server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":18446744073709551615,"method":"ping"}"#)
            .await
            .expect("a response");
        let encoded = encode_response(&response);
        assert!(encoded.contains(r#""id":18446744073709551615"#), "{encoded}");
        assert!(encoded.contains("-32601"), "{encoded}");
    }

    #[tokio::test]
    async fn unknown_tool_is_internal_error() {
        let response = respond(
            r#"{"jsonrpc":"2.0","id":9,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
        )
        .await;
        assert_eq!(
            response["error"],
            json!({ "code": -32603, "message": "Internal error", "data": { "message": "Unknown tool: nope" } })
        );
        assert_eq!(response["id"], 9);
    }

    #[tokio::test]
    async fn missing_params_is_internal_error() {
        let response = respond(r#"{"jsonrpc":"2.0","id":1,"method":"tools/call"}"#).await;
        assert_eq!(response["error"]["code"], -32603);
        assert_eq!(
            response["error"]["data"]["message"],
            "tools/call requires params"
        );
    }

    #[tokio::test]
    async fn invalid_arguments_are_internal_error() {
        let response = respond(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"analyze_keywords","arguments":{"keywords":"seo"}}}"#,
        )
        .await;
        assert_eq!(response["error"]["code"], -32603);
        let detail = response["error"]["data"]["message"].as_str().unwrap();
        assert!(detail.starts_with("invalid input:"), "{detail}");
    }

    #[tokio::test]
    async fn tool_result_is_unwrapped_into_result() {
        let response = respond(
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"delete_wordpress_post","arguments":{"post_id":42,"force":true}}}"#,
        )
        .await;
        assert_eq!(
            response,
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "result": { "success": true, "message": "Post permanently deleted" }
            })
        );
    }

    #[tokio::test]
    async fn notifications_are_answered_with_null_id() {
        let response = respond(r#"{"jsonrpc":"2.0","method":"tools/list"}"#).await;
        assert_eq!(response["id"], Value::Null);
        assert!(response["result"]["tools"].is_array());
    }

    #[test]
    fn encoded_response_is_one_line() {
        let response = JsonRpcResponse::success(
            Some(RequestId::Number(1.into())),
            json!({ "text": "line one\nline two" }),
        );
        let encoded = encode_response(&response);
        assert!(!encoded.contains('\n'));
    }
}
