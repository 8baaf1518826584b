//! Method routing for the Gemini MCP server

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::protocol::{methods, InitializeResult, McpHandler, McpRequest, McpResponse};
use crate::error::{GeminiMcpError, Result};
use crate::gateway::GenerationGateway;
use crate::tools::{CallArguments, ToolRegistry};

/// Parameters for tools/call
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

/// A request method with its parameters decoded for that method
#[derive(Debug, Clone)]
pub enum McpMethod {
    Initialize,
    ListTools,
    CallTool(ToolCallParams),
}

impl McpMethod {
    /// Interpret `method` and decode `params` into the shape it expects
    pub fn from_request(method: &str, params: Value) -> Result<Self> {
        match method {
            methods::INITIALIZE => Ok(McpMethod::Initialize),
            methods::LIST_TOOLS => Ok(McpMethod::ListTools),
            methods::CALL_TOOL => serde_json::from_value(params)
                .map(McpMethod::CallTool)
                .map_err(|e| {
                    tracing::debug!("Bad tools/call params: {}", e);
                    GeminiMcpError::invalid_params("Invalid params")
                }),
            other => Err(GeminiMcpError::MethodNotFound(other.to_string())),
        }
    }
}

/// MCP request handler backed by a generation gateway
pub struct GeminiHandler<G: GenerationGateway> {
    registry: ToolRegistry,
    gateway: G,
}

impl<G: GenerationGateway> GeminiHandler<G> {
    /// Handler with the default tool set
    pub fn new(gateway: G) -> Self {
        Self::with_registry(ToolRegistry::with_defaults(), gateway)
    }

    pub fn with_registry(registry: ToolRegistry, gateway: G) -> Self {
        Self { registry, gateway }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Compute the result value for a request, or the error to report
    pub fn dispatch(&self, method: &str, params: Value) -> Result<Value> {
        match McpMethod::from_request(method, params)? {
            McpMethod::Initialize => Ok(json!(InitializeResult::default())),
            McpMethod::ListTools => Ok(json!({ "tools": self.registry.definitions() })),
            McpMethod::CallTool(call) => {
                tracing::debug!("Calling tool {}", call.name);
                let args = CallArguments::new(call.arguments.unwrap_or_default());
                let result = self.registry.call(&call.name, &args, &self.gateway)?;
                Ok(serde_json::to_value(result)?)
            }
        }
    }
}

impl<G: GenerationGateway> McpHandler for GeminiHandler<G> {
    fn handle_request(&self, request: McpRequest) -> McpResponse {
        tracing::debug!("Received request: {} with ID: {:?}", request.method, request.id);

        match self.dispatch(&request.method, request.params) {
            Ok(result) => McpResponse::success(request.id, result),
            Err(e) => McpResponse::from_error(request.id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::codes;
    use crate::tools::test_support::ScriptedGateway;

    fn request(id: Value, method: &str, params: Value) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(id),
            method: method.to_string(),
            params,
        }
    }

    #[test]
    fn test_method_union() {
        assert!(matches!(
            McpMethod::from_request("initialize", json!({"anything": true})),
            Ok(McpMethod::Initialize)
        ));
        assert!(matches!(
            McpMethod::from_request("tools/list", Value::Null),
            Ok(McpMethod::ListTools)
        ));
        match McpMethod::from_request("tools/call", json!({"name": "ask_gemini"})) {
            Ok(McpMethod::CallTool(params)) => {
                assert_eq!(params.name, "ask_gemini");
                assert!(params.arguments.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            McpMethod::from_request("resources/list", Value::Null),
            Err(GeminiMcpError::MethodNotFound(_))
        ));
    }

    #[test]
    fn test_call_params_shape_errors() {
        for params in [
            Value::Null,
            json!({}),
            json!({"name": 7}),
            json!({"name": "ask_gemini", "arguments": [1, 2]}),
            json!("ask_gemini"),
        ] {
            let err = McpMethod::from_request("tools/call", params).unwrap_err();
            assert_eq!(err.code(), codes::INVALID_PARAMS);
            assert_eq!(err.to_string(), "Invalid params");
        }
    }

    #[test]
    fn test_initialize() {
        let handler = GeminiHandler::new(ScriptedGateway::replying("x"));
        let response = handler.handle_request(request(json!(1), "initialize", Value::Null));
        let result = response.result().unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["capabilities"]["tools"], json!({}));
        assert_eq!(result["serverInfo"]["name"], "gemini-mcp-server");
    }

    #[test]
    fn test_list_tools() {
        let handler = GeminiHandler::new(ScriptedGateway::replying("x"));
        let response = handler.handle_request(request(json!(2), "tools/list", Value::Null));
        let tools = response.result().unwrap()["tools"].as_array().unwrap().clone();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["ask_gemini", "analyze_code"]);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[test]
    fn test_unknown_tool_is_method_not_found() {
        let handler = GeminiHandler::new(ScriptedGateway::replying("x"));
        let response = handler.handle_request(request(
            json!(3),
            "tools/call",
            json!({"name": "ask_claude", "arguments": {}}),
        ));
        let err = response.error_object().unwrap();
        assert_eq!(err.code, codes::METHOD_NOT_FOUND);
        assert_eq!(err.message, "Tool not found");
        assert_eq!(response.id, json!(3));
    }

    #[test]
    fn test_null_arguments_reach_tool_validation() {
        let handler = GeminiHandler::new(ScriptedGateway::replying("x"));
        let response = handler.handle_request(request(
            json!(4),
            "tools/call",
            json!({"name": "ask_gemini", "arguments": null}),
        ));
        let err = response.error_object().unwrap();
        assert_eq!(err.code, codes::INVALID_PARAMS);
        assert_eq!(err.message, "prompt is required");
    }

    #[test]
    fn test_tool_success_shape() {
        let handler = GeminiHandler::new(ScriptedGateway::replying("42"));
        let response = handler.handle_request(request(
            json!("q"),
            "tools/call",
            json!({"name": "ask_gemini", "arguments": {"prompt": "meaning of life?"}}),
        ));
        assert_eq!(
            response.result().unwrap(),
            &json!({"content": [{"type": "text", "text": "42"}]})
        );
        assert_eq!(response.id, json!("q"));
    }
}
