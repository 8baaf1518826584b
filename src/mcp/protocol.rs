//! MCP JSON-RPC protocol implementation

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};

use crate::error::{GeminiMcpError, Result};

/// Protocol tag carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision announced by `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC error codes used by this server
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// MCP JSON-RPC request
///
/// Only the object shape is enforced; a missing `method` decodes as empty and is
/// answered with -32601 under the request's own id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// MCP JSON-RPC response
///
/// `outcome` is flattened, so a response always serializes with exactly one of
/// `result` or `error`.
#[derive(Debug, Clone, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Success or failure payload of a response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(McpError),
}

/// MCP error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpError {
    pub code: i64,
    pub message: String,
}

/// Map an absent or null request id onto the literal `0`.
///
/// Notifications therefore still get a response, and it is indistinguishable
/// from a reply to a request whose id really was `0`.
pub fn normalize_id(id: Option<Value>) -> Value {
    match id {
        None | Some(Value::Null) => json!(0),
        Some(id) => id,
    }
}

impl McpResponse {
    /// Create a success response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: normalize_id(id),
            outcome: Outcome::Result(result),
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i64, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: normalize_id(id),
            outcome: Outcome::Error(McpError { code, message }),
        }
    }

    /// Create error from GeminiMcpError
    pub fn from_error(id: Option<Value>, err: GeminiMcpError) -> Self {
        Self::error(id, err.code(), err.to_string())
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&McpError> {
        match &self.outcome {
            Outcome::Error(err) => Some(err),
            Outcome::Result(_) => None,
        }
    }
}

/// Decode one input line into a request envelope
pub fn decode(line: &str) -> Result<McpRequest> {
    serde_json::from_str(line).map_err(|e| GeminiMcpError::Parse(e.to_string()))
}

/// Encode a response envelope as one output line (without the newline)
pub fn encode(response: &McpResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Trait for handling MCP requests
pub trait McpHandler: Send + Sync {
    fn handle_request(&self, request: McpRequest) -> McpResponse;
}

/// MCP Server handling stdio communication
pub struct McpServer<H>
where
    H: McpHandler,
{
    handler: H,
}

impl<H: McpHandler> McpServer<H> {
    /// Create a new MCP server
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Turn one input line into its response. Blank lines yield `None`.
    pub fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let response = match decode(trimmed) {
            Ok(request) => self.handler.handle_request(request),
            Err(e) => {
                tracing::warn!("Rejecting unparseable line: {}", e);
                McpResponse::from_error(None, e)
            }
        };
        Some(response)
    }

    /// Run the server, reading from stdin and writing to stdout
    pub fn run(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(BufReader::new(stdin.lock()), stdout.lock())
    }

    /// Serve line-delimited requests from `reader` until EOF
    ///
    /// Lines are read as raw bytes; one that is not valid UTF-8 gets a parse
    /// error like any other unreadable line. Only an I/O failure ends the loop.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> Result<()> {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let response = match std::str::from_utf8(&buf) {
                        Ok(line) => {
                            tracing::debug!("Received message: {}", line.trim_end());
                            self.handle_line(line)
                        }
                        Err(e) => {
                            tracing::warn!("Rejecting line that is not UTF-8: {}", e);
                            Some(McpResponse::from_error(
                                None,
                                GeminiMcpError::Parse(e.to_string()),
                            ))
                        }
                    };

                    if let Some(response) = response {
                        let response_json = encode(&response)?;
                        tracing::debug!("Sending response: {}", response_json);
                        writeln!(writer, "{}", response_json)?;
                        writer.flush()?;
                    }
                }
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Standard MCP methods
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const LIST_TOOLS: &str = "tools/list";
    pub const CALL_TOOL: &str = "tools/call";
}

/// MCP tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// MCP initialize result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// Server capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

/// Tools capability; no sub-capabilities are announced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsCapability {}

/// Server info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for InitializeResult {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability::default(),
            },
            server_info: ServerInfo {
                name: crate::SERVER_NAME.to_string(),
                version: crate::VERSION.to_string(),
            },
        }
    }
}

/// Tool call result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolCallResult {
    /// Create a text result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }
}
