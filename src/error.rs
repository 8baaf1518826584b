//! Error types for the Gemini MCP server

use thiserror::Error;

use crate::mcp::protocol::codes;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, GeminiMcpError>;

/// Main error type
///
/// The `Display` text of the protocol-level variants is sent verbatim as the
/// `message` of the JSON-RPC error object, so keep it short and stable.
#[derive(Error, Debug)]
pub enum GeminiMcpError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Method not found")]
    MethodNotFound(String),

    #[error("Tool not found")]
    ToolNotFound(String),

    #[error("{0}")]
    InvalidParams(String),

    #[error("{0}")]
    Internal(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    #[cfg(feature = "gemini")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeminiMcpError {
    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            GeminiMcpError::Parse(_) => codes::PARSE_ERROR,
            GeminiMcpError::MethodNotFound(_) | GeminiMcpError::ToolNotFound(_) => {
                codes::METHOD_NOT_FOUND
            }
            GeminiMcpError::InvalidParams(_) => codes::INVALID_PARAMS,
            _ => codes::INTERNAL_ERROR,
        }
    }

    /// Shorthand for an `InvalidParams` error
    pub fn invalid_params(message: impl Into<String>) -> Self {
        GeminiMcpError::InvalidParams(message.into())
    }
}
