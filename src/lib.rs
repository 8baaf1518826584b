//! Gemini MCP - Model Context Protocol server for Google Gemini
//!
//! Speaks line-delimited JSON-RPC on stdin/stdout and exposes two tools,
//! `ask_gemini` and `analyze_code`, backed by a text generation gateway.

pub mod config;
pub mod error;
pub mod gateway;
pub mod mcp;
pub mod tools;

pub use config::GeminiConfig;
pub use error::{GeminiMcpError, Result};
pub use gateway::{GenerationConfig, GenerationGateway};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name announced in `serverInfo`
pub const SERVER_NAME: &str = "gemini-mcp-server";
