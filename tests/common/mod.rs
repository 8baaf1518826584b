//! Shared helpers for integration tests

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Mutex;

use serde_json::Value;

use gemini_mcp::gateway::{GatewayError, Generation, GenerationConfig, GenerationGateway};
use gemini_mcp::mcp::{GeminiHandler, McpServer};

/// Gateway that records every call and replies with a fixed answer
pub struct ScriptedGateway {
    defaults: GenerationConfig,
    reply: Option<String>,
    pub calls: Mutex<Vec<(String, GenerationConfig)>>,
}

impl ScriptedGateway {
    pub fn replying(text: &str) -> Self {
        Self {
            defaults: GenerationConfig::default(),
            reply: Some(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails as if the API were down
    pub fn unavailable() -> Self {
        Self {
            defaults: GenerationConfig::default(),
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }

    pub fn temperatures(&self) -> Vec<f32> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, config)| config.temperature)
            .collect()
    }
}

impl GenerationGateway for ScriptedGateway {
    fn default_config(&self) -> &GenerationConfig {
        &self.defaults
    }

    fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<Generation, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *config));
        match &self.reply {
            Some(text) => Ok(Generation::from_text(text.clone())),
            None => Err(GatewayError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

pub fn server(gateway: ScriptedGateway) -> McpServer<GeminiHandler<ScriptedGateway>> {
    McpServer::new(GeminiHandler::new(gateway))
}

/// Feed `input` through the server and return the raw output lines
pub fn run_lines(server: &McpServer<GeminiHandler<ScriptedGateway>>, input: &str) -> Vec<String> {
    run_lines_bytes(server, input.as_bytes().to_vec())
}

/// Like `run_lines`, for input that need not be valid UTF-8
pub fn run_lines_bytes(
    server: &McpServer<GeminiHandler<ScriptedGateway>>,
    input: Vec<u8>,
) -> Vec<String> {
    let mut output = Vec::new();
    server.serve(Cursor::new(input), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Feed `input` through the server and parse each output line
pub fn run_json(server: &McpServer<GeminiHandler<ScriptedGateway>>, input: &str) -> Vec<Value> {
    run_lines(server, input)
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

pub fn run_json_bytes(
    server: &McpServer<GeminiHandler<ScriptedGateway>>,
    input: Vec<u8>,
) -> Vec<Value> {
    run_lines_bytes(server, input)
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
