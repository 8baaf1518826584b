//! Tool registry and per-tool handlers
//!
//! Each tool is a plain function taking validated arguments and the generation
//! gateway. The registry pairs it with the definition `tools/list` reports, so
//! adding a tool never touches the dispatcher.

pub mod analyze;
pub mod ask;

use serde_json::{Map, Value};

use crate::error::{GeminiMcpError, Result};
use crate::gateway::{Generation, GenerationGateway};
use crate::mcp::protocol::{ToolCallResult, ToolDefinition};
use crate::mcp::tools::get_tool_definition;

pub use analyze::CodeTask;

/// Signature shared by all tool handlers
pub type ToolHandler = fn(&CallArguments, &dyn GenerationGateway) -> Result<ToolCallResult>;

/// A tool definition together with its handler
#[derive(Clone)]
pub struct RegisteredTool {
    pub definition: ToolDefinition,
    pub handler: ToolHandler,
}

/// Catalog of callable tools, kept in registration order
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `ask_gemini` and `analyze_code`
    pub fn with_defaults() -> Self {
        let handlers: [(&str, ToolHandler); 2] =
            [(ask::NAME, ask::call), (analyze::NAME, analyze::call)];

        let mut registry = Self::new();
        for (name, handler) in handlers {
            if let Some(definition) = get_tool_definition(name) {
                // names in the static table are unique
                let _ = registry.register(definition, handler);
            }
        }
        registry
    }

    /// Add a tool; names must be unique
    pub fn register(&mut self, definition: ToolDefinition, handler: ToolHandler) -> Result<()> {
        if self.get(&definition.name).is_some() {
            return Err(GeminiMcpError::Config(format!(
                "tool '{}' is already registered",
                definition.name
            )));
        }
        self.tools.push(RegisteredTool {
            definition,
            handler,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|tool| tool.definition.name == name)
    }

    /// Definitions in registration order
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.tools.iter().map(|tool| &tool.definition).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|tool| tool.definition.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the named tool
    pub fn call(
        &self,
        name: &str,
        args: &CallArguments,
        gateway: &dyn GenerationGateway,
    ) -> Result<ToolCallResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| GeminiMcpError::ToolNotFound(name.to_string()))?;
        (tool.handler)(args, gateway)
    }
}

/// Arguments of one `tools/call`; JSON `null` values count as absent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArguments(Map<String, Value>);

impl CallArguments {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|value| !value.is_null())
    }

    /// Non-empty string argument; anything else is `"{name} is required"`
    pub fn required_str(&self, name: &str) -> Result<&str> {
        match self.get(name).and_then(Value::as_str) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(GeminiMcpError::invalid_params(format!("{name} is required"))),
        }
    }

    pub fn optional_str(&self, name: &str) -> Result<Option<&str>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(GeminiMcpError::invalid_params(format!(
                "{name} must be a string"
            ))),
        }
    }

    pub fn optional_f64(&self, name: &str) -> Result<Option<f64>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| {
                GeminiMcpError::invalid_params(format!("{name} must be a number"))
            }),
        }
    }
}

impl From<Map<String, Value>> for CallArguments {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// First generated text, or `fallback` when the model produced none
pub(crate) fn text_or_fallback(generation: &Generation, fallback: &str) -> ToolCallResult {
    match generation.first_text() {
        Some(text) => ToolCallResult::text(text),
        None => {
            tracing::warn!("Model returned no text, using fallback");
            ToolCallResult::text(fallback)
        }
    }
}
