//! MCP tool definitions

use serde_json::json;

use super::protocol::ToolDefinition;

pub const ASK_GEMINI: &str = "ask_gemini";
pub const ANALYZE_CODE: &str = "analyze_code";

/// All tool definitions, in the order `tools/list` reports them
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        ASK_GEMINI,
        "Ask Google Gemini AI a question",
        r#"{
            "type": "object",
            "properties": {
                "prompt": {"type": "string", "description": "The question or prompt for Gemini"},
                "temperature": {"type": "number", "minimum": 0.0, "maximum": 1.0, "description": "Sampling temperature for generation (0.0-1.0)"}
            },
            "required": ["prompt"]
        }"#,
    ),
    (
        ANALYZE_CODE,
        "Analyze code with Gemini AI",
        r#"{
            "type": "object",
            "properties": {
                "code": {"type": "string", "description": "The code to analyze"},
                "language": {"type": "string", "description": "Programming language"},
                "task": {"type": "string", "enum": ["review", "explain", "optimize", "debug"], "description": "Kind of analysis: review, explain, optimize, debug"}
            },
            "required": ["code", "task"]
        }"#,
    ),
];

pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}

/// Look up a single definition by tool name
pub fn get_tool_definition(name: &str) -> Option<ToolDefinition> {
    get_tool_definitions().into_iter().find(|def| def.name == name)
}
