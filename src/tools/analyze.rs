//! `analyze_code`: review, explain, optimize or debug a code snippet
//!
//! The prompt layout is part of the contract with the model; golden fixtures in
//! `tests/fixtures/analyze_prompts.json` lock it.

use std::fmt;
use std::str::FromStr;

use crate::error::{GeminiMcpError, Result};
use crate::gateway::GenerationGateway;
use crate::mcp::protocol::ToolCallResult;
use crate::mcp::tools::ANALYZE_CODE;

use super::{text_or_fallback, CallArguments};

pub const NAME: &str = ANALYZE_CODE;

/// Returned when the model produced no text
pub const FALLBACK_TEXT: &str = "code could not be analyzed";

const PERSONA: &str = "Act as an expert senior software developer.\n\n";
const CLOSING: &str = "Provide a detailed and constructive analysis.";
const INVALID_TASK: &str = "task must be one of: review, explain, optimize, debug";

/// Kind of analysis requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeTask {
    #[default]
    Review,
    Explain,
    Optimize,
    Debug,
}

impl CodeTask {
    pub const ALL: [CodeTask; 4] = [
        CodeTask::Review,
        CodeTask::Explain,
        CodeTask::Optimize,
        CodeTask::Debug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeTask::Review => "review",
            CodeTask::Explain => "explain",
            CodeTask::Optimize => "optimize",
            CodeTask::Debug => "debug",
        }
    }

    /// Instruction line placed right after the persona preamble
    pub fn instruction(&self) -> &'static str {
        match self {
            CodeTask::Review => "Perform a thorough review of the following code:",
            CodeTask::Explain => "Explain the following code clearly and in detail:",
            CodeTask::Optimize => "Optimize the following code, suggesting improvements:",
            CodeTask::Debug => "Analyze the following code to find and fix bugs:",
        }
    }
}

impl fmt::Display for CodeTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeTask {
    type Err = GeminiMcpError;

    fn from_str(s: &str) -> Result<Self> {
        CodeTask::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| GeminiMcpError::invalid_params(INVALID_TASK))
    }
}

/// Validated `analyze_code` arguments
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeArgs<'a> {
    pub code: &'a str,
    pub task: CodeTask,
    pub language: Option<&'a str>,
}

impl<'a> AnalyzeArgs<'a> {
    pub fn parse(args: &'a CallArguments) -> Result<Self> {
        let code = args.required_str("code")?;
        // absent or empty task falls back to review
        let task = match args.optional_str("task") {
            Ok(None) | Ok(Some("")) => CodeTask::default(),
            Ok(Some(task)) => task.parse()?,
            Err(_) => return Err(GeminiMcpError::invalid_params(INVALID_TASK)),
        };
        let language = args.optional_str("language")?.filter(|l| !l.is_empty());

        Ok(Self {
            code,
            task,
            language,
        })
    }

    pub fn prompt(&self) -> String {
        build_prompt(self.code, self.task, self.language)
    }
}

/// Assemble the analysis prompt sent to the model
pub fn build_prompt(code: &str, task: CodeTask, language: Option<&str>) -> String {
    let mut prompt = String::with_capacity(PERSONA.len() + code.len() + 160);
    prompt.push_str(PERSONA);
    prompt.push_str(task.instruction());
    prompt.push('\n');

    if let Some(language) = language.filter(|l| !l.is_empty()) {
        prompt.push_str(&format!("Language: {language}\n"));
    }

    prompt.push_str("\nCode:\n```\n");
    prompt.push_str(code);
    prompt.push_str("\n```\n\n");
    prompt.push_str(CLOSING);
    prompt
}

pub fn call(args: &CallArguments, gateway: &dyn GenerationGateway) -> Result<ToolCallResult> {
    let args = AnalyzeArgs::parse(args)?;
    tracing::debug!(task = %args.task, language = ?args.language, "Analyzing code");

    let generation = gateway.generate_with(&args.prompt(), None).map_err(|e| {
        tracing::warn!("analyze_code generation failed: {}", e);
        GeminiMcpError::Internal(format!("Error analyzing code: {e}"))
    })?;

    Ok(text_or_fallback(&generation, FALLBACK_TEXT))
}
