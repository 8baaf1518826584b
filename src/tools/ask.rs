//! `ask_gemini`: forward a free-form prompt to the model

use crate::error::{GeminiMcpError, Result};
use crate::gateway::GenerationGateway;
use crate::mcp::protocol::ToolCallResult;
use crate::mcp::tools::ASK_GEMINI;

use super::{text_or_fallback, CallArguments};

pub const NAME: &str = ASK_GEMINI;

/// Returned when the model produced no text
pub const FALLBACK_TEXT: &str = "no answer could be generated";

/// Validated `ask_gemini` arguments
#[derive(Debug, Clone, PartialEq)]
pub struct AskArgs<'a> {
    pub prompt: &'a str,
    pub temperature: Option<f32>,
}

impl<'a> AskArgs<'a> {
    pub fn parse(args: &'a CallArguments) -> Result<Self> {
        let prompt = args.required_str("prompt")?;
        let temperature = match args.optional_f64("temperature") {
            Ok(Some(t)) if (0.0..=1.0).contains(&t) => Some(t as f32),
            Ok(None) => None,
            _ => {
                return Err(GeminiMcpError::invalid_params(
                    "temperature must be a number between 0.0 and 1.0",
                ))
            }
        };
        Ok(Self {
            prompt,
            temperature,
        })
    }
}

pub fn call(args: &CallArguments, gateway: &dyn GenerationGateway) -> Result<ToolCallResult> {
    let args = AskArgs::parse(args)?;

    let generation = gateway
        .generate_with(args.prompt, args.temperature)
        .map_err(|e| {
            tracing::warn!("ask_gemini generation failed: {}", e);
            GeminiMcpError::Internal(format!("Error generating content: {e}"))
        })?;

    Ok(text_or_fallback(&generation, FALLBACK_TEXT))
}
