//! Text generation gateway
//!
//! The MCP core only needs "prompt in, text out". Backends:
//! - Gemini `generateContent` API - requires `gemini` feature
//!
//! Per-call sampling overrides never touch a gateway's defaults: callers derive
//! a transient [`GenerationConfig`] and pass it by reference.

mod types;

#[cfg(feature = "gemini")]
mod gemini;

pub use types::{
    Candidate, Content, GenerateContentRequest, Generation, GenerationConfigBody, Part,
};

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default cap on generated tokens
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Errors from generation backends
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    #[cfg(feature = "gemini")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),
}

/// Sampling parameters for one generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl GenerationConfig {
    /// Copy of this config with `temperature` replaced when given
    pub fn with_temperature(&self, temperature: Option<f32>) -> Self {
        match temperature {
            Some(temperature) => Self {
                temperature,
                ..*self
            },
            None => *self,
        }
    }
}

/// Trait for text generators
pub trait GenerationGateway: Send + Sync {
    /// Configuration used when a call supplies no overrides
    fn default_config(&self) -> &GenerationConfig;

    /// Generate a response for `prompt` using exactly `config`
    fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<Generation, GatewayError>;

    /// Generate with the defaults, optionally overriding the temperature for this call only
    fn generate_with(
        &self,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<Generation, GatewayError> {
        let config = self.default_config().with_temperature(temperature);
        self.generate(prompt, &config)
    }

    /// Get model name
    fn model_name(&self) -> &str;
}
