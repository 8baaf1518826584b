//! Gateway configuration

use std::time::Duration;

use crate::error::{GeminiMcpError, Result};
use crate::gateway::GenerationConfig;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Gemini connection settings
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`
    pub api_key: String,
    /// Model name, e.g. "gemini-1.5-flash"
    pub model: String,
    /// API root; overridable for proxies and tests
    pub base_url: String,
    /// Defaults for every call; per-call overrides copy this
    pub generation: GenerationConfig,
    /// Upper bound on a single generation call
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Create config with default model, endpoint and sampling settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            generation: GenerationConfig::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Check that the server can start with these settings
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(GeminiMcpError::Config(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(GeminiMcpError::Config("model name is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.generation.temperature) {
            return Err(GeminiMcpError::Config(format!(
                "temperature {} is outside 0.0-1.0",
                self.generation.temperature
            )));
        }
        if self.generation.max_output_tokens == 0 {
            return Err(GeminiMcpError::Config(
                "max output tokens must be positive".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(GeminiMcpError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Full `generateContent` endpoint for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}
