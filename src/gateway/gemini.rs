//! Gemini HTTP client
//!
//! Async reqwest under the hood; [`GenerationGateway::generate`] blocks on a
//! private current-thread runtime so the stdio loop stays synchronous.

use reqwest::Client;
use tokio::runtime::Runtime;

use super::types::{GenerateContentRequest, Generation};
use super::{GatewayError, GenerationConfig, GenerationGateway};
use crate::config::GeminiConfig;
use crate::error::{GeminiMcpError, Result};

/// Client for the Gemini `generateContent` API
pub struct GeminiClient {
    http: Client,
    runtime: Runtime,
    config: GeminiConfig,
    endpoint: String,
}

impl GeminiClient {
    /// Build a client; fails when the config is unusable
    pub fn new(config: GeminiConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder().timeout(config.timeout).build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| GeminiMcpError::Config(format!("failed to start runtime: {e}")))?;
        let endpoint = config.endpoint();

        Ok(Self {
            http,
            runtime,
            config,
            endpoint,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Async call to the generateContent endpoint
    pub async fn generate_async(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> std::result::Result<Generation, GatewayError> {
        let body = GenerateContentRequest::new(prompt, config);

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(GatewayError::RateLimited { retry_after });
        }

        if status >= 400 {
            let message = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(GatewayError::Api { status, message });
        }

        response
            .json::<Generation>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("failed to parse response: {e}")))
    }
}

impl GenerationGateway for GeminiClient {
    fn default_config(&self) -> &GenerationConfig {
        &self.config.generation
    }

    fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> std::result::Result<Generation, GatewayError> {
        let timeout = self.config.timeout;
        tracing::debug!(
            model = %self.config.model,
            temperature = config.temperature,
            "Calling generateContent"
        );

        self.runtime.block_on(async {
            match tokio::time::timeout(timeout, self.generate_async(prompt, config)).await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout(timeout.as_secs())),
            }
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
