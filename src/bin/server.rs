//! Gemini MCP Server
//!
//! Run with: gemini-mcp-server

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gemini_mcp::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use gemini_mcp::error::Result;
use gemini_mcp::gateway::{GeminiClient, GenerationConfig};
use gemini_mcp::mcp::{GeminiHandler, McpServer};
use gemini_mcp::GeminiConfig;

#[derive(Parser, Debug)]
#[command(name = "gemini-mcp-server")]
#[command(about = "MCP server exposing Google Gemini as tools over stdio")]
#[command(version)]
struct Args {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Default sampling temperature (0.0-1.0)
    #[arg(long, env = "GEMINI_TEMPERATURE", default_value = "0.7")]
    temperature: f32,

    /// Maximum tokens per generated answer
    #[arg(long, env = "GEMINI_MAX_OUTPUT_TOKENS", default_value = "2048")]
    max_output_tokens: u32,

    /// Timeout for a single generation call in seconds
    #[arg(long, env = "GEMINI_TIMEOUT_SECS", default_value = "120")]
    timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.unwrap_or_default(),
            model: self.model,
            base_url: self.base_url,
            generation: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn main() -> Result<()> {
    // Load .env before clap reads the environment
    let _ = dotenvy::dotenv();

    // Initialize logging to stderr (stdout is for MCP protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.into_config();

    let client = match GeminiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Error initializing Gemini: {}", e);
            return Err(e);
        }
    };

    tracing::info!(
        "Gemini client initialized with model: {} (temperature {})",
        client.config().model,
        client.config().generation.temperature
    );

    let server = McpServer::new(GeminiHandler::new(client));

    tracing::info!("Gemini MCP server starting...");
    server.run()?;

    Ok(())
}
