use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::error::{ChefError, Result};

/// Main application configuration, built once at startup
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Standalone HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// LLM provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Recipe endpoint client settings
    #[serde(default)]
    pub client: ClientConfig,
}

/// Configuration for the standalone server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Configuration for the Anthropic provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model identifier (e.g., "claude-3-haiku-20240307")
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation, omitted from the request when unset
    #[serde(default)]
    pub temperature: Option<f32>,
    /// API key for authentication (can also be set via ANTHROPIC_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for proxies and tests)
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
            api_key: None,
            base_url: default_provider_base_url(),
            timeout: default_provider_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Resolve the API key from config first, then ANTHROPIC_API_KEY.
    pub fn resolve_api_key(&self) -> Result<String> {
        resolve_api_key(
            self.api_key.clone(),
            std::env::var("ANTHROPIC_API_KEY").ok(),
        )
    }
}

/// Configuration for the recipe endpoint client
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Full URL of the recipe endpoint
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_client_timeout")]
    pub timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout: default_client_timeout(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_provider_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_provider_timeout() -> u64 {
    30
}

fn default_api_base_url() -> String {
    "http://localhost:3000/recipe".to_string()
}

fn default_client_timeout() -> u64 {
    60
}

fn resolve_api_key(configured: Option<String>, from_env: Option<String>) -> Result<String> {
    configured
        .into_iter()
        .chain(from_env)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or(ChefError::MissingApiKey)
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. `PORT` and `RECIPE_API_BASE_URL`
/// 2. Environment variables with PANTRY_CHEF__ prefix
/// 3. The given file, or an optional config.toml in the current directory
/// 4. Default values
///
/// Environment variable format: PANTRY_CHEF__PROVIDER__API_KEY
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let file = match path {
        Some(path) => File::from(path.to_path_buf()).required(true),
        None => File::with_name("config").required(false),
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.trim().parse::<i64>().ok());

    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: PANTRY_CHEF__PROVIDER__API_KEY
        .add_source(
            Environment::with_prefix("PANTRY_CHEF")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("server.port", port)?
        .set_override_option(
            "client.api_base_url",
            std::env::var("RECIPE_API_BASE_URL").ok(),
        )?
        .build()?;

    Ok(settings.try_deserialize()?)
}
