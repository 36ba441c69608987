use thiserror::Error;

/// Errors that can occur while requesting, generating or serving recipes
#[derive(Error, Debug)]
pub enum ChefError {
    /// No Anthropic API key in config or environment
    #[error("Missing ANTHROPIC_API_KEY. Set it in config.toml or the environment.")]
    MissingApiKey,

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Network failure talking to the endpoint or the LLM service
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The LLM service answered with an error or an unexpected shape
    #[error("LLM service error: {0}")]
    Upstream(String),

    /// The recipe endpoint answered with a non-success status
    #[error("{0}")]
    RequestFailed(String),

    /// Request body did not satisfy the endpoint contract
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A recipe cannot be requested in the current session state
    #[error("Not ready to request a recipe: {0}")]
    NotReady(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading input or binding a socket
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChefError>;
