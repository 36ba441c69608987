mod anthropic;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use prompt::{build_recipe_prompt, RECIPE_SYSTEM_PROMPT};

use async_trait::async_trait;

use crate::error::Result;

/// Unified trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "anthropic")
    fn provider_name(&self) -> &str;

    /// Send one system instruction and one user message, returning the
    /// text of the first content block of the answer
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}
