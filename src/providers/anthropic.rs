use crate::config::ProviderConfig;
use crate::error::{ChefError, Result};
use crate::providers::LlmProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    ///
    /// Fails with [`ChefError::MissingApiKey`] when neither the config nor
    /// `ANTHROPIC_API_KEY` provides a key.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(AnthropicProvider {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: None,
            max_tokens: 1024,
        }
    }

    fn request_body(&self, system: &str, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": system,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(system, prompt))
            .send()
            .await?;

        let status = response.status();
        let response_body: Value = response.json().await?;
        debug!("Anthropic response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            let error_type = error["type"].as_str().unwrap_or("unknown");
            let error_message = error["message"].as_str().unwrap_or("Unknown error");
            return Err(ChefError::Upstream(format!(
                "Anthropic API error ({}): {}",
                error_type, error_message
            )));
        }

        if !status.is_success() {
            return Err(ChefError::Upstream(format!(
                "Anthropic API returned status {}",
                status
            )));
        }

        let recipe = response_body["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ChefError::Upstream(format!(
                    "Failed to extract content from Anthropic response. Response: {}",
                    response_body
                ))
            })?
            .to_string();

        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn test_config() -> ProviderConfig {
        ProviderConfig {
            api_key: Some("test-key".to_string()),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = AnthropicProvider::new(&test_config()).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
        assert_eq!(provider.max_tokens, 1024);
        assert_eq!(provider.base_url, "https://api.anthropic.com");
    }

    #[test]
    fn test_request_body_includes_temperature_only_when_set() {
        let mut config = test_config();
        let provider = AnthropicProvider::new(&config).unwrap();
        let body = provider.request_body("system", "prompt");
        assert!(body.get("temperature").is_none());
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["messages"][0]["role"], "user");

        config.temperature = Some(0.5);
        let provider = AnthropicProvider::new(&config).unwrap();
        let body = provider.request_body("system", "prompt");
        assert_eq!(body["temperature"], 0.5);
    }

    #[tokio::test]
    async fn test_complete_returns_first_text_block() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "fake_api_key")
            .match_header("anthropic-version", "2023-06-01")
            .match_body(Matcher::PartialJson(json!({
                "model": "claude-3-haiku-20240307",
                "max_tokens": 1024,
                "system": "be a chef",
                "messages": [{"role": "user", "content": "I have egg."}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r##"{
                    "model": "claude-3-haiku-20240307",
                    "content": [
                        {"type": "text", "text": "# Omelette\n## Ingredients\n- egg"},
                        {"type": "text", "text": "ignored"}
                    ]
                }"##,
            )
            .create_async()
            .await;

        let provider = AnthropicProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "claude-3-haiku-20240307".to_string(),
        );

        let text = provider.complete("be a chef", "I have egg.").await.unwrap();
        assert_eq!(text, "# Omelette\n## Ingredients\n- egg");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"type": "error", "error": {"type": "authentication_error", "message": "invalid x-api-key"}}"#,
            )
            .create_async()
            .await;

        let provider = AnthropicProvider::with_base_url(
            "bad_key".to_string(),
            server.url(),
            "claude-3-haiku-20240307".to_string(),
        );

        let result = provider.complete("system", "prompt").await;
        match result {
            Err(ChefError::Upstream(message)) => {
                assert!(message.contains("authentication_error"));
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_without_content() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": []}"#)
            .create_async()
            .await;

        let provider = AnthropicProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "claude-3-haiku-20240307".to_string(),
        );

        let result = provider.complete("system", "prompt").await;
        assert!(matches!(result, Err(ChefError::Upstream(_))));
    }
}
