use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{ChefError, Result};
use crate::model::{RecipeRequest, RecipeResponse};

/// Client for the recipe endpoint
pub struct RecipeClient {
    client: Client,
    api_base_url: String,
}

impl RecipeClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(RecipeClient {
            client,
            api_base_url: config.api_base_url.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_base_url: String) -> Self {
        RecipeClient {
            client: Client::new(),
            api_base_url,
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Ask the endpoint for a recipe and return its raw markdown text.
    ///
    /// A non-success status fails with [`ChefError::RequestFailed`] carrying
    /// the response body.
    pub async fn fetch_recipe(&self, ingredients: &[String]) -> Result<String> {
        info!(
            "Requesting recipe for {} ingredient(s) from {}",
            ingredients.len(),
            self.api_base_url
        );

        let response = self
            .client
            .post(&self.api_base_url)
            .json(&RecipeRequest {
                ingredients: ingredients.to_vec(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!("Recipe endpoint returned {}: {}", status, message);
            return Err(ChefError::RequestFailed(if message.is_empty() {
                "Failed to fetch recipe".to_string()
            } else {
                message
            }));
        }

        let data: RecipeResponse = response.json().await?;
        Ok(data.recipe)
    }
}
