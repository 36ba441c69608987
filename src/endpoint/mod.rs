//! The single recipe endpoint, independent of how it is deployed.
//!
//! [`RecipeService::handle`] holds every rule of the endpoint. Deployments only
//! translate their own request and response types through an [`HttpAdapter`].

pub mod function;
pub mod server;

use log::{debug, error, info};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{ChefError, Result};
use crate::model::{ErrorBody, RecipeResponse};
use crate::providers::{build_recipe_prompt, AnthropicProvider, LlmProvider, RECIPE_SYSTEM_PROMPT};

pub const ALLOW_ORIGIN: (&str, &str) = ("access-control-allow-origin", "*");
pub const ALLOW_METHODS: (&str, &str) = ("access-control-allow-methods", "POST, OPTIONS");
pub const ALLOW_HEADERS: (&str, &str) = ("access-control-allow-headers", "Content-Type");
pub const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

const INGREDIENTS_CONSTRAINT: &str = "ingredients must be a non-empty array of strings";

/// Transport-independent view of an incoming request
#[derive(Debug, Clone)]
pub struct EndpointRequest {
    pub method: String,
    pub body: Option<String>,
}

/// Transport-independent response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

impl EndpointResponse {
    fn preflight() -> Self {
        Self {
            status: 200,
            headers: vec![ALLOW_ORIGIN, ALLOW_METHODS, ALLOW_HEADERS],
            body: String::new(),
        }
    }

    fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        // Serializing these plain structs cannot fail
        let body = serde_json::to_string(payload).unwrap_or_default();
        Self {
            status,
            headers: vec![ALLOW_ORIGIN, JSON_CONTENT_TYPE],
            body,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::json(
            status,
            &ErrorBody {
                error: message.to_string(),
            },
        )
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

/// Translation between a deployment's own request/response types and the
/// endpoint's.
pub trait HttpAdapter {
    type Request;
    type Response;

    fn receive(request: Self::Request) -> EndpointRequest;

    fn send(response: EndpointResponse) -> Self::Response;
}

/// Run one request through `service` using adapter `A` at both ends.
pub async fn dispatch<A: HttpAdapter>(service: &RecipeService, request: A::Request) -> A::Response {
    let request = A::receive(request);
    A::send(service.handle(request).await)
}

/// The recipe endpoint: validates ingredients and asks the LLM for a recipe.
pub struct RecipeService {
    provider: Arc<dyn LlmProvider>,
}

impl RecipeService {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Build the service with the Anthropic provider from `config`.
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let provider = AnthropicProvider::new(&config.provider)?;
        info!(
            "Using {} model {}",
            provider.provider_name(),
            config.provider.model
        );
        Ok(Self::new(Arc::new(provider)))
    }

    pub async fn handle(&self, request: EndpointRequest) -> EndpointResponse {
        debug!("{} recipe request", request.method);

        if request.method.eq_ignore_ascii_case("OPTIONS") {
            return EndpointResponse::preflight();
        }

        if !request.method.eq_ignore_ascii_case("POST") {
            return EndpointResponse::error(405, "Method not allowed");
        }

        let ingredients = match parse_ingredients(request.body.as_deref()) {
            Ok(ingredients) => ingredients,
            Err(e) => {
                debug!("Rejected recipe request: {}", e);
                return EndpointResponse::error(400, INGREDIENTS_CONSTRAINT);
            }
        };

        match self.suggest_recipe(&ingredients).await {
            Ok(recipe) => EndpointResponse::json(200, &RecipeResponse { recipe }),
            Err(e) => {
                error!("Error generating recipe: {}", e);
                EndpointResponse::error(500, "Failed to generate recipe")
            }
        }
    }

    async fn suggest_recipe(&self, ingredients: &[String]) -> Result<String> {
        let prompt = build_recipe_prompt(ingredients);
        info!(
            "Requesting recipe for {} ingredient(s) from {}",
            ingredients.len(),
            self.provider.provider_name()
        );
        self.provider.complete(RECIPE_SYSTEM_PROMPT, &prompt).await
    }
}

/// Extract a non-empty ingredient list from a request body.
///
/// A missing or empty body counts as `{}`. Elements need not be strings.
fn parse_ingredients(body: Option<&str>) -> Result<Vec<String>> {
    let body = match body {
        Some(body) if !body.trim().is_empty() => body,
        _ => "{}",
    };

    let value: Value = serde_json::from_str(body)?;

    let items = value
        .get("ingredients")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| ChefError::InvalidRequest(INGREDIENTS_CONSTRAINT.to_string()))?;

    Ok(items.iter().map(ingredient_text).collect())
}

/// Text of one ingredient element: strings as-is, `null` as empty, anything
/// else as its JSON text.
fn ingredient_text(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
