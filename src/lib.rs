pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod ingredients;
pub mod model;
pub mod parser;
pub mod providers;
pub mod render;
pub mod session;

pub use crate::client::RecipeClient;
pub use crate::config::{load_config, AppConfig};
pub use crate::endpoint::RecipeService;
pub use crate::error::{ChefError, Result};
pub use crate::ingredients::IngredientStore;
pub use crate::model::ParsedRecipe;
pub use crate::parser::parse_recipe_text;
pub use crate::session::ChefSession;

/// Ask the configured endpoint for a recipe and parse the answer.
///
/// Convenience for one-off requests that skip the session bookkeeping.
pub async fn suggest_recipe(config: &AppConfig, ingredients: &[String]) -> Result<ParsedRecipe> {
    let client = RecipeClient::new(&config.client)?;
    let text = client.fetch_recipe(ingredients).await?;
    Ok(parse_recipe_text(&text))
}
