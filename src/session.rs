use log::{error, info};

use crate::client::RecipeClient;
use crate::error::{ChefError, Result};
use crate::ingredients::{IngredientStore, MIN_INGREDIENTS};
use crate::model::ParsedRecipe;
use crate::parser::parse_recipe_text;

/// One user's session: the ingredients on hand and the latest recipe.
pub struct ChefSession {
    pub store: IngredientStore,
    client: RecipeClient,
    recipe: Option<ParsedRecipe>,
}

impl ChefSession {
    pub fn new(client: RecipeClient) -> Self {
        Self {
            store: IngredientStore::new(),
            client,
            recipe: None,
        }
    }

    /// Most recently fetched recipe, if any
    pub fn recipe(&self) -> Option<&ParsedRecipe> {
        self.recipe.as_ref()
    }

    /// Fetch and parse a recipe for the current ingredients.
    ///
    /// On failure the previous recipe is kept and the ingredients stay dirty.
    pub async fn request_recipe(&mut self) -> Result<&ParsedRecipe> {
        if !self.store.can_request() {
            return Err(ChefError::NotReady(self.not_ready_reason()));
        }

        let request = self.store.begin_request();
        let result = self.client.fetch_recipe(&request.ingredients).await;
        self.store.finish_request(result.is_ok());

        match result {
            Ok(text) => {
                let parsed = parse_recipe_text(&text);
                info!(
                    "Parsed recipe {:?}: {} ingredient(s), {} step(s)",
                    parsed.title,
                    parsed.ingredients.len(),
                    parsed.steps.len()
                );
                let recipe: &ParsedRecipe = self.recipe.insert(parsed);
                Ok(recipe)
            }
            Err(e) => {
                error!("Failed to fetch recipe: {}", e);
                Err(e)
            }
        }
    }

    fn not_ready_reason(&self) -> String {
        if self.store.len() < MIN_INGREDIENTS {
            format!(
                "add at least {} ingredients (have {})",
                MIN_INGREDIENTS,
                self.store.len()
            )
        } else if self.store.is_loading() {
            "a recipe is already being prepared".to_string()
        } else {
            "ingredients have not changed since the last recipe".to_string()
        }
    }
}
