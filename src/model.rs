use serde::{Deserialize, Serialize};

/// Body sent to the recipe endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub ingredients: Vec<String>,
}

/// Successful answer of the recipe endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub recipe: String,
}

/// Error answer of the recipe endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Structured view of a generated recipe.
///
/// `raw` always holds the exact text that was parsed, so callers can fall back
/// to it when the other fields come out empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub raw: String,
}

impl ParsedRecipe {
    /// True when at least one of the lists could be recovered
    pub fn has_structure(&self) -> bool {
        !self.ingredients.is_empty() || !self.steps.is_empty()
    }

    /// True when title, ingredients and steps were all recovered
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.ingredients.is_empty() && !self.steps.is_empty()
    }
}
