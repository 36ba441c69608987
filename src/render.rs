//! Presentation of parsed recipes and the ingredient list.

use html_escape::encode_text;

use crate::ingredients::IngredientStore;
use crate::model::ParsedRecipe;

/// What to show for one parsed recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView<'a> {
    pub title: Option<&'a str>,
    /// Empty when there is nothing to list
    pub ingredients: &'a [String],
    /// Empty when there is nothing to list
    pub steps: &'a [String],
    /// Raw markdown to show below the lists, if any
    pub raw_markdown: Option<String>,
}

impl<'a> From<&'a ParsedRecipe> for RecipeView<'a> {
    fn from(recipe: &'a ParsedRecipe) -> Self {
        let title = Some(recipe.title.as_str()).filter(|t| !t.is_empty());

        let raw_markdown = if recipe.is_complete() {
            None
        } else if recipe.has_structure() {
            // The title is already shown above the lists
            Some(strip_first_heading(&recipe.raw))
        } else {
            Some(recipe.raw.clone())
        };

        RecipeView {
            title,
            ingredients: &recipe.ingredients,
            steps: &recipe.steps,
            raw_markdown,
        }
    }
}

impl RecipeView<'_> {
    pub fn has_structure(&self) -> bool {
        !self.ingredients.is_empty() || !self.steps.is_empty()
    }
}

fn strip_first_heading(text: &str) -> String {
    match text.split_once('\n') {
        Some((first, rest)) if first.starts_with('#') => rest.to_string(),
        None if text.starts_with('#') => String::new(),
        _ => text.to_string(),
    }
}

/// Render a recipe for a terminal
pub fn render_text(recipe: &ParsedRecipe) -> String {
    let view = RecipeView::from(recipe);
    let mut out = String::from("Your Recipe\n");

    if let Some(title) = view.title {
        out.push_str(&format!("\n{}\n{}\n", title, "=".repeat(title.chars().count())));
    }

    if !view.ingredients.is_empty() {
        out.push_str("\nIngredients\n");
        for item in view.ingredients {
            out.push_str(&format!("  - {}\n", item));
        }
    }

    if !view.steps.is_empty() {
        out.push_str("\nInstructions\n");
        for (idx, item) in view.steps.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", idx + 1, item));
        }
    }

    if let Some(raw) = view.raw_markdown {
        out.push_str(&format!("\n{}\n", raw.trim_end()));
    }

    out
}

/// Render a recipe as an HTML fragment
pub fn render_html(recipe: &ParsedRecipe) -> String {
    let view = RecipeView::from(recipe);
    let mut out = String::from("<section id=\"recipe-section\">\n<h2>Your Recipe</h2>\n");

    if let Some(title) = view.title {
        out.push_str(&format!("<h3 class=\"recipe-title\">{}</h3>\n", encode_text(title)));
    }

    if view.has_structure() {
        out.push_str("<div class=\"recipe-grid\">\n");
        if !view.ingredients.is_empty() {
            out.push_str("<div class=\"recipe-card\">\n<h4>Ingredients</h4>\n<ul>\n");
            for item in view.ingredients {
                out.push_str(&format!("<li>{}</li>\n", encode_text(item)));
            }
            out.push_str("</ul>\n</div>\n");
        }
        if !view.steps.is_empty() {
            out.push_str("<div class=\"recipe-card\">\n<h4>Instructions</h4>\n<ol>\n");
            for item in view.steps {
                out.push_str(&format!("<li>{}</li>\n", encode_text(item)));
            }
            out.push_str("</ol>\n</div>\n");
        }
        out.push_str("</div>\n");
    }

    if let Some(raw) = view.raw_markdown {
        out.push_str(&format!(
            "<div class=\"recipe-raw\"><pre>{}</pre></div>\n",
            encode_text(&raw)
        ));
    }

    out.push_str("</section>\n");
    out
}

/// Render the ingredients on hand for a terminal
pub fn render_ingredient_list_text(store: &IngredientStore) -> String {
    let mut out = format!("{}\n", store.headline());
    for ingredient in store.ingredients() {
        out.push_str(&format!("  - {}\n", ingredient));
    }
    out
}
