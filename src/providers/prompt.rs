/// The system prompt used when asking for a recipe suggestion.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const RECIPE_SYSTEM_PROMPT: &str = include_str!("prompt.txt");

/// Build the user message listing the ingredients on hand.
///
/// Ingredients are joined with `", "` exactly as given.
pub fn build_recipe_prompt(ingredients: &[String]) -> String {
    format!(
        "I have {}. Please give me a recipe you'd recommend I make!",
        ingredients.join(", ")
    )
}
