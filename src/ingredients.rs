use log::debug;

use crate::model::RecipeRequest;

/// Fewest ingredients a recipe can be requested for
pub const MIN_INGREDIENTS: usize = 3;

/// In-memory list of the ingredients a user has on hand.
///
/// Tracks whether the list changed since the last successful recipe fetch and
/// whether a fetch is currently outstanding.
#[derive(Debug, Clone, Default)]
pub struct IngredientStore {
    ingredients: Vec<String>,
    dirty: bool,
    loading: bool,
}

impl IngredientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Add the text typed into the ingredient form.
    ///
    /// Only the input as a whole is trimmed. It is then split on commas and
    /// every segment is appended as-is, so `"egg, milk"` stores `" milk"` with
    /// its leading space. Returns how many ingredients were added.
    pub fn submit(&mut self, input: &str) -> usize {
        let input = input.trim();
        if input.is_empty() {
            return 0;
        }

        let before = self.ingredients.len();
        self.ingredients.extend(input.split(',').map(str::to_string));
        self.dirty = true;

        let added = self.ingredients.len() - before;
        debug!("Added {} ingredient(s) from {:?}", added, input);
        added
    }

    /// Remove every ingredient exactly equal to `ingredient`.
    pub fn remove(&mut self, ingredient: &str) {
        self.ingredients.retain(|i| i != ingredient);
        self.dirty = true;
    }

    /// Whether a new recipe request makes sense right now
    pub fn can_request(&self) -> bool {
        self.ingredients.len() >= MIN_INGREDIENTS && self.dirty && !self.loading
    }

    /// Snapshot the list for a request and mark it outstanding
    pub fn begin_request(&mut self) -> RecipeRequest {
        self.loading = true;
        RecipeRequest {
            ingredients: self.ingredients.clone(),
        }
    }

    /// Clear the outstanding flag; a successful fetch also clears dirty
    pub fn finish_request(&mut self, success: bool) {
        self.loading = false;
        if success {
            self.dirty = false;
        }
    }

    pub fn headline(&self) -> &'static str {
        if self.ingredients.is_empty() {
            "You have no ingredients on hand. Add some to get started!"
        } else {
            "Ingredients on hand:"
        }
    }

    pub fn readiness_hint(&self) -> &'static str {
        if self.ingredients.len() < MIN_INGREDIENTS {
            "Please add at least 3 ingredients to get a recipe."
        } else {
            "Generate a recipe from your list of ingredients."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_splits_on_commas_without_trimming_segments() {
        let mut store = IngredientStore::new();
        let added = store.submit("egg, milk, flour");

        assert_eq!(added, 3);
        assert_eq!(store.ingredients(), ["egg", " milk", " flour"]);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_submit_trims_whole_input_and_ignores_blank() {
        let mut store = IngredientStore::new();
        assert_eq!(store.submit("   "), 0);
        assert!(store.is_empty());
        assert!(!store.is_dirty());

        store.submit("  butter  ");
        assert_eq!(store.ingredients(), ["butter"]);
    }

    #[test]
    fn test_submit_allows_duplicates() {
        let mut store = IngredientStore::new();
        store.submit("egg");
        store.submit("egg");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_drops_every_exact_match() {
        let mut store = IngredientStore::new();
        store.submit("egg");
        store.submit("milk");
        store.submit("egg");
        store.finish_request(true);

        store.remove("egg");
        assert_eq!(store.ingredients(), ["milk"]);
        assert!(store.is_dirty());

        store.remove("Milk");
        assert_eq!(store.ingredients(), ["milk"]);
    }

    #[test]
    fn test_can_request_needs_three_dirty_and_idle() {
        let mut store = IngredientStore::new();
        store.submit("egg,milk");
        assert!(!store.can_request());

        store.submit("flour");
        assert!(store.can_request());

        let request = store.begin_request();
        assert_eq!(request.ingredients, ["egg", "milk", "flour"]);
        assert!(store.is_loading());
        assert!(!store.can_request());

        store.finish_request(true);
        assert!(!store.is_loading());
        assert!(!store.can_request());

        store.submit("sugar");
        assert!(store.can_request());
    }

    #[test]
    fn test_failed_request_keeps_dirty() {
        let mut store = IngredientStore::new();
        store.submit("egg,milk,flour");
        store.begin_request();
        store.finish_request(false);

        assert!(store.is_dirty());
        assert!(store.can_request());
    }

    #[test]
    fn test_headline_and_hint() {
        let mut store = IngredientStore::new();
        assert!(store.headline().starts_with("You have no ingredients"));
        assert!(store.readiness_hint().contains("at least 3"));

        store.submit("a,b,c");
        assert_eq!(store.headline(), "Ingredients on hand:");
        assert!(store.readiness_hint().starts_with("Generate"));
    }
}
