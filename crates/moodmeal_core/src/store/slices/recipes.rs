//! crates/moodmeal_core/src/store/slices/recipes.rs
//!
//! Recipe listings, search results, the recipe being viewed, and favourites.

use crate::domain::{Recipe, SearchFilters};
use crate::store::lifecycle::{AsyncStatus, Lifecycle, RequestSlot, ResponsePolicy};
use crate::store::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum RecipesAction {
    FetchRecipes(Lifecycle<Vec<Recipe>>),
    SearchRecipes(Lifecycle<Vec<Recipe>>),
    FetchRecipeById(Lifecycle<Recipe>),
    GenerateRecipe(Lifecycle<Recipe>),
    SetSearchFilters(SearchFilters),
    ClearSearchResults,
    ToggleFavorite(String),
    SetCurrentRecipe(Option<Recipe>),
    ClearError,
}

impl RecipesAction {
    pub fn kind(&self) -> String {
        match self {
            RecipesAction::FetchRecipes(l) => format!("fetchRecipes/{}", l.phase_name()),
            RecipesAction::SearchRecipes(l) => format!("searchRecipes/{}", l.phase_name()),
            RecipesAction::FetchRecipeById(l) => format!("fetchRecipeById/{}", l.phase_name()),
            RecipesAction::GenerateRecipe(l) => format!("generateRecipe/{}", l.phase_name()),
            RecipesAction::SetSearchFilters(_) => "setSearchFilters".to_string(),
            RecipesAction::ClearSearchResults => "clearSearchResults".to_string(),
            RecipesAction::ToggleFavorite(_) => "toggleFavorite".to_string(),
            RecipesAction::SetCurrentRecipe(_) => "setCurrentRecipe".to_string(),
            RecipesAction::ClearError => "clearError".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipesState {
    pub recipes: Vec<Recipe>,
    /// Recipe ids in the order they were first favourited. Never holds duplicates.
    pub favorites: Vec<String>,
    pub search_results: Vec<Recipe>,
    pub search_filters: SearchFilters,
    pub current_recipe: Option<Recipe>,
    pub status: AsyncStatus,
    fetch: RequestSlot,
    search: RequestSlot,
    /// Shared by every operation that writes `current_recipe`.
    current: RequestSlot,
}

impl RecipesState {
    pub fn new(policy: ResponsePolicy) -> Self {
        Self {
            recipes: Vec::new(),
            favorites: Vec::new(),
            search_results: Vec::new(),
            search_filters: SearchFilters::default(),
            current_recipe: None,
            status: AsyncStatus::default(),
            fetch: RequestSlot::new(policy),
            search: RequestSlot::new(policy),
            current: RequestSlot::new(policy),
        }
    }

    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorites.iter().any(|id| id == recipe_id)
    }

    pub fn reduce(&mut self, action: &Action) {
        let Action::Recipes(action) = action else {
            return;
        };

        match action {
            RecipesAction::FetchRecipes(lifecycle) => {
                if let Some(recipes) =
                    self.status
                        .track(&mut self.fetch, lifecycle, "Failed to fetch recipes")
                {
                    self.recipes = recipes.clone();
                }
            }
            RecipesAction::SearchRecipes(lifecycle) => {
                if let Some(results) =
                    self.status
                        .track(&mut self.search, lifecycle, "Failed to search recipes")
                {
                    self.search_results = results.clone();
                }
            }
            RecipesAction::FetchRecipeById(lifecycle) => {
                if let Some(recipe) =
                    self.status
                        .track(&mut self.current, lifecycle, "Failed to fetch recipe")
                {
                    self.current_recipe = Some(recipe.clone());
                }
            }
            RecipesAction::GenerateRecipe(lifecycle) => {
                if let Some(recipe) =
                    self.status
                        .track(&mut self.current, lifecycle, "Failed to generate recipe")
                {
                    self.current_recipe = Some(recipe.clone());
                }
            }
            RecipesAction::SetSearchFilters(filters) => self.search_filters = filters.clone(),
            RecipesAction::ClearSearchResults => self.search_results.clear(),
            RecipesAction::ToggleFavorite(recipe_id) => {
                match self.favorites.iter().position(|id| id == recipe_id) {
                    Some(index) => {
                        self.favorites.remove(index);
                    }
                    None => self.favorites.push(recipe_id.clone()),
                }
            }
            RecipesAction::SetCurrentRecipe(recipe) => self.current_recipe = recipe.clone(),
            RecipesAction::ClearError => self.status.clear_error(),
        }
    }
}

impl Default for RecipesState {
    fn default() -> Self {
        Self::new(ResponsePolicy::default())
    }
}
