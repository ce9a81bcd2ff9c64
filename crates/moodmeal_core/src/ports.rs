//! crates/moodmeal_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the client's external collaborators.
//! These traits form the boundary of the hexagonal architecture: the store and the
//! gateway only ever see these, never a concrete backend or language-model client.

use async_trait::async_trait;

use crate::domain::{
    AiRecommendation, Credentials, Mood, MoodEntry, NewMoodEntry, NutritionInfo, Recipe,
    Registration, SearchFilters, SkillLevel, User, UserPreferences,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g. network, quota).
/// The `Display` text is what ends up in a slice's `error` field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Request Types
//=========================================================================================

/// Everything the assistant needs to suggest recipes for a mood.
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub mood: Mood,
    pub user: User,
    pub available_ingredients: Vec<String>,
    pub previous_recommendations: Vec<AiRecommendation>,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> PortResult<User>;

    async fn register(&self, registration: &Registration) -> PortResult<User>;

    async fn logout(&self) -> PortResult<()>;
}

#[async_trait]
pub trait RecipeCatalogService: Send + Sync {
    async fn fetch_recipes(&self, filters: &SearchFilters) -> PortResult<Vec<Recipe>>;

    async fn search_recipes(&self, filters: &SearchFilters) -> PortResult<Vec<Recipe>>;

    /// Fails with `PortError::NotFound` when no recipe has this id.
    async fn fetch_recipe_by_id(&self, recipe_id: &str) -> PortResult<Recipe>;
}

#[async_trait]
pub trait MoodJournalService: Send + Sync {
    /// Stores the entry and returns it with its assigned id.
    async fn save_mood_entry(&self, entry: &NewMoodEntry) -> PortResult<MoodEntry>;
}

/// The language-model boundary.
#[async_trait]
pub trait RecipeAssistantService: Send + Sync {
    async fn recommend_for_mood(
        &self,
        request: &RecommendationRequest,
    ) -> PortResult<AiRecommendation>;

    async fn generate_recipe_from_ingredients(
        &self,
        ingredients: &[String],
        preferences: &UserPreferences,
        restrictions: &[String],
    ) -> PortResult<Recipe>;

    async fn improve_recipe(
        &self,
        recipe: &Recipe,
        feedback: &str,
        dietary_requests: &[String],
    ) -> PortResult<Recipe>;

    /// Returns one string per instruction line.
    async fn cooking_instructions(
        &self,
        recipe: &Recipe,
        skill_level: SkillLevel,
        voice_mode: bool,
    ) -> PortResult<Vec<String>>;

    async fn nutrition_advice(
        &self,
        goals: &[String],
        current: &NutritionInfo,
        target: &NutritionInfo,
    ) -> PortResult<String>;
}
