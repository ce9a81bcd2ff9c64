//! services/client/src/adapters/mock_backend.rs
//!
//! An in-memory stand-in for the remote account, recipe, and mood-journal APIs.
//! Every call sleeps for the configured latency before answering so the loading
//! states in the store are observable.

use async_trait::async_trait;
use chrono::Utc;
use moodmeal_core::domain::{
    Credentials, Ingredient, IngredientCategory, Instruction, MealType, MoodEntry, NewMoodEntry,
    NutritionInfo, Recipe, Registration, SearchFilters, SkillLevel, SortOption, SortOrder,
    SpiceLevel, SubscriptionType, User, UserPreferences,
};
use moodmeal_core::ports::{
    AuthService, MoodJournalService, PortError, PortResult, RecipeCatalogService,
};
use std::cmp::Ordering;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

pub struct MockBackend {
    latency: Duration,
    recipes: Vec<Recipe>,
}

impl MockBackend {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            recipes: mock_recipes(),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn demo_user(email: &str, display_name: &str, preferences: UserPreferences) -> User {
    let now = Utc::now();
    User {
        id: "1".to_string(),
        email: email.to_string(),
        display_name: display_name.to_string(),
        photo_url: None,
        preferences,
        subscription: SubscriptionType::Free,
        created_at: now,
        last_login: now,
    }
}

#[async_trait]
impl AuthService for MockBackend {
    async fn login(&self, credentials: &Credentials) -> PortResult<User> {
        self.simulate_latency().await;
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(PortError::Unauthorized);
        }
        debug!(email = %credentials.email, "Mock login accepted");
        let preferences = UserPreferences {
            cooking_skill_level: SkillLevel::Intermediate,
            spice_level: SpiceLevel::Medium,
            max_cooking_time: 60,
            ..UserPreferences::default()
        };
        Ok(demo_user(&credentials.email, "Demo User", preferences))
    }

    async fn register(&self, registration: &Registration) -> PortResult<User> {
        self.simulate_latency().await;
        if registration.email.trim().is_empty() || registration.password.is_empty() {
            return Err(PortError::Unexpected("Email and password are required".to_string()));
        }
        Ok(demo_user(
            &registration.email,
            &registration.display_name,
            UserPreferences::default(),
        ))
    }

    async fn logout(&self) -> PortResult<()> {
        tokio::time::sleep(self.latency / 2).await;
        Ok(())
    }
}

#[async_trait]
impl RecipeCatalogService for MockBackend {
    async fn fetch_recipes(&self, _filters: &SearchFilters) -> PortResult<Vec<Recipe>> {
        self.simulate_latency().await;
        Ok(self.recipes.clone())
    }

    async fn search_recipes(&self, filters: &SearchFilters) -> PortResult<Vec<Recipe>> {
        self.simulate_latency().await;
        let mut results: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|recipe| matches_filters(recipe, filters))
            .cloned()
            .collect();
        sort_results(&mut results, filters.sort_by, filters.sort_order);
        debug!(count = results.len(), "Mock search finished");
        Ok(results)
    }

    async fn fetch_recipe_by_id(&self, recipe_id: &str) -> PortResult<Recipe> {
        self.simulate_latency().await;
        self.recipes
            .iter()
            .find(|recipe| recipe.id == recipe_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound("Recipe not found".to_string()))
    }
}

#[async_trait]
impl MoodJournalService for MockBackend {
    async fn save_mood_entry(&self, entry: &NewMoodEntry) -> PortResult<MoodEntry> {
        self.simulate_latency().await;
        Ok(entry.clone().with_id(Uuid::new_v4().to_string()))
    }
}

//=========================================================================================
// Search Filtering
//=========================================================================================

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn satisfies_restriction(recipe: &Recipe, restriction: &str) -> bool {
    match restriction.to_lowercase().as_str() {
        "vegetarian" => recipe.is_vegetarian,
        "vegan" => recipe.is_vegan,
        "gluten-free" | "gluten free" => recipe.is_gluten_free,
        "dairy-free" | "dairy free" => recipe.is_dairy_free,
        "keto" => recipe.is_keto,
        "paleo" => recipe.is_paleo,
        _ => true,
    }
}

fn matches_filters(recipe: &Recipe, filters: &SearchFilters) -> bool {
    if let Some(query) = filters.query.as_deref().filter(|q| !q.trim().is_empty()) {
        if !contains_ignore_case(&recipe.title, query)
            && !contains_ignore_case(&recipe.description, query)
        {
            return false;
        }
    }
    if !filters.cuisine.is_empty()
        && !filters
            .cuisine
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&recipe.cuisine))
    {
        return false;
    }
    if !filters.meal_type.is_empty()
        && !filters.meal_type.iter().any(|m| recipe.meal_type.contains(m))
    {
        return false;
    }
    if !filters.difficulty.is_empty() && !filters.difficulty.contains(&recipe.difficulty) {
        return false;
    }
    if filters.max_cook_time.is_some_and(|max| recipe.total_time > max) {
        return false;
    }
    if filters.min_rating.is_some_and(|min| recipe.ratings_average < min) {
        return false;
    }
    if !filters
        .dietary_restrictions
        .iter()
        .all(|r| satisfies_restriction(recipe, r))
    {
        return false;
    }
    if let Some(nutrition) = &filters.nutrition_filters {
        let n = &recipe.nutrition;
        let within = nutrition.max_calories.map_or(true, |max| n.calories <= max)
            && nutrition.min_protein.map_or(true, |min| n.protein >= min)
            && nutrition.max_carbs.map_or(true, |max| n.carbs <= max)
            && nutrition.max_fat.map_or(true, |max| n.fat <= max)
            && nutrition.max_sodium.map_or(true, |max| n.sodium <= max);
        if !within {
            return false;
        }
    }
    true
}

fn sort_results(results: &mut [Recipe], sort_by: Option<SortOption>, order: Option<SortOrder>) {
    let compare: fn(&Recipe, &Recipe) -> Ordering = match sort_by {
        None | Some(SortOption::Relevance) => return,
        Some(SortOption::Rating) => |a, b| a.ratings_average.total_cmp(&b.ratings_average),
        Some(SortOption::CookTime) => |a, b| a.total_time.cmp(&b.total_time),
        Some(SortOption::Difficulty) => |a, b| (a.difficulty as u8).cmp(&(b.difficulty as u8)),
        Some(SortOption::Calories) => |a, b| a.nutrition.calories.total_cmp(&b.nutrition.calories),
        Some(SortOption::CreatedAt) => |a, b| a.created_at.cmp(&b.created_at),
    };
    match order.unwrap_or(SortOrder::Asc) {
        SortOrder::Asc => results.sort_by(compare),
        SortOrder::Desc => results.sort_by(|a, b| compare(b, a)),
    }
}

//=========================================================================================
// Seed Data
//=========================================================================================

pub fn mock_recipes() -> Vec<Recipe> {
    let mac_and_cheese = Recipe {
        image_url: "https://images.unsplash.com/photo-1543826173-1ad6e3b161bb?w=400".to_string(),
        prep_time: 15,
        cook_time: 30,
        total_time: 45,
        servings: 4,
        difficulty: SkillLevel::Intermediate,
        cuisine: "American".to_string(),
        meal_type: vec![MealType::Dinner],
        tags: vec!["comfort".to_string(), "cheesy".to_string(), "warm".to_string()],
        ingredients: vec![
            Ingredient::new("1", "Pasta", 1.0, "lb", IngredientCategory::Grains),
            Ingredient::new("2", "Cheese", 2.0, "cups", IngredientCategory::Dairy),
        ],
        instructions: vec![
            Instruction::new(1, "Cook pasta according to package directions"),
            Instruction::new(2, "Make cheese sauce"),
            Instruction::new(3, "Combine pasta and cheese sauce"),
        ],
        nutrition: NutritionInfo {
            calories: 450.0,
            protein: 18.0,
            carbs: 48.0,
            fat: 20.0,
            fiber: 2.0,
            sugar: 4.0,
            sodium: 780.0,
            cholesterol: 60.0,
            saturated_fat: 12.0,
            unsaturated_fat: 8.0,
            ..NutritionInfo::default()
        },
        ratings_average: 4.5,
        ratings_count: 120,
        is_vegetarian: true,
        ..Recipe::draft(
            "1".to_string(),
            "Comfort Mac and Cheese",
            "Creamy, cheesy comfort food perfect for when you need a warm hug",
        )
    };

    let green_smoothie = Recipe {
        image_url: "https://images.unsplash.com/photo-1553979459-d2229ba7433a?w=400".to_string(),
        prep_time: 5,
        cook_time: 0,
        total_time: 5,
        servings: 1,
        difficulty: SkillLevel::Beginner,
        cuisine: "Healthy".to_string(),
        meal_type: vec![MealType::Breakfast, MealType::Snack],
        tags: vec!["healthy".to_string(), "energizing".to_string(), "quick".to_string()],
        ingredients: vec![
            Ingredient::new("1", "Spinach", 1.0, "cup", IngredientCategory::Vegetables),
            Ingredient::new("2", "Banana", 1.0, "piece", IngredientCategory::Fruits),
            Ingredient::new("3", "Almond milk", 1.0, "cup", IngredientCategory::Dairy),
        ],
        instructions: vec![
            Instruction::new(1, "Add all ingredients to blender"),
            Instruction::new(2, "Blend until smooth"),
            Instruction::new(3, "Pour into glass and enjoy"),
        ],
        nutrition: NutritionInfo {
            calories: 180.0,
            protein: 4.0,
            carbs: 35.0,
            fat: 3.0,
            fiber: 6.0,
            sugar: 20.0,
            sodium: 120.0,
            cholesterol: 0.0,
            saturated_fat: 0.0,
            unsaturated_fat: 3.0,
            ..NutritionInfo::default()
        },
        ratings_average: 4.2,
        ratings_count: 89,
        is_vegetarian: true,
        is_vegan: true,
        is_gluten_free: true,
        is_dairy_free: true,
        is_paleo: true,
        ..Recipe::draft(
            "2".to_string(),
            "Energizing Green Smoothie",
            "A vibrant green smoothie packed with nutrients to boost your energy",
        )
    };

    vec![mac_and_cheese, green_smoothie]
}
