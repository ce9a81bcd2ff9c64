//! crates/moodmeal_core/src/domain.rs
//!
//! Defines the pure, core data structures shared by every part of the client.
//! They carry serde derives so adapters can serialize them into prompts or logs,
//! but nothing here knows about a particular backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

//=========================================================================================
// Users and Authentication
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
    VeryHot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

impl SpiceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Hot => "hot",
            SpiceLevel::VeryHot => "very_hot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionType {
    Free,
    Premium,
    Chef,
}

/// Cooking and dietary preferences attached to a user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub dietary_restrictions: Vec<String>,
    pub allergies: Vec<String>,
    pub favorite_ingredients: Vec<String>,
    pub disliked_ingredients: Vec<String>,
    pub cuisine_preferences: Vec<String>,
    pub spice_level: SpiceLevel,
    pub health_goals: Vec<String>,
    pub cooking_skill_level: SkillLevel,
    /// Minutes.
    pub max_cooking_time: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            dietary_restrictions: Vec::new(),
            allergies: Vec::new(),
            favorite_ingredients: Vec::new(),
            disliked_ingredients: Vec::new(),
            cuisine_preferences: Vec::new(),
            spice_level: SpiceLevel::Medium,
            health_goals: Vec::new(),
            cooking_skill_level: SkillLevel::Beginner,
            max_cooking_time: 30,
        }
    }
}

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub preferences: UserPreferences,
    pub subscription: SubscriptionType,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

// Only used for login - contains sensitive data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

//=========================================================================================
// Moods
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodCategory {
    Positive,
    Negative,
    Neutral,
    Energetic,
    Calm,
}

/// A selectable emotional state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub description: String,
    pub category: MoodCategory,
}

impl Mood {
    pub fn new(
        id: &str,
        name: &str,
        emoji: &str,
        color: &str,
        description: &str,
        category: MoodCategory,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            emoji: emoji.to_string(),
            color: color.to_string(),
            description: description.to_string(),
            category,
        }
    }
}

/// A timestamped mood record. `intensity` runs from 1 to 10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub user_id: String,
    pub mood: Mood,
    pub intensity: u8,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
    pub weather_condition: Option<String>,
    pub location: Option<String>,
}

/// A mood entry that has not been stored yet, so it has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMoodEntry {
    pub user_id: String,
    pub mood: Mood,
    pub intensity: u8,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
    pub weather_condition: Option<String>,
    pub location: Option<String>,
}

impl NewMoodEntry {
    pub fn with_id(self, id: String) -> MoodEntry {
        MoodEntry {
            id,
            user_id: self.user_id,
            mood: self.mood,
            intensity: self.intensity,
            timestamp: self.timestamp,
            notes: self.notes,
            weather_condition: self.weather_condition,
            location: self.location,
        }
    }
}

//=========================================================================================
// Recipes
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
    Drink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Protein,
    Vegetables,
    Fruits,
    Grains,
    Dairy,
    Spices,
    Condiments,
    Pantry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub category: IngredientCategory,
    pub is_optional: bool,
    pub substitutes: Vec<String>,
    pub estimated_cost: Option<f64>,
}

impl Ingredient {
    pub fn new(
        id: &str,
        name: &str,
        amount: f64,
        unit: &str,
        category: IngredientCategory,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            amount,
            unit: unit.to_string(),
            category,
            is_optional: false,
            substitutes: Vec::new(),
            estimated_cost: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub step: u32,
    pub description: String,
    /// Minutes.
    pub duration: Option<u32>,
    pub image_url: Option<String>,
    pub temperature: Option<u32>,
    pub tips: Option<String>,
}

impl Instruction {
    pub fn new(step: u32, description: &str) -> Self {
        Self {
            step,
            description: description.to_string(),
            duration: None,
            image_url: None,
            temperature: None,
            tips: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub cholesterol: f64,
    pub saturated_fat: f64,
    pub unsaturated_fat: f64,
    pub vitamins: BTreeMap<String, f64>,
    pub minerals: BTreeMap<String, f64>,
}

/// A cookable dish. Times are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub total_time: u32,
    pub servings: u32,
    pub difficulty: SkillLevel,
    pub cuisine: String,
    pub meal_type: Vec<MealType>,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    pub nutrition: NutritionInfo,
    pub ratings_average: f64,
    pub ratings_count: u32,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub is_dairy_free: bool,
    pub is_keto: bool,
    pub is_paleo: bool,
    pub source_url: Option<String>,
    pub author_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// A recipe built from free-form model output. Everything except the title and
    /// description is a placeholder until the text is parsed properly.
    pub fn draft(id: String, title: &str, description: &str) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            image_url: "/api/placeholder/400/300".to_string(),
            prep_time: 15,
            cook_time: 30,
            total_time: 45,
            servings: 4,
            difficulty: SkillLevel::Intermediate,
            cuisine: "Fusion".to_string(),
            meal_type: vec![MealType::Dinner],
            tags: vec!["AI Generated".to_string()],
            ingredients: Vec::new(),
            instructions: Vec::new(),
            nutrition: NutritionInfo::default(),
            ratings_average: 0.0,
            ratings_count: 0,
            is_vegetarian: false,
            is_vegan: false,
            is_gluten_free: false,
            is_dairy_free: false,
            is_keto: false,
            is_paleo: false,
            source_url: None,
            author_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

//=========================================================================================
// Pantry and Groceries
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: String,
    pub user_id: String,
    pub ingredient: Ingredient,
    pub quantity: f64,
    pub unit: String,
    pub expiration_date: Option<DateTime<Utc>>,
    pub purchase_date: DateTime<Utc>,
    /// fridge, pantry, freezer
    pub location: String,
    pub is_running_low: bool,
    pub auto_reorder: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub id: String,
    pub ingredient: Ingredient,
    pub quantity: f64,
    pub unit: String,
    pub is_checked: bool,
    pub estimated_cost: f64,
    pub store: Option<String>,
    pub category: IngredientCategory,
    pub priority: Priority,
}

/// A named shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryList {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub items: Vec<GroceryItem>,
    pub is_shared: bool,
    pub shared_with: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//=========================================================================================
// AI Recommendations
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationFeedback {
    pub liked: bool,
    pub rating: u8,
    pub comment: Option<String>,
    pub was_cooked: bool,
    pub satisfaction: u8,
}

/// Output of a mood-to-recipe request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendation {
    pub id: String,
    pub user_id: String,
    pub mood: Mood,
    pub recipes: Vec<Recipe>,
    pub reasoning: String,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub feedback: Option<RecommendationFeedback>,
}

//=========================================================================================
// Timers and Notifications
//=========================================================================================

/// A running cook-timer. Durations are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: String,
    pub name: String,
    pub duration: u64,
    pub start_time: DateTime<Utc>,
    pub is_active: bool,
    pub is_paused: bool,
    pub remaining_time: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Recommendation,
    CookingTimer,
    GroceryReminder,
    MealPlan,
    Social,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppNotification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

//=========================================================================================
// Search
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    Relevance,
    Rating,
    CookTime,
    Difficulty,
    Calories,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFilters {
    pub max_calories: Option<f64>,
    pub min_protein: Option<f64>,
    pub max_carbs: Option<f64>,
    pub max_fat: Option<f64>,
    pub max_sodium: Option<f64>,
}

/// Recipe search criteria. Every field is optional; an empty filter matches everything.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub query: Option<String>,
    pub cuisine: Vec<String>,
    pub meal_type: Vec<MealType>,
    pub difficulty: Vec<SkillLevel>,
    pub max_cook_time: Option<u32>,
    pub min_rating: Option<f64>,
    pub dietary_restrictions: Vec<String>,
    pub available_ingredients: Vec<String>,
    pub nutrition_filters: Option<NutritionFilters>,
    pub sort_by: Option<SortOption>,
    pub sort_order: Option<SortOrder>,
}

impl SearchFilters {
    pub fn query(text: &str) -> Self {
        Self {
            query: Some(text.to_string()),
            ..Self::default()
        }
    }
}
