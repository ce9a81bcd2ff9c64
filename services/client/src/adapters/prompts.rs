//! services/client/src/adapters/prompts.rs
//!
//! Prompt construction and response post-processing for the recipe assistant.
//! Kept free of any client so the text going to the model can be tested directly.
//!
//! Model output is free-form text. Recipe titles are pulled out with a line-based
//! heuristic; everything else about a generated recipe is placeholder data.

use chrono::Utc;
use moodmeal_core::domain::{
    AiRecommendation, NutritionInfo, Recipe, SkillLevel, UserPreferences,
};
use moodmeal_core::ports::RecommendationRequest;
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

//=========================================================================================
// Generation Parameters and System Instructions
//=========================================================================================

/// The two tunable knobs sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

pub const RECOMMENDATION_PARAMS: GenerationParams = GenerationParams {
    max_tokens: 2000,
    temperature: 0.7,
};
pub const RECIPE_PARAMS: GenerationParams = GenerationParams {
    max_tokens: 1500,
    temperature: 0.8,
};
pub const IMPROVE_PARAMS: GenerationParams = GenerationParams {
    max_tokens: 1500,
    temperature: 0.6,
};
pub const INSTRUCTIONS_PARAMS: GenerationParams = GenerationParams {
    max_tokens: 1000,
    temperature: 0.5,
};
pub const NUTRITION_PARAMS: GenerationParams = GenerationParams {
    max_tokens: 800,
    temperature: 0.6,
};

pub const RECOMMENDATION_SYSTEM: &str = "You are a professional chef and nutritionist AI assistant specialized in mood-based recipe recommendations. Provide detailed, personalized recipe suggestions.";
pub const RECIPE_SYSTEM: &str = "You are a creative chef AI that creates innovative recipes from available ingredients while respecting dietary restrictions and preferences.";
pub const IMPROVE_SYSTEM: &str = "You are a professional chef AI that excels at improving recipes based on user feedback and dietary requirements.";
pub const NUTRITION_SYSTEM: &str = "You are a qualified nutritionist AI that provides personalized, evidence-based nutrition advice.";

pub fn instructions_system(voice_mode: bool) -> String {
    format!(
        "You are a patient cooking instructor AI that provides {} cooking guidance.",
        if voice_mode { "voice-optimized" } else { "detailed" }
    )
}

/// Confidence attached to every parsed recommendation; the model does not report one.
pub const DEFAULT_CONFIDENCE: f64 = 0.85;

//=========================================================================================
// Prompt Builders
//=========================================================================================

/// Food styles that tend to suit a mood. Unknown moods get no hints.
pub fn mood_food_keywords(mood_name: &str) -> &'static [&'static str] {
    match mood_name.to_lowercase().as_str() {
        "happy" => &["colorful salads", "fresh fruits", "light appetizers", "celebratory dishes"],
        "sad" => &["comfort foods", "warm soups", "hearty stews", "chocolate desserts"],
        "stressed" => &["calming teas", "simple meals", "healthy snacks", "omega-3 rich foods"],
        "energetic" => &["protein-rich dishes", "spicy foods", "energy bars", "pre-workout meals"],
        "lazy" => &["quick recipes", "one-pot meals", "microwave dishes", "no-cook options"],
        "romantic" => &["elegant dishes", "wine pairings", "intimate dinners", "aphrodisiac foods"],
        "nostalgic" => &[
            "traditional recipes",
            "childhood favorites",
            "family dishes",
            "comfort classics",
        ],
        "adventurous" => &[
            "exotic cuisines",
            "fusion dishes",
            "unusual ingredients",
            "experimental recipes",
        ],
        "calm" => &["herbal teas", "light meals", "zen-inspired dishes", "mindful eating"],
        "excited" => &[
            "party foods",
            "colorful dishes",
            "fun presentations",
            "interactive cooking",
        ],
        _ => &[],
    }
}

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

pub fn recommendation_prompt(request: &RecommendationRequest) -> String {
    let prefs = &request.user.preferences;
    let keywords = mood_food_keywords(&request.mood.name).join(", ");
    let previous_titles: Vec<String> = request
        .previous_recommendations
        .iter()
        .flat_map(|r| r.recipes.iter().map(|recipe| recipe.title.clone()))
        .collect();

    format!(
        r#"Generate 3 personalized recipe recommendations for a user feeling {mood} ({description}).

User Profile:
- Dietary restrictions: {restrictions}
- Allergies: {allergies}
- Preferred cuisines: {cuisines}
- Skill level: {skill}
- Max cooking time: {max_time} minutes
- Spice preference: {spice}
- Health goals: {goals}

Available ingredients: {ingredients}

Mood-appropriate food types: {keywords}

Previous recommendations to avoid: {previous}

Please provide 3 diverse recipe recommendations that:
1. Match the user's current mood and emotional needs
2. Respect dietary restrictions and preferences
3. Use available ingredients when possible
4. Are appropriate for the user's skill level
5. Include clear reasoning for why each recipe fits the mood

Format each recommendation starting with a line "Title: <recipe name>", followed by: description, prep time, cook time, difficulty, cuisine type, and mood-matching explanation."#,
        mood = request.mood.name,
        description = request.mood.description,
        restrictions = join_or(&prefs.dietary_restrictions, "None"),
        allergies = join_or(&prefs.allergies, "None"),
        cuisines = join_or(&prefs.cuisine_preferences, "Any"),
        skill = prefs.cooking_skill_level.as_str(),
        max_time = prefs.max_cooking_time,
        spice = prefs.spice_level.as_str(),
        goals = join_or(&prefs.health_goals, "None"),
        ingredients = join_or(&request.available_ingredients, "None specified"),
        keywords = keywords,
        previous = join_or(&previous_titles, "None"),
    )
}

pub fn recipe_from_ingredients_prompt(
    ingredients: &[String],
    preferences: &UserPreferences,
    restrictions: &[String],
) -> String {
    let preferences_json = serde_json::to_string(preferences).unwrap_or_default();
    format!(
        r#"Create a detailed recipe using these available ingredients: {ingredients}.

Dietary restrictions: {restrictions}
Cooking preferences: {preferences_json}

Please provide a complete recipe with:
- Creative recipe name (on the first line)
- Detailed description
- Prep time and cook time
- Difficulty level
- Complete ingredients list with amounts
- Step-by-step instructions
- Nutritional information estimate
- Cooking tips

Format the response as a structured recipe."#,
        ingredients = ingredients.join(", "),
        restrictions = join_or(restrictions, "None"),
    )
}

pub fn improve_recipe_prompt(
    recipe: &Recipe,
    feedback: &str,
    dietary_requests: &[String],
) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(|i| format!("{} {} {}", i.amount, i.unit, i.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"Improve this recipe based on user feedback and dietary requests:

Original Recipe: {title}
Description: {description}
Ingredients: {ingredients}

User Feedback: {feedback}
Dietary Requests: {requests}

Please provide an improved version of the recipe addressing the feedback and requests, with the recipe name on the first line."#,
        title = recipe.title,
        description = recipe.description,
        requests = join_or(dietary_requests, "None"),
    )
}

pub fn cooking_instructions_prompt(
    recipe: &Recipe,
    skill_level: SkillLevel,
    voice_mode: bool,
) -> String {
    let steps = recipe
        .instructions
        .iter()
        .map(|i| format!("{}. {}", i.step, i.description))
        .collect::<Vec<_>>()
        .join("\n");
    let (kind, style) = if voice_mode {
        ("voice-friendly", "clear, concise audio instructions")
    } else {
        ("detailed", "detailed step-by-step instructions")
    };
    format!(
        r#"Generate {kind} cooking instructions for:

Recipe: {title}
User Skill Level: {skill}

Original Instructions:
{steps}

Please provide {style} appropriate for a {skill} cook."#,
        title = recipe.title,
        skill = skill_level.as_str(),
    )
}

pub fn nutrition_advice_prompt(
    goals: &[String],
    current: &NutritionInfo,
    target: &NutritionInfo,
) -> String {
    format!(
        r#"Provide personalized nutrition advice based on:

User Goals: {goals}
Current Nutrition: {current}
Target Nutrition: {target}

Please provide specific, actionable nutrition advice and meal suggestions."#,
        goals = goals.join(", "),
        current = serde_json::to_string(current).unwrap_or_default(),
        target = serde_json::to_string(target).unwrap_or_default(),
    )
}

//=========================================================================================
// Response Post-processing
//=========================================================================================

fn title_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:recipe\s+)?(?:name|title)\s*:\s*(.+)$")
            .expect("title pattern is valid")
    })
}

fn numbered_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:recipe\s+)?\d+[.):]\s+(.+?)(?:\s+[-–]\s.*|\s*:.*)?$")
            .expect("numbered pattern is valid")
    })
}

/// Drops markdown emphasis and heading markers.
fn strip_markup(line: &str) -> String {
    line.replace(['*', '#', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pulls recipe titles out of a recommendation. Explicit `Title:` lines win;
/// otherwise numbered list entries are used. Duplicates are dropped.
pub fn extract_recipe_titles(text: &str) -> Vec<String> {
    let lines: Vec<String> = text.lines().map(strip_markup).collect();

    let mut titles: Vec<String> = lines
        .iter()
        .filter_map(|line| title_line().captures(line))
        .map(|c| c[1].trim().to_string())
        .collect();

    if titles.is_empty() {
        titles = lines
            .iter()
            .filter_map(|line| numbered_line().captures(line))
            .map(|c| c[1].trim().to_string())
            .collect();
    }

    let mut unique = Vec::new();
    for title in titles {
        if !title.is_empty() && !unique.contains(&title) {
            unique.push(title);
        }
    }
    unique
}

pub fn parse_recommendation(text: &str, request: &RecommendationRequest) -> AiRecommendation {
    let recipes = extract_recipe_titles(text)
        .into_iter()
        .map(|title| Recipe::draft(Uuid::new_v4().to_string(), &title, ""))
        .collect();

    AiRecommendation {
        id: Uuid::new_v4().to_string(),
        user_id: request.user.id.clone(),
        mood: request.mood.clone(),
        recipes,
        reasoning: text.to_string(),
        confidence: DEFAULT_CONFIDENCE,
        timestamp: Utc::now(),
        feedback: None,
    }
}

/// Builds a draft recipe from generated text: the first line is the title and the
/// description is the first 200 characters of the response.
pub fn parse_generated_recipe(text: &str) -> Recipe {
    let title = text
        .lines()
        .map(strip_markup)
        .find(|line| !line.is_empty())
        .map(|line| match title_line().captures(&line) {
            Some(c) => c[1].trim().to_string(),
            None => line,
        })
        .unwrap_or_else(|| "AI Generated Recipe".to_string());

    let trimmed = text.trim();
    let mut description: String = trimmed.chars().take(200).collect();
    if trimmed.chars().count() > 200 {
        description.push_str("...");
    }

    Recipe::draft(Uuid::new_v4().to_string(), &title, &description)
}
