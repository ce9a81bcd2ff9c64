//! services/client/src/bin/moodmeal.rs
//!
//! Drives the client state model end to end against the mock backend: signs in,
//! records a mood, loads recipes, and (when an API key is configured) asks the
//! assistant for mood-based recommendations.

use async_openai::{config::OpenAIConfig, Client};
use moodmeal_core::{
    domain::Credentials,
    store::{
        selectors,
        slices::{MoodAction, RecipesAction},
    },
    Gateway, GatewayServices, NewMoodEntry, RecipeAssistantService, Store, TracingMiddleware,
};
use moodmeal_lib::{
    adapters::{MockBackend, OpenAiRecipeAssistant},
    config::Config,
    error::ClientError,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting client...");

    // --- 2. Build the Store ---
    let store = Arc::new(
        Store::with_policy(config.response_policy).with_middleware(Arc::new(TracingMiddleware)),
    );

    let mut updates = store.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            debug!(
                loading = selectors::any_loading(&state),
                signed_in = selectors::is_authenticated(&state),
                recipes = state.recipes.recipes.len(),
                "State updated"
            );
        }
    });

    // --- 3. Initialize Service Adapters ---
    let backend = Arc::new(MockBackend::new(config.mock_latency));

    let assistant: Option<Arc<dyn RecipeAssistantService>> = match config.require_openai_api_key()
    {
        Ok(api_key) => {
            let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
            if let Some(base_url) = &config.openai_base_url {
                openai_config = openai_config.with_api_base(base_url);
            }
            Some(Arc::new(OpenAiRecipeAssistant::new(
                Client::with_config(openai_config),
                config.recommendation_model.clone(),
                config.recipe_model.clone(),
            )))
        }
        Err(e) => {
            warn!(error = %e, "AI features are disabled");
            None
        }
    };

    let gateway = Gateway::new(
        Arc::clone(&store),
        GatewayServices {
            auth: backend.clone(),
            recipes: backend.clone(),
            moods: backend,
            assistant: assistant.clone(),
        },
    );

    // --- 4. Sign In and Record a Mood ---
    let user = gateway
        .login(Credentials {
            email: "demo@moodmeal.app".to_string(),
            password: "demo".to_string(),
        })
        .settled()
        .await
        .map_err(ClientError::Rejected)?;
    info!(user = %user.display_name, "Signed in");

    let mood = store
        .select(|state| state.mood.find_mood("happy").cloned())
        .ok_or_else(|| ClientError::Internal("Mood catalog has no 'happy' entry".to_string()))?;
    store.dispatch(MoodAction::SetCurrentMood(mood.clone()));

    let entry = NewMoodEntry {
        user_id: user.id.clone(),
        mood,
        intensity: 7,
        timestamp: chrono::Utc::now(),
        notes: None,
        weather_condition: None,
        location: None,
    };

    // --- 5. Load Recipes While the Entry Saves ---
    let (saved, recipes) = futures::future::join(
        gateway.save_mood_entry(entry).settled(),
        gateway.fetch_recipes(Default::default()).settled(),
    )
    .await;
    let saved = saved.map_err(ClientError::Rejected)?;
    let recipes = recipes.map_err(ClientError::Rejected)?;
    info!(entry = %saved.id, recipes = recipes.len(), "Mood saved and recipes loaded");

    if let Some(first) = recipes.first() {
        store.dispatch(RecipesAction::ToggleFavorite(first.id.clone()));
        store.dispatch(RecipesAction::SetCurrentRecipe(Some(first.clone())));
    }

    // --- 6. Ask the Assistant ---
    if let Some(assistant) = assistant {
        match gateway
            .recommend_for_current_mood(vec!["pasta".to_string(), "cheese".to_string()])
            .settled()
            .await
        {
            Ok(recommendation) => {
                for recipe in &recommendation.recipes {
                    info!(title = %recipe.title, "Recommended");
                }
            }
            Err(e) => warn!(error = %e, "Recommendation failed"),
        }

        if let Some(recipe) = store.select(|state| state.recipes.current_recipe.clone()) {
            let skill = store.select(selectors::user_preferences).cooking_skill_level;
            let steps = assistant.cooking_instructions(&recipe, skill, false).await?;
            for step in steps {
                info!("{}", step);
            }
        }
    }

    // --- 7. Summarize ---
    let state = store.get_state();
    let favorites: Vec<&str> = selectors::favorite_recipes(&state)
        .into_iter()
        .map(|r| r.title.as_str())
        .collect();
    info!(?favorites, moods_logged = state.mood.mood_history.len(), "Session complete");
    for (slice, error) in selectors::errors(&state) {
        warn!(slice, error, "Slice reported an error");
    }

    Ok(())
}
