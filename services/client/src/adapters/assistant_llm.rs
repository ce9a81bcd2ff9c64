//! services/client/src/adapters/assistant_llm.rs
//!
//! This module contains the adapter for the recipe assistant LLM.
//! It implements the `RecipeAssistantService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use moodmeal_core::{
    domain::{AiRecommendation, NutritionInfo, Recipe, SkillLevel, UserPreferences},
    ports::{PortError, PortResult, RecipeAssistantService, RecommendationRequest},
};
use tracing::debug;

use super::prompts::{self, GenerationParams};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `RecipeAssistantService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiRecipeAssistant {
    client: Client<OpenAIConfig>,
    recommendation_model: String,
    recipe_model: String,
}

impl OpenAiRecipeAssistant {
    /// Recommendations use `recommendation_model`; every other call uses `recipe_model`.
    pub fn new(
        client: Client<OpenAIConfig>,
        recommendation_model: String,
        recipe_model: String,
    ) -> Self {
        Self {
            client,
            recommendation_model,
            recipe_model,
        }
    }

    /// Sends one system + user exchange and returns the text of the first choice.
    async fn complete(
        &self,
        model: &str,
        system: &str,
        prompt: String,
        params: GenerationParams,
    ) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .max_tokens(params.max_tokens)
            .temperature(params.temperature)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| PortError::Unexpected("No response from AI".to_string()))?;

        debug!(model, chars = content.len(), "Completion received");
        Ok(content)
    }
}

//=========================================================================================
// `RecipeAssistantService` Trait Implementation
//=========================================================================================

#[async_trait]
impl RecipeAssistantService for OpenAiRecipeAssistant {
    async fn recommend_for_mood(
        &self,
        request: &RecommendationRequest,
    ) -> PortResult<AiRecommendation> {
        let text = self
            .complete(
                &self.recommendation_model,
                prompts::RECOMMENDATION_SYSTEM,
                prompts::recommendation_prompt(request),
                prompts::RECOMMENDATION_PARAMS,
            )
            .await?;
        Ok(prompts::parse_recommendation(&text, request))
    }

    async fn generate_recipe_from_ingredients(
        &self,
        ingredients: &[String],
        preferences: &UserPreferences,
        restrictions: &[String],
    ) -> PortResult<Recipe> {
        let text = self
            .complete(
                &self.recipe_model,
                prompts::RECIPE_SYSTEM,
                prompts::recipe_from_ingredients_prompt(ingredients, preferences, restrictions),
                prompts::RECIPE_PARAMS,
            )
            .await?;
        Ok(prompts::parse_generated_recipe(&text))
    }

    async fn improve_recipe(
        &self,
        recipe: &Recipe,
        feedback: &str,
        dietary_requests: &[String],
    ) -> PortResult<Recipe> {
        let text = self
            .complete(
                &self.recipe_model,
                prompts::IMPROVE_SYSTEM,
                prompts::improve_recipe_prompt(recipe, feedback, dietary_requests),
                prompts::IMPROVE_PARAMS,
            )
            .await?;
        Ok(prompts::parse_generated_recipe(&text))
    }

    async fn cooking_instructions(
        &self,
        recipe: &Recipe,
        skill_level: SkillLevel,
        voice_mode: bool,
    ) -> PortResult<Vec<String>> {
        let system = prompts::instructions_system(voice_mode);
        let text = self
            .complete(
                &self.recipe_model,
                &system,
                prompts::cooking_instructions_prompt(recipe, skill_level, voice_mode),
                prompts::INSTRUCTIONS_PARAMS,
            )
            .await?;
        Ok(prompts::split_lines(&text))
    }

    async fn nutrition_advice(
        &self,
        goals: &[String],
        current: &NutritionInfo,
        target: &NutritionInfo,
    ) -> PortResult<String> {
        let text = self
            .complete(
                &self.recipe_model,
                prompts::NUTRITION_SYSTEM,
                prompts::nutrition_advice_prompt(goals, current, target),
                prompts::NUTRITION_PARAMS,
            )
            .await?;
        Ok(text.trim().to_string())
    }
}
