//! crates/moodmeal_core/src/gateway.rs
//!
//! The asynchronous request gateway. Each operation wraps one port call in the
//! pending / fulfilled / rejected lifecycle:
//!
//! 1. `Pending` is dispatched before the operation returns,
//! 2. the port call runs on its own tokio task,
//! 3. exactly one of `Fulfilled` or `Rejected` is dispatched when it resolves.
//!
//! The caller gets a `RequestHandle` it can poll or await. Dropping the handle does
//! not cancel anything: the task still runs and still updates the store.
//!
//! Every operation spawns a task, so it must be called from within a tokio runtime.

use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{
    AiRecommendation, Credentials, Mood, MoodEntry, NewMoodEntry, Recipe, Registration,
    SearchFilters, User,
};
use crate::ports::{
    AuthService, MoodJournalService, PortError, PortResult, RecipeAssistantService,
    RecipeCatalogService, RecommendationRequest,
};
use crate::store::selectors;
use crate::store::slices::{AuthAction, MoodAction, RecipesAction, RecommendationsAction};
use crate::store::{Action, Lifecycle, RequestId, Store};

//=========================================================================================
// Request Handles
//=========================================================================================

/// The observable phase of one issued request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPhase<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

impl<T> RequestPhase<T> {
    pub fn is_settled(&self) -> bool {
        !matches!(self, RequestPhase::Pending)
    }
}

/// A handle on an in-flight request.
pub struct RequestHandle<T> {
    id: RequestId,
    phase: watch::Receiver<RequestPhase<T>>,
}

impl<T: Clone> RequestHandle<T> {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// The phase as of now, without waiting.
    pub fn phase(&self) -> RequestPhase<T> {
        self.phase.borrow().clone()
    }

    /// Waits until the request settles. By the time this returns, the matching
    /// terminal action has already been dispatched to the store.
    pub async fn settled(mut self) -> Result<T, String> {
        while !self.phase.borrow_and_update().is_settled() {
            if self.phase.changed().await.is_err() {
                break;
            }
        }
        let phase = self.phase.borrow().clone();
        match phase {
            RequestPhase::Fulfilled(payload) => Ok(payload),
            RequestPhase::Rejected(message) => Err(message),
            RequestPhase::Pending => Err("Request ended without a result".to_string()),
        }
    }
}

//=========================================================================================
// Gateway
//=========================================================================================

/// The external collaborators the gateway calls. The assistant is optional; AI
/// operations reject when it is missing.
#[derive(Clone)]
pub struct GatewayServices {
    pub auth: Arc<dyn AuthService>,
    pub recipes: Arc<dyn RecipeCatalogService>,
    pub moods: Arc<dyn MoodJournalService>,
    pub assistant: Option<Arc<dyn RecipeAssistantService>>,
}

#[derive(Clone)]
pub struct Gateway {
    store: Arc<Store>,
    services: GatewayServices,
}

fn assistant_missing() -> PortError {
    PortError::Unexpected("AI assistant is not configured".to_string())
}

impl Gateway {
    pub fn new(store: Arc<Store>, services: GatewayServices) -> Self {
        Self { store, services }
    }

    /// Dispatches `Pending`, then runs `call` on a new task and dispatches its outcome.
    fn issue<T, A>(
        &self,
        label: &'static str,
        to_action: A,
        call: BoxFuture<'static, PortResult<T>>,
    ) -> RequestHandle<T>
    where
        T: Clone + Send + Sync + 'static,
        A: Fn(Lifecycle<T>) -> Action + Send + 'static,
    {
        let request_id = self.store.next_request_id();
        let (phase_tx, phase_rx) = watch::channel(RequestPhase::Pending);

        self.store.dispatch(to_action(Lifecycle::Pending { request_id }));
        debug!(%request_id, request = label, "Request issued");

        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            match call.await {
                Ok(payload) => {
                    store.dispatch(to_action(Lifecycle::Fulfilled {
                        request_id,
                        payload: payload.clone(),
                    }));
                    info!(%request_id, request = label, "Request fulfilled");
                    phase_tx.send_replace(RequestPhase::Fulfilled(payload));
                }
                Err(e) => {
                    let message = e.to_string();
                    warn!(%request_id, request = label, error = %message, "Request rejected");
                    store.dispatch(to_action(Lifecycle::Rejected {
                        request_id,
                        message: message.clone(),
                    }));
                    phase_tx.send_replace(RequestPhase::Rejected(message));
                }
            }
        });

        RequestHandle {
            id: request_id,
            phase: phase_rx,
        }
    }

    // --- Auth ---

    pub fn login(&self, credentials: Credentials) -> RequestHandle<User> {
        let auth = Arc::clone(&self.services.auth);
        self.issue(
            "auth/login",
            |l| Action::Auth(AuthAction::Login(l)),
            async move { auth.login(&credentials).await }.boxed(),
        )
    }

    pub fn register(&self, registration: Registration) -> RequestHandle<User> {
        let auth = Arc::clone(&self.services.auth);
        self.issue(
            "auth/register",
            |l| Action::Auth(AuthAction::Register(l)),
            async move { auth.register(&registration).await }.boxed(),
        )
    }

    pub fn logout(&self) -> RequestHandle<()> {
        let auth = Arc::clone(&self.services.auth);
        self.issue(
            "auth/logout",
            |l| Action::Auth(AuthAction::Logout(l)),
            async move { auth.logout().await }.boxed(),
        )
    }

    // --- Recipes ---

    pub fn fetch_recipes(&self, filters: SearchFilters) -> RequestHandle<Vec<Recipe>> {
        let recipes = Arc::clone(&self.services.recipes);
        self.issue(
            "recipes/fetchRecipes",
            |l| Action::Recipes(RecipesAction::FetchRecipes(l)),
            async move { recipes.fetch_recipes(&filters).await }.boxed(),
        )
    }

    pub fn search_recipes(&self, filters: SearchFilters) -> RequestHandle<Vec<Recipe>> {
        let recipes = Arc::clone(&self.services.recipes);
        self.issue(
            "recipes/searchRecipes",
            |l| Action::Recipes(RecipesAction::SearchRecipes(l)),
            async move { recipes.search_recipes(&filters).await }.boxed(),
        )
    }

    pub fn fetch_recipe_by_id(&self, recipe_id: String) -> RequestHandle<Recipe> {
        let recipes = Arc::clone(&self.services.recipes);
        self.issue(
            "recipes/fetchRecipeById",
            |l| Action::Recipes(RecipesAction::FetchRecipeById(l)),
            async move { recipes.fetch_recipe_by_id(&recipe_id).await }.boxed(),
        )
    }

    /// Asks the assistant for a recipe built from `ingredients`, using the signed-in
    /// user's preferences (or the defaults).
    pub fn generate_recipe(
        &self,
        ingredients: Vec<String>,
        restrictions: Vec<String>,
    ) -> RequestHandle<Recipe> {
        let assistant = self.services.assistant.clone();
        let preferences = self.store.select(selectors::user_preferences);
        self.issue(
            "recipes/generateRecipe",
            |l| Action::Recipes(RecipesAction::GenerateRecipe(l)),
            async move {
                let assistant = assistant.ok_or_else(assistant_missing)?;
                assistant
                    .generate_recipe_from_ingredients(&ingredients, &preferences, &restrictions)
                    .await
            }
            .boxed(),
        )
    }

    // --- Mood ---

    pub fn save_mood_entry(&self, entry: NewMoodEntry) -> RequestHandle<MoodEntry> {
        let moods = Arc::clone(&self.services.moods);
        self.issue(
            "mood/saveMoodEntry",
            |l| Action::Mood(MoodAction::SaveMoodEntry(l)),
            async move { moods.save_mood_entry(&entry).await }.boxed(),
        )
    }

    // --- Recommendations ---

    /// Requests recipe recommendations for `mood`. Titles from earlier
    /// recommendations in the store are passed along so they are not repeated.
    pub fn generate_recommendation(
        &self,
        mood: Mood,
        user: User,
        available_ingredients: Vec<String>,
    ) -> RequestHandle<AiRecommendation> {
        self.recommend(Some(mood), Some(user), available_ingredients)
    }

    /// Like `generate_recommendation`, with the mood and user taken from the store.
    /// Rejects when no mood is selected or nobody is signed in.
    pub fn recommend_for_current_mood(
        &self,
        available_ingredients: Vec<String>,
    ) -> RequestHandle<AiRecommendation> {
        let (mood, user) = self.store.select(|state| {
            (
                state.mood.current_mood.clone(),
                selectors::current_user(state).cloned(),
            )
        });
        self.recommend(mood, user, available_ingredients)
    }

    fn recommend(
        &self,
        mood: Option<Mood>,
        user: Option<User>,
        available_ingredients: Vec<String>,
    ) -> RequestHandle<AiRecommendation> {
        let assistant = self.services.assistant.clone();
        let previous_recommendations = self.store.select(selectors::previous_recommendations);
        self.issue(
            "recommendations/generate",
            |l| Action::Recommendations(RecommendationsAction::Generate(l)),
            async move {
                let mood = mood
                    .ok_or_else(|| PortError::Unexpected("Select a mood first".to_string()))?;
                let user = user.ok_or_else(|| {
                    PortError::Unexpected("Sign in to get recommendations".to_string())
                })?;
                let assistant = assistant.ok_or_else(assistant_missing)?;
                let request = RecommendationRequest {
                    mood,
                    user,
                    available_ingredients,
                    previous_recommendations,
                };
                assistant.recommend_for_mood(&request).await
            }
            .boxed(),
        )
    }
}
