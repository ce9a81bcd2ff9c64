//! Request lifecycle tests for the gateway, driven by in-memory port fakes.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

use moodmeal_core::domain::{
    Credentials, MoodEntry, NewMoodEntry, NutritionInfo, Registration, SkillLevel,
    SubscriptionType,
};
use moodmeal_core::store::slices::{mood_catalog, MoodAction};
use moodmeal_core::{
    AiRecommendation, AuthService, Gateway, GatewayServices, MoodJournalService, PortError,
    PortResult, Recipe, RecipeAssistantService, RecipeCatalogService, RecommendationRequest,
    RequestPhase, ResponsePolicy, SearchFilters, Store, User, UserPreferences,
};

//=========================================================================================
// Fakes
//=========================================================================================

fn user(email: &str) -> User {
    User {
        id: "u1".to_string(),
        email: email.to_string(),
        display_name: "Demo User".to_string(),
        photo_url: None,
        preferences: UserPreferences::default(),
        subscription: SubscriptionType::Free,
        created_at: Utc::now(),
        last_login: Utc::now(),
    }
}

fn recipe(id: &str) -> Recipe {
    Recipe::draft(id.to_string(), &format!("Recipe {id}"), "")
}

struct FakeAuth;

#[async_trait]
impl AuthService for FakeAuth {
    async fn login(&self, credentials: &Credentials) -> PortResult<User> {
        if credentials.password == "secret" {
            Ok(user(&credentials.email))
        } else {
            Err(PortError::Unauthorized)
        }
    }

    async fn register(&self, registration: &Registration) -> PortResult<User> {
        let mut u = user(&registration.email);
        u.display_name = registration.display_name.clone();
        Ok(u)
    }

    async fn logout(&self) -> PortResult<()> {
        Ok(())
    }
}

/// Each `fetch_recipes` call waits on the next queued receiver, so the test decides
/// when (and in which order) calls resolve.
#[derive(Default)]
struct ControlledCatalog {
    pending: Mutex<VecDeque<oneshot::Receiver<PortResult<Vec<Recipe>>>>>,
}

impl ControlledCatalog {
    fn queue(&self) -> oneshot::Sender<PortResult<Vec<Recipe>>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl RecipeCatalogService for ControlledCatalog {
    async fn fetch_recipes(&self, _filters: &SearchFilters) -> PortResult<Vec<Recipe>> {
        let rx = self
            .pending
            .lock()
            .unwrap()
            .pop_front()
            .expect("a response should be queued for every call");
        rx.await
            .unwrap_or_else(|_| Err(PortError::Unexpected("dropped".to_string())))
    }

    async fn search_recipes(&self, filters: &SearchFilters) -> PortResult<Vec<Recipe>> {
        let query = filters.query.clone().unwrap_or_default();
        Ok(vec![recipe(&query)])
    }

    async fn fetch_recipe_by_id(&self, recipe_id: &str) -> PortResult<Recipe> {
        if recipe_id == "1" {
            Ok(recipe("1"))
        } else {
            Err(PortError::NotFound("Recipe not found".to_string()))
        }
    }
}

/// Holds calls tagged with a key until the test releases that key. Untagged or
/// unheld keys pass straight through.
#[derive(Default)]
struct Gate {
    held: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl Gate {
    fn hold(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.held.lock().unwrap().insert(key.to_string(), rx);
        tx
    }

    async fn pass(&self, key: &str) {
        let rx = self.held.lock().unwrap().remove(key);
        if let Some(rx) = rx {
            let _ = rx.await;
        }
    }
}

/// Uses the entry's notes as its id, or "e1" when there are none.
struct FakeJournal {
    gate: Arc<Gate>,
}

#[async_trait]
impl MoodJournalService for FakeJournal {
    async fn save_mood_entry(&self, entry: &NewMoodEntry) -> PortResult<MoodEntry> {
        let id = entry.notes.clone().unwrap_or_else(|| "e1".to_string());
        self.gate.pass(&id).await;
        Ok(entry.clone().with_id(id))
    }
}

/// Echoes how many previous recommendations it was given. The recommendation id is
/// the first available ingredient, when there is one.
struct FakeAssistant {
    gate: Arc<Gate>,
}

#[async_trait]
impl RecipeAssistantService for FakeAssistant {
    async fn recommend_for_mood(
        &self,
        request: &RecommendationRequest,
    ) -> PortResult<AiRecommendation> {
        let id = request
            .available_ingredients
            .first()
            .cloned()
            .unwrap_or_else(|| format!("rec-{}", request.previous_recommendations.len()));
        self.gate.pass(&id).await;
        Ok(AiRecommendation {
            id,
            user_id: request.user.id.clone(),
            mood: request.mood.clone(),
            recipes: vec![recipe("ai")],
            reasoning: format!("previous={}", request.previous_recommendations.len()),
            confidence: 0.85,
            timestamp: Utc::now(),
            feedback: None,
        })
    }

    async fn generate_recipe_from_ingredients(
        &self,
        ingredients: &[String],
        preferences: &UserPreferences,
        _restrictions: &[String],
    ) -> PortResult<Recipe> {
        let mut r = recipe("generated");
        r.title = ingredients.join(" & ");
        r.difficulty = preferences.cooking_skill_level;
        Ok(r)
    }

    async fn improve_recipe(
        &self,
        recipe: &Recipe,
        _feedback: &str,
        _dietary_requests: &[String],
    ) -> PortResult<Recipe> {
        Ok(recipe.clone())
    }

    async fn cooking_instructions(
        &self,
        _recipe: &Recipe,
        _skill_level: SkillLevel,
        _voice_mode: bool,
    ) -> PortResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn nutrition_advice(
        &self,
        _goals: &[String],
        _current: &NutritionInfo,
        _target: &NutritionInfo,
    ) -> PortResult<String> {
        Ok(String::new())
    }
}

struct Harness {
    gateway: Gateway,
    store: Arc<Store>,
    catalog: Arc<ControlledCatalog>,
    gate: Arc<Gate>,
}

fn harness(policy: ResponsePolicy, with_assistant: bool) -> Harness {
    let store = Arc::new(Store::with_policy(policy));
    let catalog = Arc::new(ControlledCatalog::default());
    let gate = Arc::new(Gate::default());
    let assistant: Option<Arc<dyn RecipeAssistantService>> = if with_assistant {
        Some(Arc::new(FakeAssistant { gate: gate.clone() }))
    } else {
        None
    };
    let services = GatewayServices {
        auth: Arc::new(FakeAuth),
        recipes: catalog.clone(),
        moods: Arc::new(FakeJournal { gate: gate.clone() }),
        assistant,
    };
    Harness {
        gateway: Gateway::new(store.clone(), services),
        store,
        catalog,
        gate,
    }
}

fn credentials(password: &str) -> Credentials {
    Credentials {
        email: "cook@example.com".to_string(),
        password: password.to_string(),
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[tokio::test]
async fn pending_is_visible_before_the_call_resolves() {
    let h = harness(ResponsePolicy::default(), false);
    let respond = h.catalog.queue();

    let handle = h.gateway.fetch_recipes(SearchFilters::default());

    assert_eq!(handle.phase(), RequestPhase::Pending);
    assert!(!handle.phase().is_settled());
    assert!(h.store.get_state().recipes.status.is_loading);

    respond.send(Ok(vec![recipe("1")])).unwrap();
    let recipes = handle.settled().await.unwrap();

    assert_eq!(recipes.len(), 1);
    let state = h.store.get_state();
    assert!(!state.recipes.status.is_loading);
    assert_eq!(state.recipes.recipes, recipes);
}

#[tokio::test]
async fn failed_login_then_successful_login_clears_error() {
    let h = harness(ResponsePolicy::default(), false);

    let err = h.gateway.login(credentials("wrong")).settled().await.unwrap_err();
    assert_eq!(err, "Unauthorized");
    let state = h.store.get_state();
    assert!(!state.auth.status.is_loading);
    assert_eq!(state.auth.status.error.as_deref(), Some("Unauthorized"));

    h.gateway.login(credentials("secret")).settled().await.unwrap();
    let state = h.store.get_state();
    assert!(state.auth.is_authenticated);
    assert!(!state.auth.status.is_loading);
    assert_eq!(state.auth.status.error, None);
}

#[tokio::test]
async fn register_then_logout() {
    let h = harness(ResponsePolicy::default(), false);

    h.gateway
        .register(Registration {
            email: "new@example.com".to_string(),
            password: "pw".to_string(),
            display_name: "New Cook".to_string(),
        })
        .settled()
        .await
        .unwrap();
    assert_eq!(
        h.store.get_state().auth.user.as_ref().map(|u| u.display_name.clone()),
        Some("New Cook".to_string())
    );

    h.gateway.logout().settled().await.unwrap();
    let state = h.store.get_state();
    assert!(state.auth.user.is_none());
    assert!(!state.auth.is_authenticated);
}

#[tokio::test]
async fn last_fulfilled_policy_lets_a_slow_early_response_win() {
    let h = harness(ResponsePolicy::LastFulfilledWins, false);
    let respond_a = h.catalog.queue();
    let respond_b = h.catalog.queue();

    let a = h.gateway.fetch_recipes(SearchFilters::default());
    let b = h.gateway.fetch_recipes(SearchFilters::default());

    respond_b.send(Ok(vec![recipe("b")])).unwrap();
    b.settled().await.unwrap();
    respond_a.send(Ok(vec![recipe("a")])).unwrap();
    a.settled().await.unwrap();

    let ids: Vec<_> = h
        .store
        .get_state()
        .recipes
        .recipes
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(ids, vec!["a".to_string()]);
}

#[tokio::test]
async fn latest_issued_policy_ignores_a_slow_early_response() {
    let h = harness(ResponsePolicy::LatestIssuedWins, false);
    let respond_a = h.catalog.queue();
    let respond_b = h.catalog.queue();

    let a = h.gateway.fetch_recipes(SearchFilters::default());
    let b = h.gateway.fetch_recipes(SearchFilters::default());

    respond_b.send(Ok(vec![recipe("b")])).unwrap();
    b.settled().await.unwrap();
    respond_a.send(Ok(vec![recipe("a")])).unwrap();
    // The handle still reports its own result even though the store ignored it.
    assert_eq!(a.settled().await.unwrap()[0].id, "a");

    let state = h.store.get_state();
    assert_eq!(state.recipes.recipes[0].id, "b");
    assert!(!state.recipes.status.is_loading);
}

#[tokio::test]
async fn dropped_handle_still_updates_the_store() {
    let h = harness(ResponsePolicy::default(), false);
    let respond = h.catalog.queue();
    let mut rx = h.store.subscribe();

    drop(h.gateway.fetch_recipes(SearchFilters::default()));
    respond.send(Ok(vec![recipe("late")])).unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            rx.changed().await.unwrap();
            if !rx.borrow().recipes.recipes.is_empty() {
                break;
            }
        }
    })
    .await
    .expect("the request should still complete");

    assert_eq!(h.store.get_state().recipes.recipes[0].id, "late");
}

#[tokio::test]
async fn unknown_recipe_id_is_rejected_with_not_found_message() {
    let h = harness(ResponsePolicy::default(), false);

    let err = h
        .gateway
        .fetch_recipe_by_id("404".to_string())
        .settled()
        .await
        .unwrap_err();

    assert_eq!(err, "Recipe not found");
    let state = h.store.get_state();
    assert_eq!(state.recipes.status.error.as_deref(), Some("Recipe not found"));
    assert!(state.recipes.current_recipe.is_none());

    h.gateway.fetch_recipe_by_id("1".to_string()).settled().await.unwrap();
    let state = h.store.get_state();
    assert_eq!(state.recipes.status.error, None);
    assert_eq!(state.recipes.current_recipe.as_ref().map(|r| r.id.as_str()), Some("1"));
}

#[tokio::test]
async fn search_fills_search_results_not_recipes() {
    let h = harness(ResponsePolicy::default(), false);

    h.gateway
        .search_recipes(SearchFilters::query("soup"))
        .settled()
        .await
        .unwrap();

    let state = h.store.get_state();
    assert_eq!(state.recipes.search_results[0].id, "soup");
    assert!(state.recipes.recipes.is_empty());
}

#[tokio::test]
async fn saved_mood_entry_is_appended_to_history() {
    let h = harness(ResponsePolicy::default(), false);
    let happy = mood_catalog()[0].clone();
    let timestamp = Utc::now();

    let handle = h.gateway.save_mood_entry(NewMoodEntry {
        user_id: "u1".to_string(),
        mood: happy.clone(),
        intensity: 7,
        timestamp,
        notes: None,
        weather_condition: None,
        location: None,
    });
    assert!(h.store.get_state().mood.status.is_loading);
    handle.settled().await.unwrap();

    let state = h.store.get_state();
    assert!(!state.mood.status.is_loading);
    assert_eq!(state.mood.mood_history.len(), 1);
    let entry = &state.mood.mood_history[0];
    assert_eq!(entry.id, "e1");
    assert_eq!(entry.mood, happy);
    assert_eq!(entry.intensity, 7);
    assert_eq!(entry.timestamp, timestamp);
}

fn entry_noted(notes: &str) -> NewMoodEntry {
    NewMoodEntry {
        user_id: "u1".to_string(),
        mood: mood_catalog()[0].clone(),
        intensity: 5,
        timestamp: Utc::now(),
        notes: Some(notes.to_string()),
        weather_condition: None,
        location: None,
    }
}

#[tokio::test]
async fn overlapping_mood_saves_both_reach_history() {
    let h = harness(ResponsePolicy::default(), false);
    let release_first = h.gate.hold("first");
    let release_second = h.gate.hold("second");

    let first = h.gateway.save_mood_entry(entry_noted("first"));
    let second = h.gateway.save_mood_entry(entry_noted("second"));

    release_first.send(()).unwrap();
    first.settled().await.unwrap();
    let state = h.store.get_state();
    assert!(state.mood.status.is_loading);
    assert_eq!(state.mood.mood_history.len(), 1);

    release_second.send(()).unwrap();
    second.settled().await.unwrap();

    let state = h.store.get_state();
    let ids: Vec<_> = state.mood.mood_history.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second"]);
    assert!(!state.mood.status.is_loading);
}

#[tokio::test]
async fn overlapping_recommendations_are_all_kept() {
    let h = harness(ResponsePolicy::default(), true);
    h.gateway.login(credentials("secret")).settled().await.unwrap();
    h.store.dispatch(MoodAction::SetCurrentMood(mood_catalog()[0].clone()));
    let release_r1 = h.gate.hold("r1");
    let release_r2 = h.gate.hold("r2");

    let r1 = h.gateway.recommend_for_current_mood(vec!["r1".to_string()]);
    let r2 = h.gateway.recommend_for_current_mood(vec!["r2".to_string()]);

    release_r2.send(()).unwrap();
    r2.settled().await.unwrap();
    assert!(h.store.get_state().recommendations.status.is_loading);
    release_r1.send(()).unwrap();
    r1.settled().await.unwrap();

    let state = h.store.get_state();
    let ids: Vec<_> = state
        .recommendations
        .recommendations
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, vec!["r2", "r1"]);
    assert!(!state.recommendations.status.is_loading);
}

#[tokio::test]
async fn recommending_without_a_mood_is_rejected() {
    let h = harness(ResponsePolicy::default(), true);
    h.gateway.login(credentials("secret")).settled().await.unwrap();

    let err = h
        .gateway
        .recommend_for_current_mood(Vec::new())
        .settled()
        .await
        .unwrap_err();

    assert_eq!(err, "Select a mood first");
    assert_eq!(
        h.store.get_state().recommendations.status.error.as_deref(),
        Some("Select a mood first")
    );
}

#[tokio::test]
async fn recommendations_pass_previous_results_to_the_assistant() {
    let h = harness(ResponsePolicy::default(), true);
    h.gateway.login(credentials("secret")).settled().await.unwrap();
    h.store.dispatch(MoodAction::SetCurrentMood(mood_catalog()[1].clone()));

    let first = h
        .gateway
        .recommend_for_current_mood(vec!["rice".to_string()])
        .settled()
        .await
        .unwrap();
    let second = h
        .gateway
        .recommend_for_current_mood(Vec::new())
        .settled()
        .await
        .unwrap();

    assert_eq!(first.reasoning, "previous=0");
    assert_eq!(second.reasoning, "previous=1");
    assert_eq!(first.mood.name, "sad");
    let state = h.store.get_state();
    assert_eq!(state.recommendations.recommendations.len(), 2);
    assert!(!state.recommendations.status.is_loading);
}

#[tokio::test]
async fn ai_operations_reject_without_an_assistant() {
    let h = harness(ResponsePolicy::default(), false);
    let happy = mood_catalog()[0].clone();

    let err = h
        .gateway
        .generate_recommendation(happy, user("cook@example.com"), Vec::new())
        .settled()
        .await
        .unwrap_err();
    assert_eq!(err, "AI assistant is not configured");

    let err = h
        .gateway
        .generate_recipe(vec!["egg".to_string()], Vec::new())
        .settled()
        .await
        .unwrap_err();
    assert_eq!(err, "AI assistant is not configured");
    assert_eq!(
        h.store.get_state().recipes.status.error.as_deref(),
        Some("AI assistant is not configured")
    );
}

#[tokio::test]
async fn generated_recipe_becomes_current_recipe() {
    let h = harness(ResponsePolicy::default(), true);

    let generated = h
        .gateway
        .generate_recipe(vec!["egg".to_string(), "rice".to_string()], Vec::new())
        .settled()
        .await
        .unwrap();

    assert_eq!(generated.title, "egg & rice");
    assert_eq!(generated.difficulty, SkillLevel::Beginner);
    assert_eq!(h.store.get_state().recipes.current_recipe, Some(generated));
}
