//! crates/moodmeal_core/src/store/mod.rs
//!
//! The single source of truth for client state. A `Store` owns one `StateTree`
//! made of six independent slices; every change goes through `dispatch`, which runs
//! each slice reducer against a copy of the current tree and publishes the result
//! as a new immutable snapshot.

pub mod lifecycle;
pub mod selectors;
pub mod slices;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

pub use lifecycle::{AsyncStatus, Lifecycle, RequestId, RequestSlot, ResponsePolicy};
use slices::{
    AuthAction, AuthState, MoodAction, MoodState, PantryAction, PantryState, RecipesAction,
    RecipesState, RecommendationsAction, RecommendationsState, UiAction, UiState,
};

//=========================================================================================
// Actions
//=========================================================================================

/// Every state change the client can request, grouped by the slice that owns it.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Recipes(RecipesAction),
    Mood(MoodAction),
    Pantry(PantryAction),
    Recommendations(RecommendationsAction),
    Ui(UiAction),
}

impl Action {
    /// A stable name such as `recipes/fetchRecipes/pending`, used for logging.
    pub fn kind(&self) -> String {
        match self {
            Action::Auth(a) => format!("auth/{}", a.kind()),
            Action::Recipes(a) => format!("recipes/{}", a.kind()),
            Action::Mood(a) => format!("mood/{}", a.kind()),
            Action::Pantry(a) => format!("pantry/{}", a.kind()),
            Action::Recommendations(a) => format!("recommendations/{}", a.kind()),
            Action::Ui(a) => format!("ui/{}", a.kind()),
        }
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<RecipesAction> for Action {
    fn from(action: RecipesAction) -> Self {
        Action::Recipes(action)
    }
}

impl From<MoodAction> for Action {
    fn from(action: MoodAction) -> Self {
        Action::Mood(action)
    }
}

impl From<PantryAction> for Action {
    fn from(action: PantryAction) -> Self {
        Action::Pantry(action)
    }
}

impl From<RecommendationsAction> for Action {
    fn from(action: RecommendationsAction) -> Self {
        Action::Recommendations(action)
    }
}

impl From<UiAction> for Action {
    fn from(action: UiAction) -> Self {
        Action::Ui(action)
    }
}

//=========================================================================================
// State Tree
//=========================================================================================

/// The whole client state, keyed by slice.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTree {
    pub auth: AuthState,
    pub recipes: RecipesState,
    pub mood: MoodState,
    pub pantry: PantryState,
    pub recommendations: RecommendationsState,
    pub ui: UiState,
}

impl StateTree {
    pub fn new(policy: ResponsePolicy) -> Self {
        Self {
            auth: AuthState::new(policy),
            recipes: RecipesState::new(policy),
            mood: MoodState::new(),
            pantry: PantryState::default(),
            recommendations: RecommendationsState::new(),
            ui: UiState::default(),
        }
    }

    /// Routes the action to every slice; only the owning slice changes.
    pub fn reduce(&mut self, action: &Action) {
        self.auth.reduce(action);
        self.recipes.reduce(action);
        self.mood.reduce(action);
        self.pantry.reduce(action);
        self.recommendations.reduce(action);
        self.ui.reduce(action);
    }
}

impl Default for StateTree {
    fn default() -> Self {
        Self::new(ResponsePolicy::default())
    }
}

//=========================================================================================
// Middleware
//=========================================================================================

/// Observes each completed dispatch. Middleware only ever sees shared references,
/// so it cannot alter the action or either snapshot.
pub trait Middleware: Send + Sync {
    fn after_dispatch(&self, action: &Action, previous: &StateTree, next: &StateTree);
}

/// Logs every dispatched action at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn after_dispatch(&self, action: &Action, previous: &StateTree, next: &StateTree) {
        debug!(
            action = %action.kind(),
            changed = previous != next,
            "Action dispatched"
        );
    }
}

//=========================================================================================
// Store
//=========================================================================================

pub struct Store {
    state: watch::Sender<Arc<StateTree>>,
    middleware: Vec<Arc<dyn Middleware>>,
    next_request: AtomicU64,
}

impl Store {
    pub fn new(initial: StateTree) -> Self {
        let (state, _) = watch::channel(Arc::new(initial));
        Self {
            state,
            middleware: Vec::new(),
            next_request: AtomicU64::new(1),
        }
    }

    pub fn with_policy(policy: ResponsePolicy) -> Self {
        Self::new(StateTree::new(policy))
    }

    /// Adds a middleware. Middleware runs in the order it was added.
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Applies the action and publishes the new snapshot. Concurrent dispatches are
    /// serialized by the channel's write lock, so each reducer pass sees the result
    /// of the previous one and readers never observe a half-applied tree.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        let mut transition = None;

        self.state.send_modify(|current| {
            let previous = Arc::clone(current);
            let mut next = (*previous).clone();
            next.reduce(&action);
            *current = Arc::new(next);
            transition = Some((previous, Arc::clone(current)));
        });

        if let Some((previous, next)) = transition {
            for middleware in &self.middleware {
                middleware.after_dispatch(&action, &previous, &next);
            }
        }
    }

    /// The snapshot as of the last completed dispatch.
    pub fn get_state(&self) -> Arc<StateTree> {
        Arc::clone(&self.state.borrow())
    }

    /// Runs a selector against the current snapshot.
    pub fn select<R>(&self, selector: impl FnOnce(&StateTree) -> R) -> R {
        let snapshot = self.get_state();
        selector(&snapshot)
    }

    /// A receiver that is notified after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<Arc<StateTree>> {
        self.state.subscribe()
    }

    pub fn next_request_id(&self) -> RequestId {
        RequestId(self.next_request.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StateTree::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    impl Middleware for Recorder {
        fn after_dispatch(&self, action: &Action, _previous: &StateTree, _next: &StateTree) {
            self.seen.lock().unwrap().push(action.kind());
        }
    }

    #[test]
    fn dispatch_only_changes_the_owning_slice() {
        let store = Store::default();
        let before = store.get_state();

        store.dispatch(RecipesAction::ToggleFavorite("r1".to_string()));

        let after = store.get_state();
        assert_eq!(after.recipes.favorites, vec!["r1".to_string()]);
        assert_eq!(after.auth, before.auth);
        assert_eq!(after.mood, before.mood);
        assert_eq!(after.pantry, before.pantry);
        assert_eq!(after.recommendations, before.recommendations);
        assert_eq!(after.ui, before.ui);
    }

    #[test]
    fn old_snapshots_are_not_mutated() {
        let store = Store::default();
        let snapshot = store.get_state();

        store.dispatch(UiAction::SetCurrentPage("pantry".to_string()));

        assert_eq!(snapshot.ui.current_page, "home");
        assert_eq!(store.get_state().ui.current_page, "pantry");
    }

    #[test]
    fn middleware_sees_every_action_in_order() {
        let recorder = Arc::new(Recorder::default());
        let store = Store::default().with_middleware(recorder.clone());

        store.dispatch(UiAction::ToggleSidebar);
        store.dispatch(MoodAction::ClearCurrentMood);
        store.dispatch(RecipesAction::FetchRecipes(Lifecycle::Pending {
            request_id: store.next_request_id(),
        }));

        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec![
                "ui/toggleSidebar".to_string(),
                "mood/clearCurrentMood".to_string(),
                "recipes/fetchRecipes/pending".to_string(),
            ]
        );
    }

    #[test]
    fn request_ids_increase() {
        let store = Store::default();
        let first = store.next_request_id();
        let second = store.next_request_id();
        assert!(second > first);
    }

    #[test]
    fn select_reads_current_state() {
        let store = Store::default();
        store.dispatch(UiAction::SetLanguage("fr".to_string()));
        assert_eq!(store.select(|s| s.ui.language.clone()), "fr");
    }

    #[tokio::test]
    async fn subscribers_are_notified_of_new_snapshots() {
        let store = Store::default();
        let mut rx = store.subscribe();

        store.dispatch(UiAction::SetTheme(crate::domain::Theme::Dark));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().ui.theme, crate::domain::Theme::Dark);
    }
}
