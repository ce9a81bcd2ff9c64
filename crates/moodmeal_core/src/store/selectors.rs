//! crates/moodmeal_core/src/store/selectors.rs
//!
//! Read-only accessors over a `StateTree`. This is the only place where values
//! from more than one slice are combined.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    AiRecommendation, AppNotification, GroceryItem, PantryItem, Recipe, User, UserPreferences,
};
use crate::store::StateTree;

pub fn is_authenticated(state: &StateTree) -> bool {
    state.auth.is_authenticated
}

pub fn current_user(state: &StateTree) -> Option<&User> {
    state.auth.user.as_ref()
}

/// The signed-in user's preferences, or the defaults when nobody is signed in.
pub fn user_preferences(state: &StateTree) -> UserPreferences {
    current_user(state)
        .map(|u| u.preferences.clone())
        .unwrap_or_default()
}

pub fn is_favorite(state: &StateTree, recipe_id: &str) -> bool {
    state.recipes.is_favorite(recipe_id)
}

/// Favourited recipes that are currently loaded, in favourite order. Favourite ids
/// with no loaded recipe are skipped.
pub fn favorite_recipes(state: &StateTree) -> Vec<&Recipe> {
    state
        .recipes
        .favorites
        .iter()
        .filter_map(|id| state.recipes.recipes.iter().find(|r| &r.id == id))
        .collect()
}

pub fn previous_recommendations(state: &StateTree) -> Vec<AiRecommendation> {
    state.recommendations.recommendations.clone()
}

pub fn unread_notifications(state: &StateTree) -> Vec<&AppNotification> {
    state.ui.notifications.iter().filter(|n| !n.is_read).collect()
}

/// Pantry items whose expiration date falls before `now + within`, soonest first.
/// Items that are already expired are included.
pub fn expiring_pantry_items(
    state: &StateTree,
    now: DateTime<Utc>,
    within: Duration,
) -> Vec<&PantryItem> {
    let cutoff = now + within;
    let mut items: Vec<&PantryItem> = state
        .pantry
        .pantry_items
        .iter()
        .filter(|item| item.expiration_date.is_some_and(|date| date <= cutoff))
        .collect();
    items.sort_by_key(|item| item.expiration_date);
    items
}

pub fn running_low_items(state: &StateTree) -> Vec<&PantryItem> {
    state
        .pantry
        .pantry_items
        .iter()
        .filter(|item| item.is_running_low)
        .collect()
}

pub fn unchecked_grocery_items<'a>(state: &'a StateTree, list_id: &str) -> Vec<&'a GroceryItem> {
    state
        .pantry
        .grocery_lists
        .iter()
        .find(|list| list.id == list_id)
        .map(|list| list.items.iter().filter(|item| !item.is_checked).collect())
        .unwrap_or_default()
}

pub fn any_loading(state: &StateTree) -> bool {
    state.auth.status.is_loading
        || state.recipes.status.is_loading
        || state.mood.status.is_loading
        || state.pantry.status.is_loading
        || state.recommendations.status.is_loading
        || state.ui.status.is_loading
}

/// Every non-empty error, tagged with the slice it belongs to.
pub fn errors(state: &StateTree) -> Vec<(&'static str, &str)> {
    [
        ("auth", &state.auth.status.error),
        ("recipes", &state.recipes.status.error),
        ("mood", &state.mood.status.error),
        ("pantry", &state.pantry.status.error),
        ("recommendations", &state.recommendations.status.error),
        ("ui", &state.ui.status.error),
    ]
    .into_iter()
    .filter_map(|(slice, error)| error.as_deref().map(|e| (slice, e)))
    .collect()
}
