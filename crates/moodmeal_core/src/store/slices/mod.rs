pub mod auth;
pub mod mood;
pub mod pantry;
pub mod recipes;
pub mod recommendations;
pub mod ui;

pub use auth::{AuthAction, AuthState, PreferencesPatch, ProfilePatch};
pub use mood::{mood_catalog, MoodAction, MoodState};
pub use pantry::{PantryAction, PantryState};
pub use recipes::{RecipesAction, RecipesState};
pub use recommendations::{RecommendationsAction, RecommendationsState};
pub use ui::{UiAction, UiState};
