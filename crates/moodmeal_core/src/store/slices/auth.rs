//! crates/moodmeal_core/src/store/slices/auth.rs
//!
//! The signed-in user and the login/register/logout request lifecycles.

use crate::domain::{SkillLevel, SpiceLevel, SubscriptionType, User, UserPreferences};
use crate::store::lifecycle::{AsyncStatus, Lifecycle, RequestSlot, ResponsePolicy};
use crate::store::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Login(Lifecycle<User>),
    Register(Lifecycle<User>),
    Logout(Lifecycle<()>),
    ClearError,
    UpdateUserPreferences(PreferencesPatch),
    UpdateUserProfile(ProfilePatch),
}

impl AuthAction {
    pub fn kind(&self) -> String {
        match self {
            AuthAction::Login(l) => format!("login/{}", l.phase_name()),
            AuthAction::Register(l) => format!("register/{}", l.phase_name()),
            AuthAction::Logout(l) => format!("logout/{}", l.phase_name()),
            AuthAction::ClearError => "clearError".to_string(),
            AuthAction::UpdateUserPreferences(_) => "updateUserPreferences".to_string(),
            AuthAction::UpdateUserProfile(_) => "updateUserProfile".to_string(),
        }
    }
}

/// A partial update of `UserPreferences`; `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreferencesPatch {
    pub dietary_restrictions: Option<Vec<String>>,
    pub allergies: Option<Vec<String>>,
    pub favorite_ingredients: Option<Vec<String>>,
    pub disliked_ingredients: Option<Vec<String>>,
    pub cuisine_preferences: Option<Vec<String>>,
    pub spice_level: Option<SpiceLevel>,
    pub health_goals: Option<Vec<String>>,
    pub cooking_skill_level: Option<SkillLevel>,
    pub max_cooking_time: Option<u32>,
}

impl PreferencesPatch {
    fn apply(&self, prefs: &mut UserPreferences) {
        if let Some(v) = &self.dietary_restrictions {
            prefs.dietary_restrictions = v.clone();
        }
        if let Some(v) = &self.allergies {
            prefs.allergies = v.clone();
        }
        if let Some(v) = &self.favorite_ingredients {
            prefs.favorite_ingredients = v.clone();
        }
        if let Some(v) = &self.disliked_ingredients {
            prefs.disliked_ingredients = v.clone();
        }
        if let Some(v) = &self.cuisine_preferences {
            prefs.cuisine_preferences = v.clone();
        }
        if let Some(v) = self.spice_level {
            prefs.spice_level = v;
        }
        if let Some(v) = &self.health_goals {
            prefs.health_goals = v.clone();
        }
        if let Some(v) = self.cooking_skill_level {
            prefs.cooking_skill_level = v;
        }
        if let Some(v) = self.max_cooking_time {
            prefs.max_cooking_time = v;
        }
    }
}

/// A partial update of the user's profile fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub subscription: Option<SubscriptionType>,
}

impl ProfilePatch {
    fn apply(&self, user: &mut User) {
        if let Some(v) = &self.email {
            user.email = v.clone();
        }
        if let Some(v) = &self.display_name {
            user.display_name = v.clone();
        }
        if let Some(v) = &self.photo_url {
            user.photo_url = Some(v.clone());
        }
        if let Some(v) = self.subscription {
            user.subscription = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub status: AsyncStatus,
    login: RequestSlot,
    register: RequestSlot,
    logout: RequestSlot,
}

impl AuthState {
    pub fn new(policy: ResponsePolicy) -> Self {
        Self {
            user: None,
            is_authenticated: false,
            status: AsyncStatus::default(),
            login: RequestSlot::new(policy),
            register: RequestSlot::new(policy),
            logout: RequestSlot::new(policy),
        }
    }

    pub fn reduce(&mut self, action: &Action) {
        let Action::Auth(action) = action else {
            return;
        };

        match action {
            AuthAction::Login(lifecycle) => {
                if let Some(user) = self.status.track(&mut self.login, lifecycle, "Login failed") {
                    self.user = Some(user.clone());
                    self.is_authenticated = true;
                }
            }
            AuthAction::Register(lifecycle) => {
                if let Some(user) =
                    self.status
                        .track(&mut self.register, lifecycle, "Registration failed")
                {
                    self.user = Some(user.clone());
                    self.is_authenticated = true;
                }
            }
            AuthAction::Logout(lifecycle) => {
                if self
                    .status
                    .track(&mut self.logout, lifecycle, "Logout failed")
                    .is_some()
                {
                    self.user = None;
                    self.is_authenticated = false;
                }
            }
            AuthAction::ClearError => self.status.clear_error(),
            AuthAction::UpdateUserPreferences(patch) => {
                if let Some(user) = self.user.as_mut() {
                    patch.apply(&mut user.preferences);
                }
            }
            AuthAction::UpdateUserProfile(patch) => {
                if let Some(user) = self.user.as_mut() {
                    patch.apply(user);
                }
            }
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new(ResponsePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubscriptionType;
    use crate::store::lifecycle::RequestId;
    use chrono::Utc;

    fn demo_user() -> User {
        User {
            id: "u1".to_string(),
            email: "cook@example.com".to_string(),
            display_name: "Demo User".to_string(),
            photo_url: None,
            preferences: UserPreferences::default(),
            subscription: SubscriptionType::Free,
            created_at: Utc::now(),
            last_login: Utc::now(),
        }
    }

    fn login(lifecycle: Lifecycle<User>) -> Action {
        Action::Auth(AuthAction::Login(lifecycle))
    }

    #[test]
    fn login_fulfilled_signs_the_user_in() {
        let mut state = AuthState::default();
        let id = RequestId(1);

        state.reduce(&login(Lifecycle::Pending { request_id: id }));
        assert!(state.status.is_loading);

        state.reduce(&login(Lifecycle::Fulfilled {
            request_id: id,
            payload: demo_user(),
        }));
        assert!(!state.status.is_loading);
        assert!(state.is_authenticated);
        assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("u1"));
    }

    #[test]
    fn login_rejected_keeps_user_signed_out() {
        let mut state = AuthState::default();
        let id = RequestId(1);

        state.reduce(&login(Lifecycle::Pending { request_id: id }));
        state.reduce(&login(Lifecycle::Rejected {
            request_id: id,
            message: "Invalid password".to_string(),
        }));

        assert!(!state.is_authenticated);
        assert_eq!(state.status.error.as_deref(), Some("Invalid password"));
    }

    #[test]
    fn logout_clears_the_user() {
        let mut state = AuthState::default();
        state.reduce(&login(Lifecycle::Fulfilled {
            request_id: RequestId(1),
            payload: demo_user(),
        }));

        state.reduce(&Action::Auth(AuthAction::Logout(Lifecycle::Pending {
            request_id: RequestId(2),
        })));
        state.reduce(&Action::Auth(AuthAction::Logout(Lifecycle::Fulfilled {
            request_id: RequestId(2),
            payload: (),
        })));

        assert!(state.user.is_none());
        assert!(!state.is_authenticated);
    }

    #[test]
    fn preference_patch_merges_only_given_fields() {
        let mut state = AuthState::default();
        state.reduce(&login(Lifecycle::Fulfilled {
            request_id: RequestId(1),
            payload: demo_user(),
        }));

        state.reduce(&Action::Auth(AuthAction::UpdateUserPreferences(
            PreferencesPatch {
                spice_level: Some(SpiceLevel::Hot),
                allergies: Some(vec!["peanuts".to_string()]),
                ..PreferencesPatch::default()
            },
        )));

        let prefs = &state.user.as_ref().unwrap().preferences;
        assert_eq!(prefs.spice_level, SpiceLevel::Hot);
        assert_eq!(prefs.allergies, vec!["peanuts".to_string()]);
        assert_eq!(prefs.max_cooking_time, 30);
    }

    #[test]
    fn profile_patch_without_user_is_a_no_op() {
        let mut state = AuthState::default();
        state.reduce(&Action::Auth(AuthAction::UpdateUserProfile(ProfilePatch {
            display_name: Some("Chef".to_string()),
            ..ProfilePatch::default()
        })));

        assert_eq!(state, AuthState::default());
    }
}
