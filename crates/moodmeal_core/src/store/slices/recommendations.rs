//! crates/moodmeal_core/src/store/slices/recommendations.rs

use crate::domain::AiRecommendation;
use crate::store::lifecycle::{AsyncStatus, Lifecycle, RequestSlot};
use crate::store::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationsAction {
    Generate(Lifecycle<AiRecommendation>),
    AddRecommendation(AiRecommendation),
    ClearRecommendations,
    SetLoading(bool),
    SetError(Option<String>),
    ClearError,
}

impl RecommendationsAction {
    pub fn kind(&self) -> String {
        match self {
            RecommendationsAction::Generate(l) => format!("generate/{}", l.phase_name()),
            RecommendationsAction::AddRecommendation(_) => "addRecommendation".to_string(),
            RecommendationsAction::ClearRecommendations => "clearRecommendations".to_string(),
            RecommendationsAction::SetLoading(_) => "setLoading".to_string(),
            RecommendationsAction::SetError(_) => "setError".to_string(),
            RecommendationsAction::ClearError => "clearError".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationsState {
    pub recommendations: Vec<AiRecommendation>,
    pub status: AsyncStatus,
    generate: RequestSlot,
}

impl RecommendationsState {
    pub fn new() -> Self {
        Self {
            recommendations: Vec::new(),
            status: AsyncStatus::default(),
            generate: RequestSlot::appending(),
        }
    }

    pub fn reduce(&mut self, action: &Action) {
        let Action::Recommendations(action) = action else {
            return;
        };

        match action {
            RecommendationsAction::Generate(lifecycle) => {
                if let Some(recommendation) = self.status.track(
                    &mut self.generate,
                    lifecycle,
                    "Failed to generate AI recommendations",
                ) {
                    self.recommendations.push(recommendation.clone());
                }
            }
            RecommendationsAction::AddRecommendation(recommendation) => {
                self.recommendations.push(recommendation.clone())
            }
            RecommendationsAction::ClearRecommendations => self.recommendations.clear(),
            RecommendationsAction::SetLoading(loading) => self.status.is_loading = *loading,
            RecommendationsAction::SetError(error) => self.status.error = error.clone(),
            RecommendationsAction::ClearError => self.status.clear_error(),
        }
    }
}

impl Default for RecommendationsState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::lifecycle::RequestId;
    use crate::store::slices::mood::mood_catalog;
    use chrono::Utc;

    fn recommendation(id: &str) -> AiRecommendation {
        AiRecommendation {
            id: id.to_string(),
            user_id: "u1".to_string(),
            mood: mood_catalog()[0].clone(),
            recipes: Vec::new(),
            reasoning: "Bright food for a bright day".to_string(),
            confidence: 0.85,
            timestamp: Utc::now(),
            feedback: None,
        }
    }

    fn dispatch(state: &mut RecommendationsState, action: RecommendationsAction) {
        state.reduce(&Action::Recommendations(action));
    }

    #[test]
    fn generated_recommendations_accumulate() {
        let mut state = RecommendationsState::default();

        for (n, id) in ["a", "b"].into_iter().enumerate() {
            let request_id = RequestId(n as u64 + 1);
            dispatch(
                &mut state,
                RecommendationsAction::Generate(Lifecycle::Pending { request_id }),
            );
            dispatch(
                &mut state,
                RecommendationsAction::Generate(Lifecycle::Fulfilled {
                    request_id,
                    payload: recommendation(id),
                }),
            );
        }

        let ids: Vec<_> = state.recommendations.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(!state.status.is_loading);
    }

    #[test]
    fn overlapping_generations_are_all_kept() {
        let mut state = RecommendationsState::default();

        for id in [1, 2] {
            dispatch(
                &mut state,
                RecommendationsAction::Generate(Lifecycle::Pending {
                    request_id: RequestId(id),
                }),
            );
        }
        for (id, payload) in [(2, "r2"), (1, "r1")] {
            dispatch(
                &mut state,
                RecommendationsAction::Generate(Lifecycle::Fulfilled {
                    request_id: RequestId(id),
                    payload: recommendation(payload),
                }),
            );
        }

        let ids: Vec<_> = state.recommendations.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r2", "r1"]);
        assert!(!state.status.is_loading);
    }

    #[test]
    fn manual_loading_and_error_setters() {
        let mut state = RecommendationsState::default();

        dispatch(&mut state, RecommendationsAction::SetLoading(true));
        dispatch(
            &mut state,
            RecommendationsAction::SetError(Some("quota exceeded".to_string())),
        );
        assert!(state.status.is_loading);
        assert_eq!(state.status.error.as_deref(), Some("quota exceeded"));

        dispatch(&mut state, RecommendationsAction::SetError(None));
        assert_eq!(state.status.error, None);
    }

    #[test]
    fn clear_recommendations_empties_the_list() {
        let mut state = RecommendationsState::default();
        dispatch(
            &mut state,
            RecommendationsAction::AddRecommendation(recommendation("a")),
        );

        dispatch(&mut state, RecommendationsAction::ClearRecommendations);

        assert!(state.recommendations.is_empty());
    }
}
