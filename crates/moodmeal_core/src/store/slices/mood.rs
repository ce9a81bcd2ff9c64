//! crates/moodmeal_core/src/store/slices/mood.rs
//!
//! The mood catalog, the currently selected mood, and the mood journal.

use crate::domain::{Mood, MoodCategory, MoodEntry};
use crate::store::lifecycle::{AsyncStatus, Lifecycle, RequestSlot};
use crate::store::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum MoodAction {
    SaveMoodEntry(Lifecycle<MoodEntry>),
    SetCurrentMood(Mood),
    ClearCurrentMood,
    ClearError,
}

impl MoodAction {
    pub fn kind(&self) -> String {
        match self {
            MoodAction::SaveMoodEntry(l) => format!("saveMoodEntry/{}", l.phase_name()),
            MoodAction::SetCurrentMood(_) => "setCurrentMood".to_string(),
            MoodAction::ClearCurrentMood => "clearCurrentMood".to_string(),
            MoodAction::ClearError => "clearError".to_string(),
        }
    }
}

/// The moods a user can pick from.
pub fn mood_catalog() -> Vec<Mood> {
    use MoodCategory::*;
    [
        ("1", "happy", "😊", "#FFD700", "Feeling joyful and content", Positive),
        ("2", "sad", "😢", "#4682B4", "Feeling down or melancholy", Negative),
        ("3", "stressed", "😰", "#FF6B6B", "Feeling overwhelmed or anxious", Negative),
        ("4", "energetic", "⚡", "#FF4500", "Feeling full of energy and ready to go", Energetic),
        ("5", "calm", "🧘", "#98FB98", "Feeling peaceful and relaxed", Calm),
        ("6", "lazy", "😴", "#D3D3D3", "Feeling sluggish and unmotivated", Neutral),
        ("7", "romantic", "💕", "#FF69B4", "Feeling loving and affectionate", Positive),
        ("8", "adventurous", "🗺️", "#32CD32", "Feeling ready to try new things", Energetic),
    ]
    .into_iter()
    .map(|(id, name, emoji, color, description, category)| {
        Mood::new(id, name, emoji, color, description, category)
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodState {
    pub current_mood: Option<Mood>,
    /// Append-only, in the order entries were saved.
    pub mood_history: Vec<MoodEntry>,
    pub available_moods: Vec<Mood>,
    pub status: AsyncStatus,
    save: RequestSlot,
}

impl MoodState {
    pub fn new() -> Self {
        Self {
            current_mood: None,
            mood_history: Vec::new(),
            available_moods: mood_catalog(),
            status: AsyncStatus::default(),
            save: RequestSlot::appending(),
        }
    }

    pub fn find_mood(&self, name: &str) -> Option<&Mood> {
        self.available_moods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn reduce(&mut self, action: &Action) {
        let Action::Mood(action) = action else {
            return;
        };

        match action {
            MoodAction::SaveMoodEntry(lifecycle) => {
                if let Some(entry) =
                    self.status
                        .track(&mut self.save, lifecycle, "Failed to save mood entry")
                {
                    self.mood_history.push(entry.clone());
                }
            }
            MoodAction::SetCurrentMood(mood) => self.current_mood = Some(mood.clone()),
            MoodAction::ClearCurrentMood => self.current_mood = None,
            MoodAction::ClearError => self.status.clear_error(),
        }
    }
}

impl Default for MoodState {
    fn default() -> Self {
        Self::new()
    }
}
