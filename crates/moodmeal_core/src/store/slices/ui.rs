//! crates/moodmeal_core/src/store/slices/ui.rs
//!
//! Presentation state: theme, language, navigation, notifications and cook-timers.

use crate::domain::{AppNotification, Theme, Timer};
use crate::store::lifecycle::AsyncStatus;
use crate::store::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SetLoading(bool),
    SetError(Option<String>),
    SetTheme(Theme),
    SetLanguage(String),
    AddNotification(AppNotification),
    RemoveNotification(String),
    MarkNotificationRead(String),
    AddTimer(Timer),
    UpdateTimer(Timer),
    RemoveTimer(String),
    ToggleSidebar,
    SetSidebarOpen(bool),
    SetCurrentPage(String),
    ClearError,
}

impl UiAction {
    pub fn kind(&self) -> &'static str {
        match self {
            UiAction::SetLoading(_) => "setLoading",
            UiAction::SetError(_) => "setError",
            UiAction::SetTheme(_) => "setTheme",
            UiAction::SetLanguage(_) => "setLanguage",
            UiAction::AddNotification(_) => "addNotification",
            UiAction::RemoveNotification(_) => "removeNotification",
            UiAction::MarkNotificationRead(_) => "markNotificationRead",
            UiAction::AddTimer(_) => "addTimer",
            UiAction::UpdateTimer(_) => "updateTimer",
            UiAction::RemoveTimer(_) => "removeTimer",
            UiAction::ToggleSidebar => "toggleSidebar",
            UiAction::SetSidebarOpen(_) => "setSidebarOpen",
            UiAction::SetCurrentPage(_) => "setCurrentPage",
            UiAction::ClearError => "clearError",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub status: AsyncStatus,
    pub theme: Theme,
    pub language: String,
    /// Append-only apart from removal by id.
    pub notifications: Vec<AppNotification>,
    pub active_timers: Vec<Timer>,
    pub sidebar_open: bool,
    pub current_page: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: AsyncStatus::default(),
            theme: Theme::Light,
            language: "en".to_string(),
            notifications: Vec::new(),
            active_timers: Vec::new(),
            sidebar_open: false,
            current_page: "home".to_string(),
        }
    }
}

impl UiState {
    pub fn reduce(&mut self, action: &Action) {
        let Action::Ui(action) = action else {
            return;
        };

        match action {
            UiAction::SetLoading(loading) => self.status.is_loading = *loading,
            UiAction::SetError(error) => self.status.error = error.clone(),
            UiAction::SetTheme(theme) => self.theme = *theme,
            UiAction::SetLanguage(language) => self.language = language.clone(),
            UiAction::AddNotification(notification) => {
                self.notifications.push(notification.clone())
            }
            UiAction::RemoveNotification(id) => self.notifications.retain(|n| &n.id != id),
            UiAction::MarkNotificationRead(id) => {
                if let Some(n) = self.notifications.iter_mut().find(|n| &n.id == id) {
                    n.is_read = true;
                }
            }
            UiAction::AddTimer(timer) => self.active_timers.push(timer.clone()),
            UiAction::UpdateTimer(timer) => {
                if let Some(slot) = self.active_timers.iter_mut().find(|t| t.id == timer.id) {
                    *slot = timer.clone();
                }
            }
            UiAction::RemoveTimer(id) => self.active_timers.retain(|t| &t.id != id),
            UiAction::ToggleSidebar => self.sidebar_open = !self.sidebar_open,
            UiAction::SetSidebarOpen(open) => self.sidebar_open = *open,
            UiAction::SetCurrentPage(page) => self.current_page = page.clone(),
            UiAction::ClearError => self.status.clear_error(),
        }
    }
}
