//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::detail::{DetailSnapshot, DetailView};
use super::facade::SharedFacade;
use super::types::{ActiveSection, UiState};

const STATUS_TTL: Duration = Duration::from_secs(5);

/// Main application model containing all state
pub struct AppModel {
    pub facade: SharedFacade,
    pub detail: Arc<Mutex<DetailView>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(facade: SharedFacade, detail: DetailView) -> Self {
        Self {
            facade,
            detail: Arc::new(Mutex::new(detail)),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_snapshot(&self, now: Instant) -> Option<DetailSnapshot> {
        self.detail.lock().await.snapshot(now).await
    }

    // ========================================================================
    // Sections & selection
    // ========================================================================

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Comments => {
                state.comment_selected = state.comment_selected.saturating_sub(1);
            }
            ActiveSection::Recommended => {
                state.recommended_selected = state.recommended_selected.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// `len` is the number of entries in the focused list.
    pub async fn move_selection_down(&self, len: usize) {
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Comments => {
                if state.comment_selected < len.saturating_sub(1) {
                    state.comment_selected += 1;
                }
            }
            ActiveSection::Recommended => {
                if state.recommended_selected < len.saturating_sub(1) {
                    state.recommended_selected += 1;
                }
            }
            _ => {}
        }
    }

    /// Keep selections in range after a list shrinks.
    pub async fn clamp_selections(&self, comments: usize, recommended: usize) {
        let mut state = self.ui_state.lock().await;
        state.comment_selected = state.comment_selected.min(comments.saturating_sub(1));
        state.recommended_selected = state.recommended_selected.min(recommended.saturating_sub(1));
    }

    pub async fn reset_selections(&self) {
        let mut state = self.ui_state.lock().await;
        state.comment_selected = 0;
        state.recommended_selected = 0;
        state.active_section = ActiveSection::Player;
    }

    // ========================================================================
    // Status messages & popups
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed() > STATUS_TTL {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::detail::DEFAULT_VIEW_DELAY;
    use crate::model::facade::InteractionFacade;
    use crate::model::storage::MemoryStorage;
    use crate::model::types::Viewer;

    fn model() -> AppModel {
        let viewer = Viewer {
            name: "You".to_string(),
            avatar: String::new(),
        };
        let facade = InteractionFacade::init(Arc::new(MemoryStorage::new()), viewer).into_shared();
        let detail = DetailView::new(facade.clone(), vec![], DEFAULT_VIEW_DELAY);
        AppModel::new(facade, detail)
    }

    #[tokio::test]
    async fn selection_stays_inside_list() {
        let model = model();
        model.set_active_section(ActiveSection::Comments).await;
        model.move_selection_up().await;
        for _ in 0..10 {
            model.move_selection_down(3).await;
        }
        assert_eq!(model.get_ui_state().await.comment_selected, 2);

        model.clamp_selections(1, 0).await;
        assert_eq!(model.get_ui_state().await.comment_selected, 0);
    }

    #[tokio::test]
    async fn selection_ignores_player_section() {
        let model = model();
        model.move_selection_down(5).await;
        let state = model.get_ui_state().await;
        assert_eq!((state.comment_selected, state.recommended_selected), (0, 0));
    }

    #[tokio::test]
    async fn sections_cycle_both_ways() {
        let model = model();
        model.cycle_section_forward().await;
        assert_eq!(model.get_ui_state().await.active_section, ActiveSection::Comments);
        model.cycle_section_backward().await;
        model.cycle_section_backward().await;
        assert_eq!(model.get_ui_state().await.active_section, ActiveSection::Composer);
    }

    #[tokio::test]
    async fn fresh_status_survives_auto_clear() {
        let model = model();
        model.set_error("Fullscreen unavailable".to_string()).await;
        model.auto_clear_old_errors().await;
        assert!(model.has_error().await);
        model.clear_error().await;
        assert!(!model.has_error().await);
    }
}
