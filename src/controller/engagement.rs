//! Reactions, subscriptions, comments and recommended-rail navigation

use std::time::Instant;

use crate::model::{ActiveSection, DeleteOutcome};

use super::AppController;

impl AppController {
    pub async fn toggle_like(&self) {
        let model = self.model.lock().await;
        let outcome = model.detail.lock().await.toggle_like().await;
        tracing::debug!(?outcome, "Like toggled");
    }

    pub async fn toggle_dislike(&self) {
        let model = self.model.lock().await;
        let outcome = model.detail.lock().await.toggle_dislike().await;
        tracing::debug!(?outcome, "Dislike toggled");
    }

    pub async fn toggle_subscribe(&self) {
        let model = self.model.lock().await;
        if let Some(subscribed) = model.detail.lock().await.toggle_subscribe().await {
            tracing::info!(subscribed, "Subscription toggled");
        }
    }

    pub async fn toggle_description(&self) {
        let model = self.model.lock().await;
        model.detail.lock().await.toggle_description();
    }

    pub async fn composer_input(&self, c: char) {
        let model = self.model.lock().await;
        model.detail.lock().await.composer_mut().push(c);
    }

    pub async fn composer_backspace(&self) {
        let model = self.model.lock().await;
        model.detail.lock().await.composer_mut().backspace();
    }

    pub async fn cancel_comment(&self) {
        let model = self.model.lock().await;
        model.detail.lock().await.cancel_comment();
        model.set_active_section(ActiveSection::Comments).await;
    }

    pub async fn submit_comment(&self) {
        let model = self.model.lock().await;
        let added = model.detail.lock().await.submit_comment().await;
        if let Some(comment) = added {
            tracing::info!(comment_id = %comment.id, "Comment posted");
            let mut state = model.ui_state.lock().await;
            state.comment_selected = 0;
        }
    }

    /// Delete the selected comment. Only the viewer's own comments qualify.
    pub async fn delete_selected_comment(&self) {
        let model = self.model.lock().await;
        let Some(snapshot) = model.get_snapshot(Instant::now()).await else {
            return;
        };
        let selected = model.get_ui_state().await.comment_selected;
        let Some(entry) = snapshot.comments.get(selected) else {
            return;
        };

        let outcome = model.detail.lock().await.delete_comment(&entry.comment.id).await;
        match outcome {
            DeleteOutcome::Deleted => {
                tracing::info!(comment_id = %entry.comment.id, "Comment deleted");
            }
            DeleteOutcome::NotAuthor => {
                model.set_error("You can only delete your own comments.".to_string()).await;
            }
            DeleteOutcome::NotFound => {
                tracing::debug!(comment_id = %entry.comment.id, "Comment already gone");
            }
        }
    }

    pub async fn open_selected_recommended(&self) {
        let target = {
            let model = self.model.lock().await;
            let selected = model.get_ui_state().await.recommended_selected;
            let detail = model.detail.lock().await;
            detail.recommended_ids().get(selected).map(|id| id.to_string())
        };
        if let Some(video_id) = target {
            self.open_video(&video_id).await;
        }
    }

    /// Length of the list the selection keys currently move through.
    pub(crate) async fn focused_list_len(&self) -> usize {
        let model = self.model.lock().await;
        let section = model.get_ui_state().await.active_section;
        let detail = model.detail.lock().await;
        match section {
            ActiveSection::Recommended => detail.recommended_ids().len(),
            ActiveSection::Comments => match detail.current_video() {
                Some(id) => model.facade.lock().await.get_comments(id).len(),
                None => 0,
            },
            _ => 0,
        }
    }
}
