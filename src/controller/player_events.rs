//! Listener for media and fullscreen notifications

use std::time::Instant;

use tokio::sync::watch;

use crate::media::{PlayerEvent, PlayerEventReceiver};

use super::AppController;

impl AppController {
    pub fn start_player_event_listener(&self, mut events: PlayerEventReceiver) {
        let controller = self.clone();
        tracing::info!("Starting player event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let model = controller.model.lock().await;
                if model.should_quit().await {
                    tracing::debug!("Player event listener shutting down");
                    break;
                }

                let mut detail = model.detail.lock().await;
                match event {
                    PlayerEvent::Media(media_event) => {
                        tracing::trace!(?media_event, "Media event");
                        controller.media.note_event(&media_event);
                        detail.surface_mut().on_media_event(media_event, Instant::now());
                    }
                    PlayerEvent::FullscreenChanged(active) => {
                        tracing::debug!(active, "Fullscreen changed");
                        detail.surface_mut().on_fullscreen_change(active);
                    }
                }
            }
        });
    }

    /// Keep list selections valid as comments come and go.
    pub fn start_revision_listener(&self, mut revisions: watch::Receiver<u64>) {
        let controller = self.clone();

        tokio::spawn(async move {
            while revisions.changed().await.is_ok() {
                let revision = *revisions.borrow_and_update();
                tracing::trace!(revision, "Interaction state changed");

                let model = controller.model.lock().await;
                if model.should_quit().await {
                    break;
                }
                if let Some(snapshot) = model.get_snapshot(Instant::now()).await {
                    model
                        .clamp_selections(snapshot.comments.len(), snapshot.recommended.len())
                        .await;
                }
            }
        });
    }
}
