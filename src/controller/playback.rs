//! Player surface control methods

use std::time::Instant;

use crate::media::FullscreenHost;
use crate::model::{SeekDirection, TapZone};

use super::AppController;

impl AppController {
    pub async fn toggle_playback(&self) {
        let model = self.model.lock().await;
        let mut detail = model.detail.lock().await;
        let command = detail.surface_mut().toggle_play(Instant::now());
        tracing::debug!(?command, state = ?detail.surface().state(), "Toggled playback");
        self.dispatch(command);
    }

    pub async fn seek(&self, direction: SeekDirection) {
        let model = self.model.lock().await;
        let command = model.detail.lock().await.surface_mut().seek(direction, Instant::now());
        self.dispatch(command);
    }

    pub async fn tap(&self, zone: TapZone) {
        let model = self.model.lock().await;
        let commands = model.detail.lock().await.surface_mut().tap(zone, Instant::now());
        tracing::trace!(?zone, ?commands, "Player tapped");
        self.dispatch(commands);
    }

    /// Ask the host to flip fullscreen. The surface only changes once the
    /// host confirms through a notification.
    pub async fn toggle_fullscreen(&self) {
        let model = self.model.lock().await;
        let active = model.detail.lock().await.surface().is_fullscreen();
        if let Err(e) = self.fullscreen.request_fullscreen(!active) {
            tracing::warn!(error = %e, enter = !active, "Fullscreen request failed");
            model.set_error(Self::format_error(&e)).await;
        }
    }

    pub fn exit_fullscreen(&self) {
        self.fullscreen.platform_exit();
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::controller;
    use crate::media::PlayerEvent;
    use crate::model::PlaybackState;

    #[tokio::test]
    async fn fullscreen_waits_for_notification() {
        let (controller, mut rx) = controller(&[]);
        controller.open_video("v1").await;
        controller.toggle_fullscreen().await;

        let model = controller.model.lock().await;
        assert!(!model.detail.lock().await.surface().is_fullscreen());
        assert_eq!(rx.try_recv().unwrap(), PlayerEvent::FullscreenChanged(true));
    }

    #[tokio::test]
    async fn failed_fullscreen_request_surfaces_status() {
        let (controller, rx) = controller(&[]);
        drop(rx);
        controller.open_video("v1").await;
        controller.toggle_fullscreen().await;
        assert!(controller.model.lock().await.has_error().await);
    }

    #[tokio::test]
    async fn toggle_plays_native_media() {
        let (controller, _rx) = controller(&[]);
        controller.open_video("v1").await;
        controller.toggle_playback().await;
        let model = controller.model.lock().await;
        let state = model.detail.lock().await.surface().state();
        assert_eq!(state, Some(PlaybackState::Playing));
    }

    #[tokio::test]
    async fn embed_ignores_playback_controls() {
        let (controller, _rx) = controller(&[]);
        controller.open_video("v2").await;
        controller.toggle_playback().await;
        let model = controller.model.lock().await;
        assert_eq!(model.detail.lock().await.surface().state(), None);
    }
}
