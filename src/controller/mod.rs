//! Controller module - Application logic and event handling
//!
//! - `input`: Key and mouse event handling
//! - `playback`: Player surface control and fullscreen
//! - `engagement`: Reactions, subscriptions, comments and navigation
//! - `player_events`: Media/fullscreen notification listener

mod input;
mod playback;
mod engagement;
mod player_events;

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::media::{MediaBackend, TerminalFullscreen};
use crate::model::{AppModel, MediaCommand};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) media: Arc<MediaBackend>,
    pub(crate) fullscreen: Arc<TerminalFullscreen>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        media: Arc<MediaBackend>,
        fullscreen: Arc<TerminalFullscreen>,
    ) -> Self {
        Self {
            model,
            media,
            fullscreen,
        }
    }

    /// Show `video_id` in the detail screen and start loading its media.
    pub async fn open_video(&self, video_id: &str) {
        let model = self.model.lock().await;
        let mut detail = model.detail.lock().await;
        if !detail.mount(video_id, Instant::now()).await {
            return;
        }
        self.media.load(detail.media_source());
        drop(detail);
        model.reset_selections().await;
        tracing::info!(video_id, "Opened video");
    }

    /// Per-frame housekeeping: confirm pending taps, expire overlays and
    /// stale status messages.
    pub async fn tick(&self) {
        let model = self.model.lock().await;
        model.auto_clear_old_errors().await;
        let command = model.detail.lock().await.surface_mut().tick(Instant::now());
        self.dispatch(command);
    }

    pub(crate) fn dispatch(&self, commands: impl IntoIterator<Item = MediaCommand>) {
        for command in commands {
            self.media.execute(command);
        }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let error_str = error.to_string();
        if error_str.contains("fullscreen") {
            "Fullscreen is not available right now.".to_string()
        } else {
            format!("Error: {}", error_str)
        }
    }
}
