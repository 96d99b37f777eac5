//! Simulated native media element and the terminal fullscreen host
//!
//! Both report back through a single event channel, which the controller
//! drains into the playback surface.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::model::{MediaCommand, MediaEvent, MediaSource};

const LOAD_LATENCY: Duration = Duration::from_millis(400);
const REBUFFER_LATENCY: Duration = Duration::from_millis(250);

/// Notifications from the playback platform
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    Media(MediaEvent),
    FullscreenChanged(bool),
}

pub type PlayerEventSender = mpsc::UnboundedSender<PlayerEvent>;
pub type PlayerEventReceiver = mpsc::UnboundedReceiver<PlayerEvent>;

pub fn player_event_channel() -> (PlayerEventSender, PlayerEventReceiver) {
    mpsc::unbounded_channel()
}

/// Stand-in for the native media element the scrubbing player drives
pub struct MediaBackend {
    events: PlayerEventSender,
    autoplay: bool,
    playing: AtomicBool,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl MediaBackend {
    pub fn new(events: PlayerEventSender, autoplay: bool) -> Self {
        Self {
            events,
            autoplay,
            playing: AtomicBool::new(false),
            pending: Mutex::new(None),
        }
    }

    /// Start loading `source`. Embeds are played by the third party, so only
    /// native media produces events.
    pub fn load(&self, source: Option<&MediaSource>) {
        self.playing.store(false, Ordering::Relaxed);
        let Some(MediaSource::Native(url)) = source else {
            self.cancel_pending();
            return;
        };
        tracing::debug!(url = %url, autoplay = self.autoplay, "Loading media");
        if self.autoplay {
            self.schedule(LOAD_LATENCY, vec![MediaEvent::Autoplay]);
        } else {
            self.cancel_pending();
        }
    }

    pub fn execute(&self, command: MediaCommand) {
        tracing::trace!(?command, "Media command");
        match command {
            MediaCommand::Play => self.playing.store(true, Ordering::Relaxed),
            MediaCommand::Pause => self.playing.store(false, Ordering::Relaxed),
            MediaCommand::Seek { .. } => {
                if self.playing.load(Ordering::Relaxed) {
                    self.emit(MediaEvent::Waiting);
                    self.schedule(REBUFFER_LATENCY, vec![MediaEvent::CanPlay]);
                }
            }
        }
    }

    /// Autoplay counts as playing for re-buffer purposes.
    pub fn note_event(&self, event: &MediaEvent) {
        match event {
            MediaEvent::Autoplay | MediaEvent::CanPlay => self.playing.store(true, Ordering::Relaxed),
            MediaEvent::Error(_) => self.playing.store(false, Ordering::Relaxed),
            MediaEvent::Waiting => {}
        }
    }

    pub fn unload(&self) {
        self.playing.store(false, Ordering::Relaxed);
        self.cancel_pending();
    }

    fn emit(&self, event: MediaEvent) {
        if self.events.send(PlayerEvent::Media(event)).is_err() {
            tracing::debug!("Player event receiver dropped");
        }
    }

    fn schedule(&self, delay: Duration, events: Vec<MediaEvent>) {
        let sender = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            for event in events {
                if sender.send(PlayerEvent::Media(event)).is_err() {
                    break;
                }
            }
        });
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.replace(task) {
                previous.abort();
            }
        }
    }

    fn cancel_pending(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(task) = pending.take() {
                task.abort();
            }
        }
    }
}

impl Drop for MediaBackend {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Platform capability for putting the player container in fullscreen
pub trait FullscreenHost: Send + Sync {
    fn request_fullscreen(&self, enter: bool) -> Result<()>;
}

/// In the terminal, fullscreen means the player takes over the whole frame.
pub struct TerminalFullscreen {
    events: PlayerEventSender,
    active: AtomicBool,
}

impl TerminalFullscreen {
    pub fn new(events: PlayerEventSender) -> Self {
        Self {
            events,
            active: AtomicBool::new(false),
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Exit triggered by the platform itself (Escape), not by the player.
    pub fn platform_exit(&self) {
        if self.active.swap(false, Ordering::Relaxed) {
            tracing::debug!("Fullscreen exited by platform");
            if self.events.send(PlayerEvent::FullscreenChanged(false)).is_err() {
                tracing::debug!("Player event receiver dropped");
            }
        }
    }
}

impl FullscreenHost for TerminalFullscreen {
    fn request_fullscreen(&self, enter: bool) -> Result<()> {
        if self.active.swap(enter, Ordering::Relaxed) == enter {
            return Ok(());
        }
        if self.events.send(PlayerEvent::FullscreenChanged(enter)).is_err() {
            self.active.store(!enter, Ordering::Relaxed);
            return Err(anyhow!("fullscreen change could not be delivered"));
        }
        Ok(())
    }
}
