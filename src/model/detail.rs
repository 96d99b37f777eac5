//! Detail screen orchestration: playback surface, engagement and comments
//!
//! Persisted state is never cached here; every snapshot is read back from the
//! facade. The only timing state owned here is the delayed view count.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use super::facade::SharedFacade;
use super::playback::{PlaybackSurface, SurfaceView, parse_duration_label};
use super::types::{Comment, MediaSource, ToggleOutcome, Video};

pub const DEFAULT_VIEW_DELAY: Duration = Duration::from_secs(5);
pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;

/// Uncommitted comment input
#[derive(Clone, Debug, Default)]
pub struct CommentComposer {
    draft: String,
}

impl CommentComposer {
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn push(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    pub fn clear(&mut self) {
        self.draft.clear();
    }

    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotAuthor,
    NotFound,
}

/// A comment plus whether the current viewer wrote it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentEntry {
    pub comment: Comment,
    pub own: bool,
}

/// Everything the detail screen renders, derived fresh from the stores
#[derive(Clone, Debug)]
pub struct DetailSnapshot {
    pub video: Video,
    pub liked: bool,
    pub disliked: bool,
    pub subscribed: bool,
    pub description: String,
    pub description_expanded: bool,
    pub description_truncated: bool,
    pub comments: Vec<CommentEntry>,
    pub recommended: Vec<Video>,
    pub composer_draft: String,
    pub surface: SurfaceView,
}

pub struct DetailView {
    facade: SharedFacade,
    view_delay: Duration,
    current: Option<String>,
    source: Option<MediaSource>,
    mount_generation: Arc<AtomicU64>,
    view_timer: Option<JoinHandle<()>>,
    description_expanded: bool,
    composer: CommentComposer,
    recommended: Vec<String>,
    surface: PlaybackSurface,
}

impl DetailView {
    /// `recommended` is the externally ranked rail; it is never reordered.
    pub fn new(facade: SharedFacade, recommended: Vec<String>, view_delay: Duration) -> Self {
        Self {
            facade,
            view_delay,
            current: None,
            source: None,
            mount_generation: Arc::new(AtomicU64::new(0)),
            view_timer: None,
            description_expanded: false,
            composer: CommentComposer::default(),
            recommended,
            surface: PlaybackSurface::unavailable(),
        }
    }

    pub fn current_video(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn media_source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    pub fn surface(&self) -> &PlaybackSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PlaybackSurface {
        &mut self.surface
    }

    pub fn composer(&self) -> &CommentComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut CommentComposer {
        &mut self.composer
    }

    pub fn toggle_description(&mut self) {
        self.description_expanded = !self.description_expanded;
    }

    /// Show `video_id`. Returns false if it is already displayed.
    pub async fn mount(&mut self, video_id: &str, now: Instant) -> bool {
        if self.current.as_deref() == Some(video_id) {
            return false;
        }
        self.unmount();

        let (source, duration_ms) = {
            let facade = self.facade.lock().await;
            match facade.get_video(video_id) {
                Some(video) => (
                    video.media_source(),
                    parse_duration_label(&video.duration).unwrap_or(0),
                ),
                None => {
                    tracing::warn!(video_id, "Mounting unknown video");
                    (None, 0)
                }
            }
        };

        let fullscreen = self.surface.is_fullscreen();
        self.surface = PlaybackSurface::new(source.as_ref(), duration_ms, now);
        self.surface.on_fullscreen_change(fullscreen);
        self.source = source;
        self.current = Some(video_id.to_string());
        self.arm_view_timer(video_id.to_string());
        tracing::debug!(video_id, "Detail view mounted");
        true
    }

    /// Leave the current video. A view timer that has not fired is dropped.
    pub fn unmount(&mut self) {
        self.mount_generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = self.view_timer.take() {
            timer.abort();
        }
        if let Some(id) = self.current.take() {
            tracing::debug!(video_id = %id, "Detail view unmounted");
        }
        self.source = None;
        self.description_expanded = false;
        self.composer.clear();
    }

    fn arm_view_timer(&mut self, video_id: String) {
        let generation = self.mount_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mount_generation = self.mount_generation.clone();
        let facade = self.facade.clone();
        let delay = self.view_delay;

        self.view_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut facade = facade.lock().await;
            if mount_generation.load(Ordering::SeqCst) != generation {
                tracing::trace!(video_id = %video_id, "Stale view timer ignored");
                return;
            }
            facade.increment_views(&video_id);
        }));
    }

    pub async fn toggle_like(&self) -> Option<ToggleOutcome> {
        let id = self.current.as_deref()?;
        self.facade.lock().await.toggle_like(id)
    }

    pub async fn toggle_dislike(&self) -> Option<ToggleOutcome> {
        let id = self.current.as_deref()?;
        self.facade.lock().await.toggle_dislike(id)
    }

    /// Subscribe to the creator of the displayed video.
    pub async fn toggle_subscribe(&self) -> Option<bool> {
        let id = self.current.as_deref()?;
        let mut facade = self.facade.lock().await;
        let creator_id = facade.get_video(id)?.creator.id.clone();
        Some(facade.toggle_subscribe(&creator_id))
    }

    /// Commit the draft. Blank drafts are left untouched.
    pub async fn submit_comment(&mut self) -> Option<Comment> {
        if !self.composer.can_submit() {
            return None;
        }
        let id = self.current.as_deref()?;
        let comment = self.facade.lock().await.add_comment(id, self.composer.draft())?;
        self.composer.clear();
        Some(comment)
    }

    pub fn cancel_comment(&mut self) {
        self.composer.clear();
    }

    /// Delete a comment on the displayed video, if the viewer wrote it.
    pub async fn delete_comment(&self, comment_id: &str) -> DeleteOutcome {
        let Some(id) = self.current.as_deref() else {
            return DeleteOutcome::NotFound;
        };
        let mut facade = self.facade.lock().await;
        let Some(comment) = facade.get_comments(id).iter().find(|c| c.id == comment_id) else {
            return DeleteOutcome::NotFound;
        };
        if !facade.is_own_comment(comment) {
            return DeleteOutcome::NotAuthor;
        }
        if facade.delete_comment(id, comment_id) {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        }
    }

    /// Rail entries in their given order, without the displayed video.
    pub fn recommended_ids(&self) -> Vec<&str> {
        self.recommended
            .iter()
            .map(String::as_str)
            .filter(|id| Some(*id) != self.current.as_deref())
            .collect()
    }

    pub async fn snapshot(&self, now: Instant) -> Option<DetailSnapshot> {
        let id = self.current.as_deref()?;
        let facade = self.facade.lock().await;
        let video = facade.get_video(id)?.clone();

        let (description, description_truncated) = if self.description_expanded {
            (video.description.clone(), false)
        } else {
            description_preview(&video.description, DESCRIPTION_PREVIEW_CHARS)
        };

        let comments = facade
            .get_comments(id)
            .iter()
            .map(|comment| CommentEntry {
                own: facade.is_own_comment(comment),
                comment: comment.clone(),
            })
            .collect();

        let recommended = self
            .recommended_ids()
            .into_iter()
            .filter_map(|rid| facade.get_video(rid).cloned())
            .collect();

        Some(DetailSnapshot {
            liked: facade.is_liked(id),
            disliked: facade.is_disliked(id),
            subscribed: facade.is_subscribed(&video.creator.id),
            description,
            description_expanded: self.description_expanded,
            description_truncated,
            comments,
            recommended,
            composer_draft: self.composer.draft().to_string(),
            surface: self.surface.view(now),
            video,
        })
    }
}

impl Drop for DetailView {
    fn drop(&mut self) {
        if let Some(timer) = self.view_timer.take() {
            timer.abort();
        }
    }
}

/// First `max_chars` characters of `text`, with whether anything was cut.
pub fn description_preview(text: &str, max_chars: usize) -> (String, bool) {
    if text.chars().count() <= max_chars {
        return (text.to_string(), false);
    }
    let cut: String = text.chars().take(max_chars).collect();
    (format!("{}…", cut.trim_end()), true)
}
