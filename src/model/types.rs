//! Core type definitions for the application

use std::collections::BTreeSet;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation status of a video record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    #[default]
    Approved,
    Rejected,
}

/// Denormalized snapshot of the creator who uploaded a video
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub id: String,
    pub name: String,
    pub avatar: String,
    /// Display string only, never recomputed from subscriptions
    pub subscribers: String,
    #[serde(default)]
    pub verified: bool,
}

/// Mutable statistics block of a video
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoStats {
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
    pub comments: u64,
    pub shares: u64,
}

/// Where the playable media for a video lives
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSource {
    /// Played by the app-controlled scrubbing player
    Native(String),
    /// Played by a third-party embedded player
    Embed(String),
}

/// A video record as persisted by the engagement store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub embed_url: Option<String>,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    /// Display string such as `12:34`
    pub duration: String,
    pub upload_date: String,
    pub category: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub creator: Creator,
    pub stats: VideoStats,
    #[serde(default)]
    pub status: ModerationStatus,
    #[serde(default)]
    pub is_short: bool,
}

impl Video {
    /// First-party media wins over the embed when both are present.
    pub fn media_source(&self) -> Option<MediaSource> {
        let non_empty = |url: &Option<String>| url.as_ref().filter(|u| !u.trim().is_empty()).cloned();

        non_empty(&self.video_url)
            .map(MediaSource::Native)
            .or_else(|| non_empty(&self.embed_url).map(MediaSource::Embed))
    }
}

/// Display identity of a viewer, used as comment author snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub name: String,
    pub avatar: String,
}

/// A comment in a video's thread
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: Viewer,
    pub text: String,
    /// Stored display label, e.g. "2 days ago"
    pub timestamp: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// The current viewer's reactions and subscriptions
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InteractionSets {
    pub liked: BTreeSet<String>,
    pub disliked: BTreeSet<String>,
    pub subscribed: BTreeSet<String>,
}

/// Result of a like/dislike toggle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Which section of the detail screen is focused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Player,
    Comments,
    Recommended,
    Composer,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Player => ActiveSection::Comments,
            ActiveSection::Comments => ActiveSection::Recommended,
            ActiveSection::Recommended => ActiveSection::Composer,
            ActiveSection::Composer => ActiveSection::Player,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Player => ActiveSection::Composer,
            ActiveSection::Comments => ActiveSection::Player,
            ActiveSection::Recommended => ActiveSection::Comments,
            ActiveSection::Composer => ActiveSection::Recommended,
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub comment_selected: usize,
    pub recommended_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}
