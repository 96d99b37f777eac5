//! Per-video comment threads, newest first

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::storage::{self, COMMENTS_KEY, Durability, Storage};
use super::types::{Comment, Viewer};

pub const JUST_NOW_LABEL: &str = "just now";

/// Owns the mapping from video ID to its ordered comment thread.
///
/// The ledger knows nothing about statistics; keeping the comment counter in
/// step is the facade's job.
pub struct CommentLedger {
    threads: BTreeMap<String, Vec<Comment>>,
    storage: Arc<dyn Storage>,
    durability: Durability,
}

impl CommentLedger {
    /// Load persisted threads, or give every video in `video_ids` its own copy
    /// of `seed`.
    pub fn init<'a>(
        storage: Arc<dyn Storage>,
        video_ids: impl IntoIterator<Item = &'a str>,
        seed: &[Comment],
    ) -> Self {
        let seeded = || -> BTreeMap<String, Vec<Comment>> {
            video_ids
                .into_iter()
                .map(|id| (id.to_string(), seed.to_vec()))
                .collect()
        };

        match storage::load_json::<BTreeMap<String, Vec<Comment>>>(storage.as_ref(), COMMENTS_KEY) {
            Ok(Some(threads)) => {
                tracing::debug!(threads = threads.len(), "Comment ledger loaded");
                Self {
                    threads,
                    storage,
                    durability: Durability::Persistent,
                }
            }
            Ok(None) => {
                let mut ledger = Self {
                    threads: seeded(),
                    storage,
                    durability: Durability::Persistent,
                };
                tracing::debug!(threads = ledger.threads.len(), "Comment ledger seeded");
                ledger.persist();
                ledger
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored comments unreadable, using seed data in memory");
                Self {
                    threads: seeded(),
                    storage,
                    durability: Durability::MemoryOnly,
                }
            }
        }
    }

    pub fn durability(&self) -> Durability {
        self.durability
    }

    /// Empty for unknown videos.
    pub fn comments(&self, video_id: &str) -> &[Comment] {
        self.threads.get(video_id).map(Vec::as_slice).unwrap_or(&[])
    }

    #[cfg(test)]
    pub fn threads(&self) -> &BTreeMap<String, Vec<Comment>> {
        &self.threads
    }

    /// Prepend a new comment. Blank text is rejected with `None`.
    pub fn add(&mut self, video_id: &str, text: &str, author: &Viewer) -> Option<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let comment = Comment {
            id: Uuid::now_v7().to_string(),
            author: author.clone(),
            text: text.to_string(),
            timestamp: JUST_NOW_LABEL.to_string(),
            created_at: Some(Utc::now()),
            likes: 0,
            replies: Vec::new(),
        };

        self.threads
            .entry(video_id.to_string())
            .or_default()
            .insert(0, comment.clone());
        tracing::debug!(video_id, comment_id = %comment.id, "Comment added");
        self.persist();
        Some(comment)
    }

    /// Remove a comment; `None` if it was not in the thread.
    pub fn delete(&mut self, video_id: &str, comment_id: &str) -> Option<Comment> {
        let thread = self.threads.get_mut(video_id)?;
        let index = thread.iter().position(|c| c.id == comment_id)?;
        let removed = thread.remove(index);
        tracing::debug!(video_id, comment_id, "Comment deleted");
        self.persist();
        Some(removed)
    }

    fn persist(&mut self) {
        storage::write_through(self.storage.as_ref(), &mut self.durability, COMMENTS_KEY, &self.threads);
    }
}
