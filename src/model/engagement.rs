//! Video statistics and the viewer's reaction/subscription sets

use std::sync::Arc;

use super::storage::{self, Durability, INTERACTIONS_KEY, Storage, VIDEOS_KEY};
use super::types::{InteractionSets, ToggleOutcome, Video};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reaction {
    Like,
    Dislike,
}

/// Single source of truth for video statistics and the current viewer's reactions
pub struct EngagementStore {
    videos: Vec<Video>,
    interactions: InteractionSets,
    storage: Arc<dyn Storage>,
    durability: Durability,
}

impl EngagementStore {
    /// Load the persisted snapshot, or seed from `seed` when nothing was stored.
    ///
    /// A read failure of either record seeds both and keeps the store in memory.
    pub fn init(storage: Arc<dyn Storage>, seed: &[Video]) -> Self {
        let videos = storage::load_json::<Vec<Video>>(storage.as_ref(), VIDEOS_KEY);
        let interactions = storage::load_json::<InteractionSets>(storage.as_ref(), INTERACTIONS_KEY);

        match (videos, interactions) {
            (Ok(videos), Ok(interactions)) => {
                let seeded_videos = videos.is_none();
                let seeded_interactions = interactions.is_none();
                let mut store = Self {
                    videos: videos.unwrap_or_else(|| seed.to_vec()),
                    interactions: interactions.unwrap_or_default(),
                    storage,
                    durability: Durability::Persistent,
                };
                tracing::debug!(
                    videos = store.videos.len(),
                    seeded_videos,
                    seeded_interactions,
                    "Engagement store loaded"
                );
                if seeded_videos {
                    store.persist_videos();
                }
                if seeded_interactions {
                    store.persist_interactions();
                }
                store
            }
            (videos, interactions) => {
                let error = videos.err().or(interactions.err());
                if let Some(e) = error {
                    tracing::warn!(error = %e, "Stored engagement snapshot unreadable, using seed data in memory");
                }
                Self {
                    videos: seed.to_vec(),
                    interactions: InteractionSets::default(),
                    storage,
                    durability: Durability::MemoryOnly,
                }
            }
        }
    }

    pub fn durability(&self) -> Durability {
        self.durability
    }

    pub fn video(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    #[cfg(test)]
    pub fn interactions(&self) -> &InteractionSets {
        &self.interactions
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.interactions.liked.contains(id)
    }

    pub fn is_disliked(&self, id: &str) -> bool {
        self.interactions.disliked.contains(id)
    }

    pub fn is_subscribed(&self, creator_id: &str) -> bool {
        self.interactions.subscribed.contains(creator_id)
    }

    /// `None` when the video is unknown.
    pub fn toggle_like(&mut self, id: &str) -> Option<ToggleOutcome> {
        self.toggle_reaction(id, Reaction::Like)
    }

    pub fn toggle_dislike(&mut self, id: &str) -> Option<ToggleOutcome> {
        self.toggle_reaction(id, Reaction::Dislike)
    }

    fn toggle_reaction(&mut self, id: &str, reaction: Reaction) -> Option<ToggleOutcome> {
        let index = self.videos.iter().position(|v| v.id == id)?;
        let stats = &mut self.videos[index].stats;
        let InteractionSets { liked, disliked, .. } = &mut self.interactions;

        let (own_set, own_count, other_set, other_count) = match reaction {
            Reaction::Like => (liked, &mut stats.likes, disliked, &mut stats.dislikes),
            Reaction::Dislike => (disliked, &mut stats.dislikes, liked, &mut stats.likes),
        };

        let outcome = if own_set.remove(id) {
            *own_count = own_count.saturating_sub(1);
            ToggleOutcome::Removed
        } else {
            own_set.insert(id.to_string());
            *own_count += 1;
            if other_set.remove(id) {
                *other_count = other_count.saturating_sub(1);
            }
            ToggleOutcome::Added
        };

        tracing::debug!(video_id = id, ?reaction, ?outcome, "Reaction toggled");
        // Sets first: a failed write demotes the store, so counters are never
        // persisted ahead of the sets they were derived from.
        self.persist_interactions();
        self.persist_videos();
        Some(outcome)
    }

    /// Returns whether the viewer is now subscribed.
    pub fn toggle_subscribe(&mut self, creator_id: &str) -> bool {
        let subscribed = if self.interactions.subscribed.remove(creator_id) {
            false
        } else {
            self.interactions.subscribed.insert(creator_id.to_string());
            true
        };
        tracing::debug!(creator_id, subscribed, "Subscription toggled");
        self.persist_interactions();
        subscribed
    }

    /// Adds exactly one view; deduplication is up to the caller.
    pub fn increment_views(&mut self, id: &str) -> Option<u64> {
        let video = self.videos.iter_mut().find(|v| v.id == id)?;
        video.stats.views += 1;
        let views = video.stats.views;
        self.persist_videos();
        Some(views)
    }

    /// Applies `delta` to the comment counter, clamped at zero.
    pub fn adjust_comment_count(&mut self, id: &str, delta: i64) -> Option<u64> {
        let video = self.videos.iter_mut().find(|v| v.id == id)?;
        let adjusted = (video.stats.comments as i64).saturating_add(delta).max(0);
        video.stats.comments = adjusted as u64;
        let comments = video.stats.comments;
        self.persist_videos();
        Some(comments)
    }

    fn persist_videos(&mut self) {
        storage::write_through(self.storage.as_ref(), &mut self.durability, VIDEOS_KEY, &self.videos);
    }

    fn persist_interactions(&mut self) {
        storage::write_through(
            self.storage.as_ref(),
            &mut self.durability,
            INTERACTIONS_KEY,
            &self.interactions,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed::seed_videos;
    use crate::model::storage::MemoryStorage;
    use crate::model::storage::testing::{BrokenStorage, FailingKeyStorage, ReadOnlyStorage};

    fn fresh() -> (EngagementStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = EngagementStore::init(Arc::new(storage.clone()), &seed_videos());
        (store, storage)
    }

    fn stats(store: &EngagementStore, id: &str) -> (u64, u64) {
        let v = store.video(id).unwrap();
        (v.stats.likes, v.stats.dislikes)
    }

    #[test]
    fn like_twice_returns_to_baseline() {
        let (mut store, _) = fresh();
        assert_eq!(store.toggle_like("v1"), Some(ToggleOutcome::Added));
        assert_eq!(stats(&store, "v1"), (25_001, 100));
        assert!(store.is_liked("v1"));

        assert_eq!(store.toggle_like("v1"), Some(ToggleOutcome::Removed));
        assert_eq!(stats(&store, "v1"), (25_000, 100));
        assert!(!store.is_liked("v1"));
    }

    #[test]
    fn like_then_dislike_flips_reaction() {
        let (mut store, _) = fresh();
        store.toggle_like("v1");
        store.toggle_dislike("v1");

        assert!(!store.is_liked("v1"));
        assert!(store.is_disliked("v1"));
        assert_eq!(stats(&store, "v1"), (25_000, 101));
    }

    #[test]
    fn reactions_stay_mutually_exclusive() {
        let (mut store, _) = fresh();
        let script = [true, true, false, true, false, false, true, false, true, true, false];
        let (mut likes, mut dislikes) = stats(&store, "v3");

        for like in script {
            let before_liked = store.is_liked("v3");
            let before_disliked = store.is_disliked("v3");
            if like {
                store.toggle_like("v3");
                if before_liked {
                    likes -= 1;
                } else {
                    likes += 1;
                    if before_disliked {
                        dislikes -= 1;
                    }
                }
            } else {
                store.toggle_dislike("v3");
                if before_disliked {
                    dislikes -= 1;
                } else {
                    dislikes += 1;
                    if before_liked {
                        likes -= 1;
                    }
                }
            }
            assert!(!(store.is_liked("v3") && store.is_disliked("v3")));
            assert_eq!(stats(&store, "v3"), (likes, dislikes));
        }
    }

    #[test]
    fn unknown_video_is_a_silent_no_op() {
        let (mut store, _) = fresh();
        let before = store.videos().to_vec();
        assert_eq!(store.toggle_like("nope"), None);
        assert_eq!(store.toggle_dislike("nope"), None);
        assert_eq!(store.increment_views("nope"), None);
        assert_eq!(store.adjust_comment_count("nope", 1), None);
        assert_eq!(store.videos(), before.as_slice());
        assert!(store.interactions().liked.is_empty());
    }

    #[test]
    fn subscribe_flips_membership_without_counters() {
        let (mut store, _) = fresh();
        let before = store.videos().to_vec();
        assert!(store.toggle_subscribe("creator1"));
        assert!(store.is_subscribed("creator1"));
        assert!(!store.toggle_subscribe("creator1"));
        assert!(!store.is_subscribed("creator1"));
        assert_eq!(store.videos(), before.as_slice());
    }

    #[test]
    fn views_increment_by_one_each_call() {
        let (mut store, _) = fresh();
        assert_eq!(store.increment_views("v1"), Some(1_250_001));
        assert_eq!(store.increment_views("v1"), Some(1_250_002));
    }

    #[test]
    fn comment_count_is_floored_at_zero() {
        let (mut store, _) = fresh();
        assert_eq!(store.adjust_comment_count("v1", -3), Some(1));
        assert_eq!(store.adjust_comment_count("v1", -3), Some(0));
        assert_eq!(store.adjust_comment_count("v1", 2), Some(2));
    }

    #[test]
    fn snapshot_survives_restart() {
        let (mut store, storage) = fresh();
        store.toggle_like("v1");
        store.toggle_dislike("v2");
        store.toggle_subscribe("creator3");
        store.increment_views("v4");
        store.adjust_comment_count("v5", -1);

        let reloaded = EngagementStore::init(Arc::new(storage), &[]);
        assert_eq!(reloaded.videos(), store.videos());
        assert_eq!(reloaded.interactions(), store.interactions());
        assert_eq!(reloaded.durability(), Durability::Persistent);
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_seed_in_memory() {
        let storage = MemoryStorage::new();
        storage.write(VIDEOS_KEY, "][").unwrap();

        let mut store = EngagementStore::init(Arc::new(storage.clone()), &seed_videos());
        assert_eq!(store.durability(), Durability::MemoryOnly);
        assert_eq!(store.videos(), seed_videos().as_slice());

        store.toggle_like("v1");
        assert_eq!(stats(&store, "v1"), (25_001, 100));
        assert_eq!(storage.read(VIDEOS_KEY).unwrap().as_deref(), Some("]["));
    }

    #[test]
    fn unavailable_storage_keeps_working_in_memory() {
        let mut store = EngagementStore::init(Arc::new(BrokenStorage), &seed_videos());
        assert_eq!(store.durability(), Durability::MemoryOnly);
        assert_eq!(store.toggle_like("v1"), Some(ToggleOutcome::Added));
        assert!(store.is_liked("v1"));
    }

    #[test]
    fn write_failure_demotes_to_memory_only() {
        let mut store = EngagementStore::init(Arc::new(ReadOnlyStorage::default()), &seed_videos());
        assert_eq!(store.durability(), Durability::MemoryOnly);
        assert_eq!(store.increment_views("v1"), Some(1_250_001));
    }

    #[test]
    fn failed_set_write_leaves_stored_counters_alone() {
        let failing = FailingKeyStorage::new(INTERACTIONS_KEY);
        let seeded = failing.inner.clone();
        storage::save_json(&seeded, INTERACTIONS_KEY, &InteractionSets::default()).unwrap();
        let mut store = EngagementStore::init(Arc::new(failing), &seed_videos());
        assert_eq!(store.durability(), Durability::Persistent);

        store.toggle_like("v1");
        assert_eq!(store.durability(), Durability::MemoryOnly);
        assert_eq!(stats(&store, "v1"), (25_001, 100));

        let reloaded = EngagementStore::init(Arc::new(seeded), &[]);
        assert_eq!(stats(&reloaded, "v1"), (25_000, 100));
        assert!(!reloaded.is_liked("v1"));
    }
}
