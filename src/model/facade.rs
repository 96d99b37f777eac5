//! The command/query surface views talk to
//!
//! Every command runs to completion on `&mut self`, so no caller can observe a
//! half-applied change such as a like added before the dislike it replaces is
//! removed. Cross-store bookkeeping (comment counters) happens here and only
//! here.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use super::engagement::EngagementStore;
use super::ledger::CommentLedger;
use super::seed::{seed_comments, seed_videos};
use super::storage::{Durability, Storage};
use super::types::{Comment, ToggleOutcome, Video, Viewer};

/// Handle shared between the render loop and timer tasks
pub type SharedFacade = Arc<Mutex<InteractionFacade>>;

pub struct InteractionFacade {
    engagement: EngagementStore,
    ledger: CommentLedger,
    viewer: Viewer,
    revision: watch::Sender<u64>,
}

impl InteractionFacade {
    pub fn new(engagement: EngagementStore, ledger: CommentLedger, viewer: Viewer) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            engagement,
            ledger,
            viewer,
            revision,
        }
    }

    /// Load-or-seed both stores from `storage` using the built-in seed data.
    pub fn init(storage: Arc<dyn Storage>, viewer: Viewer) -> Self {
        Self::init_with_seed(storage, viewer, &seed_videos(), &seed_comments())
    }

    pub fn init_with_seed(
        storage: Arc<dyn Storage>,
        viewer: Viewer,
        videos: &[Video],
        comments: &[Comment],
    ) -> Self {
        let engagement = EngagementStore::init(storage.clone(), videos);
        let video_ids: Vec<String> = engagement.videos().iter().map(|v| v.id.clone()).collect();
        let ledger = CommentLedger::init(storage, video_ids.iter().map(String::as_str), comments);
        tracing::info!(
            videos = video_ids.len(),
            engagement = ?engagement.durability(),
            comments = ?ledger.durability(),
            "Interaction stores ready"
        );
        Self::new(engagement, ledger, viewer)
    }

    pub fn into_shared(self) -> SharedFacade {
        Arc::new(Mutex::new(self))
    }

    /// Receives the revision number after every state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    #[cfg(test)]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    pub fn durability(&self) -> Durability {
        match (self.engagement.durability(), self.ledger.durability()) {
            (Durability::Persistent, Durability::Persistent) => Durability::Persistent,
            _ => Durability::MemoryOnly,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn get_video(&self, id: &str) -> Option<&Video> {
        self.engagement.video(id)
    }

    pub fn videos(&self) -> &[Video] {
        self.engagement.videos()
    }

    pub fn get_comments(&self, video_id: &str) -> &[Comment] {
        self.ledger.comments(video_id)
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.engagement.is_liked(id)
    }

    pub fn is_disliked(&self, id: &str) -> bool {
        self.engagement.is_disliked(id)
    }

    pub fn is_subscribed(&self, creator_id: &str) -> bool {
        self.engagement.is_subscribed(creator_id)
    }

    /// Authorship check used by views before offering deletion.
    pub fn is_own_comment(&self, comment: &Comment) -> bool {
        comment.author == self.viewer
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn toggle_like(&mut self, id: &str) -> Option<ToggleOutcome> {
        let outcome = self.engagement.toggle_like(id);
        if outcome.is_some() {
            self.notify();
        }
        outcome
    }

    pub fn toggle_dislike(&mut self, id: &str) -> Option<ToggleOutcome> {
        let outcome = self.engagement.toggle_dislike(id);
        if outcome.is_some() {
            self.notify();
        }
        outcome
    }

    pub fn toggle_subscribe(&mut self, creator_id: &str) -> bool {
        let subscribed = self.engagement.toggle_subscribe(creator_id);
        self.notify();
        subscribed
    }

    /// Prepends the comment and bumps the video's comment count.
    ///
    /// Blank text and unknown videos are ignored.
    pub fn add_comment(&mut self, video_id: &str, text: &str) -> Option<Comment> {
        self.engagement.video(video_id)?;
        let comment = self.ledger.add(video_id, text, &self.viewer)?;
        self.engagement.adjust_comment_count(video_id, 1);
        self.notify();
        Some(comment)
    }

    /// Authorization is the caller's job (see [`Self::is_own_comment`]).
    pub fn delete_comment(&mut self, video_id: &str, comment_id: &str) -> bool {
        if self.ledger.delete(video_id, comment_id).is_none() {
            return false;
        }
        self.engagement.adjust_comment_count(video_id, -1);
        self.notify();
        true
    }

    pub fn increment_views(&mut self, id: &str) -> Option<u64> {
        let views = self.engagement.increment_views(id)?;
        tracing::info!(video_id = id, views, "View counted");
        self.notify();
        Some(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::storage::MemoryStorage;

    fn viewer() -> Viewer {
        Viewer {
            name: "You".to_string(),
            avatar: "me.png".to_string(),
        }
    }

    fn facade_on(storage: &MemoryStorage) -> InteractionFacade {
        InteractionFacade::init(Arc::new(storage.clone()), viewer())
    }

    fn comment_count(facade: &InteractionFacade, id: &str) -> u64 {
        facade.get_video(id).unwrap().stats.comments
    }

    #[test]
    fn comment_round_trip_keeps_counter_in_step() {
        let mut facade = facade_on(&MemoryStorage::new());
        let baseline = comment_count(&facade, "v1");

        let added = facade.add_comment("v1", "Great clip!").unwrap();
        assert_eq!(facade.get_comments("v1")[0].text, "Great clip!");
        assert_eq!(comment_count(&facade, "v1"), baseline + 1);

        assert!(facade.delete_comment("v1", &added.id));
        assert_eq!(comment_count(&facade, "v1"), baseline);
        assert!(!facade.delete_comment("v1", &added.id));
        assert_eq!(comment_count(&facade, "v1"), baseline);
    }

    #[test]
    fn deleting_every_comment_floors_count_at_zero() {
        let mut facade = facade_on(&MemoryStorage::new());
        facade.engagement.adjust_comment_count("v2", -2);
        let ids: Vec<String> = facade.get_comments("v2").iter().map(|c| c.id.clone()).collect();
        for id in &ids {
            assert!(facade.delete_comment("v2", id));
        }
        assert!(facade.get_comments("v2").is_empty());
        assert_eq!(comment_count(&facade, "v2"), 0);
    }

    #[test]
    fn whitespace_comment_changes_nothing() {
        let mut facade = facade_on(&MemoryStorage::new());
        let thread = facade.get_comments("v1").to_vec();
        let count = comment_count(&facade, "v1");
        let revision = facade.revision();

        assert!(facade.add_comment("v1", "   ").is_none());
        assert_eq!(facade.get_comments("v1"), thread.as_slice());
        assert_eq!(comment_count(&facade, "v1"), count);
        assert_eq!(facade.revision(), revision);
    }

    #[test]
    fn comment_on_unknown_video_is_ignored() {
        let mut facade = facade_on(&MemoryStorage::new());
        assert!(facade.add_comment("ghost", "hello").is_none());
        assert!(facade.get_comments("ghost").is_empty());
    }

    #[test]
    fn deleting_from_one_thread_leaves_others_alone() {
        let mut facade = facade_on(&MemoryStorage::new());
        let v2_before = facade.get_comments("v2").to_vec();
        assert!(facade.delete_comment("v1", "c1"));
        assert_eq!(facade.get_comments("v2"), v2_before.as_slice());
    }

    #[test]
    fn own_comments_are_recognized() {
        let mut facade = facade_on(&MemoryStorage::new());
        let mine = facade.add_comment("v1", "mine").unwrap();
        assert!(facade.is_own_comment(&mine));
        let theirs = facade.get_comments("v1")[1].clone();
        assert!(!facade.is_own_comment(&theirs));
    }

    #[test]
    fn subscribers_see_each_change() {
        let mut facade = facade_on(&MemoryStorage::new());
        let rx = facade.subscribe();
        facade.toggle_like("v1");
        facade.toggle_subscribe("creator1");
        facade.increment_views("v1");
        assert_eq!(*rx.borrow(), 3);

        facade.toggle_like("missing");
        assert_eq!(*rx.borrow(), 3);
    }

    #[test]
    fn full_session_reloads_identically() {
        let storage = MemoryStorage::new();
        let mut facade = facade_on(&storage);
        facade.toggle_like("v1");
        facade.toggle_dislike("v1");
        facade.toggle_like("v3");
        facade.toggle_subscribe("creator2");
        facade.increment_views("v2");
        let added = facade.add_comment("v4", "nice").unwrap();
        facade.delete_comment("v5", "c2");

        let reloaded = facade_on(&storage);
        assert_eq!(reloaded.videos(), facade.videos());
        for video in facade.videos() {
            assert_eq!(reloaded.get_comments(&video.id), facade.get_comments(&video.id));
            assert_eq!(reloaded.is_liked(&video.id), facade.is_liked(&video.id));
            assert_eq!(reloaded.is_disliked(&video.id), facade.is_disliked(&video.id));
        }
        assert!(reloaded.is_subscribed("creator2"));
        assert_eq!(reloaded.get_comments("v4")[0].id, added.id);
        assert_eq!(reloaded.durability(), Durability::Persistent);
    }
}
