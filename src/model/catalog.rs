//! Backend data-access collaborator
//!
//! Surrounding screens fetch videos through this interface; the interaction
//! stores never call it.

use std::future::Future;

use anyhow::Result;

use super::seed::seed_videos;
use super::types::{ModerationStatus, Video};

pub trait VideoCatalog {
    fn fetch_videos(&self) -> impl Future<Output = Result<Vec<Video>>> + Send;
    fn fetch_shorts(&self) -> impl Future<Output = Result<Vec<Video>>> + Send;
}

/// Serves the bundled seed dataset
#[derive(Clone, Debug)]
pub struct SeedCatalog {
    videos: Vec<Video>,
}

impl SeedCatalog {
    pub fn new() -> Self {
        Self { videos: seed_videos() }
    }

    fn approved(&self, shorts: bool) -> Vec<Video> {
        self.videos
            .iter()
            .filter(|v| v.status == ModerationStatus::Approved && v.is_short == shorts)
            .cloned()
            .collect()
    }
}

impl Default for SeedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoCatalog for SeedCatalog {
    async fn fetch_videos(&self) -> Result<Vec<Video>> {
        Ok(self.approved(false))
    }

    async fn fetch_shorts(&self) -> Result<Vec<Video>> {
        Ok(self.approved(true))
    }
}
