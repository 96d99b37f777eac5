//! Model module - Application state and data types
//!
//! - `types`: Core type definitions (videos, comments, UI state)
//! - `seed`: Bundled demo dataset
//! - `storage`: Key-value persistence and the write-through helper
//! - `engagement`: Videos, stats and the viewer's reactions
//! - `ledger`: Per-video comment threads
//! - `facade`: The single command/query surface over both stores
//! - `catalog`: Video listing collaborator
//! - `playback`: Scrubbing player and embed surface state
//! - `detail`: Detail screen orchestration and the view timer
//! - `app_model`: Main application model with state management methods

mod types;
mod seed;
mod storage;
mod engagement;
mod ledger;
mod facade;
mod catalog;
mod playback;
mod detail;
mod app_model;

pub use types::{ActiveSection, Comment, MediaSource, UiState, Video, Viewer};

pub use storage::{Durability, FileStorage};

#[cfg(test)]
pub use storage::MemoryStorage;

pub use facade::InteractionFacade;

pub use catalog::{SeedCatalog, VideoCatalog};

pub use playback::{
    MediaCommand, MediaEvent, PlaybackState, ScrubbingView, SeekDirection, SurfaceKind,
    SurfaceView, TapZone,
};

pub use detail::{CommentEntry, DeleteOutcome, DetailSnapshot, DetailView};

pub use app_model::AppModel;
