//! Environment configuration (`WETUBE_*` variables, optionally from `.env`)

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::Viewer;

const ENV_PREFIX: &str = "WETUBE_";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Dwell time before a view is counted
    #[serde(default = "default_view_delay_ms")]
    pub view_delay_ms: u64,
    #[serde(default = "default_viewer_name")]
    pub viewer_name: String,
    #[serde(default = "default_viewer_avatar")]
    pub viewer_avatar: String,
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
    /// Video shown at startup; the first recommended video otherwise
    #[serde(default)]
    pub start_video: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".cache")
}

fn default_view_delay_ms() -> u64 {
    5_000
}

fn default_viewer_name() -> String {
    "You".to_string()
}

fn default_viewer_avatar() -> String {
    "https://i.pravatar.cc/150?u=wetube-viewer".to_string()
}

fn default_autoplay() -> bool {
    true
}

impl Config {
    pub fn from_env() -> Result<Config> {
        envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .context("invalid WETUBE_* configuration")
    }

    pub fn view_delay(&self) -> Duration {
        Duration::from_millis(self.view_delay_ms)
    }

    pub fn viewer(&self) -> Viewer {
        Viewer {
            name: self.viewer_name.clone(),
            avatar: self.viewer_avatar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".cache"));
        assert_eq!(config.view_delay(), Duration::from_secs(5));
        assert_eq!(config.viewer().name, "You");
        assert!(config.autoplay);
        assert!(config.start_video.is_none());
    }

    #[test]
    fn prefixed_variables_override_defaults() {
        let config = from_pairs(&[
            ("WETUBE_DATA_DIR", "/tmp/wetube"),
            ("WETUBE_VIEW_DELAY_MS", "250"),
            ("WETUBE_VIEWER_NAME", "Ada"),
            ("WETUBE_AUTOPLAY", "false"),
            ("WETUBE_START_VIDEO", "v3"),
            ("VIEWER_NAME", "ignored"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/wetube"));
        assert_eq!(config.view_delay_ms, 250);
        assert_eq!(config.viewer_name, "Ada");
        assert!(!config.autoplay);
        assert_eq!(config.start_video.as_deref(), Some("v3"));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(from_pairs(&[("WETUBE_VIEW_DELAY_MS", "soon")]).is_err());
    }
}
