//! Snapshot file location.

use std::path::PathBuf;

use serde::Deserialize;

fn default_path() -> PathBuf {
    PathBuf::from("active_alerts.json")
}

/// `[snapshot]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
