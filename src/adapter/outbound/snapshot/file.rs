//! JSON file snapshot store.
//!
//! Saves write the whole document to a sibling temp file and rename it over
//! the target, so a crash mid-write leaves the previous snapshot intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::port::{Snapshot, SnapshotStore};

/// Stores the snapshot as a single indented JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<Snapshot, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.display(), "No snapshot file, starting empty");
                return Ok(Snapshot::default());
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.display(),
                    source,
                })
            }
        };
        Snapshot::decode(&text)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let text = snapshot.encode()?;
        let write_err = |source| PersistenceError::Write {
            path: self.display(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, text).map_err(write_err)?;
        fs::rename(&temp, &self.path).map_err(write_err)?;

        debug!(path = %self.display(), alerts = snapshot.alert_count(), "Snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AlertId, ChatId, Exchange};
    use crate::testkit::domain::alert;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("active_alerts.json"));
        assert_eq!(store.load().unwrap(), Snapshot::default());
    }

    #[test]
    fn save_then_load_restores_alerts() {
        let dir = tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("nested/active_alerts.json"));

        let mut snapshot = Snapshot::default();
        snapshot.chats.insert(
            ChatId::new(12345),
            BTreeMap::from([(
                AlertId::new(7),
                alert("BTC", Exchange::Bybit, dec!(90000), dec!(95000)),
            )]),
        );
        store.save(&snapshot).unwrap();

        assert_eq!(store.load().unwrap(), snapshot);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn garbage_file_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("active_alerts.json");
        fs::write(&path, "not json").unwrap();
        let err = JsonFileSnapshotStore::new(path).load().unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed(_)));
    }
}
