//! Native file backend
//!
//! All keys live in one JSON object. Writes go to a temp file first and are
//! renamed over the save so a crash mid-write never leaves a torn file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store backed by `path`. Missing or corrupt files start empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Corrupt save {}: {}, starting fresh", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => {
                log::info!("No save at {}, starting fresh", path.display());
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    fn flush(&self) -> bool {
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize save: {}", e);
                return false;
            }
        };

        let tmp = self.path.with_extension("tmp");
        if let Err(e) = fs::write(&tmp, json) {
            log::warn!("Could not write {}: {}", tmp.display(), e);
            return false;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            log::warn!("Could not replace {}: {}", self.path.display(), e);
            return false;
        }
        true
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}
