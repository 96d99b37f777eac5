//! Durable key/value storage for store snapshots
//!
//! Every store writes its full snapshot under its own key on each mutation.
//! Values are JSON documents; the storage itself only moves strings.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const VIDEOS_KEY: &str = "wetube_videos";
pub const INTERACTIONS_KEY: &str = "wetube_interactions";
pub const COMMENTS_KEY: &str = "wetube_comments";

pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Whether a store still writes through to its storage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Durability {
    Persistent,
    /// Storage failed at some point this session; state lives in memory only
    MemoryOnly,
}

/// One JSON file per key inside a directory
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(content))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("creating {}", self.dir.display()))?;
        }
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// Process-local storage; clones share the same map
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| anyhow!("memory storage poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| anyhow!("memory storage poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read and decode a record. `Ok(None)` means the key was never written.
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    match storage.read(key)? {
        Some(content) => {
            let value = serde_json::from_str(&content)
                .with_context(|| format!("decoding stored record {}", key))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) -> Result<()> {
    let content = serde_json::to_string(value)?;
    storage.write(key, &content)
}

/// Write-through helper shared by the stores.
///
/// Does nothing once `durability` is `MemoryOnly`; a failed write demotes it.
pub fn write_through<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    durability: &mut Durability,
    key: &str,
    value: &T,
) {
    if *durability == Durability::MemoryOnly {
        return;
    }
    let result = save_json(storage, key, value);
    crate::log_persist_result!(key, result);
    if result.is_err() {
        *durability = Durability::MemoryOnly;
    }
}


#[cfg(test)]
mod tests {
    use super::testing::BrokenStorage;
    use super::*;

    #[test]
    fn file_storage_creates_directory_on_first_write() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("nested"));

        assert_eq!(storage.read(VIDEOS_KEY).unwrap(), None);
        storage.write(VIDEOS_KEY, "[1,2,3]").unwrap();
        assert_eq!(storage.read(VIDEOS_KEY).unwrap().as_deref(), Some("[1,2,3]"));
        assert!(storage.dir().join("wetube_videos.json").exists());
    }

    #[test]
    fn corrupt_record_is_an_error_not_a_miss() {
        let storage = MemoryStorage::new();
        storage.write(COMMENTS_KEY, "{not json").unwrap();
        let loaded: Result<Option<Vec<u32>>> = load_json(&storage, COMMENTS_KEY);
        assert!(loaded.is_err());
    }

    #[test]
    fn memory_storage_clones_share_entries() {
        let a = MemoryStorage::new();
        let b = a.clone();
        save_json(&a, INTERACTIONS_KEY, &vec!["v1"]).unwrap();
        let loaded: Option<Vec<String>> = load_json(&b, INTERACTIONS_KEY).unwrap();
        assert_eq!(loaded, Some(vec!["v1".to_string()]));
    }

    #[test]
    fn failed_write_demotes_to_memory_only() {
        let mut durability = Durability::Persistent;
        write_through(&BrokenStorage, &mut durability, VIDEOS_KEY, &vec![1]);
        assert_eq!(durability, Durability::MemoryOnly);

        let storage = MemoryStorage::new();
        write_through(&storage, &mut durability, VIDEOS_KEY, &vec![1]);
        assert_eq!(storage.read(VIDEOS_KEY).unwrap(), None);
    }
}
