// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Key-value persistence backends.
//!
//! Preferences and the saved command list live in a flat key-value map.
//! Callers receive the backend as a handle instead of reaching for a global.

pub mod preferences;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use preferences::SerialPreferences;

/// File name of the preferences map inside the data directory.
pub const PREFS_FILE_NAME: &str = "serial_prefs.json";

/// A flat string-keyed store of JSON values.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value, replacing any previous one.
    fn put(&self, key: &str, value: Value) -> Result<()>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Backend kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: Value) -> Result<()> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.write().remove(key);
        Ok(())
    }
}

/// Backend persisted as a single JSON object file.
///
/// The whole map is cached and the file is rewritten on every mutation.
pub struct FileStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
}

impl FileStore {
    /// Open the preferences file inside `data_dir`, creating the directory if needed.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {:?}", data_dir))?;
        Self::open_file(data_dir.join(PREFS_FILE_NAME))
    }

    /// Open a specific preferences file.
    pub fn open_file(path: PathBuf) -> Result<Self> {
        let values = Self::load_from_file(&path)?;
        info!("Opened preferences {:?} ({} keys)", path, values.len());
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    fn load_from_file(path: &Path) -> Result<Map<String, Value>> {
        if !path.exists() {
            debug!("Preferences file doesn't exist, starting empty");
            return Ok(Map::new());
        }

        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        // A damaged preferences file must not keep the app from starting.
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                warn!("Preferences file {:?} is not a JSON object, starting empty", path);
                Ok(Map::new())
            }
            Err(e) => {
                warn!("Failed to parse preferences {:?}: {}, starting empty", path, e);
                Ok(Map::new())
            }
        }
    }

    fn save(&self, values: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {:?}", self.path))?;
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    // The cache only changes once the file write went through.
    fn put(&self, key: &str, value: Value) -> Result<()> {
        let mut guard = self.values.write();
        let mut next = guard.clone();
        next.insert(key.to_string(), value);
        self.save(&next)?;
        *guard = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self.values.write();
        if !guard.contains_key(key) {
            return Ok(());
        }
        let mut next = guard.clone();
        next.remove(key);
        self.save(&next)?;
        *guard = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_put_get_remove() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.get("a"), None);

        store.put("a", json!(true))?;
        assert_eq!(store.get("a"), Some(json!(true)));

        store.remove("a")?;
        store.remove("a")?;
        assert_eq!(store.get("a"), None);
        Ok(())
    }

    #[test]
    fn test_file_store_persists_across_open() -> Result<()> {
        let temp_dir = TempDir::new()?;
        {
            let store = FileStore::open(temp_dir.path())?;
            store.put("last_success_baud", json!(115200))?;
            store.put("common_commands", json!("[]"))?;
        }

        let store = FileStore::open(temp_dir.path())?;
        assert_eq!(store.get("last_success_baud"), Some(json!(115200)));
        assert_eq!(store.get("common_commands"), Some(json!("[]")));
        assert!(store.path().ends_with(PREFS_FILE_NAME));
        Ok(())
    }

    #[test]
    fn test_file_store_corrupt_file_opens_empty() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(temp_dir.path().join(PREFS_FILE_NAME), "{not json")?;

        let store = FileStore::open(temp_dir.path())?;
        assert_eq!(store.get("anything"), None);

        store.put("k", json!("v"))?;
        let reopened = FileStore::open(temp_dir.path())?;
        assert_eq!(reopened.get("k"), Some(json!("v")));
        Ok(())
    }

    #[test]
    fn test_file_store_failed_write_keeps_cache() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory")?;

        let store = FileStore::open_file(blocker.join(PREFS_FILE_NAME))?;
        assert!(store.put("k", json!("v")).is_err());
        assert_eq!(store.get("k"), None);
        Ok(())
    }

    #[test]
    fn test_file_store_failed_remove_keeps_cache() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let data_dir = temp_dir.path().join("data");
        let store = FileStore::open(&data_dir)?;
        store.put("k", json!("v"))?;

        // Replace the data directory with a file so the rewrite fails.
        std::fs::remove_dir_all(&data_dir)?;
        std::fs::write(&data_dir, "not a directory")?;

        assert!(store.remove("k").is_err());
        assert_eq!(store.get("k"), Some(json!("v")));
        Ok(())
    }

    #[test]
    fn test_file_store_non_object_opens_empty() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::write(temp_dir.path().join(PREFS_FILE_NAME), "[1, 2]")?;

        let store = FileStore::open(temp_dir.path())?;
        assert_eq!(store.get("0"), None);
        Ok(())
    }
}
