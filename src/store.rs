// src/store.rs

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::AppError;

/// Collection keys. One JSON array file per key inside the data directory.
pub const USERS: &str = "users";
pub const QUIZZES: &str = "quizzes";
pub const RESULTS: &str = "results";

/// File-backed store for the durable collections.
///
/// Every collection is a single JSON array; a save is a full-collection
/// overwrite (write to a temp file, then rename over the old one), so a
/// crash mid-write leaves prior-or-new content, never a partial merge.
/// Two processes pointed at the same directory get last-writer-wins, which
/// is the accepted limit of this storage model.
#[derive(Clone)]
pub struct JsonStore {
    dir: Arc<PathBuf>,
    // Serializes file access within the process.
    guard: Arc<Mutex<()>>,
}

impl JsonStore {
    /// Opens (and creates, if needed) the data directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir: Arc::new(dir),
            guard: Arc::new(Mutex::new(())),
        })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Loads a collection. A missing file yields an empty collection; so
    /// does unparseable content, which is logged and swallowed rather than
    /// surfaced to the caller.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let _guard = self.guard.lock().expect("store lock poisoned");
        self.read_collection(key)
    }

    /// Overwrites the whole collection under `key`.
    pub fn save<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), AppError> {
        let _guard = self.guard.lock().expect("store lock poisoned");
        self.write_collection(key, records)
    }

    /// Runs a read-modify-write against a collection while holding the
    /// guard, so two in-process mutations cannot interleave between the
    /// read and the write. An `Err` from the closure leaves the stored
    /// collection untouched.
    pub fn update<T, R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut Vec<T>) -> Result<R, AppError>,
    ) -> Result<R, AppError>
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.guard.lock().expect("store lock poisoned");

        let mut records = self.read_collection(key);
        let out = f(&mut records)?;
        self.write_collection(key, &records)?;
        Ok(out)
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let path = self.path(key);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read collection '{}': {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "collection '{}' is corrupt, falling back to empty: {}",
                    key,
                    e
                );
                Vec::new()
            }
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(records)?;
        let path = self.path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Record {
        name: String,
        score: u32,
    }

    fn record(name: &str, score: u32) -> Record {
        Record {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        let records = vec![record("alice", 3), record("bob", 1)];
        store.save("results", &records).unwrap();

        let loaded: Vec<Record> = store.load("results");
        assert_eq!(loaded, records);
    }

    #[test]
    fn missing_collection_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        let loaded: Vec<Record> = store.load("users");
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_collection_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        std::fs::write(dir.path().join("users.json"), b"{not json]").unwrap();

        let loaded: Vec<Record> = store.load("users");
        assert!(loaded.is_empty());
    }

    #[test]
    fn update_persists_the_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        store.save("results", &[record("alice", 3)]).unwrap();

        let added = store
            .update("results", |records: &mut Vec<Record>| {
                records.push(record("bob", 1));
                Ok(records.len())
            })
            .unwrap();

        assert_eq!(added, 2);
        let loaded: Vec<Record> = store.load("results");
        assert_eq!(loaded, vec![record("alice", 3), record("bob", 1)]);
    }

    #[test]
    fn failed_update_leaves_collection_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        store.save("users", &[record("alice", 3)]).unwrap();

        let outcome = store.update("users", |records: &mut Vec<Record>| {
            records.clear();
            Err::<(), _>(AppError::Conflict("taken".to_string()))
        });

        assert!(outcome.is_err());
        let loaded: Vec<Record> = store.load("users");
        assert_eq!(loaded, vec![record("alice", 3)]);
    }

    #[test]
    fn save_replaces_prior_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        store.save("users", &[record("alice", 1)]).unwrap();
        store.save("users", &[record("bob", 2)]).unwrap();

        let loaded: Vec<Record> = store.load("users");
        assert_eq!(loaded, vec![record("bob", 2)]);
    }
}
