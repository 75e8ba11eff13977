// SPDX-License-Identifier: GPL-3.0-only

//! Photo persistence
//!
//! Photos live as one JSON array under a single key of a key/value namespace,
//! most recent first:
//!
//! ```text
//! phonePhotos = [ { "id": "1736172300123", "image": "data:image/jpeg;base64,...",
//!                   "createdAt": "2025-01-06T14:05:00.123Z" }, ... ]
//! ```
//!
//! [`PhotoStore`] is the only owner of the records. Reads go to the namespace
//! every time; the in-memory copy is only served when the namespace has failed,
//! so a full disk or a read-only directory degrades to a session-local list
//! instead of losing photos mid-session.
//!
//! A stored list that cannot be read is never written over. The store keeps
//! new photos in memory for the rest of the session and leaves the stored
//! value as it found it.

use crate::constants::storage as consts;
use crate::errors::StorageError;
use crate::pipelines::photo::ImageArtifact;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A string key/value namespace
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Namespace kept in memory only
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Namespace stored as one `<key>.json` file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Use `<data_dir>/phone-display/storage`
    pub fn open_default() -> Result<Self, StorageError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| StorageError::Unavailable("no data directory".to_string()))?;
        Ok(Self::with_root(
            data_dir.join(consts::APP_DIR).join(consts::NAMESPACE_DIR),
        ))
    }

    /// Use a custom root directory (tests, CLI overrides)
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        // Write-then-rename so a crash never leaves a half-written list
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// A persisted photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Millisecond timestamp of creation, bumped to stay unique
    pub id: String,
    /// Encoded image as a data URI
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl PhotoRecord {
    /// Decode the inline image
    pub fn artifact(&self) -> Result<ImageArtifact, StorageError> {
        ImageArtifact::from_data_uri(&self.image)
    }

    fn numeric_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }
}

/// How a mutation reached the namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Written to the namespace
    Persisted,
    /// Kept for this session only
    MemoryOnly(StorageError),
}

impl WriteOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, WriteOutcome::Persisted)
    }
}

/// Ordered photo list over a key/value namespace
pub struct PhotoStore<S: KeyValueStore> {
    backend: S,
    /// Last list known to be correct; served while the namespace is failing
    memory: Vec<PhotoRecord>,
    degraded: bool,
    /// Set once the stored list failed to read; writes stay in memory from then on
    unreadable: Option<StorageError>,
    last_issued_id: u64,
}

impl<S: KeyValueStore> PhotoStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            memory: Vec::new(),
            degraded: false,
            unreadable: None,
            last_issued_id: 0,
        }
    }

    /// Whether reads are served from memory, after a failed write or an
    /// unreadable stored list
    pub fn is_degraded(&self) -> bool {
        self.degraded || self.unreadable.is_some()
    }

    /// Why the stored list could not be read, if it could not
    pub fn read_error(&self) -> Option<&StorageError> {
        self.unreadable.as_ref()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// All photos, most recent first
    pub fn list(&mut self) -> Vec<PhotoRecord> {
        if self.is_degraded() {
            return self.memory.clone();
        }

        match self.read() {
            Ok(records) => {
                self.memory = records;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read photos, leaving them untouched for this session");
                self.unreadable = Some(e);
            }
        }
        self.memory.clone()
    }

    /// Look up one photo by id
    pub fn get(&mut self, id: &str) -> Option<PhotoRecord> {
        self.list().into_iter().find(|photo| photo.id == id)
    }

    pub fn len(&mut self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Insert a new photo at the head of the list
    pub fn insert(
        &mut self,
        image: String,
        created_at: DateTime<Utc>,
    ) -> (PhotoRecord, WriteOutcome) {
        let mut records = self.list();

        let head_id = records.first().and_then(PhotoRecord::numeric_id).unwrap_or(0);
        let stamp = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
        let id = stamp
            .max(head_id.saturating_add(1))
            .max(self.last_issued_id.saturating_add(1));
        self.last_issued_id = id;

        let record = PhotoRecord {
            id: id.to_string(),
            image,
            created_at,
        };
        records.insert(0, record.clone());

        let outcome = self.write(records);
        info!(id = %record.id, persisted = outcome.is_persisted(), "Photo stored");
        (record, outcome)
    }

    /// Remove a photo. Returns `None` when no photo has that id.
    pub fn delete(&mut self, id: &str) -> Option<WriteOutcome> {
        let mut records = self.list();
        let before = records.len();
        records.retain(|photo| photo.id != id);
        if records.len() == before {
            debug!(id, "Delete of unknown photo ignored");
            return None;
        }

        let outcome = self.write(records);
        info!(id, persisted = outcome.is_persisted(), "Photo deleted");
        Some(outcome)
    }

    fn read(&self) -> Result<Vec<PhotoRecord>, StorageError> {
        match self.backend.get(consts::PHOTOS_KEY)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Vec::new()),
        }
    }

    fn write(&mut self, records: Vec<PhotoRecord>) -> WriteOutcome {
        if let Some(e) = &self.unreadable {
            self.memory = records;
            return WriteOutcome::MemoryOnly(e.clone());
        }

        let result = serde_json::to_string(&records)
            .map_err(StorageError::from)
            .and_then(|json| self.backend.set(consts::PHOTOS_KEY, &json));
        self.memory = records;

        match result {
            Ok(()) => {
                self.degraded = false;
                WriteOutcome::Persisted
            }
            Err(e) => {
                warn!(error = %e, "Failed to persist photos, keeping them for this session");
                self.degraded = true;
                WriteOutcome::MemoryOnly(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Namespace whose writes can be switched off
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryKeyValueStore,
        fail_writes: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::Unavailable("quota exceeded".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_insert_at_head() {
        let mut store = PhotoStore::new(MemoryKeyValueStore::new());
        store.insert("data:a".into(), at(1_000));
        store.insert("data:b".into(), at(2_000));

        let ids: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["2000", "1000"]);
    }

    #[test]
    fn test_same_millisecond_ids_are_unique() {
        let mut store = PhotoStore::new(MemoryKeyValueStore::new());
        let (a, _) = store.insert("data:a".into(), at(5_000));
        let (b, _) = store.insert("data:b".into(), at(5_000));
        let (c, _) = store.insert("data:c".into(), at(4_000));

        assert_eq!(a.id, "5000");
        assert_eq!(b.id, "5001");
        assert_eq!(c.id, "5002");
    }

    #[test]
    fn test_persisted_shape() {
        let mut store = PhotoStore::new(MemoryKeyValueStore::new());
        store.insert("data:image/jpeg;base64,AAAA".into(), at(1_736_172_300_123));

        let raw = store.backend().get(consts::PHOTOS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let photo = &value[0];
        assert_eq!(photo["id"], "1736172300123");
        assert_eq!(photo["image"], "data:image/jpeg;base64,AAAA");
        assert!(photo["createdAt"].as_str().unwrap().starts_with("2025-01-06T14:05:00.123"));
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut store = PhotoStore::new(MemoryKeyValueStore::new());
        store.insert("data:a".into(), at(1_000));
        assert_eq!(store.delete("nope"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_write_failure_keeps_session_copy() {
        let mut store = PhotoStore::new(FlakyStore::default());
        store.insert("data:a".into(), at(1_000));

        store.backend_mut().fail_writes = true;
        let (_, outcome) = store.insert("data:b".into(), at(2_000));
        assert!(matches!(outcome, WriteOutcome::MemoryOnly(_)));
        assert!(store.is_degraded());
        assert_eq!(store.len(), 2);

        store.backend_mut().fail_writes = false;
        assert_eq!(store.delete("1000"), Some(WriteOutcome::Persisted));
        assert!(!store.is_degraded());

        let raw = store.backend().get(consts::PHOTOS_KEY).unwrap().unwrap();
        let persisted: Vec<PhotoRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, "2000");
    }

    #[test]
    fn test_unreadable_list_is_never_overwritten() {
        let stored = r#"[{"id":"2","image":"data:b","createdAt":"yesterday"},{"id":"1","image":"data:a","createdAt":"2025-01-06T14:05:00Z"}]"#;
        let mut backend = MemoryKeyValueStore::new();
        backend.set(consts::PHOTOS_KEY, stored).unwrap();
        let mut store = PhotoStore::new(backend);

        assert!(store.list().is_empty());
        assert!(store.is_degraded());
        assert!(matches!(store.read_error(), Some(StorageError::Corrupt(_))));

        let (record, outcome) = store.insert("data:c".into(), at(3_000));
        assert!(matches!(outcome, WriteOutcome::MemoryOnly(StorageError::Corrupt(_))));
        assert_eq!(store.list(), vec![record.clone()]);
        assert_eq!(store.delete(&record.id).map(|o| o.is_persisted()), Some(false));

        let raw = store.backend().get(consts::PHOTOS_KEY).unwrap().unwrap();
        assert_eq!(raw, stored, "stored list must be left as found");
    }

    #[test]
    fn test_ids_saturate_at_max() {
        let stored = format!(
            r#"[{{"id":"{}","image":"data:a","createdAt":"2025-01-06T14:05:00Z"}}]"#,
            u64::MAX
        );
        let mut backend = MemoryKeyValueStore::new();
        backend.set(consts::PHOTOS_KEY, &stored).unwrap();
        let mut store = PhotoStore::new(backend);

        let (_, outcome) = store.insert("data:b".into(), at(1_000));
        assert!(outcome.is_persisted());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut kv = FileKeyValueStore::with_root(dir.path().join("ns"));
        assert_eq!(kv.get("phonePhotos").unwrap(), None);

        kv.set("phonePhotos", "[]").unwrap();
        assert_eq!(kv.get("phonePhotos").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("ns/phonePhotos.json").exists());

        kv.remove("phonePhotos").unwrap();
        kv.remove("phonePhotos").unwrap();
        assert_eq!(kv.get("phonePhotos").unwrap(), None);
    }
}
