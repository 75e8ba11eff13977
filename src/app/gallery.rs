// SPDX-License-Identifier: GPL-3.0-only

//! Photos gallery
//!
//! Grid of stored photos, most recent first, with one optional selection shown
//! full size. Everything reads through [`PhotoStore`], so a photo captured in
//! the camera shows up here without any refresh step.

use crate::constants::storage as consts;
use crate::errors::StorageError;
use crate::pipelines::photo::EncodingFormat;
use crate::storage::{KeyValueStore, PhotoRecord, PhotoStore, WriteOutcome};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Encoded photo ready to be written out
#[derive(Debug, Clone)]
pub struct ExportedPhoto {
    /// `photo-<id>.<ext>`
    pub filename: String,
    pub format: EncodingFormat,
    pub data: Vec<u8>,
}

impl ExportedPhoto {
    /// Write into `dir`, creating it if needed
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, StorageError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.data)?;
        info!(path = %path.display(), "Photo exported");
        Ok(path)
    }
}

/// Gallery selection state
#[derive(Debug, Clone, Default)]
pub struct GalleryController {
    selected: Option<String>,
}

impl GalleryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Photos in display order
    pub fn list<S: KeyValueStore>(&self, store: &mut PhotoStore<S>) -> Vec<PhotoRecord> {
        store.list()
    }

    /// Id of the photo shown full size
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected photo, if it still exists
    pub fn selected<S: KeyValueStore>(&self, store: &mut PhotoStore<S>) -> Option<PhotoRecord> {
        self.selected.as_deref().and_then(|id| store.get(id))
    }

    /// Show one photo full size. Unknown ids leave the selection unchanged.
    pub fn select<S: KeyValueStore>(&mut self, store: &mut PhotoStore<S>, id: &str) -> bool {
        if store.get(id).is_none() {
            debug!(id, "Select of unknown photo ignored");
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move the selection one photo older (or select the newest)
    pub fn select_next<S: KeyValueStore>(&mut self, store: &mut PhotoStore<S>) {
        self.step(store, 1);
    }

    /// Move the selection one photo newer (or select the oldest)
    pub fn select_previous<S: KeyValueStore>(&mut self, store: &mut PhotoStore<S>) {
        self.step(store, -1);
    }

    fn step<S: KeyValueStore>(&mut self, store: &mut PhotoStore<S>, delta: isize) {
        let photos = store.list();
        if photos.is_empty() {
            self.selected = None;
            return;
        }
        let last = photos.len() as isize - 1;
        let current = self
            .selected
            .as_deref()
            .and_then(|id| photos.iter().position(|p| p.id == id));
        let index = match current {
            Some(i) => (i as isize + delta).clamp(0, last),
            None if delta > 0 => 0,
            None => last,
        };
        self.selected = Some(photos[index as usize].id.clone());
    }

    /// Delete a photo, clearing the selection if it pointed at it
    pub fn delete<S: KeyValueStore>(
        &mut self,
        store: &mut PhotoStore<S>,
        id: &str,
    ) -> Option<WriteOutcome> {
        let outcome = store.delete(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(outcome)
    }

    /// Decode a photo for saving outside the store
    pub fn export<S: KeyValueStore>(
        &self,
        store: &mut PhotoStore<S>,
        id: &str,
    ) -> Result<ExportedPhoto, StorageError> {
        let record = store
            .get(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        let artifact = record.artifact()?;
        Ok(ExportedPhoto {
            filename: format!(
                "{}{}.{}",
                consts::EXPORT_PREFIX,
                record.id,
                artifact.format.extension()
            ),
            format: artifact.format,
            data: artifact.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::photo::ImageArtifact;
    use crate::storage::MemoryKeyValueStore;
    use chrono::{TimeZone, Utc};

    fn store_with(ids: &[i64]) -> PhotoStore<MemoryKeyValueStore> {
        let mut store = PhotoStore::new(MemoryKeyValueStore::new());
        let image = ImageArtifact {
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
            format: EncodingFormat::Jpeg,
        }
        .to_data_uri();
        for ms in ids {
            store.insert(image.clone(), Utc.timestamp_millis_opt(*ms).unwrap());
        }
        store
    }

    #[test]
    fn test_select_unknown_keeps_selection() {
        let mut store = store_with(&[1_000]);
        let mut gallery = GalleryController::new();
        assert!(gallery.select(&mut store, "1000"));
        assert!(!gallery.select(&mut store, "42"));
        assert_eq!(gallery.selected_id(), Some("1000"));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut store = store_with(&[1_000, 2_000]);
        let mut gallery = GalleryController::new();
        gallery.select(&mut store, "2000");

        assert_eq!(gallery.delete(&mut store, "2000"), Some(WriteOutcome::Persisted));
        assert_eq!(gallery.selected_id(), None);
        assert_eq!(gallery.list(&mut store).len(), 1);
    }

    #[test]
    fn test_delete_other_keeps_selection() {
        let mut store = store_with(&[1_000, 2_000]);
        let mut gallery = GalleryController::new();
        gallery.select(&mut store, "2000");
        gallery.delete(&mut store, "1000");
        assert_eq!(gallery.selected_id(), Some("2000"));
    }

    #[test]
    fn test_step_through_photos() {
        let mut store = store_with(&[1_000, 2_000, 3_000]);
        let mut gallery = GalleryController::new();

        gallery.select_next(&mut store);
        assert_eq!(gallery.selected_id(), Some("3000"));
        gallery.select_next(&mut store);
        gallery.select_next(&mut store);
        gallery.select_next(&mut store);
        assert_eq!(gallery.selected_id(), Some("1000"), "clamped at the oldest");
        gallery.select_previous(&mut store);
        assert_eq!(gallery.selected_id(), Some("2000"));
    }

    #[test]
    fn test_export_names_file_after_id() {
        let mut store = store_with(&[1_736_172_300_123]);
        let gallery = GalleryController::new();
        let exported = gallery.export(&mut store, "1736172300123").unwrap();
        assert_eq!(exported.filename, "photo-1736172300123.jpg");
        assert_eq!(exported.data, vec![0xFF, 0xD8, 0xFF, 0xD9]);

        let dir = tempfile::tempdir().unwrap();
        let path = exported.save_to(&dir.path().join("out")).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), exported.data);
    }

    #[test]
    fn test_export_unknown_fails() {
        let mut store = store_with(&[]);
        assert_eq!(
            GalleryController::new().export(&mut store, "1").err(),
            Some(StorageError::NotFound("1".into()))
        );
    }
}
