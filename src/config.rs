// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON at `<config_dir>/phone-display/config.json`. A missing file
//! yields the defaults; an unreadable one is logged and also yields defaults.

use crate::constants::{PhotoQuality, browser, storage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Which virtual input stands in for the front camera
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraSource {
    /// Animated test pattern
    #[default]
    TestPattern,
    /// A still image file shown as a live feed
    Image(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mirror camera preview horizontally (selfie mode). Captures follow the preview.
    pub mirror_preview: bool,
    /// JPEG quality of captured photos
    pub photo_quality: PhotoQuality,
    /// Search endpoint receiving the `q` parameter
    pub search_url: String,
    /// Whether the simulated platform grants camera access
    pub camera_access: bool,
    /// Input used for the camera overlay
    pub camera_source: CameraSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirror_preview: true, // Default to mirrored (selfie mode)
            photo_quality: PhotoQuality::default(),
            search_url: browser::DEFAULT_SEARCH_URL.to_string(),
            camera_access: true,
            camera_source: CameraSource::default(),
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(storage::APP_DIR).join("config.json"))
    }

    /// Where exported photos go: `<pictures>/phone-display`, else the data dir
    pub fn default_export_dir() -> PathBuf {
        dirs::picture_dir()
            .or_else(dirs::data_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join(storage::APP_DIR)
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read config, using defaults");
                return Self::default();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
            Self::default()
        })
    }

    /// Write to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}
