// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JPEG quality presets for captured photos
///
/// Users can trade file size (and therefore stored list size) against quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhotoQuality {
    /// Small stored photos, visible artifacts
    Low,
    /// Balanced quality and size
    Medium,
    /// Close to the browser canvas default (default)
    #[default]
    High,
    /// Minimal compression
    Maximum,
}

impl PhotoQuality {
    /// Get all preset variants for UI iteration
    pub const ALL: [PhotoQuality; 4] = [
        PhotoQuality::Low,
        PhotoQuality::Medium,
        PhotoQuality::High,
        PhotoQuality::Maximum,
    ];

    /// Get display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            PhotoQuality::Low => "Low",
            PhotoQuality::Medium => "Medium",
            PhotoQuality::High => "High",
            PhotoQuality::Maximum => "Maximum",
        }
    }

    /// JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            PhotoQuality::Low => 60,
            PhotoQuality::Medium => 80,
            PhotoQuality::High => 92,
            PhotoQuality::Maximum => 98,
        }
    }
}

/// Gesture thresholds
pub mod gestures {
    use super::Duration;

    /// How long the fingerprint must be held to unlock
    pub const UNLOCK_HOLD: Duration = Duration::from_millis(1000);

    /// Minimum upward travel (start.y - end.y) for swipe-to-lock.
    /// The comparison is strict: a travel of exactly this value does not lock.
    pub const SWIPE_UP_THRESHOLD: f32 = 50.0;
}

/// Browser and search constants
pub mod browser {
    /// Search endpoint that receives the `q` parameter
    pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";

    /// Neutral address for an empty viewer
    pub const BLANK_ADDRESS: &str = "about:blank";

    /// Placeholder shown in the empty address field
    pub const SEARCH_PLACEHOLDER: &str = "Search Google or type a URL";
}

/// Photo storage constants
pub mod storage {
    /// Key of the photo list in the key/value namespace
    pub const PHOTOS_KEY: &str = "phonePhotos";

    /// Directory name used under the platform data/config dirs
    pub const APP_DIR: &str = "phone-display";

    /// Subdirectory holding one JSON file per key
    pub const NAMESPACE_DIR: &str = "storage";

    /// Prefix of exported file names (`photo-<id>.jpg`)
    pub const EXPORT_PREFIX: &str = "photo-";
}

/// User-facing notice texts
pub mod notices {
    /// Shown in the camera overlay while access is refused
    pub const CAMERA_DENIED: &str =
        "Camera access denied. Please allow camera permissions to take photos.";

    /// Shown after a write fell back to the session copy
    pub const STORAGE_UNAVAILABLE: &str =
        "Photos can't be saved right now. They are kept until you close the phone.";
}

/// Status bar and clock constants
pub mod status_bar {
    use super::Duration;

    /// Clock refresh interval
    pub const CLOCK_TICK: Duration = Duration::from_secs(1);

    /// The simulated battery never drains
    pub const BATTERY_PERCENT: u8 = 85;

    /// `14:05`
    pub const TIME_FORMAT: &str = "%H:%M";

    /// `Monday, January 6, 2025`
    pub const DATE_FORMAT: &str = "%A, %B %-d, %Y";
}

/// Virtual camera constants
pub mod virtual_camera {
    use super::Duration;

    /// Test pattern frame size (portrait, like a front camera held upright)
    pub const PATTERN_WIDTH: u32 = 240;
    pub const PATTERN_HEIGHT: u32 = 320;

    /// Period of the test pattern animation
    pub const PATTERN_PERIOD: Duration = Duration::from_secs(4);
}

/// Terminal front-end constants
pub mod terminal {
    use super::Duration;

    /// Phone frame size in terminal cells (outer border included)
    pub const PHONE_WIDTH: u16 = 36;
    pub const PHONE_HEIGHT: u16 = 40;

    /// Preview refresh interval while the camera is live (~15fps)
    pub const PREVIEW_INTERVAL: Duration = Duration::from_millis(66);

    /// Photos per gallery grid row
    pub const GALLERY_COLUMNS: usize = 3;

    /// Screen pixels covered by one terminal row, for gesture distances
    pub const PIXELS_PER_ROW: f32 = 20.0;

    /// Log file name under the data directory
    pub const LOG_FILE: &str = "phone-display.log";
}

/// Image file extensions accepted as virtual camera sources
pub mod file_formats {
    /// Supported image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

    /// Check if extension is a supported image format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}

/// Application information
pub mod app_info {
    /// Version string including the commit hash
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}
