// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use phone_display::constants::{PhotoQuality, file_formats, gestures, status_bar, storage};
use std::time::Duration;

#[test]
fn test_photo_quality_values() {
    // Test that all presets exist (Low, Medium, High, Maximum)
    assert_eq!(PhotoQuality::ALL.len(), 4);
}

#[test]
fn test_photo_quality_ordering() {
    // Test that presets are ordered from lowest to highest quality
    let mut prev = 0u8;
    for preset in PhotoQuality::ALL {
        let quality = preset.jpeg_quality();
        assert!(
            quality > prev,
            "Presets should be ordered from lowest to highest"
        );
        assert!(quality <= 100);
        prev = quality;
    }
}

#[test]
fn test_photo_quality_display_names() {
    // Test that all presets have non-empty display names
    for preset in PhotoQuality::ALL {
        let name = preset.display_name();
        assert!(
            !name.is_empty(),
            "Preset {:?} has empty display name",
            preset
        );
    }
}

#[test]
fn test_gesture_thresholds() {
    assert_eq!(gestures::UNLOCK_HOLD, Duration::from_millis(1000));
    assert_eq!(gestures::SWIPE_UP_THRESHOLD, 50.0);
}

#[test]
fn test_storage_key() {
    assert_eq!(storage::PHOTOS_KEY, "phonePhotos");
    assert_eq!(status_bar::BATTERY_PERCENT, 85);
}

#[test]
fn test_image_extensions() {
    assert!(file_formats::is_image_extension("PNG"));
    assert!(file_formats::is_image_extension("jpeg"));
    assert!(!file_formats::is_image_extension("mp4"));
}
