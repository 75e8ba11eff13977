// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for headless photo operations
//!
//! This module provides command-line functionality for:
//! - Listing stored photos
//! - Capturing a photo from the virtual camera
//! - Exporting and deleting photos
//! - Resolving search addresses

use chrono::Local;
use phone_display::app::{GalleryController, SearchInputBridge};
use phone_display::backends::virtual_camera::VirtualCamera;
use phone_display::config::{CameraSource, Config};
use phone_display::pipelines::photo::{
    CaptureSession, EncodingFormat, PhotoPipeline, PreviewTransform,
};
use phone_display::storage::{FileKeyValueStore, PhotoStore, WriteOutcome};
use std::path::PathBuf;

fn open_store() -> Result<PhotoStore<FileKeyValueStore>, Box<dyn std::error::Error>> {
    Ok(PhotoStore::new(FileKeyValueStore::open_default()?))
}

fn report(outcome: &WriteOutcome) {
    if let WriteOutcome::MemoryOnly(e) = outcome {
        eprintln!("Warning: change was not saved ({})", e);
    }
}

/// List all stored photos
pub fn list_photos() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    let photos = store.list();

    if photos.is_empty() {
        println!("No photos stored.");
        return Ok(());
    }

    println!("Stored photos:");
    println!();
    for photo in &photos {
        let taken = photo.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
        let size = photo
            .artifact()
            .map(|artifact| format!("{} KiB", artifact.data.len().div_ceil(1024)))
            .unwrap_or_else(|e| format!("unreadable: {}", e));
        println!("  {}  {}  {}", photo.id, taken, size);
    }

    Ok(())
}

/// Capture one frame from the virtual camera into the store
pub fn capture_photo(
    config: Config,
    source: Option<PathBuf>,
    no_mirror: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let camera_source = source.map(CameraSource::Image).unwrap_or(config.camera_source);
    let mirror = config.mirror_preview && !no_mirror;

    let input = VirtualCamera::new(camera_source, config.camera_access);
    let pipeline = PhotoPipeline::with_config(
        PreviewTransform::mirrored(mirror),
        EncodingFormat::Jpeg,
        config.photo_quality,
    );
    let mut session = CaptureSession::new(input, pipeline);
    let mut store = open_store()?;

    session.open()?;
    let captured = session.capture(&mut store)?;
    session.close();

    report(&captured.write);
    println!(
        "Photo captured: {} ({} KiB)",
        captured.record.id,
        captured.artifact.data.len().div_ceil(1024)
    );
    Ok(())
}

/// Write a stored photo to disk
pub fn export_photo(id: &str, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    let exported = GalleryController::new().export(&mut store, id)?;
    let dir = output.unwrap_or_else(Config::default_export_dir);
    let path = exported.save_to(&dir)?;
    println!("Photo saved: {}", path.display());
    Ok(())
}

/// Delete a stored photo
pub fn delete_photo(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    match GalleryController::new().delete(&mut store, id) {
        Some(outcome) => {
            report(&outcome);
            println!("Photo deleted: {}", id);
        }
        None => println!("No photo with id {}", id),
    }
    Ok(())
}

/// Print the viewer address for a search
pub fn search(config: &Config, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut bridge = SearchInputBridge::new(config.search_url.clone());
    bridge.set_text(text);
    println!("{}", bridge.commit().address);
    Ok(())
}
