// SPDX-License-Identifier: GPL-3.0-only

//! Still image source for the virtual camera

use crate::backends::camera::types::{BackendError, BackendResult, CameraFrame};
use crate::constants::file_formats;
use std::path::Path;
use tracing::info;

/// Load an image file as an RGBA camera frame
pub fn load_image_as_frame(path: &Path) -> BackendResult<CameraFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !file_formats::is_image_extension(&extension) {
        return Err(BackendError::DeviceNotFound(format!(
            "Unsupported file format: {}",
            path.display()
        )));
    }

    info!(path = %path.display(), "Loading image file");

    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => {
            BackendError::IoError(format!("'{}': {}", path.display(), io))
        }
        other => BackendError::Other(format!(
            "Failed to load image '{}': {}",
            path.display(),
            other
        )),
    })?;

    let frame = CameraFrame::from_rgba(img.to_rgba8());
    info!(
        width = frame.width,
        height = frame.height,
        "Image loaded successfully"
    );
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let result = load_image_as_frame(Path::new("/tmp/clip.mp4"));
        assert!(matches!(result, Err(BackendError::DeviceNotFound(_))));
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let frame = load_image_as_frame(&path).unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(&frame.data_slice()[..4], &[10, 20, 30, 255]);
    }
}
