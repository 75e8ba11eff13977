// SPDX-License-Identifier: GPL-3.0-only

//! Post-processing for captured frames
//!
//! The live preview of a front camera is shown mirrored. Captures run through
//! the same [`PreviewTransform`] as the preview, so the stored photo looks
//! exactly like what was on screen when the shutter was pressed.

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use image::{RgbImage, RgbaImage, imageops};
use tracing::debug;

/// Transform applied to frames before they are shown or saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTransform {
    /// Flip horizontally (selfie mode)
    pub mirror: bool,
}

impl Default for PreviewTransform {
    fn default() -> Self {
        Self { mirror: true }
    }
}

impl PreviewTransform {
    pub fn mirrored(mirror: bool) -> Self {
        Self { mirror }
    }

    /// Apply to a frame, producing a tightly packed RGBA image
    pub fn apply(&self, frame: &CameraFrame) -> Result<RgbaImage, PhotoError> {
        let mut image = frame
            .to_rgba_image()
            .map_err(|e| PhotoError::CaptureFailed(e.to_string()))?;
        if self.mirror {
            imageops::flip_horizontal_in_place(&mut image);
        }
        Ok(image)
    }
}

/// Processed image data
pub struct ProcessedImage {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}

/// Post-processor for captured frames
pub struct PostProcessor {
    transform: PreviewTransform,
}

impl PostProcessor {
    pub fn new(transform: PreviewTransform) -> Self {
        Self { transform }
    }

    pub fn transform(&self) -> PreviewTransform {
        self.transform
    }

    /// Mirror (if enabled) and drop the alpha channel
    pub fn process(&self, frame: &CameraFrame) -> Result<ProcessedImage, PhotoError> {
        let rgba = self.transform.apply(frame)?;
        let (width, height) = rgba.dimensions();
        let image = Self::convert_rgba_to_rgb(&rgba);

        debug!(width, height, mirror = self.transform.mirror, "Post-processing complete");

        Ok(ProcessedImage {
            image,
            width,
            height,
        })
    }

    fn convert_rgba_to_rgb(rgba: &RgbaImage) -> RgbImage {
        RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let [r, g, b, _] = rgba.get_pixel(x, y).0;
            image::Rgb([r, g, b])
        })
    }
}
