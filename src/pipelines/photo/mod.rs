// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture pipeline
//!
//! ```text
//! VideoInput → Capture → Post-Processing → Encoding → Photo Store
//!      ↓
//! Preview uses the same transform as Post-Processing
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Capture**: Read the current frame from the live input
//! 2. **Post-Processing**: Apply the preview transform (mirror) and drop alpha
//! 3. **Encoding**: Convert to JPEG/PNG
//! 4. **Store**: Insert the data URI at the head of the photo list
//!
//! Stages 1-3 either all succeed or nothing reaches the store.

pub mod capture;
pub mod encoding;
pub mod processing;

pub use capture::{CaptureSession, CapturedPhoto, SessionState};
pub use encoding::{EncodingFormat, ImageArtifact, PhotoEncoder};
pub use processing::{PostProcessor, PreviewTransform, ProcessedImage};

use crate::backends::camera::types::CameraFrame;
use crate::constants::PhotoQuality;
use crate::errors::PhotoError;

/// Frame → encoded still image
pub struct PhotoPipeline {
    post_processor: PostProcessor,
    encoder: PhotoEncoder,
}

impl PhotoPipeline {
    /// Create a new photo pipeline with default settings (mirrored, JPEG, high quality)
    pub fn new() -> Self {
        Self::with_config(
            PreviewTransform::default(),
            EncodingFormat::Jpeg,
            PhotoQuality::default(),
        )
    }

    /// Create a new photo pipeline with custom settings
    pub fn with_config(
        transform: PreviewTransform,
        encoding_format: EncodingFormat,
        quality: PhotoQuality,
    ) -> Self {
        let mut encoder = PhotoEncoder::new();
        encoder.set_format(encoding_format);
        encoder.set_quality(quality);

        Self {
            post_processor: PostProcessor::new(transform),
            encoder,
        }
    }

    /// Transform shared by the preview and the saved photo
    pub fn transform(&self) -> PreviewTransform {
        self.post_processor.transform()
    }

    /// Post-process and encode one frame
    pub fn process_frame(&self, frame: &CameraFrame) -> Result<ImageArtifact, PhotoError> {
        let processed = self.post_processor.process(frame)?;
        self.encoder.encode(processed)
    }
}

impl Default for PhotoPipeline {
    fn default() -> Self {
        Self::new()
    }
}
