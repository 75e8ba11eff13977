// SPDX-License-Identifier: GPL-3.0-only
// Shared types for video input abstraction

//! Shared types for video inputs

use image::RgbaImage;
use std::sync::Arc;
use std::time::Instant;

/// Which way the requested camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    /// Front camera, facing the user (selfie)
    #[default]
    User,
    /// Rear camera
    Environment,
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facing::User => write!(f, "user"),
            Facing::Environment => write!(f, "environment"),
        }
    }
}

/// What the session asks of an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConstraints {
    pub facing: Facing,
    pub audio: bool,
}

impl StreamConstraints {
    /// Front-facing video, no audio
    pub fn front_camera() -> Self {
        Self {
            facing: Facing::User,
            audio: false,
        }
    }
}

/// Pixel format for camera frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// RGBA - 32-bit with alpha (4 bytes per pixel)
    RGBA,
    /// RGB24 - 24-bit RGB (3 bytes per pixel, no alpha)
    RGB24,
}

impl PixelFormat {
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            Self::RGBA => 4,
            Self::RGB24 => 3,
        }
    }
}

/// A single frame from a video input
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
    pub format: PixelFormat,
    /// Row stride in bytes (may include padding)
    pub stride: u32,
    /// When the frame was produced
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Wrap a tightly packed RGBA image
    pub fn from_rgba(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: Arc::from(image.into_raw().into_boxed_slice()),
            format: PixelFormat::RGBA,
            stride: width * 4,
            captured_at: Instant::now(),
        }
    }

    /// Pixel data as a slice
    pub fn data_slice(&self) -> &[u8] {
        &self.data
    }

    /// Copy into a tightly packed RGBA image, dropping any row padding
    pub fn to_rgba_image(&self) -> BackendResult<RgbaImage> {
        let bpp = self.format.bytes_per_pixel();
        let row_bytes = (self.width * bpp) as usize;
        let stride = self.stride as usize;
        let needed = stride * self.height.saturating_sub(1) as usize + row_bytes;
        if self.width == 0 || self.height == 0 || stride < row_bytes || self.data.len() < needed {
            return Err(BackendError::Other(format!(
                "Malformed frame: {}x{} stride {} needs {} bytes, got {}",
                self.width,
                self.height,
                self.stride,
                needed,
                self.data.len()
            )));
        }

        let mut rgba = Vec::with_capacity((self.width * self.height * 4) as usize);
        for row in self.data.chunks(stride).take(self.height as usize) {
            let row = &row[..row_bytes];
            match self.format {
                PixelFormat::RGBA => rgba.extend_from_slice(row),
                PixelFormat::RGB24 => {
                    for px in row.chunks_exact(3) {
                        rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
                    }
                }
            }
        }

        RgbaImage::from_raw(self.width, self.height, rgba)
            .ok_or_else(|| BackendError::Other("Failed to build RGBA image".into()))
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The user or platform refused access
    PermissionDenied,
    /// No input matches the requested constraints
    DeviceNotFound(String),
    /// Frame requested from a stopped input
    NotStarted,
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::PermissionDenied => write!(f, "Permission denied"),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::NotStarted => write!(f, "Input not started"),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}
