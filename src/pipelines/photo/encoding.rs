// SPDX-License-Identifier: GPL-3.0-only

//! Still image encoding
//!
//! Photos are stored inline as data URIs, so the encoded bytes travel as an
//! [`ImageArtifact`] that knows its own MIME type:
//!
//! ```text
//! RgbImage ──encode──► ImageArtifact ──to_data_uri──► "data:image/jpeg;base64,..."
//! ```

use super::processing::ProcessedImage;
use crate::constants::PhotoQuality;
use crate::errors::{PhotoError, StorageError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{DynamicImage, ImageFormat, RgbImage};
use tracing::debug;

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFormat {
    /// JPEG format (lossy compression)
    Jpeg,
    /// PNG format (lossless compression)
    Png,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "image/jpeg",
            EncodingFormat::Png => "image/png",
        }
    }

    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" | "image/jpg" => Some(EncodingFormat::Jpeg),
            "image/png" => Some(EncodingFormat::Png),
            _ => None,
        }
    }

    fn to_image_format(self) -> ImageFormat {
        match self {
            EncodingFormat::Jpeg => ImageFormat::Jpeg,
            EncodingFormat::Png => ImageFormat::Png,
        }
    }
}

/// Encoded still image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub data: Vec<u8>,
    pub format: EncodingFormat,
}

impl ImageArtifact {
    /// `data:<mime>;base64,<payload>`
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            BASE64.encode(&self.data)
        )
    }

    /// Parse a base64 data URI
    pub fn from_data_uri(uri: &str) -> Result<Self, StorageError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| StorageError::Corrupt("image is not a data URI".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| StorageError::Corrupt("data URI has no payload".into()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| StorageError::Corrupt("data URI is not base64".into()))?;
        let format = EncodingFormat::from_mime_type(mime)
            .ok_or_else(|| StorageError::Corrupt(format!("unsupported image type {}", mime)))?;
        let data = BASE64
            .decode(payload)
            .map_err(|e| StorageError::Corrupt(format!("invalid base64: {}", e)))?;

        Ok(Self { data, format })
    }

    /// Decode back into pixels
    pub fn decode(&self) -> Result<DynamicImage, PhotoError> {
        image::load_from_memory_with_format(&self.data, self.format.to_image_format())
            .map_err(|e| PhotoError::EncodingFailed(format!("decode failed: {}", e)))
    }
}

/// Photo encoder
pub struct PhotoEncoder {
    format: EncodingFormat,
    quality: PhotoQuality,
}

impl PhotoEncoder {
    /// Create a new encoder with JPEG format and high quality
    pub fn new() -> Self {
        Self {
            format: EncodingFormat::Jpeg,
            quality: PhotoQuality::High,
        }
    }

    /// Set encoding format
    pub fn set_format(&mut self, format: EncodingFormat) {
        self.format = format;
    }

    /// Set encoding quality (only affects JPEG)
    pub fn set_quality(&mut self, quality: PhotoQuality) {
        self.quality = quality;
    }

    /// Encode a processed image
    pub fn encode(&self, processed: ProcessedImage) -> Result<ImageArtifact, PhotoError> {
        let data = match self.format {
            EncodingFormat::Jpeg => Self::encode_jpeg(&processed.image, self.quality)?,
            EncodingFormat::Png => Self::encode_png(&processed.image)?,
        };

        debug!(
            width = processed.width,
            height = processed.height,
            format = ?self.format,
            size = data.len(),
            "Encoding complete"
        );

        Ok(ImageArtifact {
            data,
            format: self.format,
        })
    }

    /// Encode image as JPEG
    fn encode_jpeg(image: &RgbImage, quality: PhotoQuality) -> Result<Vec<u8>, PhotoError> {
        let mut buffer = Vec::new();
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.jpeg_quality());

        encoder
            .encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| PhotoError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

        Ok(buffer)
    }

    /// Encode image as PNG
    fn encode_png(image: &RgbImage) -> Result<Vec<u8>, PhotoError> {
        let mut buffer = Vec::new();

        image
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| PhotoError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

        Ok(buffer)
    }
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new()
    }
}
