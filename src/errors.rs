// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the phone display
//!
//! Every failure is handled at the component that produced it and turned into
//! either a visible state (a denied camera, a notice) or a no-op. The types here
//! carry enough detail for logging and for the notice text shown to the user.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Camera access errors
    Camera(CameraError),
    /// Photo capture errors
    Photo(PhotoError),
    /// Photo store errors
    Storage(StorageError),
    /// Configuration errors
    Config(String),
    /// Generic error with message
    Other(String),
}

/// Camera access errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The user or the platform refused access to the video input
    PermissionDenied,
    /// No input matching the requested constraints exists
    NoCameraFound,
    /// The input was granted but failed to start
    InitializationFailed(String),
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    /// Capture attempted while the session is not live
    NotReady,
    /// Reading a frame from the input failed
    CaptureFailed(String),
    /// Encoding the frame failed
    EncodingFailed(String),
}

/// Photo store errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing namespace could not be read or written
    Unavailable(String),
    /// The stored value is not a valid photo list
    Corrupt(String),
    /// No stored photo has the requested id
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "Camera access denied"),
            CameraError::NoCameraFound => write!(f, "No front-facing camera found"),
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::NotReady => write!(f, "Camera is not ready"),
            PhotoError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Photo storage unavailable: {}", msg),
            StorageError::Corrupt(msg) => write!(f, "Stored photos are unreadable: {}", msg),
            StorageError::NotFound(id) => write!(f, "No photo with id {}", id),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for PhotoError {}
impl std::error::Error for StorageError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Corrupt(err.to_string())
    }
}
