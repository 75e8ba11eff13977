// SPDX-License-Identifier: GPL-3.0-only

//! Capture session
//!
//! Owns the video input while the camera overlay is open.
//!
//! ```text
//!          open() ok            close()
//!   Idle ───────────────► Live ─────────► Idle
//!    │                                     ▲
//!    │ open() refused / no device          │ close()
//!    ▼                                     │
//!  Denied ─────────────────────────────────┘
//! ```
//!
//! `Denied` is terminal for the session: `open()` does not ask again. The user
//! retries by closing and re-opening the camera, which goes through `close()`.

use super::{ImageArtifact, PhotoPipeline, PreviewTransform};
use crate::backends::camera::{BackendError, StreamConstraints, VideoInput};
use crate::errors::{CameraError, PhotoError};
use crate::storage::{KeyValueStore, PhotoRecord, PhotoStore, WriteOutcome};
use chrono::Utc;
use image::RgbaImage;
use tracing::{debug, info, warn};

/// Session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Live,
    Denied(CameraError),
}

/// Result of a successful capture
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub record: PhotoRecord,
    /// Encoded image for the immediate preview
    pub artifact: ImageArtifact,
    /// Whether the store reached its namespace
    pub write: WriteOutcome,
}

/// Front camera session
pub struct CaptureSession<V: VideoInput> {
    input: V,
    state: SessionState,
    pipeline: PhotoPipeline,
}

impl<V: VideoInput> CaptureSession<V> {
    pub fn new(input: V, pipeline: PhotoPipeline) -> Self {
        Self {
            input,
            state: SessionState::Idle,
            pipeline,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == SessionState::Live
    }

    pub fn transform(&self) -> PreviewTransform {
        self.pipeline.transform()
    }

    /// Request the front camera
    ///
    /// # Returns
    /// * `Ok(())` - Session is live (or already was)
    /// * `Err(CameraError)` - Access refused; the session is now `Denied`
    pub fn open(&mut self) -> Result<(), CameraError> {
        match &self.state {
            SessionState::Live => return Ok(()),
            SessionState::Denied(reason) => {
                debug!(%reason, "Camera previously denied, not asking again");
                return Err(reason.clone());
            }
            SessionState::Idle => {}
        }

        match self.input.start(&StreamConstraints::front_camera()) {
            Ok(()) => {
                info!("Capture session live");
                self.state = SessionState::Live;
                Ok(())
            }
            Err(e) => {
                // A failed start may still have grabbed something
                self.input.stop();
                let reason = match e {
                    BackendError::PermissionDenied => CameraError::PermissionDenied,
                    BackendError::DeviceNotFound(_) => CameraError::NoCameraFound,
                    other => CameraError::InitializationFailed(other.to_string()),
                };
                warn!(%reason, "Capture session denied");
                self.state = SessionState::Denied(reason.clone());
                Err(reason)
            }
        }
    }

    /// Current frame as shown in the preview
    pub fn preview_frame(&mut self) -> Option<RgbaImage> {
        if !self.is_live() {
            return None;
        }
        let frame = match self.input.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                debug!(error = %e, "No preview frame");
                return None;
            }
        };
        self.pipeline
            .transform()
            .apply(&frame)
            .inspect_err(|e| debug!(error = %e, "Preview frame unusable"))
            .ok()
    }

    /// Capture the current frame into `store`
    ///
    /// Nothing is written unless the frame was read, transformed and encoded.
    pub fn capture<S: KeyValueStore>(
        &mut self,
        store: &mut PhotoStore<S>,
    ) -> Result<CapturedPhoto, PhotoError> {
        if !self.is_live() {
            warn!(state = ?self.state, "Capture requested while not live");
            return Err(PhotoError::NotReady);
        }

        let frame = self
            .input
            .read_frame()
            .map_err(|e| PhotoError::CaptureFailed(e.to_string()))?;
        let artifact = self.pipeline.process_frame(&frame)?;

        let (record, write) = store.insert(artifact.to_data_uri(), Utc::now());
        info!(id = %record.id, bytes = artifact.data.len(), "Photo captured");

        Ok(CapturedPhoto {
            record,
            artifact,
            write,
        })
    }

    /// Release the input. Safe from any state; always ends `Idle`.
    pub fn close(&mut self) {
        if self.input.is_active() {
            self.input.stop();
        }
        if self.state != SessionState::Idle {
            info!("Capture session closed");
        }
        self.state = SessionState::Idle;
    }

    pub fn input(&self) -> &V {
        &self.input
    }
}

impl<V: VideoInput> Drop for CaptureSession<V> {
    fn drop(&mut self) {
        self.close();
    }
}
