// SPDX-License-Identifier: GPL-3.0-only

//! Video input abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │   Capture Session   │  ← Idle / Live / Denied state machine
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  VideoInput Trait   │  ← start / read_frame / stop
//! └──────────┬──────────┘
//!            │
//!            ▼
//!    ┌───────────────┐
//!    │ VirtualCamera │  ← Concrete implementation
//!    └───────────────┘
//! ```

pub mod types;

pub use types::*;

/// A live video source
///
/// Implementations own whatever handle the platform hands out while a stream
/// is running. `stop` must release it before returning.
pub trait VideoInput {
    /// Request a stream matching `constraints`
    ///
    /// # Returns
    /// * `Ok(())` - Stream is running
    /// * `Err(BackendError::PermissionDenied)` - Access refused
    /// * `Err(BackendError::DeviceNotFound)` - No input matches the constraints
    fn start(&mut self, constraints: &StreamConstraints) -> BackendResult<()>;

    /// Read the frame currently shown by the stream
    fn read_frame(&mut self) -> BackendResult<CameraFrame>;

    /// Stop the stream and release the input. Safe to call when not started.
    fn stop(&mut self);

    /// Whether a stream is currently running
    fn is_active(&self) -> bool;
}

impl<T: VideoInput + ?Sized> VideoInput for Box<T> {
    fn start(&mut self, constraints: &StreamConstraints) -> BackendResult<()> {
        (**self).start(constraints)
    }

    fn read_frame(&mut self) -> BackendResult<CameraFrame> {
        (**self).read_frame()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
