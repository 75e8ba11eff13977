// SPDX-License-Identifier: GPL-3.0-only

//! Virtual camera input
//!
//! Stands in for the phone's front camera. Two sources are available:
//!
//! ```text
//! CameraSource::TestPattern ──► animated pattern (generated per frame)
//! CameraSource::Image(path) ──► still image decoded once at start
//! ```
//!
//! Access can be refused through the configuration, which lets the denied
//! camera path be exercised without a real permission prompt.

mod file_source;
mod test_pattern;

pub use file_source::load_image_as_frame;
pub use test_pattern::render_test_pattern;

use crate::backends::camera::{
    BackendError, BackendResult, CameraFrame, Facing, StreamConstraints, VideoInput,
};
use crate::config::{CameraSource, Config};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Running stream state
enum ActiveStream {
    Pattern { started: Instant },
    Still(CameraFrame),
}

/// Software camera facing the user
pub struct VirtualCamera {
    source: CameraSource,
    access_granted: bool,
    facing: Facing,
    active: Option<ActiveStream>,
}

impl VirtualCamera {
    /// Create a new virtual camera
    pub fn new(source: CameraSource, access_granted: bool) -> Self {
        Self {
            source,
            access_granted,
            facing: Facing::User,
            active: None,
        }
    }

    /// Build from the user configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.camera_source.clone(), config.camera_access)
    }

    pub fn source(&self) -> &CameraSource {
        &self.source
    }
}

impl VideoInput for VirtualCamera {
    fn start(&mut self, constraints: &StreamConstraints) -> BackendResult<()> {
        if !self.access_granted {
            warn!("Camera access refused by configuration");
            return Err(BackendError::PermissionDenied);
        }
        if constraints.facing != self.facing {
            return Err(BackendError::DeviceNotFound(format!(
                "no {} facing camera",
                constraints.facing
            )));
        }
        if constraints.audio {
            debug!("Audio requested from virtual camera, ignoring");
        }

        let stream = match &self.source {
            CameraSource::TestPattern => ActiveStream::Pattern {
                started: Instant::now(),
            },
            CameraSource::Image(path) => ActiveStream::Still(load_image_as_frame(path)?),
        };

        info!(source = ?self.source, "Virtual camera started");
        self.active = Some(stream);
        Ok(())
    }

    fn read_frame(&mut self) -> BackendResult<CameraFrame> {
        match &self.active {
            Some(ActiveStream::Pattern { started }) => {
                Ok(CameraFrame::from_rgba(render_test_pattern(started.elapsed())))
            }
            Some(ActiveStream::Still(frame)) => {
                let mut frame = frame.clone();
                frame.captured_at = Instant::now();
                Ok(frame)
            }
            None => Err(BackendError::NotStarted),
        }
    }

    fn stop(&mut self) {
        if self.active.take().is_some() {
            info!("Virtual camera stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for VirtualCamera {
    fn drop(&mut self) {
        self.stop();
    }
}
