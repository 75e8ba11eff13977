// SPDX-License-Identifier: GPL-3.0-only

//! Application state types

use super::gallery::GalleryController;
use super::keyboard::KeyboardEvent;
use super::navigator::{HoldToken, Navigator};
use super::search::SearchInputBridge;
use super::timer::DeferredAction;
use crate::backends::camera::VideoInput;
use crate::config::Config;
use crate::pipelines::photo::{
    CaptureSession, CapturedPhoto, EncodingFormat, PhotoPipeline, PreviewTransform, SessionState,
};
use crate::storage::{KeyValueStore, PhotoRecord, PhotoStore};
use chrono::{DateTime, Local};
use image::RgbaImage;
use std::path::PathBuf;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Messages emitted by the front-end and by deferred actions.
///
/// Messages are organized into logical groups:
/// - **Lock Screen**: Fingerprint hold
/// - **Gestures**: Swipe-to-lock pointer tracking
/// - **Home**: App icons
/// - **Camera**: Overlay, capture, retake
/// - **Photos**: Gallery overlay, selection, delete, export
/// - **Browser**: Keyboard and search field
/// - **System**: Clock, notices
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ===== Lock Screen =====
    /// Pointer pressed on the fingerprint sensor
    FingerprintPressed,
    /// Pointer released or left the fingerprint sensor
    FingerprintReleased,
    /// Hold duration elapsed for this hold
    HoldElapsed(HoldToken),

    // ===== Gestures =====
    /// Pointer pressed at this vertical position
    PointerDown(f32),
    /// Pointer moved to this vertical position
    PointerMove(f32),
    /// Pointer released
    PointerUp,

    // ===== Home =====
    /// Browser app icon
    LaunchBrowser,
    /// Call button (no telephony behind it)
    CallPressed,

    // ===== Camera =====
    OpenCamera,
    CloseCamera,
    /// Shutter button
    CapturePhoto,
    /// Discard the captured preview and return to the live feed
    RetakePhoto,

    // ===== Photos =====
    OpenPhotos,
    ClosePhotos,
    /// Show one photo full size
    SelectPhoto(String),
    SelectNextPhoto,
    SelectPreviousPhoto,
    /// Back from the full-size photo to the grid
    ClearSelection,
    DeletePhoto(String),
    /// Save a photo into the export directory
    ExportPhoto(String),

    // ===== Browser =====
    /// On-screen or physical keyboard input
    Keyboard(KeyboardEvent),
    SearchFocused,
    SearchBlurred,
    /// Address field replaced wholesale (paste)
    SearchTextChanged(String),
    /// Open the viewer's current address in the system browser
    OpenViewerExternally,

    // ===== System =====
    /// Clock refresh
    Tick(DateTime<Local>),
    DismissNotice,
}

/// Side effect requested by [`PhoneModel::update`] that the front-end performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Hand this address to the system browser
    OpenExternal(String),
}

impl Effect {
    pub fn none() -> Self {
        Effect::None
    }
}

/// Dismissible notice shown above the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
        }
    }
}

/// Main application state
pub struct PhoneModel<V: VideoInput, S: KeyValueStore> {
    pub config: Config,
    pub(super) navigator: Navigator,
    pub(super) gallery: GalleryController,
    pub(super) session: CaptureSession<V>,
    pub(super) store: PhotoStore<S>,
    /// Pending fingerprint unlock
    pub(super) hold_timer: Option<DeferredAction>,
    pub(super) messages: UnboundedSender<Message>,
    pub(super) now: DateTime<Local>,
    /// Photo shown in place of the live feed after the shutter
    pub(super) last_capture: Option<CapturedPhoto>,
    pub(super) notice: Option<Notice>,
    pub(super) export_dir: PathBuf,
}

impl<V: VideoInput, S: KeyValueStore> PhoneModel<V, S> {
    /// Build the model. Deferred messages arrive on the returned receiver and
    /// must be fed back into [`PhoneModel::update`].
    pub fn new(
        config: Config,
        input: V,
        backend: S,
        export_dir: PathBuf,
    ) -> (Self, UnboundedReceiver<Message>) {
        let (messages, receiver) = mpsc::unbounded_channel();
        let pipeline = PhotoPipeline::with_config(
            PreviewTransform::mirrored(config.mirror_preview),
            EncodingFormat::Jpeg,
            config.photo_quality,
        );
        let model = Self {
            navigator: Navigator::new(SearchInputBridge::new(config.search_url.clone())),
            gallery: GalleryController::new(),
            session: CaptureSession::new(input, pipeline),
            store: PhotoStore::new(backend),
            hold_timer: None,
            messages,
            now: Local::now(),
            last_capture: None,
            notice: None,
            export_dir,
            config,
        };
        (model, receiver)
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn session_state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn last_capture(&self) -> Option<&CapturedPhoto> {
        self.last_capture.as_ref()
    }

    /// Live camera frame, already mirrored like the capture will be
    pub fn preview_frame(&mut self) -> Option<RgbaImage> {
        if !self.navigator.camera_visible() || self.last_capture.is_some() {
            return None;
        }
        self.session.preview_frame()
    }

    /// Stored photos, most recent first
    pub fn photos(&mut self) -> Vec<PhotoRecord> {
        self.gallery.list(&mut self.store)
    }

    pub fn selected_photo_id(&self) -> Option<&str> {
        self.gallery.selected_id()
    }

    pub fn selected_photo(&mut self) -> Option<PhotoRecord> {
        self.gallery.selected(&mut self.store)
    }

    /// Whether storage writes are currently failing
    pub fn storage_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    pub fn store(&self) -> &PhotoStore<S> {
        &self.store
    }

    pub fn export_dir(&self) -> &std::path::Path {
        &self.export_dir
    }

    /// Cancel timers and release the camera before the surface goes away
    pub fn shutdown(&mut self) {
        self.navigator.teardown();
        self.hold_timer = None;
        self.last_capture = None;
        self.session.close();
    }
}
