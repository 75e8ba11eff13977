// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher; each message group has
//! focused handler methods below. Failures never escape: they end up as a
//! visible state (a denied camera), a notice, or a logged no-op.

use super::navigator::Transition;
use super::state::{Effect, Message, Notice, PhoneModel};
use super::timer::DeferredAction;
use crate::backends::camera::VideoInput;
use crate::constants::{gestures, notices};
use crate::errors::PhotoError;
use crate::storage::{KeyValueStore, WriteOutcome};
use tracing::{debug, error, info, warn};

impl<V: VideoInput, S: KeyValueStore> PhoneModel<V, S> {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            // ===== Lock Screen =====
            Message::FingerprintPressed => self.handle_fingerprint_pressed(),
            Message::FingerprintReleased => self.handle_fingerprint_released(),
            Message::HoldElapsed(token) => {
                self.hold_timer = None;
                let transition = self.navigator.hold_elapsed(token);
                self.handle_transition(transition)
            }

            // ===== Gestures =====
            Message::PointerDown(y) => {
                self.navigator.pointer_down(y);
                Effect::none()
            }
            Message::PointerMove(y) => {
                self.navigator.pointer_move(y);
                Effect::none()
            }
            Message::PointerUp => {
                let transition = self.navigator.pointer_up();
                self.handle_transition(transition)
            }

            // ===== Home =====
            Message::LaunchBrowser => {
                let transition = self.navigator.launch_browser();
                self.handle_transition(transition)
            }
            Message::CallPressed => {
                info!("Call button pressed");
                Effect::none()
            }

            // ===== Camera =====
            Message::OpenCamera => self.handle_open_camera(),
            Message::CloseCamera => self.handle_close_camera(),
            Message::CapturePhoto => self.handle_capture_photo(),
            Message::RetakePhoto => {
                self.last_capture = None;
                Effect::none()
            }

            // ===== Photos =====
            Message::OpenPhotos => {
                let transition = self.navigator.open_photos();
                self.handle_transition(transition)
            }
            Message::ClosePhotos => {
                let transition = self.navigator.close_photos();
                self.handle_transition(transition)
            }
            Message::SelectPhoto(id) => {
                if self.navigator.photos_visible() {
                    self.gallery.select(&mut self.store, &id);
                }
                Effect::none()
            }
            Message::SelectNextPhoto => {
                if self.navigator.photos_visible() {
                    self.gallery.select_next(&mut self.store);
                }
                Effect::none()
            }
            Message::SelectPreviousPhoto => {
                if self.navigator.photos_visible() {
                    self.gallery.select_previous(&mut self.store);
                }
                Effect::none()
            }
            Message::ClearSelection => {
                self.gallery.clear_selection();
                Effect::none()
            }
            Message::DeletePhoto(id) => self.handle_delete_photo(&id),
            Message::ExportPhoto(id) => self.handle_export_photo(&id),

            // ===== Browser =====
            Message::Keyboard(event) => {
                let transition = self.navigator.keyboard_event(event);
                self.handle_transition(transition)
            }
            Message::SearchFocused => {
                self.navigator.focus_search();
                Effect::none()
            }
            Message::SearchBlurred => {
                self.navigator.blur_search();
                Effect::none()
            }
            Message::SearchTextChanged(text) => {
                self.navigator.set_search_text(text);
                Effect::none()
            }
            Message::OpenViewerExternally => match self.navigator.viewer_address() {
                Some(address) if address != crate::constants::browser::BLANK_ADDRESS => {
                    Effect::OpenExternal(address.to_string())
                }
                _ => {
                    debug!("Nothing to open externally");
                    Effect::none()
                }
            },

            // ===== System =====
            Message::Tick(now) => {
                self.now = now;
                Effect::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Effect::none()
            }
        }
    }

    fn handle_fingerprint_pressed(&mut self) -> Effect {
        // Replacing the timer drops (and aborts) any earlier one
        self.hold_timer = self.navigator.press_hold().map(|token| {
            DeferredAction::schedule(
                gestures::UNLOCK_HOLD,
                self.messages.clone(),
                Message::HoldElapsed(token),
            )
        });
        Effect::none()
    }

    fn handle_fingerprint_released(&mut self) -> Effect {
        self.navigator.release_hold();
        if let Some(timer) = self.hold_timer.take() {
            timer.cancel();
        }
        Effect::none()
    }

    fn handle_open_camera(&mut self) -> Effect {
        let transition = self.navigator.open_camera();
        if transition.is_none() {
            return Effect::none();
        }
        // Opening the camera cancels any pending unlock
        self.hold_timer = None;
        self.last_capture = None;
        if let Err(e) = self.session.open() {
            info!(reason = %e, "Camera unavailable");
        }
        self.handle_transition(transition)
    }

    fn handle_close_camera(&mut self) -> Effect {
        self.session.close();
        self.last_capture = None;
        let transition = self.navigator.close_camera();
        self.handle_transition(transition)
    }

    fn handle_capture_photo(&mut self) -> Effect {
        if !self.navigator.camera_visible() {
            debug!("Shutter pressed without the camera overlay");
            return Effect::none();
        }

        match self.session.capture(&mut self.store) {
            Ok(captured) => {
                self.report_write(&captured.write);
                self.last_capture = Some(captured);
            }
            Err(PhotoError::NotReady) => {}
            Err(e) => {
                error!(error = %e, "Capture failed");
                self.notice = Some(Notice::error(e.to_string()));
            }
        }
        Effect::none()
    }

    fn handle_delete_photo(&mut self, id: &str) -> Effect {
        if !self.navigator.photos_visible() {
            return Effect::none();
        }
        if let Some(outcome) = self.gallery.delete(&mut self.store, id) {
            self.report_write(&outcome);
        }
        Effect::none()
    }

    fn handle_export_photo(&mut self, id: &str) -> Effect {
        let exported = match self.gallery.export(&mut self.store, id) {
            Ok(exported) => exported,
            Err(e) => {
                debug!(id, error = %e, "Export skipped");
                return Effect::none();
            }
        };
        match exported.save_to(&self.export_dir) {
            Ok(path) => {
                self.notice = Some(Notice::info(format!("Saved {}", path.display())));
            }
            Err(e) => {
                warn!(error = %e, "Export failed");
                self.notice = Some(Notice::error(format!("Export failed: {}", e)));
            }
        }
        Effect::none()
    }

    fn handle_transition(&mut self, transition: Option<Transition>) -> Effect {
        let Some(transition) = transition else {
            return Effect::none();
        };
        debug!(?transition, "Navigation");

        match transition {
            Transition::Locked => {
                self.hold_timer = None;
                self.last_capture = None;
                self.gallery.clear_selection();
                self.session.close();
            }
            Transition::PhotosOpened => {
                self.gallery.clear_selection();
                self.check_stored_photos();
            }
            Transition::PhotosClosed => {
                self.gallery.clear_selection();
            }
            Transition::CameraOpened => self.check_stored_photos(),
            Transition::Unlocked
            | Transition::BrowserOpened
            | Transition::CameraClosed
            | Transition::SearchCommitted(_) => {}
        }
        Effect::none()
    }

    /// Raise the storage notice when the stored list can't be read
    fn check_stored_photos(&mut self) {
        self.store.list();
        if let Some(e) = self.store.read_error() {
            warn!(error = %e, "Stored photos unreadable, new photos stay in memory");
            self.notice = Some(Notice::error(notices::STORAGE_UNAVAILABLE));
        }
    }

    fn report_write(&mut self, outcome: &WriteOutcome) {
        if let WriteOutcome::MemoryOnly(e) = outcome {
            warn!(error = %e, "Photo kept in memory only");
            self.notice = Some(Notice::error(notices::STORAGE_UNAVAILABLE));
        }
    }
}
