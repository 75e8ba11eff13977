// SPDX-License-Identifier: GPL-3.0-only

//! Screen navigation
//!
//! One primary screen is shown at a time; the camera and photos overlays sit on
//! top of it and suspend interaction with it while visible.
//!
//! ```text
//!        hold 1s           app icon
//!  Lock ────────► Home ──────────► Browser
//!   ▲               │                 │
//!   └───────────────┴── swipe up ─────┘   (from any primary screen)
//! ```
//!
//! The navigator never sleeps. Holding the fingerprint sensor hands out a
//! [`HoldToken`]; whoever owns the clock reports it back through
//! [`Navigator::hold_elapsed`] once the hold duration has passed. A token only
//! fires if it is still the armed one, so a release (or a newer press) makes
//! any earlier report a no-op.

use super::keyboard::KeyboardEvent;
use super::search::SearchInputBridge;
use crate::constants::{browser, gestures};
use tracing::{debug, info};

/// Primary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimaryScreen {
    #[default]
    Lock,
    Home,
    Browser,
}

/// Identifies one fingerprint hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoldToken(u64);

/// State change reported to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Unlocked,
    BrowserOpened,
    Locked,
    CameraOpened,
    CameraClosed,
    PhotosOpened,
    PhotosClosed,
    /// Enter pressed; the viewer now shows this address
    SearchCommitted(String),
}

/// Vertical drag in progress
#[derive(Debug, Clone, Copy, Default)]
struct SwipeTracker {
    start_y: Option<f32>,
    last_y: f32,
}

impl SwipeTracker {
    fn press(&mut self, y: f32) {
        self.start_y = Some(y);
        self.last_y = y;
    }

    fn track(&mut self, y: f32) {
        if self.start_y.is_some() {
            self.last_y = y;
        }
    }

    /// Upward distance of the finished drag
    fn release(&mut self) -> Option<f32> {
        self.start_y.take().map(|start| start - self.last_y)
    }

    fn cancel(&mut self) {
        self.start_y = None;
    }
}

/// Screen state machine
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    primary: PrimaryScreen,
    camera_visible: bool,
    photos_visible: bool,
    keyboard_visible: bool,
    viewer_address: Option<String>,
    search: SearchInputBridge,
    armed_hold: Option<HoldToken>,
    next_hold: u64,
    swipe: SwipeTracker,
}

impl Navigator {
    pub fn new(search: SearchInputBridge) -> Self {
        Self {
            search,
            ..Self::default()
        }
    }

    pub fn primary(&self) -> PrimaryScreen {
        self.primary
    }

    pub fn camera_visible(&self) -> bool {
        self.camera_visible
    }

    pub fn photos_visible(&self) -> bool {
        self.photos_visible
    }

    pub fn overlay_visible(&self) -> bool {
        self.camera_visible || self.photos_visible
    }

    pub fn keyboard_visible(&self) -> bool {
        self.keyboard_visible
    }

    /// Address shown by the page viewer, if it has been given one
    pub fn viewer_address(&self) -> Option<&str> {
        self.viewer_address.as_deref()
    }

    pub fn search(&self) -> &SearchInputBridge {
        &self.search
    }

    /// Whether a fingerprint hold is armed
    pub fn hold_pending(&self) -> bool {
        self.armed_hold.is_some()
    }

    /// Whether the primary screen accepts input right now
    fn primary_interactive(&self) -> bool {
        !self.overlay_visible()
    }

    /// Fingerprint sensor pressed
    ///
    /// Returns the token to report after [`gestures::UNLOCK_HOLD`], or `None`
    /// when there is nothing to unlock. A press while a hold is armed replaces
    /// the earlier hold.
    pub fn press_hold(&mut self) -> Option<HoldToken> {
        if self.primary != PrimaryScreen::Lock || !self.primary_interactive() {
            return None;
        }
        let token = HoldToken(self.next_hold);
        self.next_hold += 1;
        self.armed_hold = Some(token);
        debug!(?token, hold = ?gestures::UNLOCK_HOLD, "Fingerprint hold armed");
        Some(token)
    }

    /// Fingerprint sensor released (or the pointer left it)
    pub fn release_hold(&mut self) -> Option<HoldToken> {
        let cancelled = self.armed_hold.take();
        if let Some(token) = cancelled {
            debug!(?token, "Fingerprint hold cancelled");
        }
        cancelled
    }

    /// The hold duration has passed for `token`
    pub fn hold_elapsed(&mut self, token: HoldToken) -> Option<Transition> {
        if self.armed_hold != Some(token) {
            debug!(?token, "Stale fingerprint hold ignored");
            return None;
        }
        self.armed_hold = None;

        if self.primary != PrimaryScreen::Lock || !self.primary_interactive() {
            return None;
        }
        info!("Unlocked");
        self.primary = PrimaryScreen::Home;
        Some(Transition::Unlocked)
    }

    /// Browser app icon on the home screen
    pub fn launch_browser(&mut self) -> Option<Transition> {
        if self.primary != PrimaryScreen::Home || !self.primary_interactive() {
            return None;
        }
        self.primary = PrimaryScreen::Browser;
        self.keyboard_visible = true;
        self.viewer_address = Some(browser::BLANK_ADDRESS.to_string());
        info!("Browser opened");
        Some(Transition::BrowserOpened)
    }

    pub fn pointer_down(&mut self, y: f32) {
        if self.primary_interactive() {
            self.swipe.press(y);
        }
    }

    pub fn pointer_move(&mut self, y: f32) {
        self.swipe.track(y);
    }

    /// End of a drag; a swipe up of more than [`gestures::SWIPE_UP_THRESHOLD`] locks
    pub fn pointer_up(&mut self) -> Option<Transition> {
        let distance = self.swipe.release()?;
        if !self.primary_interactive() || distance <= gestures::SWIPE_UP_THRESHOLD {
            return None;
        }
        debug!(distance, "Swipe up");
        Some(self.lock())
    }

    /// Return to the lock screen, clearing everything transient
    pub fn lock(&mut self) -> Transition {
        self.primary = PrimaryScreen::Lock;
        self.camera_visible = false;
        self.photos_visible = false;
        self.keyboard_visible = false;
        self.viewer_address = None;
        self.search.clear();
        self.armed_hold = None;
        self.swipe.cancel();
        info!("Locked");
        Transition::Locked
    }

    pub fn open_camera(&mut self) -> Option<Transition> {
        if self.overlay_visible() {
            return None;
        }
        self.camera_visible = true;
        self.swipe.cancel();
        self.armed_hold = None;
        Some(Transition::CameraOpened)
    }

    pub fn close_camera(&mut self) -> Option<Transition> {
        if !self.camera_visible {
            return None;
        }
        self.camera_visible = false;
        Some(Transition::CameraClosed)
    }

    /// Photos app icon on the home screen
    pub fn open_photos(&mut self) -> Option<Transition> {
        if self.primary != PrimaryScreen::Home || self.overlay_visible() {
            return None;
        }
        self.photos_visible = true;
        self.swipe.cancel();
        Some(Transition::PhotosOpened)
    }

    /// Close the photos overlay, revealing the home screen again
    pub fn close_photos(&mut self) -> Option<Transition> {
        if !self.photos_visible {
            return None;
        }
        self.photos_visible = false;
        Some(Transition::PhotosClosed)
    }

    /// Search field gained focus
    pub fn focus_search(&mut self) {
        if self.primary == PrimaryScreen::Browser && self.primary_interactive() {
            self.keyboard_visible = true;
        }
    }

    /// Search field lost focus
    pub fn blur_search(&mut self) {
        self.keyboard_visible = false;
    }

    /// Replace the search text wholesale
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        if self.primary == PrimaryScreen::Browser && self.primary_interactive() {
            self.search.set_text(text);
        }
    }

    /// On-screen or physical keyboard input while the browser is up
    pub fn keyboard_event(&mut self, event: KeyboardEvent) -> Option<Transition> {
        if self.primary != PrimaryScreen::Browser || !self.primary_interactive() {
            return None;
        }
        match event {
            KeyboardEvent::Char(ch) => self.search.key(ch),
            KeyboardEvent::Delete => self.search.delete(),
            KeyboardEvent::Space => self.search.space(),
            KeyboardEvent::Enter => {
                let commit = self.search.commit();
                self.keyboard_visible = commit.keyboard_visible;
                self.viewer_address = Some(commit.address.clone());
                info!(address = %commit.address, "Search committed");
                return Some(Transition::SearchCommitted(commit.address));
            }
        }
        None
    }

    /// Cancel pending gestures before the surface goes away
    pub fn teardown(&mut self) -> Option<HoldToken> {
        self.swipe.cancel();
        self.release_hold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unlocked() -> Navigator {
        let mut nav = Navigator::default();
        let token = nav.press_hold().unwrap();
        nav.hold_elapsed(token);
        nav
    }

    fn swipe(nav: &mut Navigator, from: f32, to: f32) -> Option<Transition> {
        nav.pointer_down(from);
        nav.pointer_move(to);
        nav.pointer_up()
    }

    #[test]
    fn test_starts_locked() {
        let nav = Navigator::default();
        assert_eq!(nav.primary(), PrimaryScreen::Lock);
        assert!(!nav.overlay_visible());
        assert!(!nav.keyboard_visible());
        assert_eq!(nav.viewer_address(), None);
    }

    #[test]
    fn test_hold_unlocks() {
        let mut nav = Navigator::default();
        let token = nav.press_hold().unwrap();
        assert_eq!(nav.hold_elapsed(token), Some(Transition::Unlocked));
        assert_eq!(nav.primary(), PrimaryScreen::Home);
    }

    #[test]
    fn test_released_hold_does_not_fire() {
        let mut nav = Navigator::default();
        let token = nav.press_hold().unwrap();
        assert_eq!(nav.release_hold(), Some(token));
        assert_eq!(nav.hold_elapsed(token), None);
        assert_eq!(nav.primary(), PrimaryScreen::Lock);
    }

    #[test]
    fn test_repress_replaces_hold() {
        let mut nav = Navigator::default();
        let first = nav.press_hold().unwrap();
        let second = nav.press_hold().unwrap();
        assert_ne!(first, second);
        assert_eq!(nav.hold_elapsed(first), None, "old hold must not fire");
        assert_eq!(nav.hold_elapsed(second), Some(Transition::Unlocked));
        assert_eq!(nav.hold_elapsed(second), None, "fires once");
    }

    #[test]
    fn test_hold_ignored_when_unlocked() {
        let mut nav = unlocked();
        assert_eq!(nav.press_hold(), None);
    }

    #[test]
    fn test_launch_browser_from_home_only() {
        let mut nav = Navigator::default();
        assert_eq!(nav.launch_browser(), None);

        let mut nav = unlocked();
        assert_eq!(nav.launch_browser(), Some(Transition::BrowserOpened));
        assert_eq!(nav.primary(), PrimaryScreen::Browser);
        assert!(nav.keyboard_visible());
        assert_eq!(nav.viewer_address(), Some("about:blank"));
    }

    #[test]
    fn test_swipe_threshold_is_strict() {
        let mut nav = unlocked();
        assert_eq!(swipe(&mut nav, 300.0, 250.0), None, "exactly 50 does not lock");
        assert_eq!(nav.primary(), PrimaryScreen::Home);

        assert_eq!(swipe(&mut nav, 300.0, 249.0), Some(Transition::Locked));
        assert_eq!(nav.primary(), PrimaryScreen::Lock);
    }

    #[test]
    fn test_swipe_down_does_nothing() {
        let mut nav = unlocked();
        assert_eq!(swipe(&mut nav, 100.0, 400.0), None);
        assert_eq!(nav.primary(), PrimaryScreen::Home);
    }

    #[test]
    fn test_pointer_up_without_down() {
        let mut nav = unlocked();
        nav.pointer_move(0.0);
        assert_eq!(nav.pointer_up(), None);
    }

    #[test]
    fn test_lock_clears_browser_state() {
        let mut nav = unlocked();
        nav.launch_browser();
        nav.keyboard_event(KeyboardEvent::Char('a'));
        swipe(&mut nav, 500.0, 100.0);

        assert_eq!(nav.search().text(), "");
        assert!(!nav.keyboard_visible());
        assert_eq!(nav.viewer_address(), None);
    }

    #[test]
    fn test_overlay_blocks_primary_input() {
        let mut nav = unlocked();
        nav.open_camera();
        assert_eq!(swipe(&mut nav, 500.0, 100.0), None);
        assert_eq!(nav.launch_browser(), None);
        assert_eq!(nav.open_photos(), None);
        assert_eq!(nav.primary(), PrimaryScreen::Home);
    }

    #[test]
    fn test_overlay_blocks_hold() {
        let mut nav = Navigator::default();
        let token = nav.press_hold().unwrap();
        nav.open_camera();
        assert_eq!(nav.hold_elapsed(token), None);
        assert_eq!(nav.press_hold(), None);
        assert_eq!(nav.primary(), PrimaryScreen::Lock);
    }

    #[test]
    fn test_close_photos_reveals_home() {
        let mut nav = unlocked();
        assert_eq!(nav.open_photos(), Some(Transition::PhotosOpened));
        assert_eq!(nav.close_photos(), Some(Transition::PhotosClosed));
        assert_eq!(nav.primary(), PrimaryScreen::Home);
        assert!(!nav.overlay_visible());
    }

    #[test]
    fn test_enter_commits_and_hides_keyboard() {
        let mut nav = unlocked();
        nav.launch_browser();
        for ch in "cat".chars() {
            nav.keyboard_event(KeyboardEvent::Char(ch));
        }
        nav.keyboard_event(KeyboardEvent::Space);
        nav.keyboard_event(KeyboardEvent::Char('x'));
        nav.keyboard_event(KeyboardEvent::Delete);
        nav.keyboard_event(KeyboardEvent::Char('s'));

        let address = "https://www.google.com/search?q=cat%20s".to_string();
        assert_eq!(
            nav.keyboard_event(KeyboardEvent::Enter),
            Some(Transition::SearchCommitted(address.clone()))
        );
        assert!(!nav.keyboard_visible());
        assert_eq!(nav.viewer_address(), Some(address.as_str()));
    }

    #[test]
    fn test_keyboard_ignored_outside_browser() {
        let mut nav = unlocked();
        nav.keyboard_event(KeyboardEvent::Char('a'));
        assert_eq!(nav.search().text(), "");
    }

    #[test]
    fn test_teardown_cancels_hold() {
        let mut nav = Navigator::default();
        let token = nav.press_hold().unwrap();
        assert_eq!(nav.teardown(), Some(token));
        assert_eq!(nav.hold_elapsed(token), None);
    }
}
