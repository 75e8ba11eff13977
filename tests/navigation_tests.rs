// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for screen navigation driven through the phone model

mod common;

use common::{advance, phone, settle, swipe_up, unlock};
use phone_display::app::{KeyboardEvent, Message, PrimaryScreen};
use phone_display::Config;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_hold_just_under_threshold_does_not_unlock() {
    let (mut phone, mut rx, _dir) = phone(Config::default());

    phone.update(Message::FingerprintPressed);
    advance(&mut phone, &mut rx, Duration::from_millis(999)).await;
    assert_eq!(
        phone.navigator().primary(),
        PrimaryScreen::Lock,
        "999ms must not unlock"
    );

    advance(&mut phone, &mut rx, Duration::from_millis(2)).await;
    assert_eq!(phone.navigator().primary(), PrimaryScreen::Home);
}

#[tokio::test(start_paused = true)]
async fn test_release_before_threshold_cancels_unlock() {
    let (mut phone, mut rx, _dir) = phone(Config::default());

    phone.update(Message::FingerprintPressed);
    advance(&mut phone, &mut rx, Duration::from_millis(500)).await;
    phone.update(Message::FingerprintReleased);
    advance(&mut phone, &mut rx, Duration::from_secs(5)).await;

    assert_eq!(phone.navigator().primary(), PrimaryScreen::Lock);
}

#[tokio::test(start_paused = true)]
async fn test_repress_restarts_hold() {
    let (mut phone, mut rx, _dir) = phone(Config::default());

    phone.update(Message::FingerprintPressed);
    advance(&mut phone, &mut rx, Duration::from_millis(600)).await;
    phone.update(Message::FingerprintPressed);
    advance(&mut phone, &mut rx, Duration::from_millis(600)).await;
    assert_eq!(
        phone.navigator().primary(),
        PrimaryScreen::Lock,
        "holds must not stack"
    );

    advance(&mut phone, &mut rx, Duration::from_millis(401)).await;
    assert_eq!(phone.navigator().primary(), PrimaryScreen::Home);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_pending_hold() {
    let (mut phone, mut rx, _dir) = phone(Config::default());

    phone.update(Message::FingerprintPressed);
    phone.shutdown();
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;

    assert!(rx.try_recv().is_err(), "no message after shutdown");
    assert_eq!(phone.navigator().primary(), PrimaryScreen::Lock);
}

#[tokio::test(start_paused = true)]
async fn test_swipe_threshold_through_model() {
    let (mut phone, mut rx, _dir) = phone(Config::default());
    unlock(&mut phone, &mut rx).await;

    swipe_up(&mut phone, 50.0);
    assert_eq!(phone.navigator().primary(), PrimaryScreen::Home);

    swipe_up(&mut phone, 51.0);
    assert_eq!(phone.navigator().primary(), PrimaryScreen::Lock);
}

#[tokio::test(start_paused = true)]
async fn test_browser_search_then_lock_resets() {
    let (mut phone, mut rx, _dir) = phone(Config::default());
    unlock(&mut phone, &mut rx).await;

    phone.update(Message::LaunchBrowser);
    assert!(phone.navigator().keyboard_visible());
    assert_eq!(phone.navigator().viewer_address(), Some("about:blank"));

    for ch in "rust lang".chars() {
        let event = if ch == ' ' {
            KeyboardEvent::Space
        } else {
            KeyboardEvent::Char(ch)
        };
        phone.update(Message::Keyboard(event));
    }
    phone.update(Message::Keyboard(KeyboardEvent::Enter));
    assert_eq!(
        phone.navigator().viewer_address(),
        Some("https://www.google.com/search?q=rust%20lang")
    );
    assert!(!phone.navigator().keyboard_visible());
    assert_eq!(phone.navigator().search().text(), "rust lang");

    swipe_up(&mut phone, 200.0);
    assert_eq!(phone.navigator().primary(), PrimaryScreen::Lock);
    assert_eq!(phone.navigator().search().text(), "");
    assert_eq!(phone.navigator().viewer_address(), None);
    assert!(!phone.navigator().keyboard_visible());
}

#[tokio::test(start_paused = true)]
async fn test_whitespace_search_goes_blank() {
    let (mut phone, mut rx, _dir) = phone(Config::default());
    unlock(&mut phone, &mut rx).await;
    phone.update(Message::LaunchBrowser);

    phone.update(Message::SearchTextChanged("   ".into()));
    phone.update(Message::Keyboard(KeyboardEvent::Enter));
    assert_eq!(phone.navigator().viewer_address(), Some("about:blank"));
}

#[tokio::test(start_paused = true)]
async fn test_padded_search_is_trimmed_and_hides_keyboard() {
    let (mut phone, mut rx, _dir) = phone(Config::default());
    unlock(&mut phone, &mut rx).await;
    phone.update(Message::LaunchBrowser);

    phone.update(Message::SearchFocused);
    assert!(phone.navigator().keyboard_visible());
    phone.update(Message::SearchTextChanged("  hello world  ".into()));
    phone.update(Message::Keyboard(KeyboardEvent::Enter));
    assert_eq!(
        phone.navigator().viewer_address(),
        Some("https://www.google.com/search?q=hello%20world")
    );
    assert!(!phone.navigator().keyboard_visible());
}

#[tokio::test(start_paused = true)]
async fn test_configured_search_url() {
    let config = Config {
        search_url: "https://search.example/find".into(),
        ..Config::default()
    };
    let (mut phone, mut rx, _dir) = phone(config);
    unlock(&mut phone, &mut rx).await;
    phone.update(Message::LaunchBrowser);

    phone.update(Message::SearchTextChanged("a&b".into()));
    phone.update(Message::Keyboard(KeyboardEvent::Enter));
    assert_eq!(
        phone.navigator().viewer_address(),
        Some("https://search.example/find?q=a%26b")
    );
}

#[tokio::test(start_paused = true)]
async fn test_overlay_suppresses_swipe() {
    let (mut phone, mut rx, _dir) = phone(Config::default());
    unlock(&mut phone, &mut rx).await;

    phone.update(Message::OpenPhotos);
    swipe_up(&mut phone, 300.0);
    assert!(phone.navigator().photos_visible());
    assert_eq!(phone.navigator().primary(), PrimaryScreen::Home);

    phone.update(Message::ClosePhotos);
    assert!(!phone.navigator().overlay_visible());
    assert_eq!(
        phone.navigator().primary(),
        PrimaryScreen::Home,
        "closing photos reveals home"
    );
}

#[tokio::test(start_paused = true)]
async fn test_swipe_started_under_overlay_does_not_lock_after_close() {
    let (mut phone, mut rx, _dir) = phone(Config::default());
    unlock(&mut phone, &mut rx).await;

    phone.update(Message::OpenCamera);
    phone.update(Message::PointerDown(600.0));
    phone.update(Message::CloseCamera);
    phone.update(Message::PointerMove(100.0));
    phone.update(Message::PointerUp);

    assert_eq!(phone.navigator().primary(), PrimaryScreen::Home);
}

#[test]
fn test_camera_reachable_from_lock_screen() {
    let (mut phone, _rx, _dir) = phone(Config::default());
    phone.update(Message::OpenCamera);
    assert!(phone.navigator().camera_visible());
    phone.update(Message::CloseCamera);
    assert_eq!(phone.navigator().primary(), PrimaryScreen::Lock);
}

#[test]
fn test_browser_not_reachable_from_lock_screen() {
    let (mut phone, _rx, _dir) = phone(Config::default());
    phone.update(Message::LaunchBrowser);
    phone.update(Message::OpenPhotos);
    assert_eq!(phone.navigator().primary(), PrimaryScreen::Lock);
    assert!(!phone.navigator().overlay_visible());
}
