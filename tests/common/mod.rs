// SPDX-License-Identifier: GPL-3.0-only

//! Shared helpers for model-level tests

#![allow(dead_code)]

use phone_display::app::{Message, PhoneModel, PrimaryScreen};
use phone_display::backends::virtual_camera::VirtualCamera;
use phone_display::errors::StorageError;
use phone_display::storage::{KeyValueStore, MemoryKeyValueStore};
use phone_display::Config;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

pub type TestPhone<S = MemoryKeyValueStore> = PhoneModel<VirtualCamera, S>;

/// Phone over an in-memory namespace with the test pattern camera
pub fn phone(config: Config) -> (TestPhone, UnboundedReceiver<Message>, tempfile::TempDir) {
    phone_with(config, MemoryKeyValueStore::new())
}

pub fn phone_with<S: KeyValueStore>(
    config: Config,
    backend: S,
) -> (TestPhone<S>, UnboundedReceiver<Message>, tempfile::TempDir) {
    let exports = tempfile::tempdir().unwrap();
    let input = VirtualCamera::from_config(&config);
    let (model, rx) = PhoneModel::new(config, input, backend, exports.path().join("exports"));
    (model, rx, exports)
}

/// Let spawned timer tasks run
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Feed every delivered deferred message back into the model
pub fn drain<S: KeyValueStore>(phone: &mut TestPhone<S>, rx: &mut UnboundedReceiver<Message>) {
    while let Ok(message) = rx.try_recv() {
        phone.update(message);
    }
}

/// Advance the paused clock and deliver what fired
pub async fn advance<S: KeyValueStore>(
    phone: &mut TestPhone<S>,
    rx: &mut UnboundedReceiver<Message>,
    by: Duration,
) {
    tokio::time::advance(by).await;
    settle().await;
    drain(phone, rx);
}

/// Hold the fingerprint long enough to unlock. Needs a paused tokio clock.
pub async fn unlock<S: KeyValueStore>(phone: &mut TestPhone<S>, rx: &mut UnboundedReceiver<Message>) {
    phone.update(Message::FingerprintPressed);
    advance(phone, rx, Duration::from_millis(1001)).await;
    phone.update(Message::FingerprintReleased);
    assert_eq!(phone.navigator().primary(), PrimaryScreen::Home);
}

/// Drag upwards by `distance` pixels
pub fn swipe_up<S: KeyValueStore>(phone: &mut TestPhone<S>, distance: f32) {
    phone.update(Message::PointerDown(600.0));
    phone.update(Message::PointerMove(600.0 - distance / 2.0));
    phone.update(Message::PointerMove(600.0 - distance));
    phone.update(Message::PointerUp);
}

/// Namespace whose writes always fail
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryKeyValueStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read-only file system".into()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read-only file system".into()))
    }
}
