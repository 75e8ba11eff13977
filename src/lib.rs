// SPDX-License-Identifier: GPL-3.0-only

//! Phone Display - a simulated phone in the terminal
//!
//! Lock screen with a timed fingerprint unlock, a home screen, a search pane,
//! a front camera that stores photos, and a gallery over the stored photos.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Screen navigation, search, gallery and the message-driven model
//! - [`backends`]: Video input abstraction and the virtual front camera
//! - [`pipelines`]: Photo capture session, mirroring and encoding
//! - [`storage`]: Photo persistence over a key/value namespace
//! - [`config`]: User configuration handling
//! - [`terminal`]: ratatui front-end
//!
//! # Example
//!
//! ```no_run
//! use phone_display::app::{Message, PhoneModel};
//! use phone_display::backends::virtual_camera::VirtualCamera;
//! use phone_display::storage::MemoryKeyValueStore;
//! use phone_display::Config;
//!
//! let config = Config::default();
//! let input = VirtualCamera::from_config(&config);
//! let (mut phone, _deferred) =
//!     PhoneModel::new(config, input, MemoryKeyValueStore::new(), "/tmp".into());
//! phone.update(Message::OpenCamera);
//! phone.update(Message::CapturePhoto);
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipelines;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use app::{Message, PhoneModel, PrimaryScreen};
pub use config::Config;
pub use constants::PhotoQuality;
pub use errors::{AppError, AppResult};
