// SPDX-License-Identifier: GPL-3.0-only

//! Phone state and behaviour
//!
//! This module contains everything the phone does independent of how it is
//! drawn. The front-end turns input into [`Message`]s, feeds them to
//! [`PhoneModel::update`], and renders from the model's accessors.
//!
//! # Architecture
//!
//! - `navigator`: Lock/Home/Browser plus the camera and photos overlays
//! - `search`: Search text and viewer address
//! - `keyboard`: On-screen keyboard layout
//! - `gallery`: Photo selection, delete, export
//! - `timer`: Cancellable delayed messages
//! - `status_bar`: Clock, date, battery text
//! - `state`: `PhoneModel` and `Message`
//! - `update`: Message handling

pub mod gallery;
pub mod keyboard;
pub mod navigator;
pub mod search;
mod state;
pub mod status_bar;
pub mod timer;
mod update;

pub use gallery::{ExportedPhoto, GalleryController};
pub use keyboard::KeyboardEvent;
pub use navigator::{HoldToken, Navigator, PrimaryScreen, Transition};
pub use search::{SearchCommit, SearchInputBridge, encode_uri_component};
pub use state::{Effect, Message, Notice, NoticeKind, PhoneModel};
pub use timer::DeferredAction;
