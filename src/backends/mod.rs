// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for video input
//!
//! The phone only needs three things from a camera: start a front-facing
//! stream, read the current frame, stop the stream. Everything above this
//! layer talks to the [`camera::VideoInput`] trait.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        Capture Session (photo pipeline)      │
//! └────────────────────┬────────────────────────┘
//!                      │ VideoInput
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌──────────────────┐  ┌────────────────┐   │
//! │  │ Virtual camera   │  │  Test fakes     │   │
//! │  │ (pattern, image) │  │                 │   │
//! │  └──────────────────┘  └────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: The input trait and shared frame types
//! - [`virtual_camera`]: Software inputs standing in for a device camera

pub mod camera;
pub mod virtual_camera;
