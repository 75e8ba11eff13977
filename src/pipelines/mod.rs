// SPDX-License-Identifier: GPL-3.0-only

//! Processing pipelines for photo capture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │ Photo Store  │
//! │   (RGBA)     │     │  - Mirror         │     │ (data URI)   │
//! │              │     │  - RGBA→RGB       │     │              │
//! │              │     │  - JPEG encoding  │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`photo`]: Capture session, mirroring and still image encoding

pub mod photo;
