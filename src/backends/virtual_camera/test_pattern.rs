// SPDX-License-Identifier: GPL-3.0-only

//! Animated test pattern
//!
//! The pattern is deliberately asymmetric: a solid marker sits in the top-left
//! corner and the gradient runs left to right, so a mirrored frame is easy to
//! tell apart from an unmirrored one.

use crate::constants::virtual_camera::{PATTERN_HEIGHT, PATTERN_PERIOD, PATTERN_WIDTH};
use image::{Rgba, RgbaImage};
use std::time::Duration;

/// Size of the top-left marker square
const MARKER_SIZE: u32 = 40;

/// Render the pattern at `elapsed` since stream start
pub fn render_test_pattern(elapsed: Duration) -> RgbaImage {
    let phase = (elapsed.as_millis() % PATTERN_PERIOD.as_millis()) as f32
        / PATTERN_PERIOD.as_millis() as f32;
    let bar_y = (phase * PATTERN_HEIGHT as f32) as u32;

    RgbaImage::from_fn(PATTERN_WIDTH, PATTERN_HEIGHT, |x, y| {
        if x < MARKER_SIZE && y < MARKER_SIZE {
            return Rgba([230, 40, 40, 255]);
        }
        if y.abs_diff(bar_y) < 6 {
            return Rgba([240, 240, 240, 255]);
        }
        let r = (x * 255 / PATTERN_WIDTH) as u8;
        let b = (y * 255 / PATTERN_HEIGHT) as u8;
        Rgba([r, 90, b, 255])
    })
}
