//! Zoom and the screen-to-scene coordinate transform.
//!
//! The board surface is drawn with a uniform scale anchored at its top-left
//! corner, so a scene point `p` appears on screen at `p * zoom`. Pointer
//! events report unscaled screen pixels; dividing by the zoom factor keeps a
//! dragged element glued to the cursor at every zoom level.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{WHEEL_ZOOM_FACTOR, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// A point in either screen or scene space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Zoom factor of the board surface, always within `ZOOM_MIN..=ZOOM_MAX`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Zoom {
    /// Clamp `factor` into the allowed range. Non-finite input resets to 1.0.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        if !factor.is_finite() {
            return Self::default();
        }
        Self(factor.clamp(ZOOM_MIN, ZOOM_MAX))
    }

    #[must_use]
    pub fn factor(self) -> f64 {
        self.0
    }

    /// One step-control activation towards larger.
    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + ZOOM_STEP)
    }

    /// One step-control activation towards smaller.
    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - ZOOM_STEP)
    }

    /// Apply a modifier-gated wheel gesture. Scrolling down (`dy > 0`) zooms out.
    #[must_use]
    pub fn wheel(self, dy: f64) -> Self {
        Self::new(self.0 - dy * WHEEL_ZOOM_FACTOR)
    }

    /// Scene-space displacement for a pointer that moved from `from` to `to` on screen.
    #[must_use]
    pub fn screen_delta_to_scene(self, from: Point, to: Point) -> Point {
        Point {
            x: (to.x - from.x) / self.0,
            y: (to.y - from.y) / self.0,
        }
    }

    /// Convert a surface-relative screen point to scene coordinates.
    #[must_use]
    pub fn screen_to_scene(self, screen: Point) -> Point {
        Point { x: screen.x / self.0, y: screen.y / self.0 }
    }
}
