//! Drawing-area measurement handed to the chart by its host.

use serde::{Deserialize, Serialize};

use super::projector::Point;

/// Insets excluded from the drawing area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const fn uniform(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

/// Usable radius and center of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub center: Point,
    pub pixel_radius: f32,
}

impl Viewport {
    pub fn new(center: Point, pixel_radius: f32) -> Self {
        Self {
            center,
            pixel_radius: pixel_radius.max(0.0),
        }
    }

    /// Fit the largest circle into a `width` x `height` area minus `padding`.
    pub fn fit(width: f32, height: f32, padding: Padding) -> Self {
        let usable_w = width - padding.left - padding.right;
        let usable_h = height - padding.top - padding.bottom;
        let center = Point::new(
            padding.left + usable_w / 2.0,
            padding.top + usable_h / 2.0,
        );
        Self::new(center, usable_w.min(usable_h).max(0.0) * 0.5)
    }
}
