//! Drawing surfaces the chart can be painted on.
//!
//! The chart core never owns a surface; it hands a resolved [`Scene`] to a
//! [`Renderer`] once per frame. Two surfaces ship with the crate: an SVG
//! document writer and an RGBA pixel [`Canvas`](canvas::Canvas) used by the
//! terminal viewer.

pub mod canvas;
pub mod svg;

use crate::chart::projector::Point;
use crate::chart::scene::{DataShape, GraphStyle, RingShape, Scene};
use crate::color::Rgb;

/// Text metrics, needed to anchor axis labels.
pub trait TextMeasurer {
    /// Returns the (width, height) of `text` at `font_size`.
    fn measure_text(&self, text: &str, font_size: f32) -> (f32, f32);
}

/// A drawing surface. Style is passed explicitly with every call.
pub trait Renderer: TextMeasurer {
    fn draw_circle(&mut self, center: Point, radius: f32, stroke: Rgb, stroke_width: f32);

    /// Closed path through `points`. A single point is a degenerate path.
    fn draw_closed_path(&mut self, points: &[Point], style: GraphStyle, color: Rgb, width: f32);

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width: f32);

    /// Draw `text` with its baseline-left corner at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Rgb);
}

/// Label color; the chart has no separate text color option.
pub const TEXT_COLOR: Rgb = Rgb::BLACK;

/// Replay a scene onto a renderer.
pub fn draw_scene<R: Renderer + ?Sized>(scene: &Scene, renderer: &mut R) {
    for ring in &scene.rings {
        match ring {
            RingShape::Circle {
                center,
                radius,
                color,
                stroke_width,
            } => renderer.draw_circle(*center, *radius, *color, *stroke_width),
            RingShape::Polygon {
                points,
                color,
                stroke_width,
            } => renderer.draw_closed_path(points, GraphStyle::Stroke, *color, *stroke_width),
        }
    }

    if let Some(data) = &scene.data {
        match &data.shape {
            DataShape::Polygon(points) => {
                renderer.draw_closed_path(points, data.style, data.color, data.width)
            }
            DataShape::Point(p) => {
                renderer.draw_closed_path(&[*p], data.style, data.color, data.width)
            }
        }
    }

    for axis in &scene.axes {
        renderer.draw_line(axis.from, axis.to, axis.color, axis.width);
        renderer.draw_text(
            &axis.label.text,
            axis.label.anchor.x,
            axis.label.anchor.y,
            axis.label.font_size,
            TEXT_COLOR,
        );
    }
}
