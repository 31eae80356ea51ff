//! Pixel renderer.
//!
//! Shapes are rasterized into an owned RGBA buffer ([`Canvas`]). Text is not
//! rasterized: the canvas has no font, so labels are collected and left to the
//! output backend, which knows its own glyph grid.

use super::{Renderer, TextMeasurer};
use crate::chart::projector::Point;
use crate::chart::scene::GraphStyle;
use crate::color::Rgb;

/// Owned RGBA pixel buffer, 4 bytes per pixel in **RGBA** order.
pub struct Canvas {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height * 4],
            width,
            height,
        }
    }

    /// Resize the canvas, reallocating only when the buffer is too small.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let needed = width * height * 4;
        if self.data.len() < needed {
            self.data.resize(needed, 0);
        }
    }

    /// Clear the canvas to fully transparent black.
    #[inline]
    pub fn clear(&mut self) {
        let len = self.width * self.height * 4;
        self.data[..len].fill(0);
    }

    /// Fill the whole canvas with an opaque color.
    pub fn fill(&mut self, color: Rgb) {
        let len = self.width * self.height * 4;
        for px in self.data[..len].chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    /// Write an opaque pixel; out-of-bounds coordinates are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: isize, y: isize, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        self.data[idx] = color.r;
        self.data[idx + 1] = color.g;
        self.data[idx + 2] = color.b;
        self.data[idx + 3] = 255;
    }

    /// Read the RGBA values at (x, y).
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8, u8) {
        let idx = (y * self.width + x) * 4;
        if x < self.width && idx + 3 < self.data.len() {
            (self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3])
        } else {
            (0, 0, 0, 0)
        }
    }

    /// Pixels whose center lies inside `[lo, hi]` along the clamped bounding box.
    fn span(lo: f32, hi: f32, limit: usize) -> std::ops::Range<isize> {
        let start = lo.floor().max(0.0) as isize;
        let end = (hi.ceil() + 1.0).min(limit as f32).max(0.0) as isize;
        start..end
    }

    /// Stroke a circle outline of the given width.
    pub fn stroke_circle(&mut self, center: Point, radius: f32, width: f32, color: Rgb) {
        let half = (width / 2.0).max(0.5);
        let outer = radius + half;
        let inner = (radius - half).max(0.0);
        for y in Self::span(center.y - outer, center.y + outer, self.height) {
            for x in Self::span(center.x - outer, center.x + outer, self.width) {
                let d = Point::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                if d >= inner && d <= outer {
                    self.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Stroke a segment as a capsule of the given width.
    pub fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgb) {
        let half = (width / 2.0).max(0.5);
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len2 = dx * dx + dy * dy;
        let ys = Self::span(from.y.min(to.y) - half, from.y.max(to.y) + half, self.height);
        let xs = Self::span(from.x.min(to.x) - half, from.x.max(to.x) + half, self.width);
        for y in ys {
            for x in xs.clone() {
                let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len2 > 0.0 {
                    (((p.x - from.x) * dx + (p.y - from.y) * dy) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let nearest = Point::new(from.x + dx * t, from.y + dy * t);
                if p.distance(nearest) <= half {
                    self.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Fill a polygon using the even-odd rule.
    pub fn fill_polygon(&mut self, points: &[Point], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        let mut crossings = Vec::with_capacity(points.len());
        for y in Self::span(min_y, max_y, self.height) {
            let sy = y as f32 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= sy) != (b.y <= sy) {
                    crossings.push(a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                for x in Self::span(pair[0], pair[1] - 1.0, self.width) {
                    let sx = x as f32 + 0.5;
                    if sx >= pair[0] && sx <= pair[1] {
                        self.put_pixel(x, y, color);
                    }
                }
            }
        }
    }

    pub fn stroke_polygon(&mut self, points: &[Point], width: f32, color: Rgb) {
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.stroke_line(*a, b, width, color);
        }
    }
}

/// A label left for the output backend to place.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasLabel {
    pub text: String,
    /// Baseline-left corner, in canvas pixels.
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
}

/// Draws chart scenes into a [`Canvas`].
pub struct CanvasRenderer<'a> {
    canvas: &'a mut Canvas,
    glyph_size: (f32, f32),
    labels: Vec<CanvasLabel>,
}

impl<'a> CanvasRenderer<'a> {
    /// `glyph_size` is the (width, height) of one character in canvas pixels.
    pub fn new(canvas: &'a mut Canvas, glyph_size: (f32, f32)) -> Self {
        Self {
            canvas,
            glyph_size,
            labels: Vec::new(),
        }
    }

    pub fn into_labels(self) -> Vec<CanvasLabel> {
        self.labels
    }
}

impl TextMeasurer for CanvasRenderer<'_> {
    fn measure_text(&self, text: &str, _font_size: f32) -> (f32, f32) {
        let (w, h) = self.glyph_size;
        (text.chars().count() as f32 * w, h)
    }
}

impl Renderer for CanvasRenderer<'_> {
    fn draw_circle(&mut self, center: Point, radius: f32, stroke: Rgb, stroke_width: f32) {
        self.canvas.stroke_circle(center, radius, stroke_width, stroke);
    }

    fn draw_closed_path(&mut self, points: &[Point], style: GraphStyle, color: Rgb, width: f32) {
        match points {
            [] => {}
            [p] => {
                if style.strokes() {
                    self.canvas.stroke_line(*p, *p, width, color);
                }
            }
            _ => {
                if style.fills() {
                    self.canvas.fill_polygon(points, color);
                }
                if style.strokes() {
                    self.canvas.stroke_polygon(points, width, color);
                }
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        self.canvas.stroke_line(from, to, width, color);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _font_size: f32, color: Rgb) {
        self.labels.push(CanvasLabel {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }
}
