//! Standalone SVG document output.

use std::fmt::Write;

use super::{Renderer, TextMeasurer};
use crate::chart::projector::Point;
use crate::chart::scene::GraphStyle;
use crate::color::Rgb;

/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_EM: f32 = 0.6;
/// Cap height as a fraction of the font size.
const CAP_HEIGHT_EM: f32 = 0.7;

/// Format a coordinate with at most three decimals and no trailing zeros.
fn fmt_number(v: f32) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{:.3}", (v * 1000.0).round() / 1000.0);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn path_data(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{},{} ", cmd, fmt_number(p.x), fmt_number(p.y));
    }
    d.push('Z');
    d
}

/// Collects draw calls into SVG elements.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    width: f32,
    height: f32,
    background: Option<Rgb>,
    body: String,
}

impl SvgRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: None,
            body: String::new(),
        }
    }

    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    /// Finish the document.
    pub fn finish(self) -> String {
        let w = fmt_number(self.width);
        let h = fmt_number(self.height);
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        if let Some(bg) = self.background {
            let _ = writeln!(out, r#"  <rect width="100%" height="100%" fill="{bg}"/>"#);
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl TextMeasurer for SvgRenderer {
    fn measure_text(&self, text: &str, font_size: f32) -> (f32, f32) {
        (
            text.chars().count() as f32 * font_size * CHAR_WIDTH_EM,
            font_size * CAP_HEIGHT_EM,
        )
    }
}

impl Renderer for SvgRenderer {
    fn draw_circle(&mut self, center: Point, radius: f32, stroke: Rgb, stroke_width: f32) {
        let _ = writeln!(
            self.body,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            fmt_number(center.x),
            fmt_number(center.y),
            fmt_number(radius.max(0.0)),
            stroke,
            fmt_number(stroke_width),
        );
    }

    fn draw_closed_path(&mut self, points: &[Point], style: GraphStyle, color: Rgb, width: f32) {
        if points.is_empty() {
            return;
        }
        let fill = if style.fills() {
            color.to_hex()
        } else {
            "none".to_string()
        };
        let stroke = if style.strokes() {
            format!(
                r#" stroke="{}" stroke-width="{}" stroke-linejoin="round""#,
                color,
                fmt_number(width)
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            self.body,
            r#"  <path d="{}" fill="{}"{}/>"#,
            path_data(points),
            fill,
            stroke
        );
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb, width: f32) {
        let _ = writeln!(
            self.body,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            fmt_number(from.x),
            fmt_number(from.y),
            fmt_number(to.x),
            fmt_number(to.y),
            color,
            fmt_number(width),
        );
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Rgb) {
        let _ = writeln!(
            self.body,
            r#"  <text x="{}" y="{}" font-family="sans-serif" font-size="{}" fill="{}">{}</text>"#,
            fmt_number(x),
            fmt_number(y),
            fmt_number(font_size),
            color,
            escape_text(text),
        );
    }
}
