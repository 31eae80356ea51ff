//! Render-intent payload: everything a renderer needs for one frame, already
//! resolved to pixels and colors.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::projector::Point;
use crate::color::Rgb;
use crate::error::ChartError;

/// Paint style of the data polygon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GraphStyle {
    #[default]
    Stroke,
    Fill,
    StrokeAndFill,
}

impl GraphStyle {
    pub fn name(&self) -> &'static str {
        match self {
            GraphStyle::Stroke => "stroke",
            GraphStyle::Fill => "fill",
            GraphStyle::StrokeAndFill => "stroke-and-fill",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            GraphStyle::Stroke => GraphStyle::Fill,
            GraphStyle::Fill => GraphStyle::StrokeAndFill,
            GraphStyle::StrokeAndFill => GraphStyle::Stroke,
        }
    }

    pub fn strokes(&self) -> bool {
        matches!(self, GraphStyle::Stroke | GraphStyle::StrokeAndFill)
    }

    pub fn fills(&self) -> bool {
        matches!(self, GraphStyle::Fill | GraphStyle::StrokeAndFill)
    }
}

impl fmt::Display for GraphStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GraphStyle {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "stroke" => Ok(GraphStyle::Stroke),
            "fill" => Ok(GraphStyle::Fill),
            "stroke-and-fill" | "strokeandfill" => Ok(GraphStyle::StrokeAndFill),
            _ => Err(ChartError::UnknownGraphStyle(s.to_string())),
        }
    }
}

/// How reference rings are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingMode {
    Circles,
    Polygons,
}

impl RingMode {
    /// Polygons need at least three axes to enclose an area.
    pub fn select(axis_count: usize, circles_only: bool) -> Self {
        if axis_count < 3 || circles_only {
            RingMode::Circles
        } else {
            RingMode::Polygons
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RingShape {
    Circle {
        center: Point,
        radius: f32,
        color: Rgb,
        stroke_width: f32,
    },
    Polygon {
        points: Vec<Point>,
        color: Rgb,
        stroke_width: f32,
    },
}

/// Text placed with its baseline-left corner at `anchor`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Point,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLine {
    pub from: Point,
    pub to: Point,
    pub color: Rgb,
    pub width: f32,
    pub label: Label,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataShape {
    /// Closed path through one vertex per axis.
    Polygon(Vec<Point>),
    /// Fewer than two axes collapse to the chart center.
    Point(Point),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPolygon {
    pub shape: DataShape,
    pub style: GraphStyle,
    pub color: Rgb,
    pub width: f32,
}

/// Draw order is rings, then the data polygon, then axes with labels on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub mode: RingMode,
    pub rings: Vec<RingShape>,
    pub data: Option<DataPolygon>,
    pub axes: Vec<AxisLine>,
}

/// Place a label so the text falls away from the center.
///
/// Left of (or on) the center line the text ends at the vertex; below the
/// center it hangs beneath the vertex. `size` is the measured (width, height).
pub fn label_anchor(vertex: Point, center: Point, size: (f32, f32)) -> Point {
    let (width, height) = size;
    let x = if vertex.x > center.x {
        vertex.x
    } else {
        vertex.x - width
    };
    let y = if vertex.y > center.y {
        vertex.y + height
    } else {
        vertex.y
    };
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_mode_selection() {
        assert_eq!(RingMode::select(0, false), RingMode::Circles);
        assert_eq!(RingMode::select(2, false), RingMode::Circles);
        assert_eq!(RingMode::select(3, false), RingMode::Polygons);
        assert_eq!(RingMode::select(5, true), RingMode::Circles);
    }

    #[test]
    fn labels_fall_away_from_center() {
        let c = Point::new(100.0, 100.0);
        let size = (30.0, 10.0);
        // lower right: anchored at vertex, pushed down by height
        assert_eq!(label_anchor(Point::new(150.0, 150.0), c, size), Point::new(150.0, 160.0));
        // upper left: shifted left by width, baseline at vertex
        assert_eq!(label_anchor(Point::new(50.0, 50.0), c, size), Point::new(20.0, 50.0));
    }

    #[test]
    fn graph_style_parsing() {
        assert_eq!("stroke_and_fill".parse::<GraphStyle>(), Ok(GraphStyle::StrokeAndFill));
        assert_eq!("Fill".parse::<GraphStyle>(), Ok(GraphStyle::Fill));
        assert!(matches!(
            "dashed".parse::<GraphStyle>(),
            Err(ChartError::UnknownGraphStyle(_))
        ));
        assert_eq!(GraphStyle::StrokeAndFill.next(), GraphStyle::Stroke);
    }
}
