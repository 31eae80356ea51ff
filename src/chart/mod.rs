//! Radar chart geometry.
//!
//! [`ChartGeometry`] owns the axes, the scale and every derived buffer. Each
//! mutator recomputes whatever it invalidates before returning, then signals
//! that a redraw is needed; drawing itself happens when the host asks for a
//! [`Scene`] or calls [`ChartGeometry::draw`].

pub mod axis;
pub mod layout;
pub mod projector;
pub mod rings;
pub mod scale;
pub mod scene;

use indexmap::IndexMap;
use std::f32::consts::PI;
use std::fmt;
use tracing::debug;

use crate::color::{GradientSampling, Rgb, Theme};
use crate::error::Result;
use crate::renderer::{draw_scene, Renderer, TextMeasurer};

pub use axis::AxisSet;
pub use layout::{Padding, Viewport};
pub use projector::{Point, VertexProjector};
pub use rings::{Ring, RingBuilder};
pub use scale::{ScaleMode, ScaleModel};
pub use scene::{
    label_anchor, AxisLine, DataPolygon, DataShape, GraphStyle, Label, RingMode, RingShape, Scene,
};

/// Stroke added to every ring so neighbouring bands overlap instead of leaving hairline gaps.
const RING_STROKE_OVERLAP: f32 = 2.0;

/// Visual options that don't affect the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub start_color: Rgb,
    pub end_color: Rgb,
    pub axis_color: Rgb,
    pub graph_color: Rgb,
    pub axis_width: f32,
    pub graph_width: f32,
    pub graph_style: GraphStyle,
    pub circles_only: bool,
    pub smooth_gradient: bool,
    pub text_size: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let colors = Theme::default().colors();
        Self {
            start_color: colors.start,
            end_color: colors.end,
            axis_color: colors.axis,
            graph_color: colors.graph,
            axis_width: 1.0,
            graph_width: 3.0,
            graph_style: GraphStyle::Stroke,
            circles_only: false,
            smooth_gradient: true,
            text_size: 15.0,
        }
    }
}

impl ChartStyle {
    pub fn with_theme(mut self, theme: Theme) -> Self {
        let colors = theme.colors();
        self.start_color = colors.start;
        self.end_color = colors.end;
        self.axis_color = colors.axis;
        self.graph_color = colors.graph;
        self
    }
}

pub struct ChartGeometry {
    axes: AxisSet,
    scale: ScaleModel,
    style: ChartStyle,
    viewport: Viewport,
    rings: Vec<Ring>,
    ring_vertices: Vec<Vec<Point>>,
    axis_vertices: Vec<Point>,
    data_vertices: Vec<Point>,
    redraw_pending: bool,
    redraw_listener: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for ChartGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartGeometry")
            .field("axes", &self.axes)
            .field("scale", &self.scale)
            .field("style", &self.style)
            .field("viewport", &self.viewport)
            .field("rings", &self.rings.len())
            .field("redraw_pending", &self.redraw_pending)
            .finish_non_exhaustive()
    }
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self::new(ChartStyle::default(), ScaleModel::default())
    }
}

impl ChartGeometry {
    pub fn new(style: ChartStyle, scale: ScaleModel) -> Self {
        let mut chart = Self {
            axes: AxisSet::new(),
            scale,
            style,
            viewport: Viewport::default(),
            rings: Vec::new(),
            ring_vertices: Vec::new(),
            axis_vertices: Vec::new(),
            data_vertices: Vec::new(),
            redraw_pending: false,
            redraw_listener: None,
        };
        chart.rebuild();
        chart
    }

    // ------------------------------------------------------------------
    // Redraw signalling
    // ------------------------------------------------------------------

    /// Register the sink notified once after every state change.
    pub fn on_redraw(&mut self, listener: impl FnMut() + 'static) {
        self.redraw_listener = Some(Box::new(listener));
    }

    /// Returns whether a redraw was requested since the last call, and clears it.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    fn request_redraw(&mut self) {
        self.redraw_pending = true;
        if let Some(listener) = self.redraw_listener.as_mut() {
            listener();
        }
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    fn rebuild(&mut self) {
        let builder = RingBuilder::new(
            self.style.start_color,
            self.style.end_color,
            GradientSampling::from_smooth(self.style.smooth_gradient),
        );
        self.rings = builder.build(&self.scale, self.viewport.pixel_radius);
        self.rebuild_vertices();
    }

    fn rebuild_vertices(&mut self) {
        let count = self.axes.len();
        let projector = VertexProjector::new(self.viewport.center);
        self.ring_vertices = self
            .rings
            .iter()
            .map(|ring| projector.project_uniform(ring.fixed_radius, count))
            .collect();
        self.axis_vertices = projector.project_uniform(self.viewport.pixel_radius, count);
        // Without a pixel budget there is nothing to scale into.
        let ratio = if self.viewport.pixel_radius > 0.0 {
            self.ratio()
        } else {
            0.0
        };
        self.data_vertices = projector.project_values(self.axes.values(), ratio);
        debug!(
            axes = count,
            rings = self.rings.len(),
            axis_max = self.scale.axis_max(),
            pixel_radius = self.viewport.pixel_radius,
            "rebuilt chart geometry"
        );
    }

    fn axes_changed(&mut self) {
        self.scale.refit(&self.axes);
        self.rebuild();
        self.request_redraw();
    }

    fn scale_changed(&mut self) {
        self.rebuild();
        self.request_redraw();
    }

    // ------------------------------------------------------------------
    // Axes
    // ------------------------------------------------------------------

    pub fn add_or_replace(&mut self, name: impl Into<String>, value: f32) -> Result<()> {
        self.axes.insert(name, value)?;
        self.axes_changed();
        Ok(())
    }

    /// Remove an axis; returns its value if it existed.
    pub fn remove(&mut self, name: &str) -> Option<f32> {
        let removed = self.axes.remove(name)?;
        self.axes_changed();
        Some(removed)
    }

    pub fn clear_axis(&mut self) {
        self.axes.clear();
        self.axes_changed();
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    /// Snapshot of the axes in angular order.
    pub fn axis(&self) -> IndexMap<String, f32> {
        self.axes.to_map()
    }

    /// Replace all axes, keeping the order of `axes`. Rejected as a whole on
    /// any invalid value.
    pub fn set_axis<I, K>(&mut self, axes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, f32)>,
        K: Into<String>,
    {
        self.axes = AxisSet::from_pairs(axes)?;
        self.axes_changed();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Scale
    // ------------------------------------------------------------------

    pub fn axis_max(&self) -> f32 {
        self.scale.axis_max()
    }

    /// Set the scale ceiling; turns auto-size off.
    pub fn set_axis_max(&mut self, axis_max: f32) -> Result<()> {
        self.scale.set_axis_max(axis_max)?;
        self.scale_changed();
        Ok(())
    }

    pub fn axis_tick(&self) -> f32 {
        self.scale.axis_tick()
    }

    pub fn set_axis_tick(&mut self, axis_tick: f32) -> Result<()> {
        self.scale.set_axis_tick(axis_tick)?;
        self.scale_changed();
        Ok(())
    }

    pub fn is_auto_size(&self) -> bool {
        self.scale.is_auto()
    }

    pub fn set_auto_size(&mut self, auto_size: bool) {
        self.scale.set_auto_size(auto_size, &self.axes);
        self.scale_changed();
    }

    pub fn scale(&self) -> &ScaleModel {
        &self.scale
    }

    /// Pixels per data unit.
    pub fn ratio(&self) -> f32 {
        self.scale.ratio(self.viewport.pixel_radius)
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scale_changed();
    }

    /// Fit the chart into a `width` x `height` drawing area.
    pub fn layout(&mut self, width: f32, height: f32, padding: Padding) {
        self.set_viewport(Viewport::fit(width, height, padding));
    }

    // ------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Replace every style option at once.
    pub fn set_style(&mut self, style: ChartStyle) {
        self.style = style;
        self.scale_changed();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.set_style(self.style.with_theme(theme));
    }

    pub fn start_color(&self) -> Rgb {
        self.style.start_color
    }

    pub fn set_start_color(&mut self, color: Rgb) {
        self.style.start_color = color;
        self.scale_changed();
    }

    pub fn end_color(&self) -> Rgb {
        self.style.end_color
    }

    pub fn set_end_color(&mut self, color: Rgb) {
        self.style.end_color = color;
        self.scale_changed();
    }

    pub fn is_smooth_gradient(&self) -> bool {
        self.style.smooth_gradient
    }

    pub fn set_smooth_gradient(&mut self, smooth: bool) {
        self.style.smooth_gradient = smooth;
        self.scale_changed();
    }

    pub fn axis_color(&self) -> Rgb {
        self.style.axis_color
    }

    pub fn set_axis_color(&mut self, color: Rgb) {
        self.style.axis_color = color;
        self.request_redraw();
    }

    pub fn graph_color(&self) -> Rgb {
        self.style.graph_color
    }

    pub fn set_graph_color(&mut self, color: Rgb) {
        self.style.graph_color = color;
        self.request_redraw();
    }

    pub fn axis_width(&self) -> f32 {
        self.style.axis_width
    }

    pub fn set_axis_width(&mut self, width: f32) {
        self.style.axis_width = width;
        self.request_redraw();
    }

    pub fn graph_width(&self) -> f32 {
        self.style.graph_width
    }

    pub fn set_graph_width(&mut self, width: f32) {
        self.style.graph_width = width;
        self.request_redraw();
    }

    pub fn graph_style(&self) -> GraphStyle {
        self.style.graph_style
    }

    pub fn set_graph_style(&mut self, style: GraphStyle) {
        self.style.graph_style = style;
        self.request_redraw();
    }

    pub fn is_circles_only(&self) -> bool {
        self.style.circles_only
    }

    pub fn set_circles_only(&mut self, circles_only: bool) {
        self.style.circles_only = circles_only;
        self.request_redraw();
    }

    pub fn text_size(&self) -> f32 {
        self.style.text_size
    }

    pub fn set_text_size(&mut self, text_size: f32) {
        self.style.text_size = text_size;
        self.request_redraw();
    }

    // ------------------------------------------------------------------
    // Geometry output
    // ------------------------------------------------------------------

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// One vertex buffer per ring, each with one vertex per axis.
    pub fn ring_vertices(&self) -> &[Vec<Point>] {
        &self.ring_vertices
    }

    /// Full-extent vertex of every axis.
    pub fn axis_vertices(&self) -> &[Point] {
        &self.axis_vertices
    }

    /// Scaled data vertex of every axis.
    pub fn data_vertices(&self) -> &[Point] {
        &self.data_vertices
    }

    pub fn ring_mode(&self) -> RingMode {
        RingMode::select(self.axes.len(), self.style.circles_only)
    }

    /// Resolve the current state into draw commands.
    pub fn scene<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> Scene {
        let count = self.axes.len();
        let center = self.viewport.center;
        let mode = self.ring_mode();

        let rings = match mode {
            RingMode::Circles => self
                .rings
                .iter()
                .map(|ring| RingShape::Circle {
                    center,
                    radius: ring.fixed_radius,
                    color: ring.color,
                    stroke_width: ring.width + RING_STROKE_OVERLAP,
                })
                .collect(),
            RingMode::Polygons => {
                // Polygon edges sit closer to the center than their vertices.
                let compensation = (PI / count as f32).cos();
                self.rings
                    .iter()
                    .zip(&self.ring_vertices)
                    .map(|(ring, points)| RingShape::Polygon {
                        points: points.clone(),
                        color: ring.color,
                        stroke_width: ring.width * compensation + RING_STROKE_OVERLAP,
                    })
                    .collect()
            }
        };

        let data = (count > 0).then(|| DataPolygon {
            shape: if count == 1 {
                DataShape::Point(center)
            } else {
                DataShape::Polygon(self.data_vertices.clone())
            },
            style: self.style.graph_style,
            color: self.style.graph_color,
            width: self.style.graph_width,
        });

        let axes = self
            .axes
            .names()
            .zip(&self.axis_vertices)
            .map(|(name, &vertex)| {
                let size = measurer.measure_text(name, self.style.text_size);
                AxisLine {
                    from: center,
                    to: vertex,
                    color: self.style.axis_color,
                    width: self.style.axis_width,
                    label: Label {
                        text: name.to_string(),
                        anchor: label_anchor(vertex, center, size),
                        font_size: self.style.text_size,
                    },
                }
            })
            .collect();

        Scene {
            mode,
            rings,
            data,
            axes,
        }
    }

    /// Paint the current state onto `renderer`.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let scene = self.scene(&*renderer);
        draw_scene(&scene, renderer);
    }
}
