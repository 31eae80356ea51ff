//! Radar (spider) chart geometry.
//!
//! The [`chart`] module turns a set of named axis values into concentric
//! rings, axis spokes and a data polygon. [`renderer`] paints the result onto
//! an SVG document or a pixel canvas.

pub mod chart;
pub mod color;
pub mod config;
#[cfg(feature = "terminal")]
pub mod display;
pub mod error;
pub mod renderer;

pub use chart::{ChartGeometry, ChartStyle, GraphStyle, Padding, Point, RingMode, Scene};
pub use color::{Rgb, Theme};
pub use error::{ChartError, Result};
