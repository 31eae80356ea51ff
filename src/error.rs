//! Error types for chart configuration.
//!
//! Geometry itself never fails; only configuration that would make it
//! undefined is rejected, and a rejected call leaves the chart untouched.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("axis tick must be a positive number, got {0}")]
    InvalidAxisTick(f32),

    #[error("axis max must be a non-negative number, got {0}")]
    InvalidAxisMax(f32),

    #[error("value for axis '{name}' must be a non-negative number, got {value}")]
    InvalidAxisValue { name: String, value: f32 },

    #[error("unknown graph style: {0} (expected stroke, fill or stroke-and-fill)")]
    UnknownGraphStyle(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("invalid color '{0}': expected a hex code like #22737b")]
    InvalidColor(String),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
