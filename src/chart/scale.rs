//! Data-unit scale of the chart: the axis maximum, ring spacing and auto-size mode.

use tracing::debug;

use super::axis::AxisSet;
use crate::error::{ChartError, Result};

/// Default ring count implied by `axis_tick = axis_max / 5`.
pub const DEFAULT_TICKS: f32 = 5.0;

pub const DEFAULT_AXIS_MAX: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    /// `axis_max` tracks the largest axis value.
    Auto,
    /// `axis_max` only changes through explicit assignment.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleModel {
    axis_max: f32,
    axis_tick: f32,
    mode: ScaleMode,
}

fn check_max(axis_max: f32) -> Result<()> {
    if axis_max.is_finite() && axis_max >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidAxisMax(axis_max))
    }
}

fn check_tick(axis_tick: f32) -> Result<()> {
    if axis_tick.is_finite() && axis_tick > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidAxisTick(axis_tick))
    }
}

impl Default for ScaleModel {
    fn default() -> Self {
        Self {
            axis_max: DEFAULT_AXIS_MAX,
            axis_tick: DEFAULT_AXIS_MAX / DEFAULT_TICKS,
            mode: ScaleMode::Auto,
        }
    }
}

impl ScaleModel {
    /// Create a scale; `axis_tick` defaults to `axis_max / 5`.
    pub fn new(axis_max: f32, axis_tick: Option<f32>, auto_size: bool) -> Result<Self> {
        check_max(axis_max)?;
        let axis_tick = axis_tick.unwrap_or(axis_max / DEFAULT_TICKS);
        check_tick(axis_tick)?;
        Ok(Self {
            axis_max,
            axis_tick,
            mode: if auto_size {
                ScaleMode::Auto
            } else {
                ScaleMode::Manual
            },
        })
    }

    pub fn axis_max(&self) -> f32 {
        self.axis_max
    }

    pub fn axis_tick(&self) -> f32 {
        self.axis_tick
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    pub fn is_auto(&self) -> bool {
        self.mode == ScaleMode::Auto
    }

    /// Explicitly assign the maximum. Always switches to manual mode.
    pub fn set_axis_max(&mut self, axis_max: f32) -> Result<()> {
        check_max(axis_max)?;
        self.mode = ScaleMode::Manual;
        self.axis_max = axis_max;
        Ok(())
    }

    pub fn set_axis_tick(&mut self, axis_tick: f32) -> Result<()> {
        check_tick(axis_tick)?;
        self.axis_tick = axis_tick;
        Ok(())
    }

    /// Switch mode; entering auto mode immediately re-fits to `axes`.
    pub fn set_auto_size(&mut self, auto_size: bool, axes: &AxisSet) {
        self.mode = if auto_size {
            ScaleMode::Auto
        } else {
            ScaleMode::Manual
        };
        self.refit(axes);
    }

    /// Re-evaluate after the axis values changed. Returns true if `axis_max` moved.
    pub fn refit(&mut self, axes: &AxisSet) -> bool {
        if self.mode != ScaleMode::Auto {
            return false;
        }
        match axes.max_value() {
            Some(max) if max != self.axis_max => {
                debug!(from = self.axis_max, to = max, "auto-size axis max");
                self.axis_max = max;
                true
            }
            _ => false,
        }
    }

    /// Pixels per data unit for the given pixel budget; 1 when either side is degenerate.
    pub fn ratio(&self, pixel_radius: f32) -> f32 {
        if pixel_radius > 0.0 && self.axis_max > 0.0 {
            pixel_radius / self.axis_max
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn axes(pairs: &[(&str, f32)]) -> AxisSet {
        AxisSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn tick_defaults_to_a_fifth_of_max() {
        let scale = ScaleModel::new(20.0, None, true).unwrap();
        assert_relative_eq!(scale.axis_tick(), 4.0);
    }

    #[test]
    fn zero_max_without_explicit_tick_is_invalid() {
        assert_eq!(
            ScaleModel::new(0.0, None, true),
            Err(ChartError::InvalidAxisTick(0.0))
        );
        assert!(ScaleModel::new(0.0, Some(1.0), true).is_ok());
    }

    #[test]
    fn rejected_tick_leaves_previous_value() {
        let mut scale = ScaleModel::new(20.0, Some(4.0), false).unwrap();
        assert_eq!(scale.set_axis_tick(0.0), Err(ChartError::InvalidAxisTick(0.0)));
        assert!(scale.set_axis_tick(-3.0).is_err());
        assert!(scale.set_axis_tick(f32::INFINITY).is_err());
        assert_relative_eq!(scale.axis_tick(), 4.0);
    }

    #[test]
    fn explicit_max_forces_manual() {
        let mut scale = ScaleModel::new(20.0, None, true).unwrap();
        scale.set_axis_max(50.0).unwrap();
        assert_eq!(scale.mode(), ScaleMode::Manual);
        assert!(!scale.refit(&axes(&[("a", 3.0)])));
        assert_relative_eq!(scale.axis_max(), 50.0);

        assert!(scale.set_axis_max(-1.0).is_err());
        assert_relative_eq!(scale.axis_max(), 50.0);
    }

    #[test]
    fn enabling_auto_refits_immediately() {
        let mut scale = ScaleModel::new(20.0, None, false).unwrap();
        scale.set_auto_size(true, &axes(&[("a", 5.0), ("b", 15.0)]));
        assert_relative_eq!(scale.axis_max(), 15.0);
    }

    #[test]
    fn empty_axes_keep_last_max() {
        let mut scale = ScaleModel::new(20.0, None, true).unwrap();
        scale.refit(&axes(&[("a", 12.0)]));
        assert!(!scale.refit(&AxisSet::new()));
        assert_relative_eq!(scale.axis_max(), 12.0);
    }

    #[test]
    fn ratio_falls_back_to_one() {
        let scale = ScaleModel::new(20.0, None, false).unwrap();
        assert_relative_eq!(scale.ratio(100.0), 5.0);
        assert_relative_eq!(scale.ratio(0.0), 1.0);
        let zero = ScaleModel::new(0.0, Some(1.0), false).unwrap();
        assert_relative_eq!(zero.ratio(100.0), 1.0);
    }
}
