//! Concentric reference bands.

use crate::color::{GradientSampling, Rgb};

use super::scale::ScaleModel;

/// Tolerance for snapping a tick quotient to an integer, in f32 ULPs.
const TICK_SNAP_ULPS: f32 = 4.0;

/// A band bounded by `radius - width` and `radius`, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f32,
    pub width: f32,
    /// Radius of the band's center line, where its stroke is drawn.
    pub fixed_radius: f32,
    pub color: Rgb,
}

impl Ring {
    pub fn new(radius: f32, width: f32, color: Rgb) -> Self {
        Self {
            radius,
            width,
            fixed_radius: radius - width / 2.0,
            color,
        }
    }
}

/// Builds the ring sequence for a scale and pixel budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBuilder {
    pub start_color: Rgb,
    pub end_color: Rgb,
    pub sampling: GradientSampling,
}

impl RingBuilder {
    pub fn new(start_color: Rgb, end_color: Rgb, sampling: GradientSampling) -> Self {
        Self {
            start_color,
            end_color,
            sampling,
        }
    }

    /// Number of rings for the scale: one per tick, at least one, and never
    /// more than one per pixel of `pixel_radius`.
    pub fn ring_count(scale: &ScaleModel, pixel_radius: f32) -> usize {
        if pixel_radius <= 0.0 || scale.axis_max() <= 0.0 {
            return 1;
        }
        // pixel_radius / tick_pixels, with the ratio cancelled out.
        let ticks = scale.axis_max() / scale.axis_tick();
        // Only rounding error from the division is snapped; 10.00005 still means 11.
        let nearest = ticks.round();
        let ticks = if (ticks - nearest).abs() <= nearest * f32::EPSILON * TICK_SNAP_ULPS {
            nearest
        } else {
            ticks.ceil()
        };
        let limit = (pixel_radius.floor() as usize).max(1);
        (ticks as usize).clamp(1, limit)
    }

    /// Rings ordered innermost to outermost. The last ring's outer edge is
    /// always exactly `pixel_radius`.
    pub fn build(&self, scale: &ScaleModel, pixel_radius: f32) -> Vec<Ring> {
        let count = Self::ring_count(scale, pixel_radius);
        if count == 1 {
            return vec![Ring::new(pixel_radius, pixel_radius, self.start_color)];
        }

        // Widened when the count is bounded by the pixel budget.
        let tick_pixels =
            (scale.axis_tick() * scale.ratio(pixel_radius)).max(pixel_radius / count as f32);
        let mut rings: Vec<Ring> = (0..count - 1)
            .map(|i| {
                Ring::new(
                    tick_pixels * (i + 1) as f32,
                    tick_pixels,
                    self.sampling
                        .sample(self.start_color, self.end_color, i, count),
                )
            })
            .collect();

        // Pin the outer edge to the budget instead of accumulating tick drift.
        let previous = rings[count - 2].radius;
        rings.push(Ring::new(
            pixel_radius,
            pixel_radius - previous,
            self.end_color,
        ));
        rings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const START: Rgb = Rgb::new(0x5f, 0x9c, 0xa1);
    const END: Rgb = Rgb::new(0xc3, 0xe3, 0xe5);

    fn builder() -> RingBuilder {
        RingBuilder::new(START, END, GradientSampling::Smooth)
    }

    fn scale(max: f32, tick: f32) -> ScaleModel {
        ScaleModel::new(max, Some(tick), false).unwrap()
    }

    #[test]
    fn evenly_divided_scale() {
        let rings = builder().build(&scale(20.0, 4.0), 100.0);
        let radii: Vec<f32> = rings.iter().map(|r| r.radius).collect();
        assert_eq!(radii, [20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(rings[0].color, START);
        assert_eq!(rings[4].color, END);
        assert_relative_eq!(rings[0].fixed_radius, 10.0);
    }

    #[test]
    fn uneven_tick_shrinks_outer_ring() {
        // 10 / 3 -> 4 rings at 30, 60, 90 and a 10px outer ring
        let rings = builder().build(&scale(10.0, 3.0), 100.0);
        assert_eq!(rings.len(), 4);
        assert_relative_eq!(rings[2].radius, 90.0, epsilon = 1e-4);
        assert_eq!(rings[3].radius, 100.0);
        assert_relative_eq!(rings[3].width, 10.0, epsilon = 1e-4);
        assert_relative_eq!(rings[3].fixed_radius, 95.0, epsilon = 1e-4);
    }

    #[test]
    fn outer_radius_is_exact_for_awkward_ticks() {
        for (max, tick, px) in [(7.0, 0.3, 123.4), (1.0, 0.07, 333.3), (99.0, 9.9, 17.0)] {
            let rings = builder().build(&scale(max, tick), px);
            let last = rings.last().unwrap();
            assert_eq!(last.radius, px);
            assert_eq!(last.color, END);
            assert!(rings.windows(2).all(|w| w[0].radius < w[1].radius));
        }
    }

    #[test]
    fn float_noise_does_not_add_a_sliver_ring() {
        // 99 / 9.9 is 10 in exact arithmetic but not in f32
        assert_eq!(RingBuilder::ring_count(&scale(99.0, 9.9), 17.0), 10);
    }

    #[test]
    fn fractional_tick_quotient_rounds_up() {
        assert_eq!(RingBuilder::ring_count(&scale(10.00005, 1.0), 100.0), 11);
        assert_eq!(RingBuilder::ring_count(&scale(10.5, 1.0), 100.0), 11);
    }

    #[test]
    fn tiny_tick_is_bounded_by_pixel_budget() {
        let rings = builder().build(&scale(20.0, 1e-12), 100.0);
        assert_eq!(rings.len(), 100);
        assert_relative_eq!(rings[0].radius, 1.0, epsilon = 1e-4);
        assert_relative_eq!(rings[98].radius, 99.0, epsilon = 1e-3);
        assert_eq!(rings[99].radius, 100.0);
        assert_eq!(rings[99].color, END);

        // sub-pixel budgets still get their single ring
        assert_eq!(RingBuilder::ring_count(&scale(20.0, 1e-12), 0.5), 1);
    }

    #[test]
    fn tick_larger_than_max_gives_single_ring() {
        let rings = builder().build(&scale(5.0, 10.0), 80.0);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].radius, 80.0);
        assert_eq!(rings[0].width, 80.0);
        assert_eq!(rings[0].color, START);
    }

    #[test]
    fn zero_budget_and_zero_max_are_single_ring() {
        let rings = builder().build(&scale(20.0, 4.0), 0.0);
        assert_eq!(rings, vec![Ring::new(0.0, 0.0, START)]);

        let rings = builder().build(&scale(0.0, 4.0), 50.0);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].radius, 50.0);
    }

    #[test]
    fn two_rings_use_both_endpoint_colors() {
        let rings = builder().build(&scale(10.0, 5.0), 40.0);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].color, START);
        assert_eq!(rings[1].color, END);
        assert_relative_eq!(rings[1].width, 20.0);
    }
}
