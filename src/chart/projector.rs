//! Polar projection of axis magnitudes onto the drawing plane.

use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Convert polar coordinates to cartesian coordinates around `center`.
/// `angle` in radians, `radius` is the distance from center.
#[inline]
pub fn polar_to_point(center: Point, angle: f32, radius: f32) -> Point {
    Point::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    )
}

/// Places one vertex per axis around a center, the first axis pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexProjector {
    pub center: Point,
    pub start_angle: f32,
}

impl VertexProjector {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            start_angle: -FRAC_PI_2,
        }
    }

    /// Angle of axis `index` out of `count`.
    #[inline]
    pub fn angle(&self, index: usize, count: usize) -> f32 {
        self.start_angle + index as f32 * TAU / count.max(1) as f32
    }

    pub fn project(&self, magnitude: f32, index: usize, count: usize) -> Point {
        polar_to_point(self.center, self.angle(index, count), magnitude)
    }

    /// The same magnitude on every axis: ring vertices and axis endpoints.
    pub fn project_uniform(&self, magnitude: f32, count: usize) -> Vec<Point> {
        (0..count)
            .map(|i| self.project(magnitude, i, count))
            .collect()
    }

    /// One vertex per value, each scaled by `ratio` pixels per data unit.
    pub fn project_values<I>(&self, values: I, ratio: f32) -> Vec<Point>
    where
        I: ExactSizeIterator<Item = f32>,
    {
        let count = values.len();
        values
            .enumerate()
            .map(|(i, v)| self.project(v * ratio, i, count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_axis_points_up() {
        let p = VertexProjector::new(Point::new(50.0, 50.0));
        let v = p.project(10.0, 0, 4);
        assert_abs_diff_eq!(v.x, 50.0, epsilon = 1e-4);
        assert_abs_diff_eq!(v.y, 40.0, epsilon = 1e-4);

        // clockwise in screen space: second of four axes points right
        let v = p.project(10.0, 1, 4);
        assert_abs_diff_eq!(v.x, 60.0, epsilon = 1e-4);
        assert_abs_diff_eq!(v.y, 50.0, epsilon = 1e-4);
    }

    #[test]
    fn angles_cover_a_full_turn() {
        let p = VertexProjector::new(Point::default());
        for count in 1..12 {
            let steps: f32 = (0..count)
                .map(|i| {
                    let next = p.angle(i + 1, count);
                    next - p.angle(i, count)
                })
                .sum();
            assert_abs_diff_eq!(steps, TAU, epsilon = 1e-4);
        }
    }

    #[test]
    fn uniform_projection_is_equidistant() {
        let center = Point::new(3.0, -2.0);
        let p = VertexProjector::new(center);
        let points = p.project_uniform(25.0, 7);
        assert_eq!(points.len(), 7);
        for pt in points {
            assert_abs_diff_eq!(pt.distance(center), 25.0, epsilon = 1e-3);
        }
        assert!(p.project_uniform(25.0, 0).is_empty());
    }

    #[test]
    fn values_are_scaled_by_ratio() {
        let p = VertexProjector::new(Point::default());
        let points = p.project_values([1.0, 2.0, 0.0].into_iter(), 10.0);
        assert_abs_diff_eq!(points[0].distance(Point::default()), 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(points[1].distance(Point::default()), 20.0, epsilon = 1e-4);
        assert_eq!(points[2], Point::default());
    }
}
