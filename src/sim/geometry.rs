//! Geometry primitives for the drilling course
//!
//! Everything here is total over finite inputs: containment tests and the
//! distance field used to size the hard-mode clearance ring.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

/// A solid circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
        }
    }
}

/// An axis-aligned ellipse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Vec2,
    /// Semi-axes (a along x, b along y)
    pub semi_axes: Vec2,
}

impl Ellipse {
    pub const fn new(x: f32, y: f32, a: f32, b: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            semi_axes: Vec2::new(a, b),
        }
    }
}

/// Axis-aligned rectangle (origin is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Half-open containment: [x, x + w) × [y, y + h)
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.origin + self.size;
        p.x >= self.origin.x && p.x < max.x && p.y >= self.origin.y && p.y < max.y
    }
}

/// Scene extents plus the surface line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    pub ground_level: f32,
}

/// Strictly inside: points exactly on the rim are outside
#[inline]
pub fn point_in_circle(p: Vec2, circle: &Circle) -> bool {
    p.distance_squared(circle.center) < circle.radius * circle.radius
}

/// Inside or on the rim
#[inline]
pub fn point_in_ellipse(p: Vec2, ellipse: &Ellipse) -> bool {
    let d = p - ellipse.center;
    let a = ellipse.semi_axes.x;
    let b = ellipse.semi_axes.y;
    (d.x * d.x) / (a * a) + (d.y * d.y) / (b * b) <= 1.0
}

/// Discretized ellipse rim, sampled once and queried many times
#[derive(Debug, Clone)]
pub struct EllipseOutline {
    points: Vec<Vec2>,
}

impl EllipseOutline {
    /// Sample `n` points starting at the top of the ellipse and sweeping a full turn
    pub fn sample(ellipse: &Ellipse, n: usize) -> Self {
        let Ellipse { center, semi_axes } = *ellipse;
        let start = -FRAC_PI_2;

        let points = (0..n)
            .map(|i| {
                let t = start + TAU * i as f32 / n as f32;
                Vec2::new(
                    center.x - semi_axes.x * t.cos(),
                    center.y + semi_axes.y * t.sin(),
                )
            })
            .collect();

        Self { points }
    }

    /// Minimum distance from `p` to any sampled rim point (`f32::INFINITY` if empty)
    pub fn distance_to(&self, p: Vec2) -> f32 {
        self.points
            .iter()
            .map(|q| q.distance_squared(p))
            .fold(f32::INFINITY, f32::min)
            .sqrt()
    }
}

/// Distance from `p` to the closest thing the drill can hit in hard mode
///
/// Minimum of the four world edges (the top edge is the surface line) and the
/// sampled water rim.
pub fn nearest_boundary_distance(p: Vec2, bounds: &WorldBounds, water: &EllipseOutline) -> f32 {
    let left = p.x;
    let right = bounds.width - p.x;
    let surface = p.y - bounds.ground_level;
    let bottom = bounds.height - p.y;

    [left, right, surface, bottom, water.distance_to(p)]
        .into_iter()
        .fold(f32::INFINITY, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: WorldBounds = WorldBounds {
        width: 600.0,
        height: 400.0,
        ground_level: 100.0,
    };

    #[test]
    fn test_circle_center_inside() {
        let c = Circle::new(175.0, 250.0, 30.0);
        assert!(point_in_circle(c.center, &c));
    }

    #[test]
    fn test_zero_radius_circle_is_empty() {
        let c = Circle::new(10.0, 10.0, 0.0);
        assert!(!point_in_circle(c.center, &c));
    }

    #[test]
    fn test_circle_rim_is_outside() {
        let c = Circle::new(175.0, 250.0, 30.0);
        assert!(!point_in_circle(Vec2::new(205.0, 250.0), &c));
        assert!(!point_in_circle(Vec2::new(175.0, 220.0), &c));
        assert!(point_in_circle(Vec2::new(204.9, 250.0), &c));
    }

    #[test]
    fn test_ellipse_rim_is_inside() {
        let e = Ellipse::new(300.0, 100.0, 200.0, 100.0);
        assert!(point_in_ellipse(Vec2::new(500.0, 100.0), &e));
        assert!(point_in_ellipse(Vec2::new(300.0, 200.0), &e));
        assert!(!point_in_ellipse(Vec2::new(500.1, 100.0), &e));
    }

    #[test]
    fn test_rect_half_open() {
        let r = Rect::new(540.0, 80.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(540.0, 80.0)));
        assert!(r.contains(Vec2::new(559.9, 99.9)));
        assert!(!r.contains(Vec2::new(560.0, 90.0)));
        assert!(!r.contains(Vec2::new(550.0, 100.0)));
    }

    #[test]
    fn test_outline_sample_count_and_start() {
        let e = Ellipse::new(300.0, 100.0, 200.0, 100.0);
        let outline = EllipseOutline::sample(&e, 1000);
        assert_eq!(outline.points.len(), 1000);
        // First sample sits at the top of the ellipse
        assert!(outline.distance_to(Vec2::new(300.0, 0.0)) < 1e-3);
    }

    #[test]
    fn test_outline_distance_on_rim_is_small() {
        let e = Ellipse::new(300.0, 100.0, 200.0, 100.0);
        let outline = EllipseOutline::sample(&e, 1000);
        // Bottom of the ellipse is one of the samples
        assert!(outline.distance_to(Vec2::new(300.0, 200.0)) < 1e-2);
        // Far below the rim
        let d = outline.distance_to(Vec2::new(300.0, 250.0));
        assert!((d - 50.0).abs() < 0.1);
    }

    #[test]
    fn test_empty_outline_is_infinitely_far() {
        let e = Ellipse::new(0.0, 0.0, 1.0, 1.0);
        let outline = EllipseOutline::sample(&e, 0);
        assert_eq!(outline.distance_to(Vec2::ZERO), f32::INFINITY);
    }

    #[test]
    fn test_nearest_boundary_picks_closest_edge() {
        let e = Ellipse::new(300.0, 100.0, 200.0, 100.0);
        let outline = EllipseOutline::sample(&e, 1000);

        // Near the left edge, deep below the water
        assert!((nearest_boundary_distance(Vec2::new(5.0, 300.0), &BOUNDS, &outline) - 5.0).abs() < 1e-4);
        // Near the bottom
        assert!((nearest_boundary_distance(Vec2::new(300.0, 395.0), &BOUNDS, &outline) - 5.0).abs() < 1e-4);
        // Just under the riverbed
        let d = nearest_boundary_distance(Vec2::new(300.0, 210.0), &BOUNDS, &outline);
        assert!((d - 10.0).abs() < 0.1);
    }

    proptest! {
        #[test]
        fn prop_circle_axis_rim_is_outside(
            cx in -500i32..500, cy in -500i32..500, r in 1i32..200,
        ) {
            let c = Circle::new(cx as f32, cy as f32, r as f32);
            let (cx, cy, r) = (cx as f32, cy as f32, r as f32);
            prop_assert!(!point_in_circle(Vec2::new(cx + r, cy), &c));
            prop_assert!(!point_in_circle(Vec2::new(cx, cy - r), &c));
            prop_assert!(point_in_circle(Vec2::new(cx, cy), &c));
        }

        #[test]
        fn prop_ellipse_axis_rim_is_inside(
            cx in -500i32..500, cy in -500i32..500, a in 1i32..300, b in 1i32..300,
        ) {
            let e = Ellipse::new(cx as f32, cy as f32, a as f32, b as f32);
            prop_assert!(point_in_ellipse(Vec2::new((cx + a) as f32, cy as f32), &e));
            prop_assert!(point_in_ellipse(Vec2::new(cx as f32, (cy - b) as f32), &e));
        }

        #[test]
        fn prop_nearest_boundary_never_exceeds_edges(
            x in 0.0f32..600.0, y in 100.0f32..400.0,
        ) {
            let e = Ellipse::new(300.0, 100.0, 200.0, 100.0);
            let outline = EllipseOutline::sample(&e, 200);
            let p = Vec2::new(x, y);
            let d = nearest_boundary_distance(p, &BOUNDS, &outline);
            prop_assert!(d <= x);
            prop_assert!(d <= 600.0 - x);
            prop_assert!(d <= y - 100.0);
            prop_assert!(d <= 400.0 - y);
            prop_assert!(d <= outline.distance_to(p));
        }
    }
}
