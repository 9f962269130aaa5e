//! Geometry helpers: axis-aligned bounds and point-to-segment distance.
//!
//! Everything here works in scene space. Hit-testing placed objects uses
//! [`Bounds::contains`]; the eraser uses [`distance_to_polyline`].

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::viewport::Point;

/// Axis-aligned bounding box with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// A `width` x `height` box whose center is `center`.
    #[must_use]
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self { x: center.x - width / 2.0, y: center.y - height / 2.0, width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `p` lies inside the box. All four edges are inclusive.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Scale both dimensions by `factor` about the box center.
    ///
    /// Neither dimension shrinks below `min_size`; when the smaller side hits
    /// the floor the factor is reduced so the aspect ratio is kept. Returns
    /// `false` (and leaves the box untouched) for a non-positive factor.
    pub fn scale_about_center(&mut self, factor: f64, min_size: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let smallest = self.width.min(self.height);
        let factor = if factor < 1.0 && smallest > 0.0 && smallest * factor < min_size {
            factor.max((min_size / smallest).min(1.0))
        } else {
            factor
        };
        let center = self.center();
        self.width *= factor;
        self.height *= factor;
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
        true
    }
}

/// Distance from `p` to the segment `a`–`b`.
///
/// Projects `p` onto the infinite line through the segment, clamps the
/// projection parameter to `[0, 1]`, and measures to the clamped point. A
/// zero-length segment measures to `a`.
#[must_use]
pub fn point_to_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    };
    let cx = a.x + t * abx;
    let cy = a.y + t * aby;
    (p.x - cx).hypot(p.y - cy)
}

/// Minimum distance from `p` to any segment between consecutive `points`.
///
/// `None` when there are fewer than two points (no segments).
#[must_use]
pub fn distance_to_polyline(p: Point, points: &[Point]) -> Option<f64> {
    points
        .windows(2)
        .map(|seg| point_to_segment_distance(p, seg[0], seg[1]))
        .reduce(f64::min)
}
