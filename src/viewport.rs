#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// A point in either screen or scene space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan/zoom transform between screen pixels and scene units.
///
/// `offset_x` / `offset_y` are in screen pixels.
/// `scale` is screen pixels per scene unit (1.0 = no zoom) and always stays
/// inside `[min_scale, max_scale]`.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    pub(crate) min_scale: f64,
    pub(crate) max_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, scale: 1.0, min_scale: MIN_SCALE, max_scale: MAX_SCALE }
    }
}

impl Viewport {
    /// Identity viewport with custom scale limits.
    ///
    /// Callers are expected to pass `0 < min_scale <= 1.0 <= max_scale`;
    /// [`crate::config::BoardConfig::validate`] checks that.
    #[must_use]
    pub fn with_limits(min_scale: f64, max_scale: f64) -> Self {
        Self { min_scale, max_scale, ..Self::default() }
    }

    /// Convert a screen-space point to scene coordinates.
    #[must_use]
    pub fn to_scene(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a scene-space point to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, scene: Point) -> Point {
        Point {
            x: scene.x * self.scale + self.offset_x,
            y: scene.y * self.scale + self.offset_y,
        }
    }

    /// Convert a screen-space distance (pixels) to a scene-space distance.
    #[must_use]
    pub fn screen_dist_to_scene(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Multiply the scale by `factor`, keeping the scene point under `screen` fixed.
    ///
    /// Non-finite or non-positive factors are ignored. The resulting scale is
    /// clamped to the viewport's limits.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let focus = self.to_scene(screen);
        self.scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        self.offset_x = screen.x - focus.x * self.scale;
        self.offset_y = screen.y - focus.y * self.scale;
    }

    /// Translate the view by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Move the view so `scene` sits at the center of a `width` x `height` viewport.
    pub fn center_on(&mut self, scene: Point, width: f64, height: f64) {
        self.offset_x = width * 0.5 - scene.x * self.scale;
        self.offset_y = height * 0.5 - scene.y * self.scale;
    }
}
