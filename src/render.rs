//! Rendering: draws the full scene to an immediate-mode 2D surface.
//!
//! [`Surface`] is the small subset of the `Canvas2D` API the board needs. The
//! browser host implements it over [`web_sys::CanvasRenderingContext2d`];
//! tests implement it with a recorder. This module receives read-only views of
//! the scene, viewport, and UI state and produces pixels. It never mutates
//! application state.
//!
//! Fallible surface calls propagate their error; the host decides what to do
//! with a failed frame.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use crate::assets::Bitmap;
use crate::config::BoardConfig;
use crate::consts::{
    ERASER_PREVIEW_COLOR, GRID_COLOR, MAX_GRID_LINES, SELECTION_COLOR, SELECTION_DASH_PX, SELECTION_LINE_PX,
    SELECTION_MARGIN_PX,
};
use crate::geometry::Bounds;
use crate::input::{Mode, UiState};
use crate::scene::{PenPath, Scene};
use crate::viewport::{Point, Viewport};

/// Immediate-mode 2D drawing surface.
pub trait Surface {
    type Error;

    /// Replace the current transform with the matrix `[a c e; b d f]`.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the transform is rejected.
    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), Self::Error>;
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: &str);
    fn set_line_join(&mut self, join: &str);
    /// # Errors
    ///
    /// Returns the backend error if the dash pattern cannot be set.
    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), Self::Error>;
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
    /// # Errors
    ///
    /// Returns the backend error for a negative radius.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Self::Error>;
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Draw `image` stretched to the given scene-space box.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the image cannot be drawn.
    fn draw_image(&mut self, image: &Bitmap, x: f64, y: f64, w: f64, h: f64) -> Result<(), Self::Error>;
}

/// Draw the full scene: grid, map, objects, paths, and tool overlays.
///
/// `viewport_w` and `viewport_h` are in screen pixels.
///
/// # Errors
///
/// Returns the surface's error if any fallible call fails.
pub fn draw<S: Surface>(
    surface: &mut S,
    scene: &Scene,
    viewport: &Viewport,
    ui: &UiState,
    viewport_w: f64,
    viewport_h: f64,
    config: &BoardConfig,
) -> Result<(), S::Error> {
    // Layer 1: clear in screen space, then switch to scene space.
    surface.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    surface.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    surface.set_transform(viewport.scale, 0.0, 0.0, viewport.scale, viewport.offset_x, viewport.offset_y)?;

    draw_grid(surface, viewport, viewport_w, viewport_h, config.grid_size);

    // Layer 2: map, then objects bottom to top.
    if let Some(map) = scene.map() {
        draw_bitmap(surface, &map.image, &map.bounds)?;
    }
    for obj in scene.objects() {
        draw_bitmap(surface, &obj.image, &obj.bounds)?;
    }

    // Layer 3: strokes.
    for path in scene.paths().iter().filter(|p| p.is_drawable()) {
        draw_path(surface, path);
    }

    // Layer 4: tool overlays.
    if ui.mode == Mode::Move {
        if let Some(bounds) = ui.selection.and_then(|sel| scene.bounds(sel)) {
            draw_selection(surface, bounds, viewport)?;
        }
    }
    if ui.mode == Mode::Eraser {
        draw_eraser_preview(surface, ui.erase_cursor, ui.tools.eraser_radius(), viewport)?;
    }

    Ok(())
}

/// Scene-space range of grid lines covering `[min, max]`, snapped outward to `step`.
///
/// Empty when the inputs are not finite, `step` is not positive, or more than
/// [`MAX_GRID_LINES`] lines would be needed.
#[must_use]
pub fn grid_lines(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite() && min.is_finite() && max.is_finite()) {
        return Vec::new();
    }
    let start = (min / step).floor() * step;
    let end = (max / step).ceil() * step;
    let span = (end - start) / step;
    if span > f64::from(MAX_GRID_LINES) {
        return Vec::new();
    }
    (0..=MAX_GRID_LINES)
        .take_while(|&i| f64::from(i) <= span)
        .map(|i| start + f64::from(i) * step)
        .collect()
}

fn draw_grid<S: Surface>(surface: &mut S, viewport: &Viewport, viewport_w: f64, viewport_h: f64, step: f64) {
    let top_left = viewport.to_scene(Point::new(0.0, 0.0));
    let bottom_right = viewport.to_scene(Point::new(viewport_w, viewport_h));
    let xs = grid_lines(top_left.x, bottom_right.x, step);
    let ys = grid_lines(top_left.y, bottom_right.y, step);
    let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) = (xs.first(), xs.last(), ys.first(), ys.last()) else {
        return;
    };

    surface.set_stroke_style(GRID_COLOR);
    surface.set_line_width(viewport.screen_dist_to_scene(1.0));

    for &x in &xs {
        surface.begin_path();
        surface.move_to(x, y0);
        surface.line_to(x, y1);
        surface.stroke();
    }
    for &y in &ys {
        surface.begin_path();
        surface.move_to(x0, y);
        surface.line_to(x1, y);
        surface.stroke();
    }
}

fn draw_bitmap<S: Surface>(surface: &mut S, image: &Bitmap, bounds: &Bounds) -> Result<(), S::Error> {
    surface.draw_image(image, bounds.x, bounds.y, bounds.width, bounds.height)
}

fn draw_path<S: Surface>(surface: &mut S, path: &PenPath) {
    let Some((first, rest)) = path.points.split_first() else {
        return;
    };
    surface.begin_path();
    surface.set_stroke_style(&path.color);
    surface.set_line_width(path.stroke_width);
    surface.set_line_cap("round");
    surface.set_line_join("round");
    surface.move_to(first.x, first.y);
    for p in rest {
        surface.line_to(p.x, p.y);
    }
    surface.stroke();
}

fn draw_selection<S: Surface>(surface: &mut S, bounds: &Bounds, viewport: &Viewport) -> Result<(), S::Error> {
    let margin = viewport.screen_dist_to_scene(SELECTION_MARGIN_PX);
    let dash = viewport.screen_dist_to_scene(SELECTION_DASH_PX);

    surface.set_stroke_style(SELECTION_COLOR);
    surface.set_line_width(viewport.screen_dist_to_scene(SELECTION_LINE_PX));
    surface.set_line_dash(&[dash, dash])?;
    surface.stroke_rect(
        bounds.x - margin,
        bounds.y - margin,
        bounds.width + margin * 2.0,
        bounds.height + margin * 2.0,
    );
    surface.set_line_dash(&[])
}

fn draw_eraser_preview<S: Surface>(
    surface: &mut S,
    center: Point,
    radius: f64,
    viewport: &Viewport,
) -> Result<(), S::Error> {
    surface.begin_path();
    surface.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
    surface.set_stroke_style(ERASER_PREVIEW_COLOR);
    surface.set_line_width(viewport.screen_dist_to_scene(1.0));
    surface.stroke();
    Ok(())
}
