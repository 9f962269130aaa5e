//! Shared numeric constants for the board crate.
//!
//! These are the built-in defaults; [`crate::config::BoardConfig`] can
//! override the tunable ones at startup.

// ── Viewport ────────────────────────────────────────────────────

/// Scale multiplier applied per wheel notch towards the user (zoom in).
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Scale multiplier applied per wheel notch away from the user (zoom out).
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Lower bound on the viewport scale.
pub const MIN_SCALE: f64 = 0.05;

/// Upper bound on the viewport scale.
pub const MAX_SCALE: f64 = 40.0;

// ── Scene ───────────────────────────────────────────────────────

/// Smallest width or height an object may be scaled down to, in scene units.
pub const MIN_OBJECT_SIZE: f64 = 2.0;

/// Fraction of a bitmap's natural size used when stamping it.
pub const STAMP_SCALE: f64 = 0.5;

/// Distance between neighbouring players of a placed formation, in scene units.
pub const FORMATION_SPACING: f64 = 40.0;

// ── Input ───────────────────────────────────────────────────────

/// A move gesture whose net displacement stays under this (screen pixels,
/// per axis) counts as a click rather than a drag.
pub const CLICK_SLOP_PX: f64 = 5.0;

/// Default pen color.
pub const DEFAULT_PEN_COLOR: &str = "#ffffff";

/// Default pen stroke width in scene units.
pub const DEFAULT_PEN_WIDTH: f64 = 3.0;

/// Default eraser diameter in scene units.
pub const DEFAULT_ERASER_SIZE: f64 = 15.0;

// ── Rendering ───────────────────────────────────────────────────

/// Background grid spacing in scene units.
pub const GRID_SIZE: f64 = 50.0;

/// Background grid line color.
pub const GRID_COLOR: &str = "rgba(80, 80, 80, 0.2)";

/// Upper bound on grid lines per axis; beyond it the grid is not drawn.
pub const MAX_GRID_LINES: u32 = 10_000;

/// Selection outline color.
pub const SELECTION_COLOR: &str = "#4285f4";

/// Selection outline width in screen pixels.
pub const SELECTION_LINE_PX: f64 = 2.0;

/// Gap between an object and its selection outline, in screen pixels.
pub const SELECTION_MARGIN_PX: f64 = 2.0;

/// Selection dash segment length in screen pixels.
pub const SELECTION_DASH_PX: f64 = 5.0;

/// Eraser preview circle color.
pub const ERASER_PREVIEW_COLOR: &str = "#ffffff";
