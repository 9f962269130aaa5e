//! Board configuration with built-in defaults and optional JSON overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CLICK_SLOP_PX, DEFAULT_ERASER_SIZE, DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH, FORMATION_SPACING, GRID_SIZE, MAX_SCALE,
    MIN_OBJECT_SIZE, MIN_SCALE, STAMP_SCALE, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use crate::error::ConfigError;
use crate::input::WheelDelta;

/// Tunables for the board. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub grid_size: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub min_object_size: f64,
    pub click_slop_px: f64,
    pub formation_spacing: f64,
    pub stamp_scale: f64,
    pub default_pen_color: String,
    pub default_pen_width: f64,
    pub default_eraser_size: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            min_object_size: MIN_OBJECT_SIZE,
            click_slop_px: CLICK_SLOP_PX,
            formation_spacing: FORMATION_SPACING,
            stamp_scale: STAMP_SCALE,
            default_pen_color: DEFAULT_PEN_COLOR.to_string(),
            default_pen_width: DEFAULT_PEN_WIDTH,
            default_eraser_size: DEFAULT_ERASER_SIZE,
        }
    }
}

impl BoardConfig {
    /// Parse a JSON object of overrides on top of the defaults, then validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("grid_size", self.grid_size)?;
        positive("min_scale", self.min_scale)?;
        positive("max_scale", self.max_scale)?;
        positive("min_object_size", self.min_object_size)?;
        positive("formation_spacing", self.formation_spacing)?;
        positive("stamp_scale", self.stamp_scale)?;
        positive("default_pen_width", self.default_pen_width)?;
        positive("default_eraser_size", self.default_eraser_size)?;
        if !(self.click_slop_px.is_finite() && self.click_slop_px >= 0.0) {
            return Err(ConfigError::Invalid { field: "click_slop_px", reason: "must be zero or positive" });
        }
        if !(self.zoom_in_factor.is_finite() && self.zoom_in_factor > 1.0) {
            return Err(ConfigError::Invalid { field: "zoom_in_factor", reason: "must be greater than 1" });
        }
        if !(self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0) {
            return Err(ConfigError::Invalid { field: "zoom_out_factor", reason: "must be between 0 and 1" });
        }
        if self.min_scale > 1.0 || self.max_scale < 1.0 {
            return Err(ConfigError::Invalid { field: "min_scale", reason: "scale range must include 1.0" });
        }
        if self.default_pen_color.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "default_pen_color", reason: "must not be empty" });
        }
        Ok(())
    }

    /// Zoom multiplier for one wheel event: wheel down zooms out.
    #[must_use]
    pub fn wheel_factor(&self, delta: WheelDelta) -> f64 {
        if delta.dy > 0.0 { self.zoom_out_factor } else { self.zoom_in_factor }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: "must be a positive number" })
    }
}
