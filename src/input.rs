//! Input model: modes, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Mode` and `ToolSettings` capture what the user has picked in the toolbar.
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up, carrying the anchors needed to compute incremental deltas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::scene::Selection;
use crate::viewport::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Freehand drawing (default).
    #[default]
    Pen,
    /// Delete whole strokes under the cursor.
    Eraser,
    /// Place the current stamp on click.
    Stamp,
    /// Select, drag, and wheel-scale objects or the map.
    Move,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Eraser => "eraser",
            Self::Stamp => "stamp",
            Self::Move => "move",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pen" => Some(Self::Pen),
            "eraser" => Some(Self::Eraser),
            "stamp" => Some(Self::Stamp),
            "move" => Some(Self::Move),
            _ => None,
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Alt / Option key. Alt + primary drag pans the canvas.
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }

    /// Whether this press (with `modifiers`) grabs the canvas for panning.
    #[must_use]
    pub fn pans(self, modifiers: Modifiers) -> bool {
        self == Self::Middle || (self == Self::Primary && modifiers.alt)
    }
}

/// A keyboard key as reported by the browser (e.g. `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive = wheel down (away from the user).
    pub dy: f64,
}

/// Pen and eraser settings, written by the host toolbar and read at event time.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub pen_color: String,
    /// Pen stroke width in scene units.
    pub pen_width: f64,
    /// Eraser diameter in scene units.
    pub eraser_size: f64,
}

impl ToolSettings {
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            pen_color: config.default_pen_color.clone(),
            pen_width: config.default_pen_width,
            eraser_size: config.default_eraser_size,
        }
    }

    #[must_use]
    pub fn eraser_radius(&self) -> f64 {
        self.eraser_size / 2.0
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default())
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub mode: Mode,
    pub selection: Option<Selection>,
    pub tools: ToolSettings,
    /// Asset path of the stamp placed in `Stamp` mode.
    pub stamp: Option<String>,
    /// Last pointer position in screen space; anchors team placement.
    pub last_mouse: Point,
    /// Scene-space center of the eraser preview.
    pub erase_cursor: Point,
    /// Scene-space pointer position at the previous event. The selection in
    /// `Move` mode is translated by the delta from here.
    pub last_scene: Point,
    /// A wheel-scale of the selection happened since the last pointer-up;
    /// the selection stops following the pointer until then.
    pub scaling: bool,
}

/// Gesture tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Middle-drag or Alt-drag of the whole canvas.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// Pen stroke in progress; points go to the most recent path.
    Drawing,
    /// Eraser held down.
    Erasing,
    /// Move tool pressed on the selection.
    Dragging {
        /// Screen-space position of the pointer-down, for click detection.
        start_screen: Point,
    },
}
