//! Strategy planning board: a pannable, zoomable canvas for annotating game maps.
//!
//! Users load a map image as the background, stamp class icons (one at a time
//! or as a full six-player team formation), upload arbitrary images, and draw
//! freehand strokes that can be erased whole. All state lives in memory for
//! the lifetime of the page.
//!
//! The core is platform independent and tested natively. The [`web`] module
//! (wasm32 only) wires it to an `HtmlCanvasElement`: it forwards DOM events to
//! [`engine::EngineCore`], loads images asynchronously, and redraws through
//! [`render::draw`] whenever the engine returns [`engine::Action::RenderNeeded`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction state machine and toolbar operations ([`engine::EngineCore`]) |
//! | [`scene`] | Map, placed objects, and pen paths in z-order |
//! | [`viewport`] | Pan/zoom transform and screen/scene conversions |
//! | [`geometry`] | Bounds and point-to-segment distance |
//! | [`input`] | Modes, input event types, and the gesture state |
//! | [`render`] | Draws the scene to a [`render::Surface`] |
//! | [`assets`] | Image slots keyed by path |
//! | [`roster`] | Teams, player classes, and the team formation |
//! | [`config`] | Board tuning loaded from JSON |
//! | [`error`] | Configuration errors |
//! | [`consts`] | Shared numeric constants (zoom factors, colors, etc.) |

pub mod assets;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod render;
pub mod roster;
pub mod scene;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod web;
