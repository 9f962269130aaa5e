use log::{debug, warn};

use crate::assets::AssetCache;
use crate::config::BoardConfig;
use crate::input::{Button, InputState, Key, Mode, Modifiers, ToolSettings, UiState, WheelDelta};
use crate::roster::{self, Team, FORMATION};
use crate::scene::{PlacedObject, Scene, Selection};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The scene or view changed; redraw before returning control.
    RenderNeeded,
    /// The active mode changed; reflect it on the toolbar.
    ModeChanged(Mode),
    /// Start loading the image at this path and report back through
    /// [`EngineCore::on_image_loaded`] or [`EngineCore::on_image_failed`].
    LoadImage(String),
}

/// Synchronous yes/no gate in front of destructive operations.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

const CLEAR_PATHS_PROMPT: &str = "Are you sure you want to clear all drawing paths?";
const CLEAR_ALL_PROMPT: &str = "Are you sure you want to clear everything?";

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from the browser host so it can be tested natively.
pub struct EngineCore {
    pub scene: Scene,
    pub viewport: Viewport,
    pub ui: UiState,
    pub input: InputState,
    pub assets: AssetCache,
    pub config: BoardConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pending_map: Option<String>,
    pending_uploads: Vec<String>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(BoardConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from an already validated config.
    #[must_use]
    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            scene: Scene::new(),
            viewport: Viewport::with_limits(config.min_scale, config.max_scale),
            ui: UiState { tools: ToolSettings::from_config(&config), ..UiState::default() },
            input: InputState::default(),
            assets: AssetCache::new(),
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            pending_map: None,
            pending_uploads: Vec::new(),
        }
    }

    // --- Viewport ---

    /// Update the canvas size in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport_width = width;
        self.viewport_height = height;
        vec![Action::RenderNeeded]
    }

    // --- Toolbar operations ---

    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        debug!("mode: {} -> {}", self.ui.mode.as_str(), mode.as_str());
        self.ui.mode = mode;
        vec![Action::ModeChanged(mode), Action::RenderNeeded]
    }

    pub fn set_pen_color(&mut self, color: impl Into<String>) {
        self.ui.tools.pen_color = color.into();
    }

    pub fn set_pen_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.ui.tools.pen_width = width;
        }
    }

    pub fn set_eraser_size(&mut self, size: f64) -> Vec<Action> {
        if !(size.is_finite() && size > 0.0) {
            return Vec::new();
        }
        self.ui.tools.eraser_size = size;
        vec![Action::RenderNeeded]
    }

    /// Use the image at `path` as the map, now if it is loaded, else once it is.
    pub fn load_map(&mut self, path: &str) -> Vec<Action> {
        if let Some(image) = self.assets.get(path) {
            self.pending_map = None;
            self.scene.set_map(image, &mut self.viewport, self.viewport_width, self.viewport_height);
            self.forget_map_selection();
            return vec![Action::RenderNeeded];
        }
        self.pending_map = Some(path.to_owned());
        let mut actions = self.request_image(path);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pick the stamp placed by clicks in `Stamp` mode and switch to that mode.
    pub fn set_stamp(&mut self, path: &str) -> Vec<Action> {
        self.ui.stamp = Some(path.to_owned());
        let mut actions = self.request_image(path);
        actions.extend(self.set_mode(Mode::Stamp));
        actions
    }

    /// Place the six-player formation for `team`, centered on the last mouse position.
    ///
    /// Classes whose icon has not loaded are skipped.
    pub fn place_team(&mut self, team: Team) -> Vec<Action> {
        let center = self.viewport.to_scene(self.ui.last_mouse);
        let centers = roster::formation_centers(center, self.config.formation_spacing);
        for (class, slot) in FORMATION.iter().zip(centers) {
            let path = roster::class_asset_path(*class, team);
            match self.assets.get(&path) {
                Some(image) => {
                    self.scene.add_object(PlacedObject::stamp(image, path, slot, self.config.stamp_scale));
                }
                None => debug!("formation slot skipped, {path} not loaded"),
            }
        }
        vec![Action::RenderNeeded]
    }

    /// Whether every class icon of `team`'s formation has loaded, so
    /// [`Self::place_team`] would place all six stamps.
    #[must_use]
    pub fn team_ready(&self, team: Team) -> bool {
        FORMATION.iter().all(|&class| self.assets.is_ready(&roster::class_asset_path(class, team)))
    }

    /// Request every class icon for both teams.
    pub fn preload_roster(&mut self) -> Vec<Action> {
        roster::all_asset_paths()
            .iter()
            .flat_map(|path| self.request_image(path))
            .collect()
    }

    pub fn clear_paths<C: Confirm + ?Sized>(&mut self, confirm: &mut C) -> Vec<Action> {
        if !confirm.confirm(CLEAR_PATHS_PROMPT) {
            return Vec::new();
        }
        self.scene.remove_all_paths();
        if self.input == InputState::Drawing || self.input == InputState::Erasing {
            self.input = InputState::Idle;
        }
        vec![Action::RenderNeeded]
    }

    pub fn clear_all<C: Confirm + ?Sized>(&mut self, confirm: &mut C) -> Vec<Action> {
        if !confirm.confirm(CLEAR_ALL_PROMPT) {
            return Vec::new();
        }
        self.scene.remove_all();
        self.input = InputState::Idle;
        self.retain_valid_selection();
        vec![Action::RenderNeeded]
    }

    // --- Image loading ---

    /// Register an image the host is loading itself (a user upload). Once it
    /// loads it is placed at natural size in the middle of the view.
    pub fn begin_user_image(&mut self, key: &str) {
        self.assets.request(key);
        self.pending_uploads.push(key.to_owned());
    }

    /// The host finished loading `key` with the given natural size.
    pub fn on_image_loaded(&mut self, key: &str, width: f64, height: f64) -> Vec<Action> {
        let image = self.assets.resolve(key, width, height);

        if self.pending_map.as_deref() == Some(key) {
            self.pending_map = None;
            self.scene.set_map(image.clone(), &mut self.viewport, self.viewport_width, self.viewport_height);
            self.forget_map_selection();
        }

        if let Some(pos) = self.pending_uploads.iter().position(|k| k == key) {
            self.pending_uploads.remove(pos);
            let center = self.viewport.to_scene(Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0));
            let id = self.scene.add_object(PlacedObject::image(image, center));
            debug!("placed upload {key} as {id}");
        }

        vec![Action::RenderNeeded]
    }

    /// The host could not load `key`. Anything waiting on it is dropped.
    pub fn on_image_failed(&mut self, key: &str) -> Vec<Action> {
        warn!("image failed to load: {key}");
        self.assets.fail(key);
        if self.pending_map.as_deref() == Some(key) {
            self.pending_map = None;
        }
        self.pending_uploads.retain(|k| k != key);
        Vec::new()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.ui.last_mouse = screen;
        self.ui.last_scene = self.viewport.to_scene(screen);

        if button.pans(modifiers) {
            self.input = InputState::Panning { last_screen: screen };
            return Vec::new();
        }
        if button != Button::Primary {
            return Vec::new();
        }

        let world = self.viewport.to_scene(screen);
        let mut changed = false;

        // Clicking away from the current selection drops it.
        if self.ui.mode == Mode::Move {
            if let Some(sel) = self.ui.selection {
                if !self.scene.bounds(sel).is_some_and(|b| b.contains(world)) {
                    self.ui.selection = None;
                    changed = true;
                }
            }
        }

        match self.ui.mode {
            Mode::Pen => {
                let tools = &self.ui.tools;
                self.scene.begin_path(tools.pen_color.clone(), tools.pen_width, world);
                self.input = InputState::Drawing;
                changed = true;
            }
            Mode::Eraser => {
                self.input = InputState::Erasing;
                self.ui.erase_cursor = world;
                changed = true;
            }
            Mode::Stamp => changed |= self.place_stamp(world),
            Mode::Move => {
                self.select_at(screen, world);
                changed = true;
            }
        }

        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        self.ui.last_mouse = screen;
        let world = self.viewport.to_scene(screen);
        let mut changed = false;

        if self.ui.mode == Mode::Eraser {
            self.ui.erase_cursor = world;
            changed = true;
        }

        match self.input {
            InputState::Panning { last_screen } => {
                self.viewport.pan(screen.x - last_screen.x, screen.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen };
                changed = true;
            }
            InputState::Drawing if self.ui.mode == Mode::Pen => {
                changed |= self.scene.extend_path(world);
            }
            InputState::Erasing if self.ui.mode == Mode::Eraser => {
                let removed = self.scene.erase_at(world, self.ui.tools.eraser_radius());
                if removed > 0 {
                    debug!("erased {removed} path(s)");
                }
            }
            _ => changed |= self.follow_pointer(world),
        }

        self.ui.last_scene = self.viewport.to_scene(screen);
        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.ui.last_mouse = screen;
        if button == Button::Secondary {
            return Vec::new();
        }

        let gesture = std::mem::take(&mut self.input);
        self.ui.scaling = false;

        if let InputState::Dragging { start_screen } = gesture {
            let slop = self.config.click_slop_px;
            let is_click = (screen.x - start_screen.x).abs() < slop && (screen.y - start_screen.y).abs() < slop;
            if is_click && self.ui.mode == Mode::Move && self.ui.selection.is_some() {
                self.ui.selection = None;
                return vec![Action::RenderNeeded];
            }
        }
        Vec::new()
    }

    /// Wheel scales the selection in `Move` mode, otherwise zooms around the cursor.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        self.ui.last_mouse = screen;
        let factor = self.config.wheel_factor(delta);

        if self.ui.mode == Mode::Move {
            let min_size = self.config.min_object_size;
            if let Some(bounds) = self.ui.selection.and_then(|sel| self.scene.bounds_mut(sel)) {
                bounds.scale_about_center(factor, min_size);
                self.ui.scaling = true;
                return vec![Action::RenderNeeded];
            }
        }

        self.viewport.zoom_at(screen, factor);
        self.ui.last_scene = self.viewport.to_scene(screen);
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.0 == "Escape" && self.ui.selection.take().is_some() {
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.ui.selection
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.ui.mode
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // --- Helpers ---

    fn request_image(&mut self, path: &str) -> Vec<Action> {
        if self.assets.request(path) { vec![Action::LoadImage(path.to_owned())] } else { Vec::new() }
    }

    /// Stamp the current stamp image centered on `world`. Returns whether
    /// anything was placed.
    fn place_stamp(&mut self, world: Point) -> bool {
        let Some(path) = self.ui.stamp.clone() else {
            return false;
        };
        let Some(image) = self.assets.get(&path) else {
            debug!("stamp {path} not loaded yet");
            return false;
        };
        self.scene.add_object(PlacedObject::stamp(image, path, world, self.config.stamp_scale));
        true
    }

    /// Select whatever is under `world` and start a drag from there.
    fn select_at(&mut self, screen: Point, world: Point) {
        self.ui.selection = self.scene.hit_test(world);
        if let Some(Selection::Object(id)) = self.ui.selection {
            if let Some(index) = self.scene.index_of(&id) {
                self.scene.bring_to_front(index);
            }
        }
        if self.ui.selection.is_some() {
            self.input = InputState::Dragging { start_screen: screen };
        }
    }

    /// In `Move` mode the selection follows the pointer, pressed or not,
    /// unless a wheel-scale is in progress. Returns whether it moved.
    fn follow_pointer(&mut self, world: Point) -> bool {
        if self.ui.mode != Mode::Move || self.ui.scaling {
            return false;
        }
        let last = self.ui.last_scene;
        let Some(bounds) = self.ui.selection.and_then(|sel| self.scene.bounds_mut(sel)) else {
            return false;
        };
        bounds.translate(world.x - last.x, world.y - last.y);
        true
    }

    fn forget_map_selection(&mut self) {
        if self.ui.selection == Some(Selection::Map) {
            self.ui.selection = None;
        }
    }

    fn retain_valid_selection(&mut self) {
        if self.ui.selection.is_some_and(|sel| !self.scene.contains(sel)) {
            self.ui.selection = None;
        }
    }
}
