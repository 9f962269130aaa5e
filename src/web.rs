//! Browser host: binds [`EngineCore`] to an `HtmlCanvasElement`.
//!
//! The host forwards DOM events to the engine and acts on the returned
//! [`Action`]s. Image loads are the only async work; the engine lives in an
//! `Rc<RefCell<_>>` so load callbacks can reach it, and no borrow is held
//! across an `.await` or a call back into JavaScript.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Array, Function, Uint8Array};
use log::{debug, warn};
use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Blob, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent, Url, WheelEvent,
};

use crate::assets::Bitmap;
use crate::config::BoardConfig;
use crate::engine::{Action, EngineCore};
use crate::input::{Button, Key, Mode, Modifiers, WheelDelta};
use crate::render::{self, Surface};
use crate::roster::Team;
use crate::viewport::Point;

/// Install the panic hook and console logger once per page.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        warn!("console logger not installed: {err}");
    }
}

// =============================================================================
// Canvas surface
// =============================================================================

/// [`Surface`] over a 2D canvas context. Loaded image elements are kept by
/// asset key so [`Bitmap`]s can be drawn.
struct WebSurface {
    ctx: CanvasRenderingContext2d,
    images: HashMap<String, HtmlImageElement>,
}

impl Surface for WebSurface {
    type Error = JsValue;

    fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<(), JsValue> {
        self.ctx.set_transform(a, b, c, d, e, f)
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: &str) {
        self.ctx.set_line_cap(cap);
    }

    fn set_line_join(&mut self, join: &str) {
        self.ctx.set_line_join(join);
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), JsValue> {
        let dash: Array = segments.iter().map(|&s| JsValue::from_f64(s)).collect();
        self.ctx.set_line_dash(&dash)
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        self.ctx.arc(x, y, radius, start, end)
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.stroke_rect(x, y, w, h);
    }

    fn draw_image(&mut self, image: &Bitmap, x: f64, y: f64, w: f64, h: f64) -> Result<(), JsValue> {
        match self.images.get(&image.key) {
            Some(element) => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(element, x, y, w, h),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Board
// =============================================================================

struct Inner {
    canvas: HtmlCanvasElement,
    core: EngineCore,
    surface: WebSurface,
    on_mode_change: Option<Function>,
}

type Shared = Rc<RefCell<Inner>>;

/// The board bound to one canvas element.
#[wasm_bindgen]
pub struct Board {
    inner: Shared,
}

#[wasm_bindgen]
impl Board {
    /// Bind to `canvas`. `config_json` optionally overrides [`BoardConfig`] defaults.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid or the canvas has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<Board, JsValue> {
        let config = match config_json {
            Some(json) => BoardConfig::from_json(&json).map_err(|err| JsValue::from_str(&err.to_string()))?,
            None => BoardConfig::default(),
        };
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut core = EngineCore::with_config(config);
        let mut actions = core.set_viewport(f64::from(canvas.width()), f64::from(canvas.height()));
        actions.extend(core.preload_roster());

        let inner = Rc::new(RefCell::new(Inner {
            canvas,
            core,
            surface: WebSurface { ctx, images: HashMap::new() },
            on_mode_change: None,
        }));
        process(&inner, actions);
        Ok(Board { inner })
    }

    /// Register `callback(mode: string)`, called whenever the mode changes.
    pub fn on_mode_change(&self, callback: Function) {
        self.inner.borrow_mut().on_mode_change = Some(callback);
    }

    /// Re-read the canvas size after the host resized it.
    pub fn resize(&self) {
        self.apply(|inner| {
            let width = f64::from(inner.canvas.width());
            let height = f64::from(inner.canvas.height());
            inner.core.set_viewport(width, height)
        });
    }

    pub fn render(&self) {
        render_frame(&self.inner);
    }

    /// Current mode name.
    #[must_use]
    pub fn mode(&self) -> String {
        self.inner.borrow().core.mode().as_str().to_owned()
    }

    // --- Toolbar ---

    /// Switch to `"pen"`, `"eraser"`, `"stamp"`, or `"move"`. Unknown names are ignored.
    pub fn set_mode(&self, mode: &str) {
        let Some(mode) = Mode::parse(mode) else {
            warn!("unknown mode: {mode}");
            return;
        };
        self.apply(|inner| inner.core.set_mode(mode));
    }

    pub fn load_map(&self, path: &str) {
        self.apply(|inner| inner.core.load_map(path));
    }

    pub fn set_stamp(&self, path: &str) {
        self.apply(|inner| inner.core.set_stamp(path));
    }

    /// Place a formation for `"red"` or `"blu"` at the last mouse position.
    pub fn place_team(&self, team: &str) {
        let Some(team) = Team::parse(team) else {
            warn!("unknown team: {team}");
            return;
        };
        self.apply(|inner| inner.core.place_team(team));
    }

    /// Whether `"red"` or `"blu"` can be placed in full; the toolbar uses it to
    /// enable the team buttons.
    #[must_use]
    pub fn team_ready(&self, team: &str) -> bool {
        Team::parse(team).is_some_and(|team| self.inner.borrow().core.team_ready(team))
    }

    pub fn set_pen_color(&self, color: &str) {
        self.inner.borrow_mut().core.set_pen_color(color);
    }

    pub fn set_pen_width(&self, width: f64) {
        self.inner.borrow_mut().core.set_pen_width(width);
    }

    pub fn set_eraser_size(&self, size: f64) {
        self.apply(|inner| inner.core.set_eraser_size(size));
    }

    pub fn clear_paths(&self) {
        self.apply(|inner| inner.core.clear_paths(&mut window_confirm));
    }

    pub fn clear_all(&self) {
        self.apply(|inner| inner.core.clear_all(&mut window_confirm));
    }

    /// Place the picked file's bytes as an image at the viewport center once decoded.
    ///
    /// # Errors
    ///
    /// Fails if the browser cannot wrap the bytes in a blob URL.
    pub fn load_user_image(&self, bytes: &Uint8Array) -> Result<(), JsValue> {
        let blob = Blob::new_with_u8_array_sequence(&Array::of1(bytes))?;
        let url = Url::create_object_url_with_blob(&blob)?;
        let key = format!("upload-{}", Uuid::new_v4());
        self.inner.borrow_mut().core.begin_user_image(&key);
        load_image(&self.inner, key, url);
        Ok(())
    }

    // --- DOM events ---

    pub fn on_pointer_down(&self, event: &MouseEvent) {
        let Some(button) = Button::from_dom(event.button()) else {
            return;
        };
        self.apply(|inner| inner.core.on_pointer_down(mouse_point(event), button, modifiers(event)));
    }

    pub fn on_pointer_move(&self, event: &MouseEvent) {
        self.apply(|inner| inner.core.on_pointer_move(mouse_point(event), modifiers(event)));
    }

    pub fn on_pointer_up(&self, event: &MouseEvent) {
        let Some(button) = Button::from_dom(event.button()) else {
            return;
        };
        self.apply(|inner| inner.core.on_pointer_up(mouse_point(event), button, modifiers(event)));
    }

    /// Zoom the canvas or scale the selection. Suppresses page scrolling.
    pub fn on_wheel(&self, event: &WheelEvent) {
        event.prevent_default();
        let delta = WheelDelta { dx: event.delta_x(), dy: event.delta_y() };
        self.apply(|inner| inner.core.on_wheel(mouse_point(event), delta, modifiers(event)));
    }

    pub fn on_key_down(&self, event: &KeyboardEvent) {
        let mods = Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        };
        self.apply(|inner| inner.core.on_key_down(Key(event.key()), mods));
    }
}

impl Board {
    /// Run `f` under a mutable borrow, release it, then process the actions.
    fn apply(&self, f: impl FnOnce(&mut Inner) -> Vec<Action>) {
        let actions = f(&mut self.inner.borrow_mut());
        process(&self.inner, actions);
    }
}

// =============================================================================
// Action processing
// =============================================================================

fn process(inner: &Shared, actions: Vec<Action>) {
    let mut redraw = false;
    for action in actions {
        match action {
            Action::RenderNeeded => redraw = true,
            Action::ModeChanged(mode) => notify_mode(inner, mode),
            Action::LoadImage(path) => load_image(inner, path.clone(), path),
        }
    }
    if redraw {
        render_frame(inner);
    }
}

fn render_frame(inner: &Shared) {
    let Ok(mut guard) = inner.try_borrow_mut() else {
        debug!("board busy, frame skipped");
        return;
    };
    let Inner { core, surface, .. } = &mut *guard;
    let result = render::draw(
        surface,
        &core.scene,
        &core.viewport,
        &core.ui,
        core.viewport_width,
        core.viewport_height,
        &core.config,
    );
    if let Err(err) = result {
        warn!("render failed: {err:?}");
    }
}

fn notify_mode(inner: &Shared, mode: Mode) {
    let callback = inner.borrow().on_mode_change.clone();
    if let Some(callback) = callback {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(mode.as_str())) {
            warn!("mode callback failed: {err:?}");
        }
    }
}

/// Load `src` into an image element and report the result for `key`.
fn load_image(inner: &Shared, key: String, src: String) {
    let element = match HtmlImageElement::new() {
        Ok(element) => element,
        Err(err) => {
            warn!("cannot create image element for {key}: {err:?}");
            let actions = inner.borrow_mut().core.on_image_failed(&key);
            process(inner, actions);
            return;
        }
    };
    element.set_src(&src);

    let inner = Rc::clone(inner);
    spawn_local(async move {
        let decoded = JsFuture::from(element.decode()).await;
        let actions = match decoded {
            Ok(_) => {
                let width = f64::from(element.natural_width());
                let height = f64::from(element.natural_height());
                debug!("loaded {key} ({width}x{height})");
                let mut guard = inner.borrow_mut();
                guard.surface.images.insert(key.clone(), element);
                guard.core.on_image_loaded(&key, width, height)
            }
            Err(err) => {
                warn!("decode failed for {key}: {err:?}");
                inner.borrow_mut().core.on_image_failed(&key)
            }
        };
        if src.starts_with("blob:") {
            if let Err(err) = Url::revoke_object_url(&src) {
                warn!("cannot revoke {src}: {err:?}");
            }
        }
        process(&inner, actions);
    });
}

// =============================================================================
// DOM helpers
// =============================================================================

fn window_confirm(message: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    match window.confirm_with_message(message) {
        Ok(answer) => answer,
        Err(err) => {
            warn!("confirm dialog failed: {err:?}");
            false
        }
    }
}

fn mouse_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.offset_x()), f64::from(event.offset_y()))
}

fn modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}
