//! Scene model: the map, placed objects, pen paths, and the store that owns them.
//!
//! Layers are drawn bottom to top: the map, then `objects` in order (last is
//! topmost), then `paths` in order. Objects carry a stable [`ObjectId`] so
//! reordering never invalidates a [`Selection`].
//!
//! The scene is mutated in place by [`crate::engine::EngineCore`] and read by
//! [`crate::render::draw`].

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::rc::Rc;

use uuid::Uuid;

use crate::assets::Bitmap;
use crate::geometry::{distance_to_polyline, Bounds};
use crate::viewport::{Point, Viewport};

/// Unique identifier for a placed object.
pub type ObjectId = Uuid;

/// What a placed object came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A class icon or stamp asset.
    Stamp,
    /// An image uploaded by the user.
    Image,
}

/// A bitmap placed on the scene.
#[derive(Debug, Clone)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub image: Rc<Bitmap>,
    /// Asset path the stamp was created from. `None` for uploads.
    pub source: Option<String>,
    /// Scene-space bounding box; moved and scaled by the move tool.
    pub bounds: Bounds,
    original_width: f64,
    original_height: f64,
}

impl PlacedObject {
    /// A stamp of `image` centered on `center`, sized at `scale` of its natural size.
    #[must_use]
    pub fn stamp(image: Rc<Bitmap>, source: impl Into<String>, center: Point, scale: f64) -> Self {
        let bounds = Bounds::centered_at(center, image.width * scale, image.height * scale);
        Self::with_bounds(ObjectKind::Stamp, image, Some(source.into()), bounds)
    }

    /// An uploaded image at natural size, centered on `center`.
    #[must_use]
    pub fn image(image: Rc<Bitmap>, center: Point) -> Self {
        let bounds = Bounds::centered_at(center, image.width, image.height);
        Self::with_bounds(ObjectKind::Image, image, None, bounds)
    }

    fn with_bounds(kind: ObjectKind, image: Rc<Bitmap>, source: Option<String>, bounds: Bounds) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            original_width: image.width,
            original_height: image.height,
            image,
            source,
            bounds,
        }
    }

    /// Natural width of the bitmap when the object was created.
    #[must_use]
    pub fn original_width(&self) -> f64 {
        self.original_width
    }

    /// Natural height of the bitmap when the object was created.
    #[must_use]
    pub fn original_height(&self) -> f64 {
        self.original_height
    }
}

/// The background map. At most one per scene, always the bottom layer.
#[derive(Debug, Clone)]
pub struct MapImage {
    pub image: Rc<Bitmap>,
    pub bounds: Bounds,
}

/// A freehand stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct PenPath {
    /// CSS color string.
    pub color: String,
    /// Stroke width in scene units.
    pub stroke_width: f64,
    /// Scene-space points, appended while the stroke is being drawn.
    pub points: Vec<Point>,
}

impl PenPath {
    /// Whether the path has enough points to be stroked.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// What the move tool currently has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Object(ObjectId),
    Map,
}

/// The full scene: map, objects, and pen paths.
#[derive(Debug, Default)]
pub struct Scene {
    map: Option<MapImage>,
    objects: Vec<PlacedObject>,
    paths: Vec<PenPath>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Map ---

    /// Replace the map with `image` at natural size and recenter the viewport on it.
    ///
    /// The map origin is derived from the current viewport size and scale so
    /// that a fresh, unpanned view already shows it centered.
    pub fn set_map(&mut self, image: Rc<Bitmap>, viewport: &mut Viewport, viewport_w: f64, viewport_h: f64) {
        let bounds = Bounds::new(
            (viewport_w - image.width) / 2.0 / viewport.scale,
            (viewport_h - image.height) / 2.0 / viewport.scale,
            image.width,
            image.height,
        );
        viewport.center_on(bounds.center(), viewport_w, viewport_h);
        self.map = Some(MapImage { image, bounds });
    }

    #[must_use]
    pub fn map(&self) -> Option<&MapImage> {
        self.map.as_ref()
    }

    // --- Objects ---

    /// Append an object on top of the stack.
    pub fn add_object(&mut self, object: PlacedObject) -> ObjectId {
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Move the object at `index` to the top of the stack.
    pub fn bring_to_front(&mut self, index: usize) -> Option<ObjectId> {
        if index >= self.objects.len() {
            return None;
        }
        let object = self.objects.remove(index);
        let id = object.id;
        self.objects.push(object);
        Some(id)
    }

    #[must_use]
    pub fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == *id)
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    pub fn object_mut(&mut self, id: &ObjectId) -> Option<&mut PlacedObject> {
        self.objects.iter_mut().find(|o| o.id == *id)
    }

    /// Objects bottom to top.
    #[must_use]
    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    // --- Selection targets ---

    /// Bounding box of the selected target, if it still exists.
    #[must_use]
    pub fn bounds(&self, selection: Selection) -> Option<&Bounds> {
        match selection {
            Selection::Map => self.map.as_ref().map(|m| &m.bounds),
            Selection::Object(id) => self.object(&id).map(|o| &o.bounds),
        }
    }

    pub fn bounds_mut(&mut self, selection: Selection) -> Option<&mut Bounds> {
        match selection {
            Selection::Map => self.map.as_mut().map(|m| &mut m.bounds),
            Selection::Object(id) => self.object_mut(&id).map(|o| &mut o.bounds),
        }
    }

    #[must_use]
    pub fn contains(&self, selection: Selection) -> bool {
        self.bounds(selection).is_some()
    }

    /// The topmost object whose bounds contain `p`, else the map if it does.
    #[must_use]
    pub fn hit_test(&self, p: Point) -> Option<Selection> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.bounds.contains(p))
            .map(|o| Selection::Object(o.id))
            .or_else(|| {
                self.map
                    .as_ref()
                    .filter(|m| m.bounds.contains(p))
                    .map(|_| Selection::Map)
            })
    }

    // --- Paths ---

    /// Start a new stroke seeded with one point.
    pub fn begin_path(&mut self, color: impl Into<String>, stroke_width: f64, start: Point) {
        self.paths.push(PenPath { color: color.into(), stroke_width, points: vec![start] });
    }

    /// Append a point to the most recent stroke. Returns `false` if there is none.
    pub fn extend_path(&mut self, p: Point) -> bool {
        match self.paths.last_mut() {
            Some(path) => {
                path.points.push(p);
                true
            }
            None => false,
        }
    }

    /// Paths oldest to newest.
    #[must_use]
    pub fn paths(&self) -> &[PenPath] {
        &self.paths
    }

    /// Delete every path that passes within `radius` of `p`, counting the
    /// stroke's own half width. Whole paths are removed, never trimmed.
    /// Returns how many paths were removed.
    pub fn erase_at(&mut self, p: Point, radius: f64) -> usize {
        let before = self.paths.len();
        self.paths.retain(|path| {
            distance_to_polyline(p, &path.points).is_none_or(|d| d >= radius + path.stroke_width / 2.0)
        });
        before - self.paths.len()
    }

    // --- Resets ---

    pub fn remove_all_paths(&mut self) {
        self.paths.clear();
    }

    /// Remove the map, every object, and every path.
    pub fn remove_all(&mut self) {
        self.map = None;
        self.objects.clear();
        self.paths.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_none() && self.objects.is_empty() && self.paths.is_empty()
    }
}
