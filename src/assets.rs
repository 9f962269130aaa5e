//! Bitmap handles and the load-state cache.
//!
//! The engine never touches pixels. A [`Bitmap`] is a shared, read-only
//! handle carrying the asset key and natural size; the host surface maps the
//! key to whatever it actually draws. Loads are started by the host in
//! response to [`crate::engine::Action::LoadImage`] and reported back through
//! [`AssetCache::resolve`] or [`AssetCache::fail`]. Until then, anything that
//! depends on the bitmap is a no-op.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use std::collections::HashMap;
use std::rc::Rc;

/// A decoded image known to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    /// Asset path or upload key the host uses to find the pixels.
    pub key: String,
    /// Natural width in pixels.
    pub width: f64,
    /// Natural height in pixels.
    pub height: f64,
}

/// Load state of a single asset key.
#[derive(Debug, Clone)]
enum Slot {
    Pending,
    Ready(Rc<Bitmap>),
    Failed,
}

#[derive(Debug, Default)]
pub struct AssetCache {
    slots: HashMap<String, Slot>,
}

impl AssetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as wanted. Returns `true` when the caller must start a load,
    /// i.e. the key is unknown or a previous load failed.
    pub fn request(&mut self, key: &str) -> bool {
        match self.slots.get(key) {
            Some(Slot::Pending | Slot::Ready(_)) => false,
            Some(Slot::Failed) | None => {
                self.slots.insert(key.to_owned(), Slot::Pending);
                true
            }
        }
    }

    /// Record a finished load and return the shared handle.
    pub fn resolve(&mut self, key: &str, width: f64, height: f64) -> Rc<Bitmap> {
        let bitmap = Rc::new(Bitmap { key: key.to_owned(), width, height });
        self.slots.insert(key.to_owned(), Slot::Ready(Rc::clone(&bitmap)));
        bitmap
    }

    /// Record a failed load. The key can be requested again later.
    pub fn fail(&mut self, key: &str) {
        self.slots.insert(key.to_owned(), Slot::Failed);
    }

    /// The bitmap for `key`, if it has finished loading.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Rc<Bitmap>> {
        match self.slots.get(key) {
            Some(Slot::Ready(bitmap)) => Some(Rc::clone(bitmap)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self, key: &str) -> bool {
        matches!(self.slots.get(key), Some(Slot::Ready(_)))
    }
}
