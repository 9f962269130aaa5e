#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn bitmap(key: &str, w: f64, h: f64) -> Rc<Bitmap> {
    Rc::new(Bitmap { key: key.to_string(), width: w, height: h })
}

fn stamp_at(x: f64, y: f64, w: f64, h: f64) -> PlacedObject {
    // Scale 1.0 so the bounds equal the bitmap size.
    PlacedObject::stamp(bitmap("scout_red.png", w, h), "scout_red.png", Point::new(x + w / 2.0, y + h / 2.0), 1.0)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn straight_path(scene: &mut Scene, width: f64) {
    scene.begin_path("#ffffff", width, pt(0.0, 0.0));
    scene.extend_path(pt(100.0, 0.0));
}

// =============================================================
// PlacedObject
// =============================================================

#[test]
fn stamp_is_centered_and_half_size() {
    let obj = PlacedObject::stamp(bitmap("med_red.png", 64.0, 32.0), "med_red.png", pt(100.0, 100.0), 0.5);
    assert_eq!(obj.kind, ObjectKind::Stamp);
    assert_eq!(obj.bounds, Bounds::new(84.0, 92.0, 32.0, 16.0));
    assert_eq!(obj.source.as_deref(), Some("med_red.png"));
    assert_eq!(obj.original_width(), 64.0);
    assert_eq!(obj.original_height(), 32.0);
}

#[test]
fn image_object_has_natural_size_and_no_source() {
    let obj = PlacedObject::image(bitmap("upload-1", 200.0, 100.0), pt(0.0, 0.0));
    assert_eq!(obj.kind, ObjectKind::Image);
    assert_eq!(obj.bounds, Bounds::new(-100.0, -50.0, 200.0, 100.0));
    assert!(obj.source.is_none());
}

#[test]
fn placed_objects_get_distinct_ids() {
    let a = stamp_at(0.0, 0.0, 10.0, 10.0);
    let b = stamp_at(0.0, 0.0, 10.0, 10.0);
    assert_ne!(a.id, b.id);
}

// =============================================================
// Map
// =============================================================

#[test]
fn set_map_centers_map_on_screen() {
    let mut scene = Scene::new();
    let mut vp = Viewport::default();
    scene.set_map(bitmap("map.png", 400.0, 200.0), &mut vp, 800.0, 600.0);
    let Some(map) = scene.map() else {
        panic!("map should be set");
    };
    assert_eq!(map.bounds.width, 400.0);
    assert_eq!(map.bounds.height, 200.0);
    let center = vp.to_screen(map.bounds.center());
    assert!((center.x - 400.0).abs() < 1e-9);
    assert!((center.y - 300.0).abs() < 1e-9);
}

#[test]
fn set_map_centers_at_non_unit_scale() {
    let mut scene = Scene::new();
    let mut vp = Viewport { scale: 2.0, offset_x: 37.0, offset_y: -12.0, ..Viewport::default() };
    scene.set_map(bitmap("map.png", 300.0, 300.0), &mut vp, 1000.0, 500.0);
    let Some(map) = scene.map() else {
        panic!("map should be set");
    };
    let center = vp.to_screen(map.bounds.center());
    assert!((center.x - 500.0).abs() < 1e-9);
    assert!((center.y - 250.0).abs() < 1e-9);
    assert_eq!(vp.scale, 2.0);
}

#[test]
fn set_map_replaces_previous_map() {
    let mut scene = Scene::new();
    let mut vp = Viewport::default();
    scene.set_map(bitmap("a.png", 10.0, 10.0), &mut vp, 100.0, 100.0);
    scene.set_map(bitmap("b.png", 20.0, 20.0), &mut vp, 100.0, 100.0);
    assert_eq!(scene.map().map(|m| m.image.key.as_str()), Some("b.png"));
}

// =============================================================
// Objects and z-order
// =============================================================

#[test]
fn add_object_appends_on_top() {
    let mut scene = Scene::new();
    let a = scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    let b = scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    assert_eq!(scene.index_of(&a), Some(0));
    assert_eq!(scene.index_of(&b), Some(1));
}

#[test]
fn bring_to_front_moves_object_last() {
    let mut scene = Scene::new();
    let a = scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    let b = scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    let c = scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    assert_eq!(scene.bring_to_front(0), Some(a));
    let order: Vec<ObjectId> = scene.objects().iter().map(|o| o.id).collect();
    assert_eq!(order, vec![b, c, a]);
}

#[test]
fn bring_to_front_out_of_range_is_none() {
    let mut scene = Scene::new();
    scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    assert!(scene.bring_to_front(5).is_none());
    assert_eq!(scene.objects().len(), 1);
}

// =============================================================
// Hit testing
// =============================================================

#[test]
fn hit_test_empty_scene_is_none() {
    let scene = Scene::new();
    assert!(scene.hit_test(pt(0.0, 0.0)).is_none());
}

#[test]
fn hit_test_prefers_topmost_object() {
    let mut scene = Scene::new();
    scene.add_object(stamp_at(0.0, 0.0, 50.0, 50.0));
    let top = scene.add_object(stamp_at(25.0, 25.0, 50.0, 50.0));
    assert_eq!(scene.hit_test(pt(30.0, 30.0)), Some(Selection::Object(top)));
}

#[test]
fn hit_test_after_bring_to_front_returns_raised_object() {
    let mut scene = Scene::new();
    let bottom = scene.add_object(stamp_at(0.0, 0.0, 50.0, 50.0));
    scene.add_object(stamp_at(25.0, 25.0, 50.0, 50.0));
    let Some(index) = scene.index_of(&bottom) else {
        panic!("object should exist");
    };
    scene.bring_to_front(index);
    assert_eq!(scene.objects().last().map(|o| o.id), Some(bottom));
    assert_eq!(scene.hit_test(pt(30.0, 30.0)), Some(Selection::Object(bottom)));
}

#[test]
fn hit_test_falls_back_to_map() {
    let mut scene = Scene::new();
    let mut vp = Viewport::default();
    scene.set_map(bitmap("map.png", 100.0, 100.0), &mut vp, 100.0, 100.0);
    scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    assert_eq!(scene.hit_test(pt(50.0, 50.0)), Some(Selection::Map));
}

#[test]
fn hit_test_outside_everything_is_none() {
    let mut scene = Scene::new();
    let mut vp = Viewport::default();
    scene.set_map(bitmap("map.png", 100.0, 100.0), &mut vp, 100.0, 100.0);
    assert!(scene.hit_test(pt(500.0, 500.0)).is_none());
}

// =============================================================
// Selection targets
// =============================================================

#[test]
fn bounds_mut_moves_selected_object() {
    let mut scene = Scene::new();
    let id = scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    if let Some(b) = scene.bounds_mut(Selection::Object(id)) {
        b.translate(5.0, 5.0);
    }
    assert_eq!(scene.bounds(Selection::Object(id)).map(|b| b.x), Some(5.0));
}

#[test]
fn object_mut_edits_in_place() {
    let mut scene = Scene::new();
    let id = scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    if let Some(obj) = scene.object_mut(&id) {
        obj.bounds.width = 30.0;
    }
    assert_eq!(scene.object(&id).map(|o| o.bounds.width), Some(30.0));
    assert!(scene.object_mut(&uuid::Uuid::new_v4()).is_none());
}

#[test]
fn contains_tracks_removal() {
    let mut scene = Scene::new();
    let id = scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    assert!(scene.contains(Selection::Object(id)));
    assert!(!scene.contains(Selection::Map));
    scene.remove_all();
    assert!(!scene.contains(Selection::Object(id)));
}

// =============================================================
// Paths and erasing
// =============================================================

#[test]
fn begin_and_extend_path() {
    let mut scene = Scene::new();
    scene.begin_path("#ff0000", 4.0, pt(1.0, 2.0));
    assert!(!scene.paths()[0].is_drawable());
    assert!(scene.extend_path(pt(3.0, 4.0)));
    assert!(scene.paths()[0].is_drawable());
    assert_eq!(scene.paths()[0].color, "#ff0000");
    assert_eq!(scene.paths()[0].points, vec![pt(1.0, 2.0), pt(3.0, 4.0)]);
}

#[test]
fn extend_without_path_is_false() {
    let mut scene = Scene::new();
    assert!(!scene.extend_path(pt(0.0, 0.0)));
}

#[test]
fn erase_near_stroke_deletes_whole_path() {
    let mut scene = Scene::new();
    straight_path(&mut scene, 4.0);
    assert_eq!(scene.erase_at(pt(50.0, 1.0), 10.0), 1);
    assert!(scene.paths().is_empty());
}

#[test]
fn erase_far_from_stroke_keeps_path() {
    let mut scene = Scene::new();
    straight_path(&mut scene, 4.0);
    assert_eq!(scene.erase_at(pt(50.0, 50.0), 10.0), 0);
    assert_eq!(scene.paths().len(), 1);
}

#[test]
fn erase_counts_half_stroke_width() {
    let mut scene = Scene::new();
    straight_path(&mut scene, 4.0);
    // 11.9 < 10 + 2
    assert_eq!(scene.erase_at(pt(50.0, 11.9), 10.0), 1);
    straight_path(&mut scene, 4.0);
    // 12 is not < 12
    assert_eq!(scene.erase_at(pt(50.0, 12.0), 10.0), 0);
}

#[test]
fn erase_removes_every_touching_path_only() {
    let mut scene = Scene::new();
    straight_path(&mut scene, 2.0);
    scene.begin_path("#000000", 2.0, pt(0.0, 200.0));
    scene.extend_path(pt(100.0, 200.0));
    straight_path(&mut scene, 2.0);
    assert_eq!(scene.erase_at(pt(10.0, 0.0), 5.0), 2);
    assert_eq!(scene.paths().len(), 1);
    assert_eq!(scene.paths()[0].color, "#000000");
}

#[test]
fn erase_ignores_single_point_paths() {
    let mut scene = Scene::new();
    scene.begin_path("#ffffff", 4.0, pt(0.0, 0.0));
    assert_eq!(scene.erase_at(pt(0.0, 0.0), 10.0), 0);
    assert_eq!(scene.paths().len(), 1);
}

// =============================================================
// Resets
// =============================================================

#[test]
fn remove_all_paths_keeps_objects() {
    let mut scene = Scene::new();
    scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    straight_path(&mut scene, 1.0);
    scene.remove_all_paths();
    assert!(scene.paths().is_empty());
    assert_eq!(scene.objects().len(), 1);
}

#[test]
fn remove_all_twice_leaves_empty_scene() {
    let mut scene = Scene::new();
    let mut vp = Viewport::default();
    scene.set_map(bitmap("map.png", 10.0, 10.0), &mut vp, 100.0, 100.0);
    scene.add_object(stamp_at(0.0, 0.0, 10.0, 10.0));
    straight_path(&mut scene, 1.0);
    scene.remove_all();
    assert!(scene.is_empty());
    scene.remove_all();
    assert!(scene.is_empty());
}
