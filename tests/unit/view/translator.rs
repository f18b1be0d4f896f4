use super::*;
use crate::{
    config::{PanOpts, ZoomOpts},
    tile::grid::TileCoord,
};

fn translator(center: Point, zoom: f64) -> ViewportTranslator {
    let mut t = ViewportTranslator::new();
    t.update_raw(Viewport::new(800, 600), center, zoom, Point::new(-512.0, 0.0));
    t
}

#[test]
fn grid_origin_lands_relative_to_viewport_center() {
    let t = translator(Point::new(0.0, 0.0), 0.5);
    assert_eq!(t.left_on_screen(), 400.0 - 256.0);
    assert_eq!(t.top_on_screen(), 300.0);
}

#[test]
fn update_is_idempotent_and_reads_controllers() {
    let mut pan = PanController::new(PanOpts::default());
    pan.center_on(Point::new(100.0, 50.0));
    let zoom = ZoomController::new(ZoomOpts::default());
    let layout = GridLayout::new(TileCoord::new(0, 0), 2, 2);

    let mut t = ViewportTranslator::new();
    t.update(Viewport::new(640, 480), &pan, &zoom, layout);
    let first = t.clone();
    t.update(Viewport::new(640, 480), &pan, &zoom, layout);
    assert_eq!(t, first);
    assert_eq!(pan.center(), Point::new(100.0, 50.0));
    assert_eq!(t.left_on_screen(), 320.0 - 100.0 * 0.25);
}

#[test]
fn screen_world_roundtrip() {
    let t = translator(Point::new(1000.0, -300.0), 2.0);
    let w = Point::new(1017.5, -280.25);
    let back = t.screen_to_world(t.world_to_screen(w));
    assert!((back - w).hypot() < 1e-9);
    assert_eq!(t.screen_to_world(Point::new(400.0, 300.0)), Point::new(1000.0, -300.0));
}

#[test]
fn visible_rect_scales_with_zoom() {
    let t = translator(Point::ZERO, 0.5);
    let r = t.visible_world_rect();
    assert_eq!(r.width(), 1600.0);
    assert_eq!(r.height(), 1200.0);
    assert_eq!(r.center(), Point::ZERO);
}

#[test]
fn zero_viewport_is_harmless() {
    let mut t = ViewportTranslator::new();
    t.update_raw(Viewport::new(0, 0), Point::new(5.0, 5.0), 1.0, Point::ZERO);
    assert_eq!(t.left_on_screen(), -5.0);
    assert_eq!(t.visible_world_rect().area(), 0.0);
}

#[test]
fn grid_transform_translates_then_scales() {
    let t = translator(Point::ZERO, 0.5);
    let g = t.grid_transform(Transform2D::IDENTITY);
    assert_eq!(g.apply(Point::ZERO), Point::new(144.0, 300.0));
    assert_eq!(g.apply(Point::new(512.0, 512.0)), Point::new(400.0, 556.0));
}
