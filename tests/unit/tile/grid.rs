use super::*;

#[test]
fn iteration_is_row_major_with_end_of_row_markers() {
    let grid = TileGrid::unloaded(GridLayout::new(TileCoord::new(-1, 4), 3, 2));
    let items: Vec<_> = grid
        .iter()
        .map(|it| (it.row, it.col, it.end_of_row, it.tile.coord()))
        .collect();
    assert_eq!(
        items,
        vec![
            (0, 0, false, TileCoord::new(-1, 4)),
            (0, 1, false, TileCoord::new(0, 4)),
            (0, 2, true, TileCoord::new(1, 4)),
            (1, 0, false, TileCoord::new(-1, 5)),
            (1, 1, false, TileCoord::new(0, 5)),
            (1, 2, true, TileCoord::new(1, 5)),
        ]
    );
    assert_eq!(grid.iter().len(), 6);
}

#[test]
fn new_rejects_wrong_count_and_order() {
    let layout = GridLayout::new(TileCoord::new(0, 0), 2, 1);
    let a = Arc::new(Tile::new(TileCoord::new(0, 0)));
    let b = Arc::new(Tile::new(TileCoord::new(1, 0)));

    assert!(TileGrid::new(layout, vec![a.clone()]).is_err());
    assert!(TileGrid::new(layout, vec![b.clone(), a.clone()]).is_err());
    let grid = TileGrid::new(layout, vec![a, b]).unwrap();
    assert_eq!(grid.get(0, 1).unwrap().coord(), TileCoord::new(1, 0));
    assert!(grid.get(0, 2).is_none());
}

#[test]
fn empty_layout_iterates_nothing() {
    let grid = TileGrid::unloaded(GridLayout::new(TileCoord::new(0, 0), 0, 0));
    assert!(grid.is_empty());
    assert_eq!(grid.iter().count(), 0);
}

#[test]
fn alpha_is_clamped_and_saturates() {
    let tile = Tile::new(TileCoord::new(0, 0));
    assert_eq!(tile.alpha(), 0.0);
    tile.set_alpha(2.0);
    assert_eq!(tile.alpha(), 1.0);
    tile.set_alpha(f32::NAN);
    assert_eq!(tile.alpha(), 0.0);

    assert!((tile.advance_alpha(0.3) - 0.3).abs() < 1e-6);
    assert!((tile.advance_alpha(0.3) - 0.6).abs() < 1e-6);
    assert_eq!(tile.advance_alpha(5.0), 1.0);
    assert_eq!(tile.alpha(), 1.0);
    assert_eq!(tile.advance_alpha(-1.0), 1.0);
}

#[test]
fn image_is_attached_once_and_visible_after_load() {
    let tile = Tile::new(TileCoord::new(2, 3));
    assert!(!tile.is_loaded());
    let img = Arc::new(RasterImage::solid(1, 1, [0, 0, 0, 255]).unwrap());
    assert!(tile.set_image(img.clone()));
    assert!(!tile.set_image(img));
    tile.mark_loaded();
    assert!(tile.is_loaded());
    assert!(tile.image().is_some());
}

#[test]
fn loader_thread_publishes_to_reader() {
    let tile = Arc::new(Tile::new(TileCoord::new(0, 0)));
    let writer = tile.clone();
    std::thread::spawn(move || {
        writer.set_alpha(0.25);
        writer.mark_loaded();
    })
    .join()
    .unwrap();
    assert!(tile.is_loaded());
    assert_eq!(tile.alpha(), 0.25);
}

#[test]
fn covering_layout_spans_partial_tiles() {
    let layout = GridLayout::covering(Rect::new(-10.0, 0.0, 1030.0, 100.0));
    assert_eq!(layout.origin, TileCoord::new(-1, 0));
    assert_eq!(layout.per_row, 4);
    assert_eq!(layout.per_column, 1);
    let r = layout.world_rect();
    assert!(r.x0 <= -10.0 && r.x1 >= 1030.0);
}

#[test]
fn quarter_resolution_step_size() {
    assert_eq!(Resolution::Quarter.steps_per_tile(), 128);
    assert_eq!(Resolution::Quarter.units_per_step(), 4.0);
    assert_eq!(Resolution::World.units_per_step(), 1.0);
}
