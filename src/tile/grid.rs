use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicBool, AtomicU32, Ordering},
};

use crate::{
    assets::raster::RasterImage,
    foundation::{
        core::{Point, Rect},
        error::{TilescopeError, TilescopeResult},
    },
};

/// Edge length of one tile in world units.
pub const TILE_SIZE: f64 = 512.0;

/// Sampling resolution of per-tile rasters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Resolution {
    /// One sample per world unit.
    World,
    /// One sample per 4x4 world units.
    Quarter,
}

impl Resolution {
    pub fn steps_per_tile(self) -> u32 {
        match self {
            Self::World => 512,
            Self::Quarter => 128,
        }
    }

    /// World units covered by one sample.
    pub fn units_per_step(self) -> f64 {
        TILE_SIZE / f64::from(self.steps_per_tile())
    }
}

/// Position of a tile in the infinite world grid.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct TileCoord {
    pub col: i64,
    pub row: i64,
}

impl TileCoord {
    pub fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    /// Tile whose square contains `world`.
    pub fn containing(world: Point) -> Self {
        Self {
            col: (world.x / TILE_SIZE).floor() as i64,
            row: (world.y / TILE_SIZE).floor() as i64,
        }
    }

    /// World position of the tile's top-left corner.
    pub fn world_origin(self) -> Point {
        Point::new(self.col as f64 * TILE_SIZE, self.row as f64 * TILE_SIZE)
    }

    pub fn offset(self, dcol: i64, drow: i64) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }
}

/// One square cell of map content.
///
/// Tiles are produced and mutated by an external loader thread; the renderer only reads the
/// `loaded` flag and the fade alpha. The image is published before `loaded` flips, so a reader that
/// observes `is_loaded() == true` also observes the image.
#[derive(Debug)]
pub struct Tile {
    coord: TileCoord,
    loaded: AtomicBool,
    alpha_bits: AtomicU32,
    image: OnceLock<Arc<RasterImage>>,
}

impl Tile {
    pub fn new(coord: TileCoord) -> Self {
        Self {
            coord,
            loaded: AtomicBool::new(false),
            alpha_bits: AtomicU32::new(0f32.to_bits()),
            image: OnceLock::new(),
        }
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn alpha(&self) -> f32 {
        f32::from_bits(self.alpha_bits.load(Ordering::Acquire))
    }

    pub fn image(&self) -> Option<&Arc<RasterImage>> {
        self.image.get()
    }

    /// Attach the tile's raster. Returns `false` when an image was already attached.
    pub fn set_image(&self, image: Arc<RasterImage>) -> bool {
        self.image.set(image).is_ok()
    }

    pub fn mark_loaded(&self) {
        self.loaded.store(true, Ordering::Release);
    }

    pub fn set_alpha(&self, alpha: f32) {
        let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        self.alpha_bits.store(a.to_bits(), Ordering::Release);
    }

    /// Increase alpha by `delta`, saturating at 1. Returns the new alpha.
    pub fn advance_alpha(&self, delta: f32) -> f32 {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let prev = self
            .alpha_bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((f32::from_bits(bits) + delta).min(1.0).to_bits())
            })
            .unwrap_or_else(|bits| bits);
        (f32::from_bits(prev) + delta).min(1.0)
    }
}

/// Shape of a row-major block of tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridLayout {
    /// Coordinate of the top-left tile.
    pub origin: TileCoord,
    pub per_row: usize,
    pub per_column: usize,
}

impl GridLayout {
    pub fn new(origin: TileCoord, per_row: usize, per_column: usize) -> Self {
        Self {
            origin,
            per_row,
            per_column,
        }
    }

    /// Smallest layout whose tiles cover every point of `world`.
    pub fn covering(world: Rect) -> Self {
        let first = TileCoord::containing(Point::new(world.x0, world.y0));
        let end_col = (world.x1 / TILE_SIZE).ceil() as i64;
        let end_row = (world.y1 / TILE_SIZE).ceil() as i64;
        let per_row = usize::try_from(end_col - first.col).unwrap_or(0).max(1);
        let per_column = usize::try_from(end_row - first.row).unwrap_or(0).max(1);
        Self::new(first, per_row, per_column)
    }

    pub fn len(self) -> usize {
        self.per_row * self.per_column
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Coordinate of the tile at row-major position `index`.
    pub fn coord_at(self, index: usize) -> Option<TileCoord> {
        if index >= self.len() {
            return None;
        }
        let row = (index / self.per_row) as i64;
        let col = (index % self.per_row) as i64;
        Some(self.origin.offset(col, row))
    }

    pub fn world_origin(self) -> Point {
        self.origin.world_origin()
    }

    /// World-space rectangle covered by the whole layout.
    pub fn world_rect(self) -> Rect {
        let o = self.world_origin();
        Rect::new(
            o.x,
            o.y,
            o.x + self.per_row as f64 * TILE_SIZE,
            o.y + self.per_column as f64 * TILE_SIZE,
        )
    }
}

/// Snapshot of the visible tiles in row-major order.
#[derive(Clone, Debug)]
pub struct TileGrid {
    layout: GridLayout,
    tiles: Vec<Arc<Tile>>,
}

impl TileGrid {
    /// Build a grid from tiles listed left-to-right, top-to-bottom.
    pub fn new(layout: GridLayout, tiles: Vec<Arc<Tile>>) -> TilescopeResult<Self> {
        if tiles.len() != layout.len() {
            return Err(TilescopeError::validation(format!(
                "grid of {}x{} needs {} tiles, got {}",
                layout.per_row,
                layout.per_column,
                layout.len(),
                tiles.len()
            )));
        }
        for (idx, tile) in tiles.iter().enumerate() {
            if layout.coord_at(idx) != Some(tile.coord()) {
                return Err(TilescopeError::validation(format!(
                    "tile {idx} has coord {:?}, expected row-major {:?}",
                    tile.coord(),
                    layout.coord_at(idx)
                )));
            }
        }
        Ok(Self { layout, tiles })
    }

    /// Grid of fresh, unloaded tiles for every coordinate of `layout`.
    pub fn unloaded(layout: GridLayout) -> Self {
        let tiles = (0..layout.len())
            .filter_map(|idx| layout.coord_at(idx))
            .map(|coord| Arc::new(Tile::new(coord)))
            .collect();
        Self { layout, tiles }
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn per_row(&self) -> usize {
        self.layout.per_row
    }

    pub fn per_column(&self) -> usize {
        self.layout.per_column
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Arc<Tile>] {
        &self.tiles
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Arc<Tile>> {
        if col >= self.layout.per_row {
            return None;
        }
        self.tiles.get(row * self.layout.per_row + col)
    }

    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            index: 0,
        }
    }
}

impl<'a> IntoIterator for &'a TileGrid {
    type Item = GridItem<'a>;
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A tile together with its grid position and an end-of-row marker.
#[derive(Clone, Copy, Debug)]
pub struct GridItem<'a> {
    pub tile: &'a Tile,
    pub row: usize,
    pub col: usize,
    pub end_of_row: bool,
}

pub struct GridIter<'a> {
    grid: &'a TileGrid,
    index: usize,
}

impl<'a> Iterator for GridIter<'a> {
    type Item = GridItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let tile = self.grid.tiles.get(self.index)?;
        let per_row = self.grid.layout.per_row;
        let row = self.index / per_row;
        let col = self.index % per_row;
        self.index += 1;
        Some(GridItem {
            tile,
            row,
            col,
            end_of_row: col + 1 == per_row,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.grid.tiles.len().saturating_sub(self.index);
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for GridIter<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/tile/grid.rs"]
mod tests;
