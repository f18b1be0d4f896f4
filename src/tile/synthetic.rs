use std::sync::Arc;

use crate::{
    assets::raster::RasterImage,
    foundation::{error::TilescopeResult, math::Fnv1a64},
    settings::Dimension,
    tile::grid::{GridLayout, TILE_SIZE, Tile, TileCoord, TileGrid},
};

/// Side length in samples of one block of uniform colour.
const BLOCK: u32 = 4;

/// Procedurally coloured raster for `coord`, `size` samples wide.
///
/// Colours are a pure function of the world position of each block, so neighbouring tiles line up
/// and repeated calls are identical. In the void dimension most blocks are transparent and only
/// scattered islands remain.
pub fn synthetic_tile_image(
    coord: TileCoord,
    dimension: Dimension,
    size: u32,
    seed: u64,
) -> TilescopeResult<RasterImage> {
    let size = size.max(1);
    let units_per_sample = TILE_SIZE / f64::from(size);
    let origin = coord.world_origin();

    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let wx = origin.x as i64 + block_offset(x, units_per_sample);
            let wy = origin.y as i64 + block_offset(y, units_per_sample);
            let mut h = Fnv1a64::new(seed ^ Fnv1a64::OFFSET_BASIS);
            h.write_i64(wx);
            h.write_i64(wy);
            data.extend_from_slice(&block_color(dimension, h.finish()));
        }
    }
    RasterImage::from_premul_rgba8(size, size, data)
}

/// World offset of the block containing sample `i`.
fn block_offset(i: u32, units_per_sample: f64) -> i64 {
    ((i / BLOCK) as f64 * BLOCK as f64 * units_per_sample) as i64
}

fn block_color(dimension: Dimension, hash: u64) -> [u8; 4] {
    let jitter = (hash >> 8) as u8 % 24;
    match dimension {
        Dimension::Overworld => match hash % 10 {
            0..=2 => [30, 70 + jitter, 160 + jitter, 255],
            3 => [200 + jitter / 2, 190 + jitter / 2, 120, 255],
            _ => [40 + jitter, 120 + jitter, 40, 255],
        },
        Dimension::Nether => match hash % 8 {
            0 => [220, 110 + jitter, 20, 255],
            _ => [100 + jitter, 30, 30 + jitter / 2, 255],
        },
        Dimension::End => match hash % 5 {
            0 => [200 + jitter, 200 + jitter, 150, 255],
            _ => [0, 0, 0, 0],
        },
    }
}

/// Fully loaded grid of synthetic tiles for `layout`.
pub fn synthetic_grid(
    layout: GridLayout,
    dimension: Dimension,
    size: u32,
    seed: u64,
) -> TilescopeResult<TileGrid> {
    let mut tiles = Vec::with_capacity(layout.len());
    for idx in 0..layout.len() {
        let Some(coord) = layout.coord_at(idx) else {
            break;
        };
        let tile = Tile::new(coord);
        tile.set_image(Arc::new(synthetic_tile_image(coord, dimension, size, seed)?));
        tile.set_alpha(1.0);
        tile.mark_loaded();
        tiles.push(Arc::new(tile));
    }
    TileGrid::new(layout, tiles)
}

#[cfg(test)]
#[path = "../../tests/unit/tile/synthetic.rs"]
mod tests;
