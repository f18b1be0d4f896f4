use crate::{
    foundation::{
        core::{Point, Rect, Rgba8Premul},
        error::TilescopeResult,
    },
    render::{accel::AccelerationSampler, surface::Surface},
    settings::Setting,
    tile::grid::{TILE_SIZE, Tile},
};

/// One visual pass drawn across every tile of the grid.
///
/// The renderer positions the surface so that the tile's top-left corner is the user-space origin
/// and one unit equals one world unit; a layer draws into `[0, TILE_SIZE]²`. Layers run in
/// registration order, later layers drawing over earlier ones. `is_enabled` and `draws_unloaded`
/// are read once per frame and must not change while a frame is being drawn.
pub trait Layer {
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    /// Invoke [`Layer::draw`] for tiles that have not finished loading, at full opacity.
    fn draws_unloaded(&self) -> bool {
        false
    }

    /// Draw this layer for one tile. `time` is the frame's elapsed time in seconds.
    fn draw(&mut self, tile: &Tile, surface: &mut dyn Surface, time: f32) -> TilescopeResult<()>;

    /// Operations this layer logged since the renderer last swept them.
    fn sampler_mut(&mut self) -> &mut AccelerationSampler;
}

/// Advances the fade-in alpha of loaded tiles; draws nothing.
///
/// Register it first so every later layer sees the updated alpha in the same frame.
#[derive(Debug)]
pub struct FadeInLayer {
    rate_per_sec: f32,
    sampler: AccelerationSampler,
}

impl Default for FadeInLayer {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl FadeInLayer {
    pub fn new(rate_per_sec: f32) -> Self {
        Self {
            rate_per_sec,
            sampler: AccelerationSampler::new(),
        }
    }
}

impl Layer for FadeInLayer {
    fn name(&self) -> &str {
        "fade-in"
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn draw(&mut self, tile: &Tile, _surface: &mut dyn Surface, time: f32) -> TilescopeResult<()> {
        tile.advance_alpha(time * self.rate_per_sec);
        Ok(())
    }

    fn sampler_mut(&mut self) -> &mut AccelerationSampler {
        &mut self.sampler
    }
}

/// Draws the tile's raster stretched over the whole tile.
#[derive(Debug, Default)]
pub struct TileImageLayer {
    enabled: Option<Setting<bool>>,
    sampler: AccelerationSampler,
}

impl TileImageLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only draw while `enabled` holds `true`.
    pub fn gated(enabled: Setting<bool>) -> Self {
        Self {
            enabled: Some(enabled),
            sampler: AccelerationSampler::new(),
        }
    }
}

impl Layer for TileImageLayer {
    fn name(&self) -> &str {
        "tile-image"
    }

    fn is_enabled(&self) -> bool {
        self.enabled.as_ref().is_none_or(Setting::get)
    }

    fn draw(&mut self, tile: &Tile, surface: &mut dyn Surface, _time: f32) -> TilescopeResult<()> {
        let Some(image) = tile.image() else {
            return Ok(());
        };
        let path = surface.draw_image(image, Rect::new(0.0, 0.0, TILE_SIZE, TILE_SIZE));
        self.sampler.log_operation(path);
        Ok(())
    }

    fn sampler_mut(&mut self) -> &mut AccelerationSampler {
        &mut self.sampler
    }
}

/// Tile outlines with a world-coordinate label, drawn for loaded and unloaded tiles alike.
#[derive(Debug)]
pub struct GridLayer {
    enabled: Setting<bool>,
    line_px: f64,
    label_px: f32,
    color: Rgba8Premul,
    sampler: AccelerationSampler,
}

impl GridLayer {
    pub fn new(enabled: Setting<bool>) -> Self {
        Self {
            enabled,
            line_px: 1.0,
            label_px: 12.0,
            color: Rgba8Premul::from_straight_rgba(255, 255, 255, 160),
            sampler: AccelerationSampler::new(),
        }
    }

    pub fn with_color(mut self, color: Rgba8Premul) -> Self {
        self.color = color;
        self
    }
}

impl Layer for GridLayer {
    fn name(&self) -> &str {
        "grid"
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn draws_unloaded(&self) -> bool {
        true
    }

    fn draw(&mut self, tile: &Tile, surface: &mut dyn Surface, _time: f32) -> TilescopeResult<()> {
        let tile_transform = surface.transform();
        let (sx, sy) = tile_transform.scale_factors();
        if !(sx > 0.0 && sy > 0.0) {
            return Ok(());
        }

        // Lines and label keep a constant on-screen size at every zoom level.
        let (lx, ly) = (self.line_px / sx, self.line_px / sy);
        let top = Rect::new(0.0, 0.0, TILE_SIZE, ly);
        let left = Rect::new(0.0, 0.0, lx, TILE_SIZE);
        self.sampler.log_operation(surface.fill_rect(top, self.color));
        self.sampler.log_operation(surface.fill_rect(left, self.color));

        let origin = tile.coord().world_origin();
        let label = format!("{}, {}", origin.x as i64, origin.y as i64);
        surface.set_transform(tile_transform.scale(1.0 / sx, 1.0 / sy));
        let path = surface.draw_text(&label, Point::new(4.0, 4.0), self.label_px, self.color);
        surface.set_transform(tile_transform);
        self.sampler.log_operation(path);
        Ok(())
    }

    fn sampler_mut(&mut self) -> &mut AccelerationSampler {
        &mut self.sampler
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
