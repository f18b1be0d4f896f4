use std::{cell::Cell, rc::Rc, sync::Arc, time::Instant};

use crate::{
    assets::{
        raster::RasterImage,
        table::{AssetTable, ChromeAssets},
        text::TextMetrics,
    },
    config::RendererOpts,
    foundation::{
        core::{Point, Rect, Rgba8Premul, Transform2D, Viewport},
        error::TilescopeResult,
    },
    render::{
        accel::AccelerationSampler,
        border::Border,
        layer::Layer,
        surface::{Interpolation, Surface},
        widget::{Widget, WidgetContext},
    },
    settings::{Dimension, Setting},
    tile::grid::{Resolution, TILE_SIZE, TileGrid},
    view::{pan::PanController, translator::ViewportTranslator, zoom::ZoomController},
};

/// Millisecond time source for frame pacing.
pub trait Clock {
    fn now_ms(&mut self) -> i64;
}

/// Monotonic wall clock.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> i64 {
        i64::try_from(self.start.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

/// Hand-driven clock; clones share the same current time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: i64) {
        self.now.set(ms);
    }

    /// Move the clock by `ms`, which may be negative to simulate clock skew.
    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> i64 {
        self.now.get()
    }
}

/// Convert a raw millisecond delta to seconds, clamped to `[0, max_ms]`.
pub fn clamp_frame_delta(raw_ms: i64, max_ms: u64) -> f32 {
    let max = i64::try_from(max_ms).unwrap_or(i64::MAX);
    raw_ms.clamp(0, max) as f32 / 1000.0
}

/// Working transform for a row-major walk over the tile grid.
///
/// Starts at the grid's top-left tile and moves one tile right per step; after the last tile of a
/// row it moves back to the first column and one row down. The transform for tile `(r, c)` equals
/// `base.translate(c * TILE_SIZE, r * TILE_SIZE)`. After a complete pass over `R` rows the cursor
/// has wrapped `R` times and sits at `base.translate(0, R * TILE_SIZE)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileCursor {
    transform: Transform2D,
    per_row: usize,
    row_wraps: usize,
}

impl TileCursor {
    pub fn new(base: Transform2D, per_row: usize) -> Self {
        Self {
            transform: base,
            per_row,
            row_wraps: 0,
        }
    }

    pub fn transform(&self) -> Transform2D {
        self.transform
    }

    pub fn row_wraps(&self) -> usize {
        self.row_wraps
    }

    #[must_use]
    pub fn advance(self, end_of_row: bool) -> Self {
        let mut transform = self.transform.translate(TILE_SIZE, 0.0);
        let mut row_wraps = self.row_wraps;
        if end_of_row {
            transform = transform.translate(-TILE_SIZE * self.per_row as f64, TILE_SIZE);
            row_wraps += 1;
        }
        Self {
            transform,
            per_row: self.per_row,
            row_wraps,
        }
    }
}

/// Per-frame inputs that are not owned by the renderer.
pub struct FrameInput<'a> {
    pub viewport: Viewport,
    /// Pointer in screen pixels; `None` while the pointer is outside the view.
    pub pointer: Option<Point>,
    pub text_metrics: &'a mut dyn TextMetrics,
}

/// What a single frame did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Clamped elapsed time, in seconds.
    pub time: f32,
    /// Acceleration ratio handed to widgets.
    pub acceleration_ratio: f32,
    pub void_texture_drawn: bool,
    pub layers_drawn: usize,
    /// Calls into [`Layer::draw`] across all layers.
    pub tile_draws: usize,
    /// Working-transform row wraps across all layer passes.
    pub row_wraps: usize,
    pub border_drawn: bool,
    pub widgets_drawn: usize,
}

/// Draws the tile map once per frame.
///
/// Owns the view controllers, the acceleration sampler and the last-frame timestamp; everything
/// else (tiles, viewport, pointer) is passed in per frame. Layers draw in grid space, the border
/// and widgets in screen space. Not reentrant; drive it from one thread.
pub struct FrameRenderer {
    opts: RendererOpts,
    border: Border,
    void_texture: Arc<RasterImage>,
    layers: Vec<Box<dyn Layer>>,
    widgets: Vec<Box<dyn Widget>>,
    dimension: Setting<Dimension>,
    clock: Box<dyn Clock>,
    last_time_ms: i64,
    sampler: AccelerationSampler,
    acceleration_ratio: f32,
    ratio_published: bool,
    zoom: ZoomController,
    pan: PanController,
    translator: ViewportTranslator,
}

impl FrameRenderer {
    pub fn new(
        opts: RendererOpts,
        assets: &AssetTable,
        layers: Vec<Box<dyn Layer>>,
        widgets: Vec<Box<dyn Widget>>,
        dimension: Setting<Dimension>,
        mut clock: Box<dyn Clock>,
    ) -> TilescopeResult<Self> {
        opts.validate()?;
        let chrome = ChromeAssets::resolve(assets)?;
        let last_time_ms = clock.now_ms();
        Ok(Self {
            border: Border::new(&chrome, opts.border_inset_px),
            void_texture: chrome.void_texture,
            zoom: ZoomController::new(opts.zoom.clone()),
            pan: PanController::new(opts.pan.clone()),
            translator: ViewportTranslator::new(),
            opts,
            layers,
            widgets,
            dimension,
            clock,
            last_time_ms,
            sampler: AccelerationSampler::new(),
            acceleration_ratio: 0.0,
            ratio_published: false,
        })
    }

    pub fn opts(&self) -> &RendererOpts {
        &self.opts
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomController {
        &mut self.zoom
    }

    pub fn pan(&self) -> &PanController {
        &self.pan
    }

    pub fn pan_mut(&mut self) -> &mut PanController {
        &mut self.pan
    }

    pub fn translator(&self) -> &ViewportTranslator {
        &self.translator
    }

    /// Last published acceleration ratio; `0.0` until the first one.
    pub fn acceleration_ratio(&self) -> f32 {
        self.acceleration_ratio
    }

    pub fn ratio_published(&self) -> bool {
        self.ratio_published
    }

    /// Operations collected toward the next ratio.
    pub fn sampler(&self) -> &AccelerationSampler {
        &self.sampler
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    /// Render one interactive frame.
    #[tracing::instrument(skip(self, surface, grid, input), fields(viewport = ?input.viewport))]
    pub fn draw(
        &mut self,
        surface: &mut dyn Surface,
        grid: &TileGrid,
        input: FrameInput<'_>,
    ) -> TilescopeResult<FrameStats> {
        let time = self.elapsed_since_last_draw();
        self.update_acceleration_ratio();
        self.zoom.update(input.viewport, &mut self.pan, time);
        self.pan.update(self.zoom.current(), input.pointer, time);
        self.translator
            .update(input.viewport, &self.pan, &self.zoom, grid.layout());

        let mut stats = FrameStats {
            time,
            acceleration_ratio: self.acceleration_ratio,
            ..FrameStats::default()
        };
        self.clear(surface, input.viewport);
        self.draw_fragments(surface, grid, time, &mut stats)?;
        self.border.draw(surface, input.viewport, &mut self.sampler);
        stats.border_drawn = true;
        self.draw_widgets(surface, input, time, false, &mut stats)?;
        Ok(stats)
    }

    /// Render a deterministic snapshot: zero elapsed time, zero acceleration ratio, no view
    /// animation and no border.
    #[tracing::instrument(skip(self, surface, grid, input), fields(viewport = ?input.viewport))]
    pub fn draw_capture(
        &mut self,
        surface: &mut dyn Surface,
        grid: &TileGrid,
        input: FrameInput<'_>,
    ) -> TilescopeResult<FrameStats> {
        let time = 0.0;
        self.translator
            .update(input.viewport, &self.pan, &self.zoom, grid.layout());

        let mut stats = FrameStats::default();
        self.clear(surface, input.viewport);
        self.draw_fragments(surface, grid, time, &mut stats)?;
        self.draw_widgets(surface, input, time, true, &mut stats)?;
        Ok(stats)
    }

    fn elapsed_since_last_draw(&mut self) -> f32 {
        let now = self.clock.now_ms();
        let time = clamp_frame_delta(
            now.saturating_sub(self.last_time_ms),
            self.opts.max_frame_delta_ms,
        );
        self.last_time_ms = now;
        time
    }

    fn update_acceleration_ratio(&mut self) {
        let seen = self.sampler.operation_count();
        if let Some(ratio) = self.sampler.take_ratio_if_above(self.opts.sample_threshold) {
            tracing::debug!(ratio, operations = seen, "published acceleration ratio");
            self.acceleration_ratio = ratio;
            self.ratio_published = true;
        }
    }

    fn clear(&self, surface: &mut dyn Surface, viewport: Viewport) {
        if viewport.is_empty() {
            tracing::trace!("zero-sized viewport, nothing to clear");
            return;
        }
        let [r, g, b, a] = self.opts.clear_rgba;
        surface.set_opacity(1.0);
        surface.fill_rect(viewport.rect(), Rgba8Premul::from_straight_rgba(r, g, b, a));
    }

    /// Void texture and layer passes in grid space. The surface transform, opacity and
    /// interpolation are restored before returning, also when a layer fails.
    fn draw_fragments(
        &mut self,
        surface: &mut dyn Surface,
        grid: &TileGrid,
        time: f32,
        stats: &mut FrameStats,
    ) -> TilescopeResult<()> {
        let original = surface.transform();
        let original_interpolation = surface.interpolation();
        surface.set_interpolation(Interpolation::Nearest);
        let base = self.translator.grid_transform(original);

        if self.dimension.get().is_void() {
            self.draw_void_texture(surface, grid, base);
            stats.void_texture_drawn = true;
        }
        let result = self.draw_layers(surface, grid, base, time, stats);

        surface.set_opacity(1.0);
        surface.set_transform(original);
        surface.set_interpolation(original_interpolation);
        result
    }

    fn draw_void_texture(&self, surface: &mut dyn Surface, grid: &TileGrid, base: Transform2D) {
        let res = Resolution::Quarter;
        let tile_extent = f64::from(res.steps_per_tile()) * res.units_per_step();
        let area = Rect::new(
            0.0,
            0.0,
            tile_extent * grid.per_row() as f64,
            tile_extent * grid.per_column() as f64,
        );
        surface.set_transform(base);
        surface.fill_texture(&self.void_texture, self.opts.void_texture_scale, area);
    }

    fn draw_layers(
        &mut self,
        surface: &mut dyn Surface,
        grid: &TileGrid,
        base: Transform2D,
        time: f32,
        stats: &mut FrameStats,
    ) -> TilescopeResult<()> {
        for layer in self.layers.iter_mut() {
            if !layer.is_enabled() {
                continue;
            }
            let draws_unloaded = layer.draws_unloaded();
            let mut cursor = TileCursor::new(base, grid.per_row());
            let mut result = Ok(());

            for item in grid {
                let opacity = if draws_unloaded {
                    Some(1.0)
                } else if item.tile.is_loaded() {
                    Some(item.tile.alpha())
                } else {
                    None
                };
                if let Some(opacity) = opacity {
                    surface.set_opacity(opacity);
                    surface.set_transform(cursor.transform());
                    if let Err(err) = layer.draw(item.tile, surface, time) {
                        result = Err(err);
                        break;
                    }
                    stats.tile_draws += 1;
                }
                cursor = cursor.advance(item.end_of_row);
            }

            stats.row_wraps += cursor.row_wraps();
            let layer_sampler = layer.sampler_mut();
            self.sampler.add_from(layer_sampler);
            layer_sampler.clear();

            if result.is_err() {
                tracing::debug!(layer = layer.name(), "layer failed, aborting frame");
                return result;
            }
            stats.layers_drawn += 1;
        }
        Ok(())
    }

    fn draw_widgets(
        &mut self,
        surface: &mut dyn Surface,
        input: FrameInput<'_>,
        time: f32,
        capture: bool,
        stats: &mut FrameStats,
    ) -> TilescopeResult<()> {
        let screen = surface.transform();
        let (acceleration_ratio, ratio_published) = if capture {
            (0.0, false)
        } else {
            (self.acceleration_ratio, self.ratio_published)
        };
        let mut ctx = WidgetContext {
            viewport: input.viewport,
            pointer: input.pointer,
            text_metrics: input.text_metrics,
            time,
            acceleration_ratio,
            ratio_published,
            capture,
            translator: &self.translator,
        };
        for widget in self.widgets.iter_mut() {
            widget.update(&mut ctx);
            if !widget.is_visible() {
                continue;
            }
            surface.set_opacity(widget.alpha());
            let result = widget.draw(surface);
            surface.set_opacity(1.0);
            surface.set_transform(screen);
            result?;
            stats.widgets_drawn += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
