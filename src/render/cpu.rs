use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use crate::{
    assets::{
        raster::{ImageId, RasterImage},
        text::{TextBrushRgba8, TextLayoutEngine},
    },
    foundation::{
        core::{Affine, Point, Rect, Rgba8Premul, Transform2D, Vec2},
        error::{TilescopeError, TilescopeResult},
    },
    render::{
        accel::DrawPath,
        surface::{Interpolation, Surface, clamp_opacity, is_degenerate},
    },
};

/// Environment variable overriding the number of cached image pixmaps.
pub const ENV_IMAGE_CACHE_CAPACITY: &str = "TILESCOPE_IMAGE_CACHE_CAPACITY";

const DEFAULT_IMAGE_CACHE_CAPACITY: usize = 256;

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixels with premultiplication undone, as expected by PNG encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let c = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            };
            out.extend_from_slice(&c.to_straight());
        }
        out
    }
}

/// Software surface rasterizing through `vello_cpu`.
///
/// Draw calls accumulate in a render context between [`CpuSurface::begin_frame`] and
/// [`CpuSurface::finish`]. Image rasters are converted to pixmaps once and kept in a small LRU
/// cache keyed by [`ImageId`]; a draw that has to convert (upload) its image first is reported as
/// [`DrawPath::Fallback`], as are translucent draws, rotated/sheared image draws and all text.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    transform: Transform2D,
    opacity: f32,
    interpolation: Interpolation,
    images: PixmapCache,
    font: Option<SurfaceFont>,
}

struct SurfaceFont {
    engine: TextLayoutEngine,
    data: vello_cpu::peniko::FontData,
}

#[derive(Clone)]
struct CachedPixmap {
    pixmap: Arc<vello_cpu::Pixmap>,
    opaque: bool,
}

struct PixmapCache {
    entries: HashMap<ImageId, CachedPixmap>,
    lru: VecDeque<ImageId>,
    capacity: usize,
}

impl PixmapCache {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn get(&mut self, id: ImageId) -> Option<CachedPixmap> {
        let hit = self.entries.get(&id).cloned()?;
        self.touch(id);
        Some(hit)
    }

    fn insert(&mut self, id: ImageId, entry: CachedPixmap) {
        self.entries.insert(id, entry);
        self.touch(id);
        while self.lru.len() > self.capacity {
            if let Some(old) = self.lru.pop_front() {
                self.entries.remove(&old);
            }
        }
    }

    fn touch(&mut self, id: ImageId) {
        if let Some(pos) = self.lru.iter().position(|x| *x == id) {
            self.lru.remove(pos);
        }
        self.lru.push_back(id);
    }
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> TilescopeResult<Self> {
        let width: u16 = width
            .try_into()
            .map_err(|_| TilescopeError::render("surface width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| TilescopeError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(TilescopeError::render("surface must be non-empty"));
        }

        let capacity = std::env::var(ENV_IMAGE_CACHE_CAPACITY)
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_IMAGE_CACHE_CAPACITY);

        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            transform: Transform2D::IDENTITY,
            opacity: 1.0,
            interpolation: Interpolation::default(),
            images: PixmapCache::new(capacity),
            font: None,
        })
    }

    /// Enable text drawing with the given font file.
    pub fn with_font(mut self, font_bytes: Vec<u8>) -> TilescopeResult<Self> {
        let engine = TextLayoutEngine::with_font(font_bytes)?;
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(engine.font_bytes().as_ref().clone()),
            0,
        );
        self.font = Some(SurfaceFont { engine, data });
        Ok(self)
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.images = PixmapCache::new(capacity);
        self
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Number of image pixmaps currently cached.
    pub fn cached_images(&self) -> usize {
        self.images.entries.len()
    }

    /// Discard pending draw calls and reset transform, opacity and interpolation.
    ///
    /// The pixmap cache survives across frames.
    pub fn begin_frame(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.transform = Transform2D::IDENTITY;
        self.opacity = 1.0;
        self.interpolation = Interpolation::default();
    }

    /// Rasterize every draw call since [`begin_frame`](Self::begin_frame) and start a new frame.
    pub fn finish(&mut self) -> FrameRGBA {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        let frame = FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        };
        self.begin_frame();
        frame
    }

    fn pixmap_for(&mut self, image: &RasterImage) -> TilescopeResult<(CachedPixmap, bool)> {
        if let Some(hit) = self.images.get(image.id()) {
            return Ok((hit, true));
        }
        let (pixmap, opaque) =
            image_premul_bytes_to_pixmap(image.rgba8_premul(), image.width(), image.height())?;
        let entry = CachedPixmap {
            pixmap: Arc::new(pixmap),
            opaque,
        };
        self.images.insert(image.id(), entry.clone());
        Ok((entry, false))
    }

    fn classify_image(&self, cached: bool, opaque: bool) -> DrawPath {
        if cached && opaque && self.opacity >= 1.0 && self.transform.is_axis_aligned() {
            DrawPath::Accelerated
        } else {
            DrawPath::Fallback
        }
    }

    fn with_opacity(&mut self, draw: impl FnOnce(&mut vello_cpu::RenderContext)) {
        let translucent = self.opacity < 1.0;
        if translucent {
            self.ctx.push_opacity_layer(self.opacity);
        }
        draw(&mut self.ctx);
        if translucent {
            self.ctx.pop_layer();
        }
    }

    fn paint_image(
        &mut self,
        image: &RasterImage,
        placement: Affine,
        rect: Rect,
        repeat: bool,
    ) -> DrawPath {
        let (entry, cached) = match self.pixmap_for(image) {
            Ok(v) => v,
            Err(err) => {
                tracing::trace!(image = image.id().as_u64(), %err, "skipping image draw");
                return DrawPath::Fallback;
            }
        };
        let paint = image_paint(entry.pixmap, self.interpolation, repeat);

        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(affine_to_cpu(self.transform.to_affine() * placement));
        self.ctx.set_paint(paint);
        self.with_opacity(|ctx| ctx.fill_rect(&rect_to_cpu(rect)));

        self.classify_image(cached, entry.opaque)
    }
}

impl Surface for CpuSurface {
    fn transform(&self) -> Transform2D {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform2D) {
        self.transform = transform;
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = clamp_opacity(opacity);
    }

    fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) -> DrawPath {
        if is_degenerate(rect) {
            return DrawPath::Accelerated;
        }
        let [r, g, b, a] = color.to_straight();
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(affine_to_cpu(self.transform.to_affine()));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.with_opacity(|ctx| ctx.fill_rect(&rect_to_cpu(rect)));

        if color.a == 255 && self.opacity >= 1.0 {
            DrawPath::Accelerated
        } else {
            DrawPath::Fallback
        }
    }

    fn draw_image(&mut self, image: &RasterImage, dest: Rect) -> DrawPath {
        if is_degenerate(dest) {
            return DrawPath::Accelerated;
        }
        let (w, h) = (f64::from(image.width()), f64::from(image.height()));
        let placement = Affine::translate(Vec2::new(dest.x0, dest.y0))
            * Affine::scale_non_uniform(dest.width() / w, dest.height() / h);
        self.paint_image(image, placement, Rect::new(0.0, 0.0, w, h), false)
    }

    fn fill_texture(&mut self, texture: &RasterImage, scale: f64, area: Rect) -> DrawPath {
        if is_degenerate(area) || !(scale.is_finite() && scale > 0.0) {
            return DrawPath::Accelerated;
        }
        let placement = Affine::scale(scale);
        let local = Rect::new(
            area.x0 / scale,
            area.y0 / scale,
            area.x1 / scale,
            area.y1 / scale,
        );
        self.paint_image(texture, placement, local, true)
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        size_px: f32,
        color: Rgba8Premul,
    ) -> DrawPath {
        let Some(font) = self.font.as_mut() else {
            tracing::trace!(text, "no font configured, skipping text");
            return DrawPath::Fallback;
        };
        let [r, g, b, a] = color.to_straight();
        let layout = match font
            .engine
            .layout_plain(text, size_px, TextBrushRgba8 { r, g, b, a })
        {
            Ok(layout) => layout,
            Err(err) => {
                tracing::trace!(text, %err, "skipping text");
                return DrawPath::Fallback;
            }
        };
        let font_data = font.data.clone();

        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(
            self.transform.to_affine() * Affine::translate(origin.to_vec2()),
        ));
        self.with_opacity(|ctx| {
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));

                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&font_data)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        });

        DrawPath::Fallback
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn image_paint(
    pixmap: Arc<vello_cpu::Pixmap>,
    interpolation: Interpolation,
    repeat: bool,
) -> vello_cpu::Image {
    let mut sampler = vello_cpu::peniko::ImageSampler::default();
    if interpolation == Interpolation::Nearest {
        sampler.quality = vello_cpu::peniko::ImageQuality::Low;
    }
    if repeat {
        sampler.x_extend = vello_cpu::peniko::Extend::Repeat;
        sampler.y_extend = vello_cpu::peniko::Extend::Repeat;
    }
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(pixmap),
        sampler,
    }
}

/// Convert premultiplied bytes to a pixmap; also reports whether every pixel is opaque.
fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> TilescopeResult<(vello_cpu::Pixmap, bool)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| TilescopeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| TilescopeError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(TilescopeError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok((pixmap, !may_have_opacities))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
