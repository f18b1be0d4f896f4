use crate::{
    assets::raster::{ImageId, RasterImage},
    foundation::core::{Point, Rect, Rgba8Premul, Transform2D},
    render::accel::DrawPath,
};

/// Image sampling used when a raster is scaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Blocky upscaling; used for map content so individual samples stay visible.
    Nearest,
    #[default]
    Smooth,
}

/// Stateful 2D drawing target.
///
/// A surface carries a current transform and a current opacity that apply to every subsequent draw
/// call, similar to an immediate-mode canvas. Each draw call reports which rasterization path
/// serviced it so callers can feed an [`AccelerationSampler`](crate::AccelerationSampler).
///
/// Rectangles with zero or negative extent are accepted and draw nothing.
pub trait Surface {
    fn transform(&self) -> Transform2D;
    fn set_transform(&mut self, transform: Transform2D);

    fn opacity(&self) -> f32;
    /// Set the blend opacity; values are clamped to `[0, 1]`.
    fn set_opacity(&mut self, opacity: f32);

    fn interpolation(&self) -> Interpolation;
    fn set_interpolation(&mut self, interpolation: Interpolation);

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) -> DrawPath;

    /// Draw `image` stretched to `dest`.
    fn draw_image(&mut self, image: &RasterImage, dest: Rect) -> DrawPath;

    /// Fill `area` with `texture` repeated from the user-space origin, each copy scaled by `scale`.
    fn fill_texture(&mut self, texture: &RasterImage, scale: f64, area: Rect) -> DrawPath;

    /// Draw one line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, size_px: f32, color: Rgba8Premul)
    -> DrawPath;
}

/// What a recorded draw call painted.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawKind {
    Fill(Rgba8Premul),
    Image(ImageId),
    Texture { image: ImageId, scale: f64 },
    Text { text: String, size_px: f32 },
}

/// A draw call captured together with the surface state in effect.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub kind: DrawKind,
    pub rect: Rect,
    pub transform: Transform2D,
    pub opacity: f32,
    pub interpolation: Interpolation,
}

/// Surface that rasterizes nothing and records every call.
///
/// The reported [`DrawPath`] is fixed and configurable, which makes acceleration accounting
/// deterministic under test.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    transform: Transform2D,
    opacity: f32,
    interpolation: Interpolation,
    path: DrawPath,
    calls: Vec<DrawCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::with_path(DrawPath::Accelerated)
    }

    pub fn with_path(path: DrawPath) -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            opacity: 1.0,
            interpolation: Interpolation::default(),
            path,
            calls: Vec::new(),
        }
    }

    pub fn set_path(&mut self, path: DrawPath) {
        self.path = path;
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Calls that drew `image`, in order.
    pub fn image_calls(&self, image: ImageId) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(move |c| match c.kind {
            DrawKind::Image(id) => id == image,
            DrawKind::Texture { image: id, .. } => id == image,
            _ => false,
        })
    }

    fn record(&mut self, kind: DrawKind, rect: Rect) -> DrawPath {
        self.calls.push(DrawCall {
            kind,
            rect,
            transform: self.transform,
            opacity: self.opacity,
            interpolation: self.interpolation,
        });
        self.path
    }
}

impl Surface for RecordingSurface {
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
        self.record(DrawKind::Fill(color), rect)
    }

    fn draw_image(&mut self, image: &RasterImage, dest: Rect) -> DrawPath {
        self.record(DrawKind::Image(image.id()), dest)
    }

    fn fill_texture(&mut self, texture: &RasterImage, scale: f64, area: Rect) -> DrawPath {
        self.record(
            DrawKind::Texture {
                image: texture.id(),
                scale,
            },
            area,
        )
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        size_px: f32,
        _color: Rgba8Premul,
    ) -> DrawPath {
        let rect = Rect::from_origin_size(origin, (0.0, f64::from(size_px)));
        self.record(
            DrawKind::Text {
                text: text.to_owned(),
                size_px,
            },
            rect,
        )
    }
}

pub(crate) fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        return 0.0;
    }
    opacity.clamp(0.0, 1.0)
}

pub(crate) fn is_degenerate(rect: Rect) -> bool {
    !(rect.width() > 0.0 && rect.height() > 0.0)
        || !rect.x0.is_finite()
        || !rect.y0.is_finite()
        || !rect.x1.is_finite()
        || !rect.y1.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
