use std::sync::Arc;

use crate::foundation::{
    error::{TilescopeError, TilescopeResult},
    math::Fnv1a64,
};

/// Content-derived identity of a raster image.
///
/// Two images with identical dimensions and pixels share an id, which lets surfaces cache
/// converted pixmaps without relying on pointer identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub(crate) u64);

impl ImageId {
    /// Access raw 64-bit identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    id: ImageId,
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap premultiplied RGBA8 pixels in row-major order.
    pub fn from_premul_rgba8(
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> TilescopeResult<Self> {
        if width == 0 || height == 0 {
            return Err(TilescopeError::validation("raster image must be non-empty"));
        }
        let expected = width as usize * height as usize * 4;
        if rgba8_premul.len() != expected {
            return Err(TilescopeError::validation(format!(
                "raster image byte length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }

        let mut h = Fnv1a64::new_default();
        h.write_u32(width);
        h.write_u32(height);
        h.write_bytes(&rgba8_premul);

        Ok(Self {
            id: ImageId(h.finish()),
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Single-colour image, mostly useful for placeholders and tests.
    pub fn solid(width: u32, height: u32, rgba_premul: [u8; 4]) -> TilescopeResult<Self> {
        let px = width as usize * height as usize;
        let mut data = Vec::with_capacity(px * 4);
        for _ in 0..px {
            data.extend_from_slice(&rgba_premul);
        }
        Self::from_premul_rgba8(width, height, data)
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba8_premul(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }

    /// True when every pixel has full alpha.
    pub fn is_opaque(&self) -> bool {
        self.rgba8_premul.chunks_exact(4).all(|px| px[3] == 255)
    }
}
