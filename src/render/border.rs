use std::sync::Arc;

use crate::{
    assets::{raster::RasterImage, table::ChromeAssets},
    foundation::core::{Rect, Viewport},
    render::{accel::AccelerationSampler, surface::Surface},
};

/// Drop-shadow frame drawn along the inside of the viewport edge.
///
/// Corners are drawn at their natural size; edge strips are stretched between the corners, `inset`
/// pixels thick. Every image is drawn and logged even when the viewport is too small to show it,
/// so a border pass always accounts for exactly eight operations.
#[derive(Clone, Debug)]
pub struct Border {
    top_left: Arc<RasterImage>,
    top_right: Arc<RasterImage>,
    bottom_left: Arc<RasterImage>,
    bottom_right: Arc<RasterImage>,
    top: Arc<RasterImage>,
    bottom: Arc<RasterImage>,
    left: Arc<RasterImage>,
    right: Arc<RasterImage>,
    inset: f64,
}

impl Border {
    pub const OPERATIONS: usize = 8;

    pub fn new(chrome: &ChromeAssets, inset_px: u32) -> Self {
        Self {
            top_left: chrome.top_left.clone(),
            top_right: chrome.top_right.clone(),
            bottom_left: chrome.bottom_left.clone(),
            bottom_right: chrome.bottom_right.clone(),
            top: chrome.top.clone(),
            bottom: chrome.bottom.clone(),
            left: chrome.left.clone(),
            right: chrome.right.clone(),
            inset: f64::from(inset_px),
        }
    }

    /// Image and destination of each border piece for `viewport`, in draw order.
    pub fn placements(&self, viewport: Viewport) -> [(&RasterImage, Rect); Self::OPERATIONS] {
        let i = self.inset;
        let (w, h) = (f64::from(viewport.width), f64::from(viewport.height));
        let natural = |img: &RasterImage, x: f64, y: f64| {
            Rect::new(x, y, x + f64::from(img.width()), y + f64::from(img.height()))
        };
        [
            (&*self.top_left, natural(&*self.top_left, 0.0, 0.0)),
            (&*self.top_right, natural(&*self.top_right, w - i, 0.0)),
            (&*self.bottom_left, natural(&*self.bottom_left, 0.0, h - i)),
            (&*self.bottom_right, natural(&*self.bottom_right, w - i, h - i)),
            (&*self.top, Rect::new(i, 0.0, w - i, i)),
            (&*self.bottom, Rect::new(i, h - i, w - i, h)),
            (&*self.left, Rect::new(0.0, i, i, h - i)),
            (&*self.right, Rect::new(w - i, i, w, h - i)),
        ]
    }

    /// Draw in the surface's current (screen-space) transform and log every piece.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        viewport: Viewport,
        sampler: &mut AccelerationSampler,
    ) {
        for (image, dest) in self.placements(viewport) {
            sampler.log_operation(surface.draw_image(image, dest));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/border.rs"]
mod tests;
