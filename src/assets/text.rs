use std::sync::Arc;

use crate::foundation::error::{TilescopeError, TilescopeResult};

/// Measured extent of a run of text in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Text measurement handed to widgets once per frame so they can size their panels.
pub trait TextMetrics {
    fn measure(&mut self, text: &str, size_px: f32) -> TextExtent;
}

/// Font-free metrics that assume every glyph has the same advance.
///
/// Used when no font is configured and by tests that need exact, platform-independent numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMetrics {
    /// Advance per character, as a fraction of the font size.
    pub advance_em: f64,
    /// Line height, as a fraction of the font size.
    pub line_height_em: f64,
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            line_height_em: 1.2,
        }
    }
}

impl TextMetrics for FixedAdvanceMetrics {
    fn measure(&mut self, text: &str, size_px: f32) -> TextExtent {
        let size = f64::from(size_px.max(0.0));
        TextExtent {
            width: text.chars().count() as f64 * self.advance_em * size,
            height: self.line_height_em * size,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Stateful helper for building Parley text layouts from one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font_bytes: Arc<Vec<u8>>,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and keep its primary family for every layout.
    pub fn with_font(font_bytes: Vec<u8>) -> TilescopeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            TilescopeError::asset("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TilescopeError::asset("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_bytes: Arc::new(font_bytes),
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn font_bytes(&self) -> &Arc<Vec<u8>> {
        &self.font_bytes
    }

    /// Shape and lay out a single unwrapped line of text.
    pub fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> TilescopeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TilescopeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// [`TextMetrics`] backed by real shaping through Parley.
pub struct ParleyTextMetrics {
    engine: TextLayoutEngine,
}

impl ParleyTextMetrics {
    pub fn new(engine: TextLayoutEngine) -> Self {
        Self { engine }
    }
}

impl TextMetrics for ParleyTextMetrics {
    fn measure(&mut self, text: &str, size_px: f32) -> TextExtent {
        match self
            .engine
            .layout_plain(text, size_px, TextBrushRgba8::default())
        {
            Ok(layout) => TextExtent {
                width: f64::from(layout.width()),
                height: f64::from(layout.height()),
            },
            Err(_) => TextExtent::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
