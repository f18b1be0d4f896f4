use std::collections::VecDeque;

use crate::{
    assets::text::{TextExtent, TextMetrics},
    foundation::{
        core::{Point, Rect, Rgba8Premul, Viewport},
        error::TilescopeResult,
    },
    render::surface::Surface,
    settings::Setting,
    view::translator::ViewportTranslator,
};

/// Per-frame inputs handed to every widget before it draws.
pub struct WidgetContext<'a> {
    pub viewport: Viewport,
    /// Pointer position in screen pixels, absent while the pointer is outside the view.
    pub pointer: Option<Point>,
    pub text_metrics: &'a mut dyn TextMetrics,
    /// Elapsed frame time in seconds.
    pub time: f32,
    /// Last published acceleration ratio; `0.0` until one has been published.
    pub acceleration_ratio: f32,
    pub ratio_published: bool,
    /// Set for static captures. Widgets settle immediately and show nothing that depends on
    /// earlier frames.
    pub capture: bool,
    pub translator: &'a ViewportTranslator,
}

/// Screen-space overlay element.
///
/// Widgets are updated every frame, in registration order, and drawn only while visible. The
/// renderer applies [`Widget::alpha`] as the surface opacity before calling [`Widget::draw`].
pub trait Widget {
    fn update(&mut self, ctx: &mut WidgetContext<'_>);
    fn is_visible(&self) -> bool;
    fn alpha(&self) -> f32;
    fn draw(&mut self, surface: &mut dyn Surface) -> TilescopeResult<()>;
}

/// Alpha that approaches 1 while shown and 0 while hidden at a fixed rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidgetFade {
    alpha: f32,
    rate_per_sec: f32,
}

impl Default for WidgetFade {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl WidgetFade {
    pub fn new(rate_per_sec: f32) -> Self {
        Self {
            alpha: 0.0,
            rate_per_sec,
        }
    }

    /// Fade toward shown or hidden by `time` seconds. Zero elapsed time leaves alpha unchanged.
    pub fn advance(&mut self, shown: bool, time: f32) {
        let step = self.rate_per_sec * time.max(0.0);
        self.alpha = if shown {
            (self.alpha + step).min(1.0)
        } else {
            (self.alpha - step).max(0.0)
        };
    }

    /// Jump straight to shown or hidden.
    pub fn snap(&mut self, shown: bool) {
        self.alpha = if shown { 1.0 } else { 0.0 };
    }

    /// Snap during a capture, fade by the frame time otherwise.
    pub fn follow(&mut self, shown: bool, ctx: &WidgetContext<'_>) {
        if ctx.capture {
            self.snap(shown);
        } else {
            self.advance(shown, ctx.time);
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

/// Corner of the viewport a panel sticks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

const MARGIN_PX: f64 = 16.0;
const PADDING_PX: f64 = 6.0;
const TEXT_PX: f32 = 12.0;

/// Translucent box with one line of text, laid out during update and drawn later.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextPanel {
    text: String,
    rect: Rect,
}

impl TextPanel {
    pub fn layout(
        &mut self,
        text: String,
        anchor: Anchor,
        slot: usize,
        viewport: Viewport,
        metrics: &mut dyn TextMetrics,
    ) {
        let TextExtent { width, height } = metrics.measure(&text, TEXT_PX);
        let (w, h) = (width + 2.0 * PADDING_PX, height + 2.0 * PADDING_PX);
        let (vw, vh) = (f64::from(viewport.width), f64::from(viewport.height));
        let stack = slot as f64 * (h + PADDING_PX);
        let (x, y) = match anchor {
            Anchor::TopLeft => (MARGIN_PX, MARGIN_PX + stack),
            Anchor::TopRight => (vw - MARGIN_PX - w, MARGIN_PX + stack),
            Anchor::BottomLeft => (MARGIN_PX, vh - MARGIN_PX - h - stack),
            Anchor::BottomRight => (vw - MARGIN_PX - w, vh - MARGIN_PX - h - stack),
        };
        self.text = text;
        self.rect = Rect::new(x, y, x + w, y + h);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.rect, panel_color());
        surface.draw_text(
            &self.text,
            Point::new(self.rect.x0 + PADDING_PX, self.rect.y0 + PADDING_PX),
            TEXT_PX,
            text_color(),
        );
    }
}

fn panel_color() -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(0, 0, 0, 176)
}

fn text_color() -> Rgba8Premul {
    Rgba8Premul::opaque(255, 255, 255)
}

fn shown_by(setting: &Option<Setting<bool>>) -> bool {
    setting.as_ref().is_none_or(Setting::get)
}

/// Rolling frames-per-second readout.
pub struct FpsWidget {
    enabled: Option<Setting<bool>>,
    samples: VecDeque<f32>,
    window: usize,
    fade: WidgetFade,
    panel: TextPanel,
}

impl Default for FpsWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsWidget {
    pub fn new() -> Self {
        Self {
            enabled: None,
            samples: VecDeque::new(),
            window: 30,
            fade: WidgetFade::default(),
            panel: TextPanel::default(),
        }
    }

    pub fn gated(mut self, enabled: Setting<bool>) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Average frame rate over the sample window, if any time has passed.
    pub fn fps(&self) -> Option<f32> {
        let total: f32 = self.samples.iter().sum();
        (total > 0.0).then(|| self.samples.len() as f32 / total)
    }

    pub fn panel(&self) -> &TextPanel {
        &self.panel
    }
}

impl Widget for FpsWidget {
    fn update(&mut self, ctx: &mut WidgetContext<'_>) {
        if !ctx.capture && ctx.time > 0.0 {
            self.samples.push_back(ctx.time);
            while self.samples.len() > self.window {
                self.samples.pop_front();
            }
        }
        let text = match self.fps().filter(|_| !ctx.capture) {
            Some(fps) => format!("FPS: {fps:.1}"),
            None => "FPS: --".to_string(),
        };
        self.panel.layout(
            text,
            Anchor::BottomLeft,
            0,
            ctx.viewport,
            &mut *ctx.text_metrics,
        );
        self.fade
            .follow(shown_by(&self.enabled) && !ctx.viewport.is_empty(), ctx);
    }

    fn is_visible(&self) -> bool {
        self.fade.is_visible()
    }

    fn alpha(&self) -> f32 {
        self.fade.alpha()
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> TilescopeResult<()> {
        self.panel.draw(surface);
        Ok(())
    }
}

/// Share of recent draws that took the accelerated path.
pub struct AccelerationWidget {
    enabled: Option<Setting<bool>>,
    fade: WidgetFade,
    panel: TextPanel,
}

impl Default for AccelerationWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelerationWidget {
    pub fn new() -> Self {
        Self {
            enabled: None,
            fade: WidgetFade::default(),
            panel: TextPanel::default(),
        }
    }

    pub fn gated(mut self, enabled: Setting<bool>) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn panel(&self) -> &TextPanel {
        &self.panel
    }
}

impl Widget for AccelerationWidget {
    fn update(&mut self, ctx: &mut WidgetContext<'_>) {
        let percent = (ctx.acceleration_ratio * 100.0).round();
        self.panel.layout(
            format!("Accelerated: {percent:.0}%"),
            Anchor::BottomLeft,
            1,
            ctx.viewport,
            &mut *ctx.text_metrics,
        );
        let shown =
            ctx.ratio_published && shown_by(&self.enabled) && !ctx.viewport.is_empty();
        self.fade.follow(shown, ctx);
    }

    fn is_visible(&self) -> bool {
        self.fade.is_visible()
    }

    fn alpha(&self) -> f32 {
        self.fade.alpha()
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> TilescopeResult<()> {
        self.panel.draw(surface);
        Ok(())
    }
}

/// World coordinates under the pointer.
pub struct CursorWidget {
    fade: WidgetFade,
    panel: TextPanel,
}

impl Default for CursorWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorWidget {
    pub fn new() -> Self {
        Self {
            fade: WidgetFade::default(),
            panel: TextPanel::default(),
        }
    }

    pub fn panel(&self) -> &TextPanel {
        &self.panel
    }
}

impl Widget for CursorWidget {
    fn update(&mut self, ctx: &mut WidgetContext<'_>) {
        let shown = match ctx.pointer {
            Some(pointer) if !ctx.viewport.is_empty() && ctx.translator.zoom() > 0.0 => {
                let world = ctx.translator.screen_to_world(pointer);
                self.panel.layout(
                    format!("{}, {}", world.x.floor() as i64, world.y.floor() as i64),
                    Anchor::TopRight,
                    0,
                    ctx.viewport,
                    &mut *ctx.text_metrics,
                );
                true
            }
            _ => false,
        };
        self.fade.follow(shown, ctx);
    }

    fn is_visible(&self) -> bool {
        self.fade.is_visible()
    }

    fn alpha(&self) -> f32 {
        self.fade.alpha()
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> TilescopeResult<()> {
        self.panel.draw(surface);
        Ok(())
    }
}

/// Scale bar showing a round world distance.
pub struct ScaleWidget {
    max_bar_px: f64,
    fade: WidgetFade,
    panel: TextPanel,
    bar: Rect,
}

impl Default for ScaleWidget {
    fn default() -> Self {
        Self::new()
    }
}

const BAR_HEIGHT_PX: f64 = 4.0;

impl ScaleWidget {
    pub fn new() -> Self {
        Self {
            max_bar_px: 120.0,
            fade: WidgetFade::default(),
            panel: TextPanel::default(),
            bar: Rect::ZERO,
        }
    }

    pub fn bar(&self) -> Rect {
        self.bar
    }

    pub fn panel(&self) -> &TextPanel {
        &self.panel
    }
}

/// Largest 1-2-5 series value not exceeding `limit`.
fn nice_length(limit: f64) -> Option<f64> {
    if !(limit.is_finite() && limit >= 1.0) {
        return None;
    }
    let mut magnitude = 10f64.powf(limit.log10().floor());
    loop {
        for m in [5.0, 2.0, 1.0] {
            if m * magnitude <= limit {
                return Some(m * magnitude);
            }
        }
        magnitude /= 10.0;
    }
}

impl Widget for ScaleWidget {
    fn update(&mut self, ctx: &mut WidgetContext<'_>) {
        let zoom = ctx.translator.zoom();
        let length = if zoom > 0.0 && !ctx.viewport.is_empty() {
            nice_length(self.max_bar_px / zoom)
        } else {
            None
        };
        if let Some(length) = length {
            self.panel.layout(
                format!("{length} blocks"),
                Anchor::BottomRight,
                0,
                ctx.viewport,
                &mut *ctx.text_metrics,
            );
            let r = self.panel.rect();
            let bar_px = length * zoom;
            self.bar = Rect::new(
                r.x1 - bar_px,
                r.y0 - PADDING_PX - BAR_HEIGHT_PX,
                r.x1,
                r.y0 - PADDING_PX,
            );
        }
        self.fade.follow(length.is_some(), ctx);
    }

    fn is_visible(&self) -> bool {
        self.fade.is_visible()
    }

    fn alpha(&self) -> f32 {
        self.fade.alpha()
    }

    fn draw(&mut self, surface: &mut dyn Surface) -> TilescopeResult<()> {
        surface.fill_rect(self.bar, text_color());
        self.panel.draw(surface);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/widget.rs"]
mod tests;
