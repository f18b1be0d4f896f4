use crate::{
    config::ZoomOpts,
    foundation::core::{Point, Viewport},
    view::{pan::PanController, translator::screen_to_world_on},
};

/// Owns the zoom factor and eases it toward a target.
///
/// The approach is exponential in wall time, so splitting an interval into more frames lands on
/// the same value. When a focus point is set, the pan centre is shifted so the world position under
/// the focus stays put while zooming.
#[derive(Clone, Debug)]
pub struct ZoomController {
    opts: ZoomOpts,
    current: f64,
    target: f64,
    focus: Option<Point>,
}

impl ZoomController {
    pub fn new(opts: ZoomOpts) -> Self {
        let initial = opts.initial.clamp(opts.min, opts.max);
        Self {
            opts,
            current: initial,
            target: initial,
            focus: None,
        }
    }

    /// Current zoom factor in screen pixels per world unit.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Scroll by wheel notches around `focus` (screen position). Positive notches zoom out.
    pub fn adjust(&mut self, notches: i32, focus: Option<Point>) {
        let factor = self.opts.step.powi(-notches);
        self.set_target(self.target * factor, focus);
    }

    pub fn set_target(&mut self, value: f64, focus: Option<Point>) {
        if value.is_finite() {
            self.target = value.clamp(self.opts.min, self.opts.max);
        }
        self.focus = focus;
    }

    /// Jump to `value` without easing.
    pub fn reset(&mut self, value: f64) {
        self.set_target(value, None);
        self.current = self.target;
    }

    /// Advance one frame of `elapsed_secs`. `viewport` is the size of the frame being drawn; the
    /// focus point is resolved against it.
    pub fn update(&mut self, viewport: Viewport, pan: &mut PanController, elapsed_secs: f32) {
        if self.is_settled() {
            return;
        }
        let previous = self.current;
        let t = 1.0 - (-self.opts.rate_per_sec * f64::from(elapsed_secs.max(0.0))).exp();
        let mut next = previous + (self.target - previous) * t;
        if (self.target - next).abs() <= self.target * 1e-4 {
            next = self.target;
        }
        self.current = next;

        if let Some(focus) = self.focus {
            let before = screen_to_world_on(viewport, pan.center(), previous, focus);
            let after = screen_to_world_on(viewport, pan.center(), next, focus);
            pan.shift(before - after);
        }
        if self.is_settled() {
            self.focus = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/zoom.rs"]
mod tests;
