use crate::{
    config::PanOpts,
    foundation::core::{Point, Vec2},
};

/// Owns the world position shown at the centre of the viewport.
///
/// Input comes from pointer drags and from a keyboard/edge-scroll velocity. After a drag ends the
/// view keeps gliding with exponentially decaying speed; the glide is integrated in closed form so
/// the distance travelled depends only on elapsed time, never on frame count.
#[derive(Clone, Debug)]
pub struct PanController {
    opts: PanOpts,
    center: Point,
    /// Glide velocity in world units per second.
    velocity: Vec2,
    /// Key/edge-scroll velocity in screen pixels per second.
    key_velocity: Vec2,
    dragging: bool,
    last_pointer: Option<Point>,
}

impl PanController {
    pub fn new(opts: PanOpts) -> Self {
        Self {
            opts,
            center: Point::ZERO,
            velocity: Vec2::ZERO,
            key_velocity: Vec2::ZERO,
            dragging: false,
            last_pointer: None,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Jump to `world` and stop any glide.
    pub fn center_on(&mut self, world: Point) {
        self.center = world;
        self.velocity = Vec2::ZERO;
    }

    pub fn shift(&mut self, delta: Vec2) {
        self.center += delta;
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.dragging = true;
        self.last_pointer = Some(pointer);
        self.velocity = Vec2::ZERO;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.last_pointer = None;
        if !self.opts.smooth {
            self.velocity = Vec2::ZERO;
        }
    }

    pub fn set_key_velocity(&mut self, screen_px_per_sec: Vec2) {
        self.key_velocity = screen_px_per_sec;
    }

    /// Advance one frame. A missing pointer during a drag suspends tracking until it returns.
    pub fn update(&mut self, zoom: f64, pointer: Option<Point>, elapsed_secs: f32) {
        let dt = f64::from(elapsed_secs.max(0.0));
        let zoom = if zoom > 0.0 { zoom } else { 1.0 };

        if self.dragging {
            match (self.last_pointer, pointer) {
                (Some(last), Some(now)) => {
                    let world_delta = (now - last) / zoom;
                    self.center -= world_delta;
                    if dt > 0.0 {
                        self.velocity = -world_delta / dt;
                    }
                    self.last_pointer = Some(now);
                }
                (None, Some(now)) => self.last_pointer = Some(now),
                (_, None) => self.last_pointer = None,
            }
        } else {
            self.glide(dt, zoom);
        }

        self.center += self.key_velocity / zoom * dt;
    }

    fn glide(&mut self, dt: f64, zoom: f64) {
        if self.velocity == Vec2::ZERO || dt == 0.0 {
            return;
        }
        let k = self.opts.friction_per_sec;
        if k > 0.0 {
            let decay = (-k * dt).exp();
            self.center += self.velocity * ((1.0 - decay) / k);
            self.velocity *= decay;
        } else {
            self.center += self.velocity * dt;
        }
        if self.velocity.hypot() * zoom < self.opts.stop_speed {
            self.velocity = Vec2::ZERO;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/pan.rs"]
mod tests;
