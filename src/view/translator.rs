use crate::{
    foundation::core::{Point, Rect, Transform2D, Vec2, Viewport},
    tile::grid::GridLayout,
    view::{pan::PanController, zoom::ZoomController},
};

/// Maps between screen pixels and world coordinates for the current frame.
///
/// The translator owns no view state of its own: `update` reads the pan centre and zoom factor
/// from their controllers and derives where the tile grid's origin lands on screen. Calling it
/// twice with the same inputs yields the same result.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportTranslator {
    viewport: Viewport,
    center: Point,
    zoom: f64,
    grid_origin: Point,
    left_on_screen: f64,
    top_on_screen: f64,
}

impl Default for ViewportTranslator {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            center: Point::ZERO,
            zoom: 1.0,
            grid_origin: Point::ZERO,
            left_on_screen: 0.0,
            top_on_screen: 0.0,
        }
    }
}

impl ViewportTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(
        &mut self,
        viewport: Viewport,
        pan: &PanController,
        zoom: &ZoomController,
        grid: GridLayout,
    ) {
        self.update_raw(viewport, pan.center(), zoom.current(), grid.world_origin());
    }

    pub(crate) fn update_raw(
        &mut self,
        viewport: Viewport,
        center: Point,
        zoom: f64,
        grid_origin: Point,
    ) {
        self.viewport = viewport;
        self.center = center;
        self.zoom = zoom;
        self.grid_origin = grid_origin;
        let screen = world_to_screen_at(viewport, center, zoom, grid_origin);
        self.left_on_screen = screen.x;
        self.top_on_screen = screen.y;
    }

    /// Screen x of the grid's top-left corner.
    pub fn left_on_screen(&self) -> f64 {
        self.left_on_screen
    }

    /// Screen y of the grid's top-left corner.
    pub fn top_on_screen(&self) -> f64 {
        self.top_on_screen
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        world_to_screen_at(self.viewport, self.center, self.zoom, world)
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.screen_to_world_at(screen, self.center, self.zoom)
    }

    /// Screen to world mapping for a hypothetical centre and zoom on this viewport.
    pub fn screen_to_world_at(&self, screen: Point, center: Point, zoom: f64) -> Point {
        screen_to_world_on(self.viewport, center, zoom, screen)
    }

    /// World-space rectangle currently visible through the viewport.
    pub fn visible_world_rect(&self) -> Rect {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        ));
        Rect::from_points(top_left, bottom_right)
    }

    /// Grid-space to surface transform: `surface` translated to the grid origin, then zoomed.
    pub fn grid_transform(&self, surface: Transform2D) -> Transform2D {
        surface
            .translate(self.left_on_screen, self.top_on_screen)
            .scale(self.zoom, self.zoom)
    }
}

fn world_to_screen_at(viewport: Viewport, center: Point, zoom: f64, world: Point) -> Point {
    viewport.center() + (world - center) * zoom
}

/// World position shown at `screen` on `viewport` for the given centre and zoom.
pub(crate) fn screen_to_world_on(
    viewport: Viewport,
    center: Point,
    zoom: f64,
    screen: Point,
) -> Point {
    let from_center: Vec2 = screen - viewport.center();
    center + from_center / zoom
}

#[cfg(test)]
#[path = "../../tests/unit/view/translator.rs"]
mod tests;
