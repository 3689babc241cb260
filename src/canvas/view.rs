use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;
pub const ZOOM_STEP: f32 = 1.2;
/// Margin kept around the page by `fit_to_view`
pub const FIT_MARGIN: f32 = 0.9;

/// Zoom and pan of the canvas.
///
/// Screen coordinates are relative to the canvas widget's top-left corner.
/// The pan offset is applied in screen space, then the zoom:
/// `world = (screen - pan) / zoom` and `screen = world * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    zoom: f32,
    pan: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`
    pub fn set_zoom(&mut self, zoom: f32) {
        // NaN would poison every later transform
        self.zoom = if zoom.is_nan() {
            1.0
        } else {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        };
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.pan) / self.zoom).to_pos2()
    }

    pub fn world_to_screen(&self, world: Pos2) -> Pos2 {
        (world.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    pub fn world_to_screen_rect(&self, world: Rect) -> Rect {
        Rect::from_two_pos(self.world_to_screen(world.min), self.world_to_screen(world.max))
    }

    pub fn screen_to_world_rect(&self, screen: Rect) -> Rect {
        Rect::from_two_pos(self.screen_to_world(screen.min), self.screen_to_world(screen.max))
    }

    /// Zoom so that a page of `page_size` fits a widget of `widget_size`, pan reset to origin
    pub fn fit(&mut self, page_size: Vec2, widget_size: Vec2) {
        if page_size.x <= 0.0 || page_size.y <= 0.0 {
            return;
        }
        let scale_x = widget_size.x / page_size.x;
        let scale_y = widget_size.y / page_size.y;
        self.set_zoom(scale_x.min(scale_y) * FIT_MARGIN);
        self.pan = Vec2::ZERO;
    }
}

/// Round a world position to the nearest grid intersection
pub fn snap_to_grid(point: Pos2, grid_size: f32) -> Pos2 {
    if grid_size <= 0.0 {
        return point;
    }
    Pos2::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}
