use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::{Shape, ShapeCommon, ShapeType};
use crate::renderer::Surface;

/// Axis-aligned rectangle, optionally with rounded corners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    common: ShapeCommon,
    corner_radius: f32,
}

impl Rectangle {
    pub fn new(position: Pos2, size: Vec2) -> Self {
        Self {
            common: ShapeCommon::new(position, size),
            corner_radius: 0.0,
        }
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    /// Negative radii are treated as sharp corners
    pub fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius.max(0.0);
    }

    pub(crate) fn duplicate(&self) -> Self {
        Self {
            common: self.common.duplicate(),
            corner_radius: self.corner_radius,
        }
    }
}

impl Shape for Rectangle {
    fn common(&self) -> &ShapeCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ShapeCommon {
        &mut self.common
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Rectangle
    }

    fn draw(&self, surface: &mut Surface<'_>) {
        if !self.common.visible || !surface.is_attached() {
            return;
        }

        let rect = surface.to_screen_rect(self.common.rect());
        let rounding = self.corner_radius * surface.zoom();
        let style = &self.common.style;

        if let Some(fill) = style.fill.color() {
            surface.add(egui::Shape::rect_filled(rect, rounding, fill));
        }
        if style.stroke.is_visible() {
            surface.add(egui::Shape::rect_stroke(
                rect,
                rounding,
                style.stroke.to_egui(surface.zoom()),
            ));
        }
    }

    // Hit-testing ignores the corner radius
    fn contains(&self, point: Pos2) -> bool {
        self.common.rect().contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ViewTransform;
    use crate::renderer::RecordingSink;
    use crate::style::{Fill, StrokeStyle};
    use egui::Color32;

    #[test]
    fn test_contains_includes_edges() {
        let rect = Rectangle::new(Pos2::new(10.0, 20.0), Vec2::new(50.0, 30.0));
        assert!(rect.contains(Pos2::new(30.0, 35.0)));
        assert!(rect.contains(Pos2::new(10.0, 30.0)));
        assert!(!rect.contains(Pos2::new(5.0, 5.0)));
        assert!(!rect.contains(Pos2::new(70.0, 35.0)));
    }

    #[test]
    fn test_rounded_corners_do_not_change_hit_region() {
        let mut rect = Rectangle::new(Pos2::ZERO, Vec2::new(40.0, 40.0));
        rect.set_corner_radius(15.0);
        assert!(rect.contains(Pos2::new(0.5, 0.5)));
    }

    #[test]
    fn test_negative_corner_radius_clamps() {
        let mut rect = Rectangle::new(Pos2::ZERO, Vec2::new(1.0, 1.0));
        rect.set_corner_radius(-4.0);
        assert_eq!(rect.corner_radius(), 0.0);
    }

    #[test]
    fn test_draw_emits_fill_then_outline() {
        let rect = Rectangle::new(Pos2::ZERO, Vec2::new(10.0, 10.0));
        let mut sink = RecordingSink::new();
        let mut surface = Surface::new(&mut sink, ViewTransform::identity(), Pos2::ZERO);
        rect.draw(&mut surface);
        assert_eq!(sink.shapes().count(), 2);
    }

    #[test]
    fn test_draw_skips_unpainted_parts() {
        let mut rect = Rectangle::new(Pos2::ZERO, Vec2::new(10.0, 10.0));
        rect.set_fill(Fill::None);
        rect.set_stroke(StrokeStyle::NONE);
        let mut sink = RecordingSink::new();
        let mut surface = Surface::new(&mut sink, ViewTransform::identity(), Pos2::ZERO);
        rect.draw(&mut surface);
        assert!(sink.is_empty());

        rect.set_fill(Fill::Solid(Color32::RED));
        rect.set_visible(false);
        let mut surface = Surface::new(&mut sink, ViewTransform::identity(), Pos2::ZERO);
        rect.draw(&mut surface);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_draw_on_detached_surface_is_noop() {
        let rect = Rectangle::new(Pos2::ZERO, Vec2::new(10.0, 10.0));
        let mut surface = Surface::detached(ViewTransform::identity());
        rect.draw(&mut surface);
    }
}
