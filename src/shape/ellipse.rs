use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::common::filled_polygon;
use super::{Shape, ShapeCommon, ShapeType};
use crate::renderer::Surface;

/// Degrees per segment when approximating a partial arc
const ARC_STEP_DEGREES: f32 = 5.0;

/// Ellipse inscribed in its bounding box, or a pie wedge of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    common: ShapeCommon,
    start_angle: f32,
    end_angle: f32,
}

impl Ellipse {
    pub fn new(position: Pos2, size: Vec2) -> Self {
        Self {
            common: ShapeCommon::new(position, size),
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }

    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    pub fn set_start_angle(&mut self, degrees: f32) {
        self.start_angle = degrees;
    }

    pub fn end_angle(&self) -> f32 {
        self.end_angle
    }

    pub fn set_end_angle(&mut self, degrees: f32) {
        self.end_angle = degrees;
    }

    /// Angular extent in degrees; may be negative
    pub fn span(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    pub fn is_full(&self) -> bool {
        self.span().abs() >= 360.0
    }

    pub fn center(&self) -> Pos2 {
        self.common.rect().center()
    }

    pub fn radii(&self) -> Vec2 {
        self.common.rect().size() / 2.0
    }

    /// Points along the arc from start to end angle, in world coordinates.
    ///
    /// Angles grow clockwise on screen (y points down), zero is at 3 o'clock.
    pub fn arc_points(&self) -> Vec<Pos2> {
        let center = self.center();
        let radii = self.radii();
        let span = self.span();
        let steps = ((span.abs() / ARC_STEP_DEGREES).ceil() as usize).max(1);

        (0..=steps)
            .map(|i| {
                let degrees = self.start_angle + span * i as f32 / steps as f32;
                let radians = degrees.to_radians();
                Pos2::new(
                    center.x + radii.x * radians.cos(),
                    center.y + radii.y * radians.sin(),
                )
            })
            .collect()
    }

    pub(crate) fn duplicate(&self) -> Self {
        Self {
            common: self.common.duplicate(),
            start_angle: self.start_angle,
            end_angle: self.end_angle,
        }
    }
}

impl Shape for Ellipse {
    fn common(&self) -> &ShapeCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ShapeCommon {
        &mut self.common
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Ellipse
    }

    fn draw(&self, surface: &mut Surface<'_>) {
        if !self.common.visible || !surface.is_attached() {
            return;
        }

        let style = &self.common.style;
        let stroke = style.stroke.to_egui(surface.zoom());

        if self.is_full() {
            let center = surface.to_screen(self.center());
            let radius = self.radii() * surface.zoom();
            if let Some(fill) = style.fill.color() {
                surface.add(egui::Shape::ellipse_filled(center, radius, fill));
            }
            if style.stroke.is_visible() {
                surface.add(egui::Shape::ellipse_stroke(center, radius, stroke));
            }
            return;
        }

        let arc: Vec<Pos2> = self
            .arc_points()
            .into_iter()
            .map(|p| surface.to_screen(p))
            .collect();

        // Pie slice: the fill closes through the center, the outline is the arc only
        if let Some(fill) = style.fill.color() {
            let mut wedge = Vec::with_capacity(arc.len() + 1);
            wedge.push(surface.to_screen(self.center()));
            wedge.extend(arc.iter().copied());
            surface.add(filled_polygon(&wedge, fill));
        }
        if style.stroke.is_visible() {
            surface.add(egui::Shape::line(arc, stroke));
        }
    }

    // The full ellipse is the hit region even for partial arcs
    fn contains(&self, point: Pos2) -> bool {
        let center = self.center();
        let radii = self.radii();
        let dx = point.x - center.x;
        let dy = point.y - center.y;
        let normalized = (dx * dx) / (radii.x * radii.x) + (dy * dy) / (radii.y * radii.y);
        normalized <= 1.0
    }
}
