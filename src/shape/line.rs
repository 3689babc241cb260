use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::common::{LINE_HIT_TOLERANCE, distance_to_line_segment, scale_about};
use super::{Shape, ShapeCommon, ShapeType};
use crate::renderer::Surface;

/// Straight segment; position and size are derived from its end points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    common: ShapeCommon,
    start: Pos2,
    end: Pos2,
}

impl Line {
    pub fn new(start: Pos2, end: Pos2) -> Self {
        let mut line = Self {
            common: ShapeCommon::new(start, Vec2::ZERO),
            start,
            end,
        };
        line.update_bounds();
        line
    }

    pub fn start_point(&self) -> Pos2 {
        self.start
    }

    pub fn end_point(&self) -> Pos2 {
        self.end
    }

    pub fn set_start_point(&mut self, point: Pos2) {
        self.start = point;
        self.update_bounds();
    }

    pub fn set_end_point(&mut self, point: Pos2) {
        self.end = point;
        self.update_bounds();
    }

    /// The pen width the line is painted with
    pub fn line_width(&self) -> f32 {
        self.common.style.stroke.width
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.common.style.stroke.width = width;
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    fn update_bounds(&mut self) {
        self.common.fit_to(Rect::from_two_pos(self.start, self.end));
    }

    pub(crate) fn duplicate(&self) -> Self {
        Self {
            common: self.common.duplicate(),
            start: self.start,
            end: self.end,
        }
    }
}

impl Shape for Line {
    fn common(&self) -> &ShapeCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ShapeCommon {
        &mut self.common
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Line
    }

    fn draw(&self, surface: &mut Surface<'_>) {
        let stroke = self.common.style.stroke;
        if !self.common.visible || !stroke.is_visible() || !surface.is_attached() {
            return;
        }
        let points = [surface.to_screen(self.start), surface.to_screen(self.end)];
        surface.add(egui::Shape::line_segment(points, stroke.to_egui(surface.zoom())));
    }

    fn contains(&self, point: Pos2) -> bool {
        distance_to_line_segment(point, self.start, self.end) <= LINE_HIT_TOLERANCE
    }

    fn translate(&mut self, offset: Vec2) {
        self.start += offset;
        self.end += offset;
        self.update_bounds();
    }

    fn scale(&mut self, factor: f32) {
        let center = self.common.rect().center();
        self.start = scale_about(self.start, center, factor);
        self.end = scale_about(self.end, center, factor);
        self.update_bounds();
    }

    fn set_position(&mut self, position: Pos2) {
        let offset = position - self.common.position;
        self.translate(offset);
    }

    /// Stretch the end points so the bounding box gets the requested size
    fn set_size(&mut self, size: Vec2) {
        let bounds = self.common.rect();
        let old = bounds.size();
        let remap = |p: Pos2| {
            let fx = if old.x == 0.0 { 0.0 } else { (p.x - bounds.min.x) / old.x };
            let fy = if old.y == 0.0 { 0.0 } else { (p.y - bounds.min.y) / old.y };
            Pos2::new(bounds.min.x + fx * size.x, bounds.min.y + fy * size.y)
        };
        self.start = remap(self.start);
        self.end = remap(self.end);
        self.update_bounds();
    }
}
