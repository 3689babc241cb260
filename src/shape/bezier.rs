use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::common::{
    LINE_HIT_TOLERANCE, calculate_bounds, distance_to_polyline, filled_polygon, point_in_polygon,
    scale_about,
};
use super::{Shape, ShapeCommon, ShapeType};
use crate::renderer::Surface;

const CUBIC_STEPS: usize = 16;
const QUAD_STEPS: usize = 12;

/// One drawing command following the path start
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Cubic(Pos2, Pos2, Pos2),
    Quad(Pos2, Pos2),
    Line(Pos2),
}

/// Path through a list of control points.
///
/// `points[0]` is the start; the rest is consumed three at a time as cubic
/// segments. A trailing pair becomes a quadratic segment and a single
/// trailing point a straight one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bezier {
    common: ShapeCommon,
    points: Vec<Pos2>,
    closed: bool,
}

impl Bezier {
    pub fn new() -> Self {
        Self {
            common: ShapeCommon::new(Pos2::ZERO, Vec2::ZERO),
            points: Vec::new(),
            closed: false,
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Pos2>) -> Self {
        let mut bezier = Self::new();
        bezier.points.extend(points);
        bezier.update_bounds();
        bezier
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
        self.update_bounds();
    }

    /// Out-of-range indices are ignored
    pub fn set_point(&mut self, index: usize, point: Pos2) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point;
            self.update_bounds();
        }
    }

    pub fn point(&self, index: usize) -> Option<Pos2> {
        self.points.get(index).copied()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
        self.update_bounds();
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Path segments after the start point; empty with fewer than two points
    pub fn segments(&self) -> Vec<Segment> {
        let points = &self.points;
        let n = points.len();
        if n < 2 {
            return Vec::new();
        }

        let mut segments = Vec::with_capacity(n / 3 + 1);
        let mut i = 1;
        while i < n {
            if i + 2 < n {
                segments.push(Segment::Cubic(points[i], points[i + 1], points[i + 2]));
            } else if i + 1 < n {
                segments.push(Segment::Quad(points[i], points[i + 1]));
            } else {
                segments.push(Segment::Line(points[i]));
            }
            i += 3;
        }
        segments
    }

    /// Polyline approximation of the path in world coordinates
    pub fn flatten(&self) -> Vec<Pos2> {
        let Some(&start) = self.points.first() else {
            return Vec::new();
        };

        let mut out = vec![start];
        let mut current = start;
        for segment in self.segments() {
            match segment {
                Segment::Cubic(c1, c2, end) => {
                    for step in 1..=CUBIC_STEPS {
                        let t = step as f32 / CUBIC_STEPS as f32;
                        out.push(cubic_at(current, c1, c2, end, t));
                    }
                    current = end;
                }
                Segment::Quad(c, end) => {
                    for step in 1..=QUAD_STEPS {
                        let t = step as f32 / QUAD_STEPS as f32;
                        out.push(quad_at(current, c, end, t));
                    }
                    current = end;
                }
                Segment::Line(end) => {
                    out.push(end);
                    current = end;
                }
            }
        }
        out
    }

    fn update_bounds(&mut self) {
        if self.points.is_empty() {
            self.common.size = Vec2::ZERO;
        } else {
            self.common.fit_to(calculate_bounds(&self.points));
        }
    }

    pub(crate) fn duplicate(&self) -> Self {
        Self {
            common: self.common.duplicate(),
            points: self.points.clone(),
            closed: self.closed,
        }
    }
}

impl Default for Bezier {
    fn default() -> Self {
        Self::new()
    }
}

fn cubic_at(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    let v = p0.to_vec2() * (u * u * u)
        + p1.to_vec2() * (3.0 * u * u * t)
        + p2.to_vec2() * (3.0 * u * t * t)
        + p3.to_vec2() * (t * t * t);
    v.to_pos2()
}

fn quad_at(p0: Pos2, p1: Pos2, p2: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    let v = p0.to_vec2() * (u * u) + p1.to_vec2() * (2.0 * u * t) + p2.to_vec2() * (t * t);
    v.to_pos2()
}

impl Shape for Bezier {
    fn common(&self) -> &ShapeCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ShapeCommon {
        &mut self.common
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Bezier
    }

    fn draw(&self, surface: &mut Surface<'_>) {
        if !self.common.visible || self.points.len() < 2 || !surface.is_attached() {
            return;
        }

        let style = &self.common.style;
        let stroke = if style.stroke.is_visible() {
            style.stroke.to_egui(surface.zoom())
        } else {
            egui::Stroke::NONE
        };
        let path: Vec<Pos2> = self
            .flatten()
            .into_iter()
            .map(|p| surface.to_screen(p))
            .collect();

        if self.closed {
            if let Some(fill) = style.fill.color() {
                surface.add(filled_polygon(&path, fill));
            }
            if style.stroke.is_visible() {
                surface.add(egui::Shape::closed_line(path, stroke));
            }
        } else if style.stroke.is_visible() {
            surface.add(egui::Shape::line(path, stroke));
        }
    }

    /// Closed paths hit on their interior or outline, open paths only near the curve.
    ///
    /// Open paths are not implicitly closed for hit-testing, so clicking the
    /// empty side of an open curve does not select it.
    fn contains(&self, point: Pos2) -> bool {
        if self.points.is_empty() {
            return false;
        }
        let mut path = self.flatten();
        if self.closed && point_in_polygon(point, &path) {
            return true;
        }
        if self.closed {
            if let Some(&first) = path.first() {
                path.push(first);
            }
        }
        distance_to_polyline(point, &path) <= LINE_HIT_TOLERANCE
    }

    fn translate(&mut self, offset: Vec2) {
        for point in &mut self.points {
            *point += offset;
        }
        self.common.position += offset;
    }

    fn scale(&mut self, factor: f32) {
        let center = self.common.rect().center();
        for point in &mut self.points {
            *point = scale_about(*point, center, factor);
        }
        self.update_bounds();
    }

    fn set_position(&mut self, position: Pos2) {
        let offset = position - self.common.position;
        self.translate(offset);
    }

    fn set_size(&mut self, size: Vec2) {
        let bounds = self.common.rect();
        let old = bounds.size();
        for point in &mut self.points {
            let fx = if old.x == 0.0 { 0.0 } else { (point.x - bounds.min.x) / old.x };
            let fy = if old.y == 0.0 { 0.0 } else { (point.y - bounds.min.y) / old.y };
            *point = Pos2::new(bounds.min.x + fx * size.x, bounds.min.y + fy * size.y);
        }
        self.update_bounds();
    }
}
