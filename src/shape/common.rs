use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::id_generator;
use crate::style::Style;

/// Hit distance for thin geometry (lines, open curves), in world units
pub const LINE_HIT_TOLERANCE: f32 = 5.0;

/// Unique identifier for a shape; stays stable while the shape moves between
/// a layer and the undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub usize);

impl ShapeId {
    pub fn fresh() -> Self {
        Self(id_generator::generate_id())
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State shared by every shape variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeCommon {
    pub(crate) id: ShapeId,
    /// Top-left corner (or anchor) in world coordinates
    pub(crate) position: Pos2,
    pub(crate) size: Vec2,
    pub(crate) style: Style,
    pub(crate) visible: bool,
    #[serde(skip)]
    pub(crate) selected: bool,
    /// Degrees, always in `[0, 360)`
    pub(crate) rotation: f32,
}

impl ShapeCommon {
    pub fn new(position: Pos2, size: Vec2) -> Self {
        Self {
            id: ShapeId::fresh(),
            position,
            size,
            style: Style::shape_default(),
            visible: true,
            selected: false,
            rotation: 0.0,
        }
    }

    /// Copy of this state under a new id, unselected
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            id: ShapeId::fresh(),
            selected: false,
            ..self.clone()
        }
    }

    pub(crate) fn rect(&self) -> Rect {
        Rect::from_two_pos(self.position, self.position + self.size)
    }

    /// Store a bounding box computed from defining points
    pub(crate) fn fit_to(&mut self, bounds: Rect) {
        self.position = bounds.min;
        self.size = bounds.size();
    }
}

/// Normalize an angle in degrees to `[0, 360)`
pub(crate) fn normalize_degrees(angle: f32) -> f32 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Calculate distance from a point to a line segment
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let length_sq = line_vec.length_sq();
    if length_sq == 0.0 {
        return point_vec.length();
    }

    let t = (point_vec.dot(line_vec) / length_sq).clamp(0.0, 1.0);
    let projection = line_start + line_vec * t;
    (point - projection).length()
}

/// Minimal axis-aligned rectangle around a set of points
pub(crate) fn calculate_bounds(points: &[Pos2]) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(Pos2::new(min_x, min_y), Pos2::new(max_x, max_y))
}

/// Even-odd point-in-polygon test; the polygon is implicitly closed
pub(crate) fn point_in_polygon(point: Pos2, polygon: &[Pos2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
    (a - o).x * (b - o).y - (a - o).y * (b - o).x
}

fn strictly_inside_triangle(p: Pos2, a: Pos2, b: Pos2, c: Pos2, orientation: f32) -> bool {
    cross(a, b, p) * orientation > 0.0
        && cross(b, c, p) * orientation > 0.0
        && cross(c, a, p) * orientation > 0.0
}

/// Split a polygon into triangles by ear clipping.
///
/// Returns index triples into `polygon`. Self-intersecting outlines have no
/// ear at some point; the rest is then fanned from its first vertex.
pub(crate) fn triangulate(polygon: &[Pos2]) -> Vec<[usize; 3]> {
    let mut remaining: Vec<usize> = (0..polygon.len()).collect();
    remaining.dedup_by(|b, a| polygon[*a] == polygon[*b]);
    if remaining.len() > 1 && polygon[remaining[0]] == polygon[remaining[remaining.len() - 1]] {
        remaining.pop();
    }
    if remaining.len() < 3 {
        return Vec::new();
    }

    let doubled_area: f32 = (0..remaining.len())
        .map(|i| {
            let a = polygon[remaining[i]];
            let b = polygon[remaining[(i + 1) % remaining.len()]];
            a.x * b.y - b.x * a.y
        })
        .sum();
    let orientation = if doubled_area < 0.0 { -1.0 } else { 1.0 };

    let mut triangles = Vec::with_capacity(remaining.len() - 2);
    let mut i = 0;
    let mut misses = 0;
    while remaining.len() > 3 {
        let len = remaining.len();
        let prev = remaining[(i + len - 1) % len];
        let cur = remaining[i];
        let next = remaining[(i + 1) % len];
        let (a, b, c) = (polygon[prev], polygon[cur], polygon[next]);

        let is_ear = cross(a, b, c) * orientation >= 0.0
            && remaining.iter().all(|&k| {
                k == prev
                    || k == cur
                    || k == next
                    || !strictly_inside_triangle(polygon[k], a, b, c, orientation)
            });

        if is_ear {
            triangles.push([prev, cur, next]);
            remaining.remove(i);
            if i >= remaining.len() {
                i = 0;
            }
            misses = 0;
        } else {
            i = (i + 1) % len;
            misses += 1;
            if misses > len {
                for k in 1..len - 1 {
                    triangles.push([remaining[0], remaining[k], remaining[k + 1]]);
                }
                return triangles;
            }
        }
    }
    triangles.push([remaining[0], remaining[1], remaining[2]]);
    triangles
}

/// Filled polygon that also works for concave outlines
pub(crate) fn filled_polygon(polygon: &[Pos2], color: egui::Color32) -> egui::Shape {
    let mut mesh = egui::Mesh::default();
    for &point in polygon {
        mesh.colored_vertex(point, color);
    }
    for [a, b, c] in triangulate(polygon) {
        mesh.add_triangle(a as u32, b as u32, c as u32);
    }
    egui::Shape::mesh(mesh)
}

/// Distance from a point to the nearest segment of a polyline
pub(crate) fn distance_to_polyline(point: Pos2, polyline: &[Pos2]) -> f32 {
    match polyline {
        [] => f32::INFINITY,
        [single] => point.distance(*single),
        _ => polyline
            .windows(2)
            .map(|pair| distance_to_line_segment(point, pair[0], pair[1]))
            .fold(f32::INFINITY, f32::min),
    }
}

/// Scale a point about `center`
pub(crate) fn scale_about(point: Pos2, center: Pos2, factor: f32) -> Pos2 {
    center + (point - center) * factor
}
