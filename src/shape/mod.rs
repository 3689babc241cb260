use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::renderer::Surface;
use crate::style::{Fill, StrokeStyle, Style};

mod common;
pub(crate) mod bezier;
pub(crate) mod ellipse;
pub(crate) mod line;
pub(crate) mod rectangle;
pub(crate) mod text;

pub use bezier::{Bezier, Segment};
pub use common::{LINE_HIT_TOLERANCE, ShapeCommon, ShapeId};
pub use ellipse::Ellipse;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::Text;

use common::normalize_degrees;

/// Discriminant of the shape variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    Rectangle,
    Ellipse,
    Line,
    Bezier,
    Text,
}

impl ShapeType {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeType::Rectangle => "rectangle",
            ShapeType::Ellipse => "ellipse",
            ShapeType::Line => "line",
            ShapeType::Bezier => "bezier",
            ShapeType::Text => "text",
        }
    }
}

/// Common trait that all drawable shapes implement
pub trait Shape {
    fn common(&self) -> &ShapeCommon;

    fn common_mut(&mut self) -> &mut ShapeCommon;

    fn shape_type(&self) -> ShapeType;

    /// Paint the shape. Must not mutate anything and is a no-op when the
    /// shape is hidden or the surface is detached.
    fn draw(&self, surface: &mut Surface<'_>);

    /// Hit test in world coordinates
    fn contains(&self, point: Pos2) -> bool;

    /// Move the shape by `offset`
    fn translate(&mut self, offset: Vec2) {
        self.common_mut().position += offset;
    }

    /// Scale about the current center; the center stays put
    fn scale(&mut self, factor: f32) {
        let common = self.common_mut();
        let center = common.rect().center();
        common.size *= factor;
        common.position = center - common.size / 2.0;
    }

    /// Add `angle` degrees to the rotation, keeping it in `[0, 360)`
    fn rotate(&mut self, angle: f32) {
        let common = self.common_mut();
        common.rotation = normalize_degrees(common.rotation + angle);
    }

    /// Minimal axis-aligned rectangle around the shape's geometry
    fn bounding_rect(&self) -> Rect {
        self.common().rect()
    }

    fn set_position(&mut self, position: Pos2) {
        self.common_mut().position = position;
    }

    fn set_size(&mut self, size: Vec2) {
        self.common_mut().size = size;
    }

    fn id(&self) -> ShapeId {
        self.common().id
    }

    fn position(&self) -> Pos2 {
        self.common().position
    }

    fn size(&self) -> Vec2 {
        self.common().size
    }

    fn style(&self) -> &Style {
        &self.common().style
    }

    fn set_style(&mut self, style: Style) {
        self.common_mut().style = style;
    }

    fn stroke(&self) -> StrokeStyle {
        self.common().style.stroke
    }

    fn set_stroke(&mut self, stroke: StrokeStyle) {
        self.common_mut().style.stroke = stroke;
    }

    fn fill(&self) -> Fill {
        self.common().style.fill
    }

    fn set_fill(&mut self, fill: Fill) {
        self.common_mut().style.fill = fill;
    }

    fn is_visible(&self) -> bool {
        self.common().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.common_mut().visible = visible;
    }

    fn is_selected(&self) -> bool {
        self.common().selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.common_mut().selected = selected;
    }

    fn rotation(&self) -> f32 {
        self.common().rotation
    }
}

/// Enumeration of all shape variants stored in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnyShape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Line(Line),
    Bezier(Bezier),
    Text(Text),
}

impl AnyShape {
    /// Deep copy under a fresh id. The copy is unselected and not owned by
    /// any layer until someone adds it.
    pub fn duplicate(&self) -> AnyShape {
        match self {
            AnyShape::Rectangle(s) => AnyShape::Rectangle(s.duplicate()),
            AnyShape::Ellipse(s) => AnyShape::Ellipse(s.duplicate()),
            AnyShape::Line(s) => AnyShape::Line(s.duplicate()),
            AnyShape::Bezier(s) => AnyShape::Bezier(s.duplicate()),
            AnyShape::Text(s) => AnyShape::Text(s.duplicate()),
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut Line> {
        match self {
            AnyShape::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_bezier(&self) -> Option<&Bezier> {
        match self {
            AnyShape::Bezier(bezier) => Some(bezier),
            _ => None,
        }
    }

    pub fn as_bezier_mut(&mut self) -> Option<&mut Bezier> {
        match self {
            AnyShape::Bezier(bezier) => Some(bezier),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Shape {
        match self {
            AnyShape::Rectangle(s) => s,
            AnyShape::Ellipse(s) => s,
            AnyShape::Line(s) => s,
            AnyShape::Bezier(s) => s,
            AnyShape::Text(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Shape {
        match self {
            AnyShape::Rectangle(s) => s,
            AnyShape::Ellipse(s) => s,
            AnyShape::Line(s) => s,
            AnyShape::Bezier(s) => s,
            AnyShape::Text(s) => s,
        }
    }
}

impl Shape for AnyShape {
    fn common(&self) -> &ShapeCommon {
        self.inner().common()
    }

    fn common_mut(&mut self) -> &mut ShapeCommon {
        self.inner_mut().common_mut()
    }

    fn shape_type(&self) -> ShapeType {
        self.inner().shape_type()
    }

    fn draw(&self, surface: &mut Surface<'_>) {
        self.inner().draw(surface)
    }

    fn contains(&self, point: Pos2) -> bool {
        self.inner().contains(point)
    }

    fn translate(&mut self, offset: Vec2) {
        self.inner_mut().translate(offset)
    }

    fn scale(&mut self, factor: f32) {
        self.inner_mut().scale(factor)
    }

    fn rotate(&mut self, angle: f32) {
        self.inner_mut().rotate(angle)
    }

    fn bounding_rect(&self) -> Rect {
        self.inner().bounding_rect()
    }

    fn set_position(&mut self, position: Pos2) {
        self.inner_mut().set_position(position)
    }

    fn set_size(&mut self, size: Vec2) {
        self.inner_mut().set_size(size)
    }
}

impl From<Rectangle> for AnyShape {
    fn from(shape: Rectangle) -> Self {
        AnyShape::Rectangle(shape)
    }
}

impl From<Ellipse> for AnyShape {
    fn from(shape: Ellipse) -> Self {
        AnyShape::Ellipse(shape)
    }
}

impl From<Line> for AnyShape {
    fn from(shape: Line) -> Self {
        AnyShape::Line(shape)
    }
}

impl From<Bezier> for AnyShape {
    fn from(shape: Bezier) -> Self {
        AnyShape::Bezier(shape)
    }
}

impl From<Text> for AnyShape {
    fn from(shape: Text) -> Self {
        AnyShape::Text(shape)
    }
}

/// Factory functions for creating shapes with a given style
pub mod factory {
    use super::*;

    pub fn create_rectangle(position: Pos2, size: Vec2, style: Style) -> AnyShape {
        let mut shape = Rectangle::new(position, size);
        shape.set_style(style);
        shape.into()
    }

    pub fn create_ellipse(position: Pos2, size: Vec2, style: Style) -> AnyShape {
        let mut shape = Ellipse::new(position, size);
        shape.set_style(style);
        shape.into()
    }

    pub fn create_line(start: Pos2, end: Pos2, style: Style) -> AnyShape {
        let mut shape = Line::new(start, end);
        shape.set_style(style);
        shape.into()
    }

    pub fn create_bezier(points: &[Pos2], closed: bool, style: Style) -> AnyShape {
        let mut shape = Bezier::from_points(points.iter().copied());
        shape.set_closed(closed);
        shape.set_style(style);
        shape.into()
    }

    pub fn create_text(position: Pos2, content: &str, style: Style) -> AnyShape {
        let mut shape = Text::new(position, content);
        shape.set_style(style);
        shape.into()
    }
}
