use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::{Shape, ShapeCommon, ShapeType};
use crate::renderer::Surface;

pub const TEXT_FONT_SIZE: f32 = 14.0;
pub const DEFAULT_TEXT_BOX: Vec2 = Vec2::new(100.0, 50.0);

/// A string drawn at a fixed font size inside its box, in the stroke color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    common: ShapeCommon,
    content: String,
}

impl Text {
    pub fn new(position: Pos2, content: &str) -> Self {
        Self {
            common: ShapeCommon::new(position, DEFAULT_TEXT_BOX),
            content: content.to_owned(),
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub(crate) fn duplicate(&self) -> Self {
        Self {
            common: self.common.duplicate(),
            content: self.content.clone(),
        }
    }
}

impl Shape for Text {
    fn common(&self) -> &ShapeCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ShapeCommon {
        &mut self.common
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Text
    }

    fn draw(&self, surface: &mut Surface<'_>) {
        let stroke = self.common.style.stroke;
        if !self.common.visible || !stroke.enabled || self.content.is_empty() {
            return;
        }
        surface.text(self.common.rect(), &self.content, TEXT_FONT_SIZE, stroke.color);
    }

    fn contains(&self, point: Pos2) -> bool {
        self.common.rect().contains(point)
    }
}
