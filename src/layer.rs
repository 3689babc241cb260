use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::shape::{AnyShape, Shape, ShapeId};

/// A unique identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub Uuid);

impl LayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered group of shapes; later shapes are drawn on top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    id: LayerId,
    name: String,
    visible: bool,
    /// Locked layers are still drawn but ignored by hit-testing
    locked: bool,
    shapes: Vec<AnyShape>,
}

impl Layer {
    pub fn new(name: &str) -> Self {
        Self {
            id: LayerId::new(),
            name: name.to_string(),
            visible: true,
            locked: false,
            shapes: Vec::new(),
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Shapes in z-order, bottom first
    pub fn shapes(&self) -> &[AnyShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn add_shape(&mut self, shape: AnyShape) {
        self.shapes.push(shape);
    }

    /// Insert at `index`, appending when the index is past the end
    pub fn insert_shape(&mut self, index: usize, shape: AnyShape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
    }

    /// Take a shape out of the layer, handing ownership to the caller
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<AnyShape> {
        let index = self.index_of(id)?;
        Some(self.shapes.remove(index))
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id() == id)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&AnyShape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut AnyShape> {
        self.shapes.iter_mut().find(|shape| shape.id() == id)
    }

    pub fn contains_shape(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Topmost visible shape under `point`
    pub fn shape_at(&self, point: egui::Pos2) -> Option<&AnyShape> {
        self.shapes
            .iter()
            .rev()
            .filter(|shape| shape.is_visible())
            .find(|shape| shape.contains(point))
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Rectangle;
    use egui::{Pos2, Vec2};

    fn rect(x: f32, y: f32) -> AnyShape {
        Rectangle::new(Pos2::new(x, y), Vec2::new(20.0, 20.0)).into()
    }

    #[test]
    fn test_remove_returns_ownership() {
        let mut layer = Layer::new("Layer 1");
        let shape = rect(0.0, 0.0);
        let id = shape.id();
        layer.add_shape(shape);

        let removed = layer.remove_shape(id).expect("shape was added");
        assert_eq!(removed.id(), id);
        assert!(layer.is_empty());
        assert!(layer.remove_shape(id).is_none());
    }

    #[test]
    fn test_insert_restores_position() {
        let mut layer = Layer::new("Layer 1");
        let (a, b, c) = (rect(0.0, 0.0), rect(5.0, 5.0), rect(10.0, 10.0));
        let b_id = b.id();
        layer.add_shape(a);
        layer.add_shape(b);
        layer.add_shape(c);

        let index = layer.index_of(b_id).unwrap();
        let removed = layer.remove_shape(b_id).unwrap();
        layer.insert_shape(index, removed);
        assert_eq!(layer.index_of(b_id), Some(1));

        let extra = rect(0.0, 0.0);
        let extra_id = extra.id();
        layer.insert_shape(99, extra);
        assert_eq!(layer.index_of(extra_id), Some(3));
    }

    #[test]
    fn test_shape_at_prefers_topmost() {
        let mut layer = Layer::new("Layer 1");
        let bottom = rect(0.0, 0.0);
        let top = rect(10.0, 10.0);
        let top_id = top.id();
        layer.add_shape(bottom);
        layer.add_shape(top);

        assert_eq!(layer.shape_at(Pos2::new(15.0, 15.0)).map(|s| s.id()), Some(top_id));
    }

    #[test]
    fn test_hidden_shapes_are_skipped() {
        let mut layer = Layer::new("Layer 1");
        let mut shape = rect(0.0, 0.0);
        shape.set_visible(false);
        layer.add_shape(shape);
        assert!(layer.shape_at(Pos2::new(5.0, 5.0)).is_none());
    }
}
