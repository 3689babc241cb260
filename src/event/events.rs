use eframe::egui::Vec2;

use crate::canvas::ToolKind;
use crate::layer::LayerId;
use crate::shape::ShapeId;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    LayerChanged(LayerEvent),
    ShapeAdded {
        layer_id: LayerId,
        shape_id: ShapeId,
    },
    ShapeRemoved {
        layer_id: LayerId,
        shape_id: ShapeId,
    },
    /// A tool finished a shape and handed it to the document
    ShapeCreated {
        shape_id: ShapeId,
    },
    SelectionChanged(SelectionEvent),
    DocumentChanged(DocumentEvent),
    ViewChanged {
        zoom: f32,
        pan: Vec2,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerEvent {
    Added(LayerId),
    Removed(LayerId),
    Activated(LayerId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Selected(ShapeId),
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    Modified,
    Cleared,
    Saved,
    Loaded,
}

impl EditorEvent {
    /// True for every notification that means the drawing itself changed
    pub fn is_document_change(&self) -> bool {
        matches!(self, EditorEvent::DocumentChanged(_))
    }
}
