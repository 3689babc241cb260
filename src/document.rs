use std::path::Path;

use eframe::egui::{Color32, Pos2, Vec2};

use crate::command::{Command, CommandHistory};
use crate::event::{DocumentEvent, EditorEvent, EventBus, LayerEvent};
use crate::layer::{Layer, LayerId};
use crate::persistence::{self, DocumentFile, PersistenceResult};
use crate::shape::{AnyShape, Shape, ShapeId};

pub const DEFAULT_PAGE_SIZE: Vec2 = Vec2::new(800.0, 600.0);
pub const DEFAULT_LAYER_NAME: &str = "Default Layer";

/// The editable drawing: layers in z-order, page metadata and edit history.
///
/// Every shape reachable from a layer belongs to this document alone. Shapes
/// taken out by `remove_shape` or by undoing an add are owned by the history
/// until they are put back or evicted.
#[derive(Debug, Clone)]
pub struct Document {
    layers: Vec<Layer>,
    active_layer: Option<LayerId>,
    size: Vec2,
    background_color: Color32,
    history: CommandHistory,
    events: EventBus,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A fresh document with one active "Default Layer"
    pub fn new() -> Self {
        let mut document = Self::empty();
        document.add_layer(Layer::new(DEFAULT_LAYER_NAME));
        document
    }

    /// A document without any layers
    pub fn empty() -> Self {
        Self {
            layers: Vec::new(),
            active_layer: None,
            size: DEFAULT_PAGE_SIZE,
            background_color: Color32::WHITE,
            history: CommandHistory::new(),
            events: EventBus::new(),
        }
    }

    /// Observers of this document subscribe here
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub(crate) fn emit(&self, event: EditorEvent) {
        self.events.emit(event);
    }

    fn changed(&self) {
        self.emit(EditorEvent::DocumentChanged(DocumentEvent::Modified));
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Non-positive sizes are ignored
    pub fn set_size(&mut self, size: Vec2) {
        if size.x > 0.0 && size.y > 0.0 {
            self.size = size;
            self.changed();
        }
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.background_color = color;
        self.changed();
    }

    // ---- Layers ----

    /// Layers bottom first
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id() == id)
    }

    /// Append a layer on top. The first layer of a document becomes active.
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = layer.id();
        log::info!("Adding layer '{}' ({})", layer.name(), id);
        self.layers.push(layer);
        if self.active_layer.is_none() {
            self.active_layer = Some(id);
        }
        self.emit(EditorEvent::LayerChanged(LayerEvent::Added(id)));
        self.changed();
        id
    }

    /// Remove a layer and drop its shapes.
    ///
    /// If it was active, the bottom remaining layer (if any) becomes active.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let Some(index) = self.layers.iter().position(|layer| layer.id() == id) else {
            return false;
        };
        let removed = self.layers.remove(index);
        log::info!("Removed layer '{}' with {} shapes", removed.name(), removed.len());

        if self.active_layer == Some(id) {
            self.active_layer = self.layers.first().map(Layer::id);
        }
        self.emit(EditorEvent::LayerChanged(LayerEvent::Removed(id)));
        self.changed();
        true
    }

    /// Show or hide a layer. Returns false for unknown layers.
    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) -> bool {
        let Some(layer) = self.layer_mut(id) else {
            return false;
        };
        if layer.is_visible() != visible {
            layer.set_visible(visible);
            log::debug!("Layer {} visible: {}", id, visible);
            self.changed();
        }
        true
    }

    /// Lock or unlock a layer. Returns false for unknown layers.
    pub fn set_layer_locked(&mut self, id: LayerId, locked: bool) -> bool {
        let Some(layer) = self.layer_mut(id) else {
            return false;
        };
        if layer.is_locked() != locked {
            layer.set_locked(locked);
            log::debug!("Layer {} locked: {}", id, locked);
            self.changed();
        }
        true
    }

    pub fn active_layer_id(&self) -> Option<LayerId> {
        self.active_layer
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layer(self.active_layer?)
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut Layer> {
        let id = self.active_layer?;
        self.layer_mut(id)
    }

    /// Only current members can become active; anything else is ignored
    pub fn set_active_layer(&mut self, id: LayerId) -> bool {
        if self.layer(id).is_none() {
            log::warn!("Ignoring unknown active layer {}", id);
            return false;
        }
        if self.active_layer != Some(id) {
            self.active_layer = Some(id);
            self.emit(EditorEvent::LayerChanged(LayerEvent::Activated(id)));
        }
        true
    }

    // ---- Shapes ----

    /// Append a shape to the active layer and record it for undo.
    ///
    /// Returns `None`, dropping the shape, when there is no active layer.
    pub fn add_shape(&mut self, shape: AnyShape) -> Option<ShapeId> {
        let Some(layer) = self.active_layer_mut() else {
            log::warn!("No active layer, discarding {}", shape.shape_type().name());
            return None;
        };
        let layer_id = layer.id();
        let shape_id = shape.id();
        let index = layer.len();
        layer.add_shape(shape);

        self.history.record(Command::add_shape(layer_id, shape_id, index));
        self.emit(EditorEvent::ShapeAdded { layer_id, shape_id });
        self.changed();
        Some(shape_id)
    }

    /// Take a shape out of whichever layer holds it and record it for undo.
    /// Unknown ids are a no-op.
    pub fn remove_shape(&mut self, id: ShapeId) -> bool {
        let Some(layer) = self.layers.iter_mut().find(|layer| layer.contains_shape(id)) else {
            return false;
        };
        let layer_id = layer.id();
        let Some(index) = layer.index_of(id) else {
            return false;
        };
        let Some(mut shape) = layer.remove_shape(id) else {
            return false;
        };
        shape.set_selected(false);

        self.history.record(Command::remove_shape(layer_id, shape, index));
        self.emit(EditorEvent::ShapeRemoved {
            layer_id,
            shape_id: id,
        });
        self.changed();
        true
    }

    /// Apply `edit` to a shape and record the change for undo
    pub fn modify_shape(&mut self, id: ShapeId, edit: impl FnOnce(&mut AnyShape)) -> bool {
        let Some(layer) = self.layers.iter_mut().find(|layer| layer.contains_shape(id)) else {
            return false;
        };
        let layer_id = layer.id();
        let Some(shape) = layer.shape_mut(id) else {
            return false;
        };
        let before = shape.clone();
        edit(&mut *shape);
        if shape.id() != id {
            // An edit must not swap the shape's identity
            *shape = before;
            return false;
        }
        if *shape == before {
            return false;
        }
        let after = shape.clone();

        self.history.record(Command::modify_shape(layer_id, before, after));
        self.changed();
        true
    }

    /// Topmost hit: layers top to bottom, skipping hidden and locked ones,
    /// then shapes top to bottom within each layer
    pub fn shape_at(&self, point: Pos2) -> Option<&AnyShape> {
        self.layers
            .iter()
            .rev()
            .filter(|layer| layer.is_visible() && !layer.is_locked())
            .find_map(|layer| layer.shape_at(point))
    }

    pub fn shape(&self, id: ShapeId) -> Option<&AnyShape> {
        self.layers.iter().find_map(|layer| layer.shape(id))
    }

    /// Direct access that bypasses the history
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut AnyShape> {
        self.layers.iter_mut().find_map(|layer| layer.shape_mut(id))
    }

    pub fn layer_of(&self, id: ShapeId) -> Option<LayerId> {
        self.layers
            .iter()
            .find(|layer| layer.contains_shape(id))
            .map(Layer::id)
    }

    /// Shapes of the active layer, bottom first
    pub fn shapes(&self) -> &[AnyShape] {
        self.active_layer().map(Layer::shapes).unwrap_or(&[])
    }

    /// Shapes of all visible layers in paint order
    pub fn all_shapes(&self) -> impl Iterator<Item = &AnyShape> {
        self.layers
            .iter()
            .filter(|layer| layer.is_visible())
            .flat_map(|layer| layer.shapes())
    }

    pub fn shape_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    // ---- History ----

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.layers) {
            Ok(command) => {
                let name = command.name();
                log::info!("Undid {}", name);
                self.changed();
                true
            }
            Err(err) => {
                log::debug!("Undo failed: {}", err);
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&mut self.layers) {
            Ok(command) => {
                let name = command.name();
                log::info!("Redid {}", name);
                self.changed();
                true
            }
            Err(err) => {
                log::debug!("Redo failed: {}", err);
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn set_history_limit(&mut self, limit: usize) {
        self.history.set_limit(limit);
    }

    /// Drop every layer and the whole history; size and background stay
    pub fn clear(&mut self) {
        self.layers.clear();
        self.active_layer = None;
        self.history.clear();
        self.emit(EditorEvent::DocumentChanged(DocumentEvent::Cleared));
    }

    // ---- Persistence ----

    pub fn to_file(&self) -> DocumentFile {
        DocumentFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            size: self.size,
            background_color: self.background_color,
            layers: self.layers.clone(),
            active_layer: self.active_layer,
        }
    }

    /// Replace the content with a loaded file; history is cleared
    pub fn replace_with(&mut self, file: DocumentFile) {
        self.layers = file.layers;
        self.active_layer = file.active_layer;
        self.size = file.size;
        self.background_color = file.background_color;
        self.history.clear();
    }

    pub fn try_save(&self, path: &Path) -> PersistenceResult<()> {
        persistence::write_document(&self.to_file(), path)
    }

    pub fn try_load(&mut self, path: &Path) -> PersistenceResult<()> {
        let file = persistence::read_document(path)?;
        self.replace_with(file);
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.try_save(path) {
            Ok(()) => {
                log::info!("Saved document to {}", path.display());
                self.emit(EditorEvent::DocumentChanged(DocumentEvent::Saved));
                true
            }
            Err(err) => {
                log::error!("Failed to save {}: {}", path.display(), err);
                false
            }
        }
    }

    /// On failure the document is left untouched
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.try_load(path) {
            Ok(()) => {
                log::info!("Loaded document from {}", path.display());
                self.emit(EditorEvent::DocumentChanged(DocumentEvent::Loaded));
                true
            }
            Err(err) => {
                log::error!("Failed to load {}: {}", path.display(), err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventLog;
    use crate::shape::Rectangle;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> AnyShape {
        Rectangle::new(Pos2::new(x, y), Vec2::new(w, h)).into()
    }

    #[test]
    fn test_new_has_default_layer() {
        let doc = Document::new();
        assert_eq!(doc.layers().len(), 1);
        assert_eq!(doc.layers()[0].name(), DEFAULT_LAYER_NAME);
        assert_eq!(doc.active_layer_id(), Some(doc.layers()[0].id()));
        assert_eq!(doc.size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_layer_toggles_mark_document_modified() {
        let mut doc = Document::new();
        let id = doc.active_layer_id().unwrap();
        let log = EventLog::new();
        doc.events().subscribe(Box::new(log.clone()));

        assert!(doc.set_layer_visible(id, false));
        assert!(doc.set_layer_locked(id, true));
        assert!(doc.set_layer_locked(id, true));
        assert!(!doc.layer(id).unwrap().is_visible());
        assert!(doc.layer(id).unwrap().is_locked());
        assert_eq!(
            log.events(),
            vec![
                EditorEvent::DocumentChanged(DocumentEvent::Modified),
                EditorEvent::DocumentChanged(DocumentEvent::Modified),
            ]
        );

        assert!(!doc.set_layer_visible(LayerId::new(), true));
        assert_eq!(log.events().len(), 2);
    }

    #[test]
    fn test_add_shape_without_active_layer_is_noop() {
        let mut doc = Document::empty();
        assert_eq!(doc.add_shape(rect(0.0, 0.0, 1.0, 1.0)), None);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_remove_active_layer_activates_first() {
        let mut doc = Document::new();
        let first = doc.layers()[0].id();
        let second = doc.add_layer(Layer::new("Layer 2"));
        assert!(doc.set_active_layer(second));
        assert!(doc.remove_layer(second));
        assert_eq!(doc.active_layer_id(), Some(first));

        assert!(doc.remove_layer(first));
        assert_eq!(doc.active_layer_id(), None);
        assert!(!doc.remove_layer(first));
    }

    #[test]
    fn test_set_active_layer_rejects_strangers() {
        let mut doc = Document::new();
        let active = doc.active_layer_id();
        assert!(!doc.set_active_layer(LayerId::new()));
        assert_eq!(doc.active_layer_id(), active);
    }

    #[test]
    fn test_remove_then_undo_restores_same_shape() {
        let mut doc = Document::new();
        let a = doc.add_shape(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let b = doc.add_shape(rect(5.0, 5.0, 10.0, 10.0)).unwrap();

        assert!(doc.remove_shape(a));
        assert!(doc.shape(a).is_none());
        assert!(doc.undo());
        let ids: Vec<_> = doc.shapes().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![a, b]);

        assert!(doc.redo());
        assert!(doc.shape(a).is_none());
        assert!(!doc.remove_shape(a));
    }

    #[test]
    fn test_modify_shape_is_undoable() {
        let mut doc = Document::new();
        let id = doc.add_shape(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(doc.modify_shape(id, |shape| shape.translate(Vec2::new(3.0, 0.0))));
        assert_eq!(doc.shape(id).unwrap().position(), Pos2::new(3.0, 0.0));

        assert!(doc.undo());
        assert_eq!(doc.shape(id).unwrap().position(), Pos2::ZERO);
        // A no-op edit records nothing
        assert!(!doc.modify_shape(id, |_| {}));
    }

    #[test]
    fn test_notifications_follow_mutations() {
        let mut doc = Document::new();
        let log = EventLog::new();
        doc.events().subscribe(Box::new(log.clone()));

        let id = doc.add_shape(rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        let layer_id = doc.active_layer_id().unwrap();
        assert_eq!(
            log.events(),
            vec![
                EditorEvent::ShapeAdded {
                    layer_id,
                    shape_id: id
                },
                EditorEvent::DocumentChanged(DocumentEvent::Modified),
            ]
        );

        log.clear();
        doc.undo();
        assert_eq!(log.count(EditorEvent::is_document_change), 1);
    }

    #[test]
    fn test_clear_keeps_structure_valid() {
        let mut doc = Document::new();
        doc.add_shape(rect(0.0, 0.0, 10.0, 10.0));
        doc.clear();
        assert!(doc.layers().is_empty());
        assert_eq!(doc.active_layer_id(), None);
        assert!(!doc.can_undo());
        assert!(doc.shape_at(Pos2::new(1.0, 1.0)).is_none());
    }
}
