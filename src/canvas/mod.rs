//! Interactive editing state on top of a [`Document`].
//!
//! The canvas owns the document being edited. Everything else it holds
//! about shapes is either an id (the selection) or a shape that no layer
//! owns yet (the in-progress shape), so removing or undoing a shape can
//! never leave the canvas pointing at something that is gone.

mod tools;
mod view;

pub use tools::ToolKind;
pub use view::{
    FIT_MARGIN, MAX_ZOOM, MIN_ZOOM, ViewTransform, ZOOM_STEP, snap_to_grid,
};

use egui::{Color32, Key, Modifiers, PointerButton, Pos2, Rect, Vec2};

use crate::document::Document;
use crate::event::{DocumentEvent, EditorEvent, EventBus, SelectionEvent};
use crate::input::InputEvent;
use crate::renderer::{PaintSink, Renderer};
use crate::settings::EditorSettings;
use crate::shape::{AnyShape, Shape, ShapeId, factory};
use crate::style::{Fill, StrokeStyle, Style};

/// Zoom factor applied per Ctrl+wheel notch
pub const WHEEL_ZOOM_IN: f32 = 1.1;
pub const WHEEL_ZOOM_OUT: f32 = 0.9;
/// Offset between a copied shape and its pasted duplicate
pub const PASTE_OFFSET: Vec2 = Vec2::new(10.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    pub visible: bool,
    /// Spacing in world units, at least 1
    pub size: f32,
    pub snap: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        let settings = EditorSettings::default();
        Self {
            visible: settings.grid_visible,
            size: settings.grid_size,
            snap: settings.snap_to_grid,
        }
    }
}

pub struct Canvas {
    document: Option<Document>,
    tool: ToolKind,
    view: ViewTransform,
    grid: GridSettings,
    /// Style every new shape is created with
    style: Style,
    selected: Option<ShapeId>,
    in_progress: Option<AnyShape>,
    drag_start: Option<Pos2>,
    pending_points: Vec<Pos2>,
    /// Anchor of a text shape waiting for its content
    pending_text: Option<Pos2>,
    clipboard: Option<AnyShape>,
    viewport_size: Vec2,
    renderer: Renderer,
    events: EventBus,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("tool", &self.tool)
            .field("view", &self.view)
            .field("grid", &self.grid)
            .field("selected", &self.selected)
            .field("pending_points", &self.pending_points.len())
            .field("has_document", &self.document.is_some())
            .finish()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// A canvas with default settings and no document attached
    pub fn new() -> Self {
        Self::with_settings(&EditorSettings::default())
    }

    pub fn with_settings(settings: &EditorSettings) -> Self {
        Self {
            document: None,
            tool: ToolKind::default(),
            view: ViewTransform::identity(),
            grid: GridSettings {
                visible: settings.grid_visible,
                size: settings.grid_size.max(1.0),
                snap: settings.snap_to_grid,
            },
            style: settings.style,
            selected: None,
            in_progress: None,
            drag_start: None,
            pending_points: Vec::new(),
            pending_text: None,
            clipboard: None,
            viewport_size: Vec2::ZERO,
            renderer: Renderer::default(),
            events: EventBus::new(),
        }
    }

    /// Notifications for the surrounding UI: selection, creation and
    /// document changes caused through the canvas
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // ---- Document ----

    /// Attach a document, replacing (and returning) the previous one.
    /// All interaction state referring to the old document is dropped.
    pub fn set_document(&mut self, document: Document) -> Option<Document> {
        self.reset_interaction();
        self.selected = None;
        self.document.replace(document)
    }

    pub fn take_document(&mut self) -> Option<Document> {
        self.reset_interaction();
        self.selected = None;
        self.document.take()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Mutable access for edits made outside the canvas. Call
    /// [`Canvas::sync_selection`] afterwards if shapes may have been removed.
    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    // ---- Tools ----

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switching tools drops pending bezier points and any unfinished shape
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.reset_interaction();
        if self.tool != tool {
            log::info!("Switching tool: {} -> {}", self.tool.name(), tool.name());
            let old = std::mem::replace(&mut self.tool, tool);
            self.events.emit(EditorEvent::ToolChanged { old, new: tool });
        }
    }

    fn reset_interaction(&mut self) {
        self.pending_points.clear();
        self.in_progress = None;
        self.drag_start = None;
        self.pending_text = None;
    }

    pub fn in_progress(&self) -> Option<&AnyShape> {
        self.in_progress.as_ref()
    }

    /// Points placed so far with the bezier tool
    pub fn pending_points(&self) -> &[Pos2] {
        &self.pending_points
    }

    // ---- View ----

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn zoom(&self) -> f32 {
        self.view.zoom()
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.view.set_zoom(zoom);
        self.view_changed();
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom() * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom() / ZOOM_STEP);
    }

    pub fn pan(&self) -> Vec2 {
        self.view.pan()
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.view.set_pan(pan);
        self.view_changed();
    }

    /// Fit the page into the viewport with a small margin; needs a document
    /// and a known viewport size
    pub fn fit_to_view(&mut self) {
        let Some(document) = &self.document else {
            return;
        };
        if self.viewport_size.x <= 0.0 || self.viewport_size.y <= 0.0 {
            return;
        }
        self.view.fit(document.size(), self.viewport_size);
        self.view_changed();
    }

    fn view_changed(&self) {
        self.events.emit(EditorEvent::ViewChanged {
            zoom: self.view.zoom(),
            pan: self.view.pan(),
        });
    }

    /// Size of the widget the canvas is shown in
    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = size.max(Vec2::ZERO);
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        self.view.screen_to_world(screen)
    }

    pub fn world_to_screen(&self, world: Pos2) -> Pos2 {
        self.view.world_to_screen(world)
    }

    /// Screen position to world, snapped when grid snapping is on
    pub fn world_position(&self, screen: Pos2) -> Pos2 {
        let world = self.screen_to_world(screen);
        if self.grid.snap {
            self.snap_to_grid(world)
        } else {
            world
        }
    }

    // ---- Grid ----

    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    pub fn toggle_grid(&mut self) {
        self.grid.visible = !self.grid.visible;
    }

    pub fn toggle_snap_to_grid(&mut self) {
        self.grid.snap = !self.grid.snap;
    }

    pub fn set_grid_size(&mut self, size: f32) {
        self.grid.size = if size.is_nan() { 1.0 } else { size.max(1.0) };
    }

    pub fn snap_to_grid(&self, point: Pos2) -> Pos2 {
        snap_to_grid(point, self.grid.size)
    }

    // ---- Selection ----

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    /// The selected shape, if it still exists
    pub fn selected_shape(&self) -> Option<&AnyShape> {
        self.document.as_ref()?.shape(self.selected?)
    }

    /// Select a shape of the attached document
    pub fn select_shape(&mut self, id: ShapeId) -> bool {
        let Some(document) = self.document.as_mut() else {
            return false;
        };
        if document.shape(id).is_none() {
            return false;
        }
        if let Some(previous) = self.selected.and_then(|old| document.shape_mut(old)) {
            previous.set_selected(false);
        }
        if let Some(shape) = document.shape_mut(id) {
            shape.set_selected(true);
        }
        self.selected = Some(id);
        self.events
            .emit(EditorEvent::SelectionChanged(SelectionEvent::Selected(id)));
        true
    }

    pub fn clear_selection(&mut self) {
        let Some(id) = self.selected.take() else {
            return;
        };
        if let Some(shape) = self.document.as_mut().and_then(|doc| doc.shape_mut(id)) {
            shape.set_selected(false);
        }
        self.events
            .emit(EditorEvent::SelectionChanged(SelectionEvent::Cleared));
    }

    /// Drop a selection whose shape is no longer in the document
    pub fn sync_selection(&mut self) {
        if self.selected.is_some() && self.selected_shape().is_none() {
            self.selected = None;
            self.events
                .emit(EditorEvent::SelectionChanged(SelectionEvent::Cleared));
        }
    }

    /// Remove the selected shape from the document
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let removed = self
            .document
            .as_mut()
            .is_some_and(|document| document.remove_shape(id));
        self.selected = None;
        self.events
            .emit(EditorEvent::SelectionChanged(SelectionEvent::Cleared));
        if removed {
            log::info!("Deleted shape {}", id);
            self.document_changed();
        }
        removed
    }

    fn document_changed(&self) {
        self.events
            .emit(EditorEvent::DocumentChanged(DocumentEvent::Modified));
    }

    // ---- Style ----

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Set the fill for new shapes and the selection
    pub fn set_fill(&mut self, fill: Fill) {
        self.style.fill = fill;
        self.modify_selected(|shape| shape.set_fill(fill));
    }

    pub fn set_fill_color(&mut self, color: Color32) {
        self.set_fill(Fill::Solid(color));
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.style.stroke.color = color;
        self.style.stroke.enabled = true;
        self.modify_selected(|shape| {
            let mut stroke = shape.stroke();
            stroke.color = color;
            stroke.enabled = true;
            shape.set_stroke(stroke);
        });
    }

    /// Negative widths are treated as zero
    pub fn set_stroke_width(&mut self, width: f32) {
        let width = width.max(0.0);
        self.style.stroke.width = width;
        self.modify_selected(|shape| {
            let mut stroke = shape.stroke();
            stroke.width = width;
            shape.set_stroke(stroke);
        });
    }

    pub fn set_stroke(&mut self, stroke: StrokeStyle) {
        self.style.stroke = stroke;
        self.modify_selected(|shape| shape.set_stroke(stroke));
    }

    fn modify_selected(&mut self, edit: impl FnOnce(&mut AnyShape)) {
        let Some(id) = self.selected else {
            return;
        };
        let changed = self
            .document
            .as_mut()
            .is_some_and(|document| document.modify_shape(id, edit));
        if changed {
            self.document_changed();
        }
    }

    // ---- History ----

    pub fn undo(&mut self) -> bool {
        let done = self.document.as_mut().is_some_and(Document::undo);
        if done {
            self.sync_selection();
            self.document_changed();
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        let done = self.document.as_mut().is_some_and(Document::redo);
        if done {
            self.sync_selection();
            self.document_changed();
        }
        done
    }

    // ---- Clipboard ----

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Copy the selected shape; does nothing without a selection
    pub fn copy(&mut self) -> bool {
        let Some(copy) = self.selected_shape().map(AnyShape::duplicate) else {
            return false;
        };
        log::debug!("Copied {}", copy.shape_type().name());
        self.clipboard = Some(copy);
        true
    }

    pub fn cut(&mut self) -> bool {
        self.copy() && self.delete_selected()
    }

    /// Insert a fresh copy of the clipboard, offset from the original, and
    /// select it. Repeated pastes keep stepping by the same offset.
    pub fn paste(&mut self) -> bool {
        let Some(clip) = self.clipboard.as_mut() else {
            return false;
        };
        let mut shape = clip.duplicate();
        shape.translate(PASTE_OFFSET);

        let Some(id) = self.document.as_mut().and_then(|doc| doc.add_shape(shape)) else {
            return false;
        };
        clip.translate(PASTE_OFFSET);
        self.select_shape(id);
        self.document_changed();
        true
    }

    // ---- Pointer ----

    /// Feed one translated input event to the canvas
    pub fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { location, button } if location.is_in_canvas => {
                self.pointer_pressed(location.position, *button);
            }
            InputEvent::PointerUp { location, button } => {
                self.pointer_released(location.position, *button);
            }
            InputEvent::PointerMove { location, .. } => {
                self.pointer_moved(location.position);
            }
            InputEvent::Scroll {
                location,
                delta,
                modifiers,
            } if location.is_in_canvas => {
                self.scrolled(*delta, *modifiers);
            }
            InputEvent::Zoom { location, factor } if location.is_in_canvas => {
                self.wheel_zoom(*factor > 1.0);
            }
            InputEvent::KeyDown { key, modifiers } => {
                self.key_pressed(*key, *modifiers);
            }
            _ => {}
        }
    }

    /// `screen` is relative to the canvas widget
    pub fn pointer_pressed(&mut self, screen: Pos2, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        let world = self.world_position(screen);

        match self.tool {
            ToolKind::Select => match self.document.as_ref().and_then(|d| d.shape_at(world)) {
                Some(shape) => {
                    let id = shape.id();
                    self.select_shape(id);
                }
                None => self.clear_selection(),
            },
            ToolKind::Rectangle => {
                self.start_drag(world, factory::create_rectangle(world, Vec2::ZERO, self.style));
            }
            ToolKind::Ellipse => {
                self.start_drag(world, factory::create_ellipse(world, Vec2::ZERO, self.style));
            }
            ToolKind::Line => {
                self.start_drag(world, factory::create_line(world, world, self.style));
            }
            ToolKind::Pen => {
                self.start_drag(world, factory::create_bezier(&[world], false, self.style));
            }
            ToolKind::Bezier => self.pending_points.push(world),
            ToolKind::Text => self.pending_text = Some(world),
        }
    }

    fn start_drag(&mut self, world: Pos2, shape: AnyShape) {
        self.drag_start = Some(world);
        self.in_progress = Some(shape);
    }

    pub fn pointer_moved(&mut self, screen: Pos2) {
        let world = self.world_position(screen);
        let (Some(start), Some(shape)) = (self.drag_start, self.in_progress.as_mut()) else {
            return;
        };

        match self.tool {
            ToolKind::Rectangle | ToolKind::Ellipse => {
                let bounds = Rect::from_two_pos(start, world);
                shape.set_position(bounds.min);
                shape.set_size(bounds.size());
            }
            ToolKind::Line => {
                if let Some(line) = shape.as_line_mut() {
                    line.set_end_point(world);
                }
            }
            ToolKind::Pen => {
                if let Some(bezier) = shape.as_bezier_mut() {
                    if bezier.points().last() != Some(&world) {
                        bezier.add_point(world);
                    }
                }
            }
            _ => {}
        }
    }

    pub fn pointer_released(&mut self, screen: Pos2, button: PointerButton) {
        if button != PointerButton::Primary || self.in_progress.is_none() {
            return;
        }
        self.pointer_moved(screen);
        self.drag_start = None;
        if let Some(shape) = self.in_progress.take() {
            self.commit(shape);
        }
    }

    /// Hand a finished shape to the document; without one it is dropped
    fn commit(&mut self, shape: AnyShape) -> Option<ShapeId> {
        let kind = shape.shape_type();
        let Some(document) = self.document.as_mut() else {
            log::debug!("No document attached, discarding {}", kind.name());
            return None;
        };
        let id = document.add_shape(shape)?;
        log::info!("Created {} {}", kind.name(), id);
        self.events.emit(EditorEvent::ShapeCreated { shape_id: id });
        self.document_changed();
        Some(id)
    }

    // ---- Bezier and text entry ----

    /// Turn the placed bezier points into a shape; needs at least two
    pub fn commit_bezier(&mut self) -> Option<ShapeId> {
        if self.pending_points.len() < 2 {
            return None;
        }
        let points = std::mem::take(&mut self.pending_points);
        self.commit(factory::create_bezier(&points, false, self.style))
    }

    pub fn cancel_bezier(&mut self) {
        self.pending_points.clear();
    }

    /// Anchor of a text shape waiting for [`Canvas::confirm_text`]
    pub fn pending_text(&self) -> Option<Pos2> {
        self.pending_text
    }

    /// Create the pending text shape; blank input commits nothing
    pub fn confirm_text(&mut self, text: &str) -> Option<ShapeId> {
        let anchor = self.pending_text.take()?;
        if text.trim().is_empty() {
            return None;
        }
        self.commit(factory::create_text(anchor, text, self.style))
    }

    pub fn cancel_text(&mut self) {
        self.pending_text = None;
    }

    // ---- Keyboard and wheel ----

    /// Returns whether the key did something
    pub fn key_pressed(&mut self, key: Key, modifiers: Modifiers) -> bool {
        if modifiers.command {
            return match key {
                Key::Z if modifiers.shift => self.redo(),
                Key::Z => self.undo(),
                Key::Y => self.redo(),
                Key::X => self.cut(),
                Key::C => self.copy(),
                Key::V => self.paste(),
                _ => false,
            };
        }

        match key {
            Key::Delete | Key::Backspace => self.delete_selected(),
            Key::Escape => {
                let busy = !self.pending_points.is_empty() || self.in_progress.is_some();
                self.reset_interaction();
                busy
            }
            Key::Enter if self.tool == ToolKind::Bezier => self.commit_bezier().is_some(),
            _ => false,
        }
    }

    /// Ctrl/Cmd + wheel zooms, a plain wheel pans
    pub fn scrolled(&mut self, delta: Vec2, modifiers: Modifiers) {
        if modifiers.command || modifiers.ctrl {
            if delta.y != 0.0 {
                self.wheel_zoom(delta.y > 0.0);
            }
        } else {
            self.view.pan_by(delta);
            self.view_changed();
        }
    }

    fn wheel_zoom(&mut self, zoom_in: bool) {
        let factor = if zoom_in { WHEEL_ZOOM_IN } else { WHEEL_ZOOM_OUT };
        self.set_zoom(self.zoom() * factor);
    }

    // ---- Rendering ----

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Paint the whole canvas into `rect` (absolute screen coordinates)
    pub fn paint(&self, sink: &mut dyn PaintSink, rect: Rect) {
        self.renderer.render(self, sink, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_with_document() -> Canvas {
        let mut canvas = Canvas::new();
        canvas.set_document(Document::new());
        canvas
    }

    fn drag(canvas: &mut Canvas, from: Pos2, to: Pos2) {
        canvas.pointer_pressed(from, PointerButton::Primary);
        canvas.pointer_moved(to);
        canvas.pointer_released(to, PointerButton::Primary);
    }

    #[test]
    fn test_drag_in_any_direction_normalizes() {
        let mut canvas = canvas_with_document();
        canvas.set_tool(ToolKind::Ellipse);
        drag(&mut canvas, Pos2::new(60.0, 40.0), Pos2::new(10.0, 10.0));

        let shapes = canvas.document().unwrap().shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].position(), Pos2::new(10.0, 10.0));
        assert_eq!(shapes[0].size(), Vec2::new(50.0, 30.0));
    }

    #[test]
    fn test_release_without_document_discards() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, Pos2::ZERO, Pos2::new(10.0, 10.0));
        assert!(canvas.in_progress().is_none());
    }

    #[test]
    fn test_switching_tool_discards_interaction() {
        let mut canvas = canvas_with_document();
        canvas.set_tool(ToolKind::Bezier);
        canvas.pointer_pressed(Pos2::ZERO, PointerButton::Primary);
        canvas.set_tool(ToolKind::Line);
        assert!(canvas.pending_points().is_empty());

        canvas.pointer_pressed(Pos2::ZERO, PointerButton::Primary);
        assert!(canvas.in_progress().is_some());
        canvas.set_tool(ToolKind::Select);
        assert!(canvas.in_progress().is_none());
        assert!(canvas.document().unwrap().shapes().is_empty());
    }

    #[test]
    fn test_snap_applies_before_tools() {
        let mut canvas = canvas_with_document();
        canvas.toggle_snap_to_grid();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, Pos2::new(9.0, 12.0), Pos2::new(52.0, 38.0));

        let shape = &canvas.document().unwrap().shapes()[0];
        assert_eq!(shape.position(), Pos2::new(0.0, 20.0));
        assert_eq!(shape.size(), Vec2::new(60.0, 20.0));
    }

    #[test]
    fn test_pen_collects_drag_points() {
        let mut canvas = canvas_with_document();
        canvas.set_tool(ToolKind::Pen);
        canvas.pointer_pressed(Pos2::new(0.0, 0.0), PointerButton::Primary);
        canvas.pointer_moved(Pos2::new(5.0, 0.0));
        canvas.pointer_moved(Pos2::new(5.0, 5.0));
        canvas.pointer_released(Pos2::new(5.0, 5.0), PointerButton::Primary);

        let shapes = canvas.document().unwrap().shapes();
        let bezier = shapes[0].as_bezier().unwrap();
        assert_eq!(bezier.point_count(), 3);
    }

    #[test]
    fn test_text_tool_waits_for_content() {
        let mut canvas = canvas_with_document();
        canvas.set_tool(ToolKind::Text);
        canvas.pointer_pressed(Pos2::new(30.0, 40.0), PointerButton::Primary);
        assert_eq!(canvas.pending_text(), Some(Pos2::new(30.0, 40.0)));

        assert!(canvas.confirm_text("   ").is_none());
        assert!(canvas.pending_text().is_none());

        canvas.pointer_pressed(Pos2::new(30.0, 40.0), PointerButton::Primary);
        let id = canvas.confirm_text("Hello").unwrap();
        assert_eq!(
            canvas.document().unwrap().shape(id).unwrap().position(),
            Pos2::new(30.0, 40.0)
        );
    }

    #[test]
    fn test_undo_drops_stale_selection() {
        let mut canvas = canvas_with_document();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, Pos2::ZERO, Pos2::new(20.0, 20.0));
        canvas.set_tool(ToolKind::Select);
        canvas.pointer_pressed(Pos2::new(5.0, 5.0), PointerButton::Primary);
        assert!(canvas.selected_shape().is_some());

        assert!(canvas.undo());
        assert_eq!(canvas.selected_id(), None);
    }

    #[test]
    fn test_wheel_zoom_and_pan() {
        let mut canvas = Canvas::new();
        canvas.scrolled(Vec2::new(0.0, 1.0), Modifiers::COMMAND);
        assert!((canvas.zoom() - 1.1).abs() < 1e-6);
        canvas.scrolled(Vec2::new(0.0, -1.0), Modifiers::COMMAND);
        assert!((canvas.zoom() - 0.99).abs() < 1e-6);

        canvas.scrolled(Vec2::new(4.0, -6.0), Modifiers::NONE);
        assert_eq!(canvas.pan(), Vec2::new(4.0, -6.0));
    }

    #[test]
    fn test_fit_to_view_needs_viewport() {
        let mut canvas = canvas_with_document();
        canvas.set_zoom(3.0);
        canvas.fit_to_view();
        assert_eq!(canvas.zoom(), 3.0);

        canvas.set_viewport_size(Vec2::new(400.0, 600.0));
        canvas.set_pan(Vec2::new(10.0, 10.0));
        canvas.fit_to_view();
        assert!((canvas.zoom() - 0.45).abs() < 1e-6);
        assert_eq!(canvas.pan(), Vec2::ZERO);
    }

    #[test]
    fn test_grid_size_has_floor() {
        let mut canvas = Canvas::new();
        canvas.set_grid_size(0.0);
        assert_eq!(canvas.grid().size, 1.0);
    }
}
