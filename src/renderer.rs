// src/renderer.rs
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Vec2};

use crate::canvas::{Canvas, ToolKind, ViewTransform};
use crate::shape::Shape;

/// Anything that can receive painted primitives in screen coordinates
pub trait PaintSink {
    fn add_shape(&mut self, shape: egui::Shape);

    /// Draw `text` with its top-left corner at `pos`, cut off outside `clip`
    fn add_text(&mut self, pos: Pos2, text: &str, font_size: f32, color: Color32, clip: Rect);
}

impl PaintSink for egui::Painter {
    fn add_shape(&mut self, shape: egui::Shape) {
        self.add(shape);
    }

    fn add_text(&mut self, pos: Pos2, text: &str, font_size: f32, color: Color32, clip: Rect) {
        let clipped = self.with_clip_rect(clip.intersect(self.clip_rect()));
        clipped.text(pos, Align2::LEFT_TOP, text, FontId::proportional(font_size), color);
    }
}

/// One primitive captured by a [`RecordingSink`]
#[derive(Debug, Clone)]
pub enum Recorded {
    Shape(egui::Shape),
    Text {
        pos: Pos2,
        text: String,
        font_size: f32,
        color: Color32,
        clip: Rect,
    },
}

/// Sink that keeps everything painted into it, in order.
///
/// Handy for headless rendering and for checking the paint order in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub items: Vec<Recorded>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &egui::Shape> {
        self.items.iter().filter_map(|item| match item {
            Recorded::Shape(shape) => Some(shape),
            Recorded::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            Recorded::Text { text, .. } => Some(text.as_str()),
            Recorded::Shape(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl PaintSink for RecordingSink {
    fn add_shape(&mut self, shape: egui::Shape) {
        self.items.push(Recorded::Shape(shape));
    }

    fn add_text(&mut self, pos: Pos2, text: &str, font_size: f32, color: Color32, clip: Rect) {
        self.items.push(Recorded::Text {
            pos,
            text: text.to_owned(),
            font_size,
            color,
            clip,
        });
    }
}

/// Paint target handed to shapes: maps world coordinates to the screen.
///
/// A detached surface has no sink and silently drops everything.
pub struct Surface<'a> {
    sink: Option<&'a mut dyn PaintSink>,
    view: ViewTransform,
    origin: Vec2,
}

impl<'a> Surface<'a> {
    /// `origin` is the screen position of the canvas widget's top-left corner
    pub fn new(sink: &'a mut dyn PaintSink, view: ViewTransform, origin: Pos2) -> Self {
        Self {
            sink: Some(sink),
            view,
            origin: origin.to_vec2(),
        }
    }

    pub fn detached(view: ViewTransform) -> Self {
        Self {
            sink: None,
            view,
            origin: Vec2::ZERO,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    pub fn zoom(&self) -> f32 {
        self.view.zoom()
    }

    pub fn to_screen(&self, world: Pos2) -> Pos2 {
        self.view.world_to_screen(world) + self.origin
    }

    pub fn to_screen_rect(&self, world: Rect) -> Rect {
        self.view.world_to_screen_rect(world).translate(self.origin)
    }

    /// Add a primitive that is already in screen coordinates
    pub fn add(&mut self, shape: egui::Shape) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.add_shape(shape);
        }
    }

    pub fn extend(&mut self, shapes: impl IntoIterator<Item = egui::Shape>) {
        for shape in shapes {
            self.add(shape);
        }
    }

    /// Draw text from the top-left of a world box, clipped to that box.
    /// The font scales with the zoom.
    pub fn text(&mut self, world_box: Rect, text: &str, font_size: f32, color: Color32) {
        let clip = self.to_screen_rect(world_box);
        let size = font_size * self.zoom();
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.add_text(clip.min, text, size, color, clip);
        }
    }
}

/// Paints a canvas: background, grid, shapes and interaction overlays
#[derive(Debug, Clone)]
pub struct Renderer {
    pub grid_color: Color32,
    /// Outline color of a shape still being dragged out
    pub preview_color: Color32,
    pub selection_color: Color32,
    pub marker_color: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            grid_color: Color32::LIGHT_GRAY,
            preview_color: Color32::from_rgb(0, 120, 255),
            selection_color: Color32::BLUE,
            marker_color: Color32::BLUE,
        }
    }
}

/// Minimum on-screen spacing before grid lines are drawn at all
const MIN_GRID_SPACING_PX: f32 = 4.0;
const MARKER_RADIUS: f32 = 3.0;
const DASH_LENGTH: f32 = 4.0;

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders one frame of the canvas into `rect` (screen space)
    pub fn render(&self, canvas: &Canvas, sink: &mut dyn PaintSink, rect: Rect) {
        let mut surface = Surface::new(sink, *canvas.view(), rect.min);

        self.draw_background(canvas, &mut surface, rect);
        if canvas.grid().visible {
            self.draw_grid(canvas, &mut surface, rect);
        }
        self.draw_document(canvas, &mut surface);
        self.draw_in_progress(canvas, &mut surface);
        self.draw_selection(canvas, &mut surface);
        self.draw_pending_points(canvas, &mut surface);
    }

    fn draw_background(&self, canvas: &Canvas, surface: &mut Surface<'_>, rect: Rect) {
        let color = canvas
            .document()
            .map(|doc| doc.background_color())
            .unwrap_or(Color32::WHITE);
        surface.add(egui::Shape::rect_filled(rect, 0.0, color));
    }

    fn draw_grid(&self, canvas: &Canvas, surface: &mut Surface<'_>, rect: Rect) {
        let grid_size = canvas.grid().size;
        let view = canvas.view();
        if grid_size <= 0.0 || grid_size * view.zoom() < MIN_GRID_SPACING_PX {
            return;
        }

        let visible = view.screen_to_world_rect(Rect::from_min_size(Pos2::ZERO, rect.size()));
        let stroke = egui::Stroke::new(1.0, self.grid_color);

        let mut x = (visible.min.x / grid_size).floor() * grid_size;
        while x <= visible.max.x {
            let top = surface.to_screen(Pos2::new(x, visible.min.y));
            let bottom = surface.to_screen(Pos2::new(x, visible.max.y));
            surface.add(egui::Shape::line_segment([top, bottom], stroke));
            x += grid_size;
        }

        let mut y = (visible.min.y / grid_size).floor() * grid_size;
        while y <= visible.max.y {
            let left = surface.to_screen(Pos2::new(visible.min.x, y));
            let right = surface.to_screen(Pos2::new(visible.max.x, y));
            surface.add(egui::Shape::line_segment([left, right], stroke));
            y += grid_size;
        }
    }

    /// Bottom layer first, bottom shape first
    fn draw_document(&self, canvas: &Canvas, surface: &mut Surface<'_>) {
        let Some(document) = canvas.document() else {
            return;
        };
        for layer in document.layers().iter().filter(|layer| layer.is_visible()) {
            for shape in layer.shapes() {
                shape.draw(surface);
            }
        }
    }

    fn draw_in_progress(&self, canvas: &Canvas, surface: &mut Surface<'_>) {
        if let Some(shape) = canvas.in_progress() {
            let mut preview = shape.clone();
            let mut style = *preview.style();
            style.stroke.color = self.preview_color;
            style.stroke.enabled = true;
            style.stroke.width = style.stroke.width.max(1.0);
            preview.set_style(style);
            preview.draw(surface);
        }
    }

    fn draw_selection(&self, canvas: &Canvas, surface: &mut Surface<'_>) {
        if let Some(shape) = canvas.selected_shape() {
            let bounds = surface.to_screen_rect(shape.bounding_rect());
            let outline = [
                bounds.left_top(),
                bounds.right_top(),
                bounds.right_bottom(),
                bounds.left_bottom(),
                bounds.left_top(),
            ];
            let stroke = egui::Stroke::new(1.0, self.selection_color);
            surface.extend(egui::Shape::dashed_line(&outline, stroke, DASH_LENGTH, DASH_LENGTH));
        }
    }

    fn draw_pending_points(&self, canvas: &Canvas, surface: &mut Surface<'_>) {
        if !matches!(canvas.tool(), ToolKind::Bezier | ToolKind::Pen) {
            return;
        }
        let points: Vec<Pos2> = canvas
            .pending_points()
            .iter()
            .map(|p| surface.to_screen(*p))
            .collect();
        if points.is_empty() {
            return;
        }

        for point in &points {
            surface.add(egui::Shape::circle_filled(*point, MARKER_RADIUS, self.marker_color));
        }
        if points.len() >= 2 {
            let stroke = egui::Stroke::new(1.0, self.marker_color);
            surface.extend(egui::Shape::dashed_line(&points, stroke, DASH_LENGTH, DASH_LENGTH));
        }
    }
}
