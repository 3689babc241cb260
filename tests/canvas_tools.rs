use egui::{Color32, Key, Modifiers, PointerButton, Pos2, Rect, Vec2};
use vector_paint::canvas::{MAX_ZOOM, MIN_ZOOM};
use vector_paint::event::{EditorEvent, EventLog};
use vector_paint::input::{InputEvent, InputHandler, InputLocation};
use vector_paint::style::{Fill, Style};
use vector_paint::{Canvas, Document, RecordingSink, Shape, ShapeType, ToolKind};

fn canvas_with_document() -> Canvas {
    let mut canvas = Canvas::new();
    canvas.set_document(Document::new());
    canvas
}

fn click(canvas: &mut Canvas, x: f32, y: f32) {
    let pos = Pos2::new(x, y);
    canvas.pointer_pressed(pos, PointerButton::Primary);
    canvas.pointer_released(pos, PointerButton::Primary);
}

fn drag(canvas: &mut Canvas, from: Pos2, to: Pos2) {
    canvas.pointer_pressed(from, PointerButton::Primary);
    canvas.pointer_moved(to);
    canvas.pointer_released(to, PointerButton::Primary);
}

#[test]
fn test_rectangle_tool_creates_shape() {
    let mut canvas = canvas_with_document();
    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Pos2::new(10.0, 10.0), Pos2::new(60.0, 40.0));

    let shapes = canvas.document().unwrap().shapes();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].shape_type(), ShapeType::Rectangle);
    assert_eq!(shapes[0].position(), Pos2::new(10.0, 10.0));
    assert_eq!(shapes[0].size(), Vec2::new(50.0, 30.0));
    assert!(canvas.in_progress().is_none());
}

#[test]
fn test_drawing_respects_zoom_and_pan() {
    let mut canvas = canvas_with_document();
    canvas.set_zoom(2.0);
    canvas.set_pan(Vec2::new(20.0, 20.0));
    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Pos2::new(40.0, 40.0), Pos2::new(140.0, 100.0));

    let shape = &canvas.document().unwrap().shapes()[0];
    assert_eq!(shape.position(), Pos2::new(10.0, 10.0));
    assert_eq!(shape.size(), Vec2::new(50.0, 30.0));
}

#[test]
fn test_bezier_click_entry() {
    let mut canvas = canvas_with_document();
    canvas.set_tool(ToolKind::Bezier);
    let points = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
    for (x, y) in points {
        click(&mut canvas, x, y);
    }
    assert_eq!(canvas.pending_points().len(), 4);

    assert!(canvas.key_pressed(Key::Enter, Modifiers::NONE));

    let shapes = canvas.document().unwrap().shapes();
    assert_eq!(shapes.len(), 1);
    let bezier = shapes[0].as_bezier().unwrap();
    let expected: Vec<Pos2> = points.iter().map(|&(x, y)| Pos2::new(x, y)).collect();
    assert_eq!(bezier.points(), expected.as_slice());
    assert!(!bezier.is_closed());
    assert!(canvas.pending_points().is_empty());
}

#[test]
fn test_bezier_needs_two_points() {
    let mut canvas = canvas_with_document();
    canvas.set_tool(ToolKind::Bezier);
    click(&mut canvas, 5.0, 5.0);

    assert!(!canvas.key_pressed(Key::Enter, Modifiers::NONE));
    assert_eq!(canvas.pending_points().len(), 1);
    assert!(canvas.document().unwrap().shapes().is_empty());

    assert!(canvas.key_pressed(Key::Escape, Modifiers::NONE));
    assert!(canvas.pending_points().is_empty());
}

#[test]
fn test_zoom_is_clamped() {
    let mut canvas = Canvas::new();
    canvas.set_zoom(100.0);
    assert_eq!(canvas.zoom(), MAX_ZOOM);
    canvas.set_zoom(0.0);
    assert_eq!(canvas.zoom(), MIN_ZOOM);
    canvas.set_zoom(-3.0);
    assert_eq!(canvas.zoom(), MIN_ZOOM);
}

#[test]
fn test_screen_world_round_trip() {
    let mut canvas = Canvas::new();
    canvas.set_zoom(2.5);
    canvas.set_pan(Vec2::new(-30.0, 12.0));

    let screen = Pos2::new(120.0, 80.0);
    let back = canvas.world_to_screen(canvas.screen_to_world(screen));
    assert!((back - screen).length() < 1e-4);
}

#[test]
fn test_select_and_delete() {
    let mut canvas = canvas_with_document();
    canvas.set_tool(ToolKind::Ellipse);
    drag(&mut canvas, Pos2::new(0.0, 0.0), Pos2::new(40.0, 40.0));

    canvas.set_tool(ToolKind::Select);
    click(&mut canvas, 20.0, 20.0);
    let id = canvas.selected_id().unwrap();
    assert!(canvas.selected_shape().unwrap().is_selected());

    assert!(canvas.key_pressed(Key::Delete, Modifiers::NONE));
    assert!(canvas.selected_id().is_none());
    assert!(canvas.document().unwrap().shape(id).is_none());

    // Undo brings the shape back, unselected
    assert!(canvas.key_pressed(Key::Z, Modifiers::COMMAND));
    let restored = canvas.document().unwrap().shape(id).unwrap();
    assert!(!restored.is_selected());
}

#[test]
fn test_clicking_empty_space_clears_selection() {
    let mut canvas = canvas_with_document();
    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Pos2::ZERO, Pos2::new(10.0, 10.0));
    canvas.set_tool(ToolKind::Select);
    click(&mut canvas, 5.0, 5.0);
    assert!(canvas.selected_id().is_some());

    click(&mut canvas, 300.0, 300.0);
    assert!(canvas.selected_id().is_none());
}

#[test]
fn test_copy_paste_offsets_duplicate() {
    let mut canvas = canvas_with_document();
    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Pos2::ZERO, Pos2::new(10.0, 10.0));
    canvas.set_tool(ToolKind::Select);
    click(&mut canvas, 5.0, 5.0);
    let original = canvas.selected_id().unwrap();

    assert!(canvas.key_pressed(Key::C, Modifiers::COMMAND));
    assert!(canvas.key_pressed(Key::V, Modifiers::COMMAND));

    let pasted = canvas.selected_id().unwrap();
    assert_ne!(pasted, original);
    let document = canvas.document().unwrap();
    assert_eq!(document.shape_count(), 2);
    assert_eq!(document.shape(pasted).unwrap().position(), Pos2::new(10.0, 10.0));
}

#[test]
fn test_failed_paste_keeps_offset_cascade() {
    let mut canvas = canvas_with_document();
    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Pos2::ZERO, Pos2::new(10.0, 10.0));
    canvas.set_tool(ToolKind::Select);
    click(&mut canvas, 5.0, 5.0);
    assert!(canvas.copy());

    let document = canvas.take_document().unwrap();
    assert!(!canvas.paste());
    assert!(!canvas.paste());
    canvas.set_document(document);

    assert!(canvas.paste());
    let pasted = canvas.selected_shape().unwrap();
    assert_eq!(pasted.position(), Pos2::new(10.0, 10.0));
    assert!(canvas.paste());
    let pasted = canvas.selected_shape().unwrap();
    assert_eq!(pasted.position(), Pos2::new(20.0, 20.0));
}

#[test]
fn test_style_applies_to_new_and_selected_shapes() {
    let mut canvas = canvas_with_document();
    canvas.set_style(Style::shape_default());
    canvas.set_fill_color(Color32::RED);
    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Pos2::ZERO, Pos2::new(10.0, 10.0));

    let id = canvas.document().unwrap().shapes()[0].id();
    assert_eq!(
        canvas.document().unwrap().shape(id).unwrap().fill(),
        Fill::Solid(Color32::RED)
    );

    canvas.set_tool(ToolKind::Select);
    click(&mut canvas, 5.0, 5.0);
    canvas.set_stroke_width(6.0);
    assert_eq!(canvas.document().unwrap().shape(id).unwrap().stroke().width, 6.0);

    // The restyle is undoable on its own
    assert!(canvas.undo());
    assert_eq!(canvas.document().unwrap().shape(id).unwrap().stroke().width, 1.0);
}

#[test]
fn test_canvas_reports_creation() {
    let mut canvas = canvas_with_document();
    let log = EventLog::new();
    canvas.events().subscribe(Box::new(log.clone()));

    canvas.set_tool(ToolKind::Line);
    drag(&mut canvas, Pos2::ZERO, Pos2::new(30.0, 0.0));

    assert_eq!(log.count(|e| matches!(e, EditorEvent::ToolChanged { .. })), 1);
    assert_eq!(log.count(|e| matches!(e, EditorEvent::ShapeCreated { .. })), 1);
}

#[test]
fn test_input_events_drive_the_canvas() {
    let mut canvas = canvas_with_document();
    canvas.set_tool(ToolKind::Rectangle);
    let at = |x: f32, y: f32| InputLocation {
        position: Pos2::new(x, y),
        is_in_canvas: true,
    };

    canvas.handle_input(&InputEvent::PointerDown {
        location: at(0.0, 0.0),
        button: PointerButton::Primary,
    });
    canvas.handle_input(&InputEvent::PointerMove {
        location: at(20.0, 20.0),
        held_buttons: vec![PointerButton::Primary],
    });
    canvas.handle_input(&InputEvent::PointerUp {
        location: at(20.0, 20.0),
        button: PointerButton::Primary,
    });

    assert_eq!(canvas.document().unwrap().shape_count(), 1);
}

fn raw_input(events: Vec<egui::Event>, modifiers: Modifiers) -> egui::RawInput {
    egui::RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 300.0))),
        modifiers,
        events,
        ..Default::default()
    }
}

/// Run one egui frame with the canvas filling the screen, optionally under a
/// floating area at (20, 20) sized 100 x 100, and feed its input to the canvas.
fn run_frame(
    ctx: &egui::Context,
    handler: &mut InputHandler,
    canvas: &mut Canvas,
    input: egui::RawInput,
    covered: bool,
) {
    let _ = ctx.run(input, |ctx| {
        if covered {
            egui::Area::new(egui::Id::new("cover"))
                .fixed_pos(Pos2::new(20.0, 20.0))
                .show(ctx, |ui| {
                    ui.allocate_space(Vec2::splat(100.0));
                });
        }
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, _painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                handler.set_canvas_rect(response.rect);
                handler.set_canvas_layer(response.layer_id);
                for event in handler.process_input(ctx) {
                    canvas.handle_input(&event);
                }
            });
    });
}

fn press(pos: Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

#[test]
fn test_ctrl_wheel_zooms_once() {
    let ctx = egui::Context::default();
    let mut handler = InputHandler::new(Rect::NOTHING);
    let mut canvas = canvas_with_document();

    let hover = vec![egui::Event::PointerMoved(Pos2::new(100.0, 100.0))];
    run_frame(&ctx, &mut handler, &mut canvas, raw_input(hover, Modifiers::NONE), false);
    let wheel = vec![egui::Event::MouseWheel {
        unit: egui::MouseWheelUnit::Line,
        delta: Vec2::new(0.0, 1.0),
        modifiers: Modifiers::CTRL,
    }];
    run_frame(&ctx, &mut handler, &mut canvas, raw_input(wheel, Modifiers::CTRL), false);

    assert!((canvas.zoom() - 1.1).abs() < 1e-4, "zoom was {}", canvas.zoom());
    assert_eq!(canvas.pan(), Vec2::ZERO);
}

#[test]
fn test_plain_wheel_pans_without_zooming() {
    let ctx = egui::Context::default();
    let mut handler = InputHandler::new(Rect::NOTHING);
    let mut canvas = canvas_with_document();

    let hover = vec![egui::Event::PointerMoved(Pos2::new(100.0, 100.0))];
    run_frame(&ctx, &mut handler, &mut canvas, raw_input(hover, Modifiers::NONE), false);
    let wheel = vec![egui::Event::MouseWheel {
        unit: egui::MouseWheelUnit::Point,
        delta: Vec2::new(0.0, 30.0),
        modifiers: Modifiers::NONE,
    }];
    run_frame(&ctx, &mut handler, &mut canvas, raw_input(wheel, Modifiers::NONE), false);

    assert_eq!(canvas.zoom(), 1.0);
    assert_ne!(canvas.pan(), Vec2::ZERO);
}

#[test]
fn test_clicks_on_a_floating_area_skip_the_canvas() {
    let ctx = egui::Context::default();
    let mut handler = InputHandler::new(Rect::NOTHING);
    let mut canvas = canvas_with_document();
    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Pos2::new(40.0, 40.0), Pos2::new(80.0, 80.0));
    drag(&mut canvas, Pos2::new(250.0, 150.0), Pos2::new(290.0, 190.0));
    canvas.set_tool(ToolKind::Select);
    canvas.clear_selection();

    let under_area = Pos2::new(60.0, 60.0);
    let open = Pos2::new(270.0, 170.0);
    let mut frame = |canvas: &mut Canvas, events: Vec<egui::Event>| {
        run_frame(&ctx, &mut handler, canvas, raw_input(events, Modifiers::NONE), true);
    };

    frame(&mut canvas, vec![egui::Event::PointerMoved(under_area)]);
    frame(&mut canvas, Vec::new());
    frame(&mut canvas, vec![press(under_area, true)]);
    frame(&mut canvas, vec![press(under_area, false)]);
    assert_eq!(canvas.selected_id(), None);

    frame(&mut canvas, vec![egui::Event::PointerMoved(open)]);
    frame(&mut canvas, vec![press(open, true)]);
    frame(&mut canvas, vec![press(open, false)]);
    let selected = canvas.selected_shape().map(|shape| shape.position());
    assert_eq!(selected, Some(Pos2::new(250.0, 150.0)));
}

#[test]
fn test_render_paints_in_z_order() {
    let mut canvas = canvas_with_document();
    canvas.toggle_grid();
    canvas.set_tool(ToolKind::Rectangle);

    canvas.set_fill_color(Color32::RED);
    drag(&mut canvas, Pos2::ZERO, Pos2::new(20.0, 20.0));
    canvas.set_fill_color(Color32::BLUE);
    drag(&mut canvas, Pos2::new(10.0, 10.0), Pos2::new(30.0, 30.0));

    let mut sink = RecordingSink::new();
    canvas.paint(&mut sink, Rect::from_min_size(Pos2::ZERO, Vec2::splat(200.0)));

    let fills: Vec<Color32> = sink
        .shapes()
        .filter_map(|shape| match shape {
            egui::Shape::Rect(rect) => Some(rect.fill),
            _ => None,
        })
        .filter(|fill| *fill != Color32::TRANSPARENT)
        .collect();
    // Background, then bottom shape, then top shape
    assert_eq!(fills, vec![Color32::WHITE, Color32::RED, Color32::BLUE]);
}
