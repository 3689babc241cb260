use egui::{Pos2, Vec2};
use vector_paint::event::{EditorEvent, EventLog};
use vector_paint::shape::Rectangle;
use vector_paint::{AnyShape, Document, Layer, Shape, ShapeId};

fn rect(x: f32, y: f32, w: f32, h: f32) -> AnyShape {
    Rectangle::new(Pos2::new(x, y), Vec2::new(w, h)).into()
}

fn active_ids(document: &Document) -> Vec<ShapeId> {
    document.shapes().iter().map(|shape| shape.id()).collect()
}

#[test]
fn test_topmost_shape_wins_hit_test() {
    let mut document = Document::new();
    let a = document.add_shape(rect(0.0, 0.0, 50.0, 50.0)).unwrap();
    let b = document.add_shape(rect(25.0, 25.0, 50.0, 50.0)).unwrap();

    assert_eq!(document.shape_at(Pos2::new(30.0, 30.0)).map(|s| s.id()), Some(b));
    assert_eq!(document.shape_at(Pos2::new(10.0, 10.0)).map(|s| s.id()), Some(a));
    assert!(document.shape_at(Pos2::new(200.0, 200.0)).is_none());
}

#[test]
fn test_upper_layer_wins_hit_test() {
    let mut document = Document::new();
    document.add_shape(rect(0.0, 0.0, 50.0, 50.0));
    let top = document.add_layer(Layer::new("Top"));
    document.set_active_layer(top);
    let upper = document.add_shape(rect(0.0, 0.0, 10.0, 10.0)).unwrap();

    assert_eq!(document.shape_at(Pos2::new(5.0, 5.0)).map(|s| s.id()), Some(upper));

    document.layer_mut(top).unwrap().set_visible(false);
    assert_ne!(document.shape_at(Pos2::new(5.0, 5.0)).map(|s| s.id()), Some(upper));
}

#[test]
fn test_locked_layer_is_not_hit() {
    let mut document = Document::new();
    document.add_shape(rect(0.0, 0.0, 50.0, 50.0));
    let layer = document.active_layer_id().unwrap();
    document.layer_mut(layer).unwrap().set_locked(true);

    assert!(document.shape_at(Pos2::new(10.0, 10.0)).is_none());
}

#[test]
fn test_undo_redo_inverse() {
    let mut document = Document::new();
    document.add_shape(rect(0.0, 0.0, 5.0, 5.0));
    let before = active_ids(&document);

    document.add_shape(rect(10.0, 10.0, 5.0, 5.0));
    let after = active_ids(&document);

    assert!(document.undo());
    assert_eq!(active_ids(&document), before);

    assert!(document.redo());
    assert_eq!(active_ids(&document), after);
}

#[test]
fn test_new_command_clears_redo() {
    let mut document = Document::new();
    document.add_shape(rect(0.0, 0.0, 5.0, 5.0));
    document.undo();
    assert!(document.can_redo());

    document.add_shape(rect(1.0, 1.0, 5.0, 5.0));
    assert!(!document.can_redo());
    assert!(!document.redo());
}

#[test]
fn test_undo_remove_restores_position_in_layer() {
    let mut document = Document::new();
    let ids: Vec<_> = (0..3)
        .map(|i| document.add_shape(rect(i as f32, 0.0, 5.0, 5.0)).unwrap())
        .collect();

    assert!(document.remove_shape(ids[1]));
    assert_eq!(active_ids(&document), vec![ids[0], ids[2]]);

    assert!(document.undo());
    assert_eq!(active_ids(&document), ids);
}

#[test]
fn test_history_is_bounded() {
    let mut document = Document::new();
    document.set_history_limit(2);
    for i in 0..5 {
        document.add_shape(rect(i as f32, 0.0, 1.0, 1.0));
    }

    assert!(document.undo());
    assert!(document.undo());
    assert!(!document.undo());
    assert_eq!(document.shape_count(), 3);
}

#[test]
fn test_nothing_to_undo_is_a_no_op() {
    let mut document = Document::new();
    assert!(!document.undo());
    assert!(!document.redo());
    assert_eq!(document.layers().len(), 1);
}

#[test]
fn test_add_without_layers_is_dropped() {
    let mut document = Document::empty();
    assert!(document.add_shape(rect(0.0, 0.0, 1.0, 1.0)).is_none());
    assert!(!document.can_undo());
}

#[test]
fn test_removing_active_layer_falls_back() {
    let mut document = Document::new();
    let first = document.active_layer_id().unwrap();
    let second = document.add_layer(Layer::new("Second"));
    document.set_active_layer(second);

    assert!(document.remove_layer(second));
    assert_eq!(document.active_layer_id(), Some(first));
    assert!(!document.remove_layer(second));
}

#[test]
fn test_observers_see_changes() {
    let mut document = Document::new();
    let log = EventLog::new();
    document.events().subscribe(Box::new(log.clone()));

    let id = document.add_shape(rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    document.remove_shape(id);

    assert_eq!(
        log.count(|event| matches!(event, EditorEvent::ShapeAdded { shape_id, .. } if *shape_id == id)),
        1
    );
    assert_eq!(
        log.count(|event| matches!(event, EditorEvent::ShapeRemoved { shape_id, .. } if *shape_id == id)),
        1
    );
}
