use crate::PaintApp;
use crate::canvas::ToolKind;
use crate::layer::{Layer, LayerId};
use crate::style::Fill;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Tools");
                tool_buttons(app, ui);
                ui.separator();

                history_buttons(app, ui);
                ui.separator();

                style_controls(app, ui);
                ui.separator();

                view_controls(app, ui);
                ui.separator();

                layer_list(app, ui);
            });
        });
}

fn tool_buttons(app: &mut PaintApp, ui: &mut egui::Ui) {
    let canvas = app.canvas_mut();
    let active = canvas.tool();
    for tool in ToolKind::ALL {
        if ui.selectable_label(active == tool, tool.name()).clicked() {
            log::info!("Tool selected from UI: {}", tool.name());
            canvas.set_tool(tool);
        }
    }
    if active == ToolKind::Bezier {
        let pending = canvas.pending_points().len();
        ui.label(format!("{} points, Enter to finish", pending));
    }
}

fn history_buttons(app: &mut PaintApp, ui: &mut egui::Ui) {
    let canvas = app.canvas_mut();
    let (can_undo, can_redo) = canvas
        .document()
        .map_or((false, false), |doc| (doc.can_undo(), doc.can_redo()));

    ui.horizontal(|ui| {
        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            canvas.undo();
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            canvas.redo();
        }
    });

    let has_selection = canvas.selected_id().is_some();
    ui.horizontal(|ui| {
        if ui.add_enabled(has_selection, egui::Button::new("Cut")).clicked() {
            canvas.cut();
        }
        if ui.add_enabled(has_selection, egui::Button::new("Copy")).clicked() {
            canvas.copy();
        }
        if ui
            .add_enabled(canvas.has_clipboard(), egui::Button::new("Paste"))
            .clicked()
        {
            canvas.paste();
        }
        if ui.add_enabled(has_selection, egui::Button::new("Delete")).clicked() {
            canvas.delete_selected();
        }
    });

    if let Some(history) = canvas.document().map(|doc| doc.history()) {
        ui.label(format!(
            "Undo: {}  Redo: {}",
            history.undo_len(),
            history.redo_len()
        ));
    }
}

fn style_controls(app: &mut PaintApp, ui: &mut egui::Ui) {
    let canvas = app.canvas_mut();
    let style = *canvas.style();

    ui.label("Stroke");
    ui.horizontal(|ui| {
        let mut color = style.stroke.color;
        if ui.color_edit_button_srgba(&mut color).changed() {
            canvas.set_stroke_color(color);
        }
        let mut width = style.stroke.width;
        if ui
            .add(egui::DragValue::new(&mut width).range(0.0..=50.0).speed(0.1))
            .changed()
        {
            canvas.set_stroke_width(width);
        }
    });

    ui.horizontal(|ui| {
        let mut filled = style.fill != Fill::None;
        if ui.checkbox(&mut filled, "Fill").changed() {
            canvas.set_fill(if filled {
                Fill::Solid(egui::Color32::WHITE)
            } else {
                Fill::None
            });
        }
        if let Fill::Solid(mut color) = style.fill {
            if ui.color_edit_button_srgba(&mut color).changed() {
                canvas.set_fill_color(color);
            }
        }
    });
}

fn view_controls(app: &mut PaintApp, ui: &mut egui::Ui) {
    let canvas = app.canvas_mut();

    ui.horizontal(|ui| {
        if ui.button("-").clicked() {
            canvas.zoom_out();
        }
        ui.label(format!("{:.0}%", canvas.zoom() * 100.0));
        if ui.button("+").clicked() {
            canvas.zoom_in();
        }
        if ui.button("Fit").clicked() {
            canvas.fit_to_view();
        }
    });

    let grid = *canvas.grid();
    ui.horizontal(|ui| {
        if ui.selectable_label(grid.visible, "Grid").clicked() {
            canvas.toggle_grid();
        }
        if ui.selectable_label(grid.snap, "Snap").clicked() {
            canvas.toggle_snap_to_grid();
        }
        let mut size = grid.size;
        if ui
            .add(egui::DragValue::new(&mut size).range(1.0..=200.0))
            .changed()
        {
            canvas.set_grid_size(size);
        }
    });
}

enum LayerAction {
    Activate(LayerId),
    SetVisible(LayerId, bool),
    SetLocked(LayerId, bool),
    Remove(LayerId),
    Add,
}

fn layer_list(app: &mut PaintApp, ui: &mut egui::Ui) {
    let canvas = app.canvas_mut();
    let Some(document) = canvas.document() else {
        ui.label("No document");
        return;
    };

    ui.heading("Layers");
    let active = document.active_layer_id();
    let mut actions = Vec::new();

    // Topmost layer first
    for layer in document.layers().iter().rev() {
        let id = layer.id();
        ui.horizontal(|ui| {
            let mut visible = layer.is_visible();
            if ui.checkbox(&mut visible, "").on_hover_text("Visible").changed() {
                actions.push(LayerAction::SetVisible(id, visible));
            }
            let mut locked = layer.is_locked();
            if ui.checkbox(&mut locked, "").on_hover_text("Locked").changed() {
                actions.push(LayerAction::SetLocked(id, locked));
            }
            let label = format!("{} ({})", layer.name(), layer.len());
            if ui.selectable_label(active == Some(id), label).clicked() {
                actions.push(LayerAction::Activate(id));
            }
            if ui.small_button("x").clicked() {
                actions.push(LayerAction::Remove(id));
            }
        });
    }

    if ui.button("Add Layer").clicked() {
        actions.push(LayerAction::Add);
    }
    if actions.is_empty() {
        return;
    }

    if let Some(document) = canvas.document_mut() {
        for action in actions {
            match action {
                LayerAction::Activate(id) => {
                    document.set_active_layer(id);
                }
                LayerAction::SetVisible(id, visible) => {
                    document.set_layer_visible(id, visible);
                }
                LayerAction::SetLocked(id, locked) => {
                    document.set_layer_locked(id, locked);
                }
                LayerAction::Remove(id) => {
                    document.remove_layer(id);
                }
                LayerAction::Add => {
                    let name = format!("Layer {}", document.layers().len() + 1);
                    document.add_layer(Layer::new(&name));
                }
            }
        }
    }
    canvas.sync_selection();
}
