use crate::canvas::Canvas;
use crate::document::Document;
use crate::event::LoggingHandler;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::settings::EditorSettings;
use crate::svg;

const DEFAULT_FILE_PATH: &str = "drawing.json";

pub struct PaintApp {
    canvas: Canvas,
    input_handler: InputHandler,
    settings: EditorSettings,
    /// Path used by the file window
    file_path: String,
    /// Content typed into the text prompt
    text_input: String,
    /// Result of the last file operation
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_settings(EditorSettings::load(cc.storage))
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let mut canvas = Canvas::with_settings(&settings);
        canvas.events().subscribe(Box::new(LoggingHandler));
        canvas.set_document(new_document(&settings));

        Self {
            canvas,
            input_handler: InputHandler::new(egui::Rect::NOTHING),
            settings,
            file_path: DEFAULT_FILE_PATH.to_string(),
            text_input: String::new(),
            status: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn input_handler_mut(&mut self) -> &mut InputHandler {
        &mut self.input_handler
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Copy the canvas' current grid and style back into the settings
    fn sync_settings(&mut self) {
        let grid = *self.canvas.grid();
        self.settings.grid_visible = grid.visible;
        self.settings.grid_size = grid.size;
        self.settings.snap_to_grid = grid.snap;
        self.settings.style = *self.canvas.style();
    }

    fn file_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("File")
            .default_pos(egui::pos2(240.0, 20.0))
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Path");
                    ui.text_edit_singleline(&mut self.file_path);
                });

                ui.horizontal(|ui| {
                    if ui.button("New").clicked() {
                        self.canvas.set_document(new_document(&self.settings));
                        self.status = Some("New document".to_string());
                    }
                    if ui.button("Save").clicked() {
                        self.run_file_action("Saved", |path, doc| doc.save(path));
                    }
                    if ui.button("Load").clicked() {
                        self.run_file_action("Loaded", |path, doc| doc.load(path));
                    }
                    if ui.button("Import SVG").clicked() {
                        self.run_file_action("Imported", |path, doc| {
                            svg::import_from_file(path, doc)
                        });
                    }
                    if ui.button("Export SVG").clicked() {
                        self.run_file_action("Exported", |path, doc| {
                            svg::export_to_file(path, doc)
                        });
                    }
                });

                if let Some(status) = &self.status {
                    ui.label(status);
                }
            });
    }

    fn run_file_action(&mut self, verb: &str, action: impl FnOnce(&str, &mut Document) -> bool) {
        let Some(document) = self.canvas.document_mut() else {
            return;
        };
        let ok = action(&self.file_path, document);
        self.canvas.sync_selection();
        self.status = Some(if ok {
            format!("{} {}", verb, self.file_path)
        } else {
            format!("Failed: {}", self.file_path)
        });
    }

    fn text_prompt(&mut self, ctx: &egui::Context) {
        if self.canvas.pending_text().is_none() {
            return;
        }

        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Text")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let response = ui.text_edit_singleline(&mut self.text_input);
                response.request_focus();
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirmed = true;
                }
                ui.horizontal(|ui| {
                    confirmed |= ui.button("OK").clicked();
                    cancelled |= ui.button("Cancel").clicked();
                });
            });

        if confirmed {
            let text = std::mem::take(&mut self.text_input);
            self.canvas.confirm_text(&text);
        } else if cancelled {
            self.text_input.clear();
            self.canvas.cancel_text();
        }
    }
}

fn new_document(settings: &EditorSettings) -> Document {
    let mut document = Document::new();
    document.events().subscribe(Box::new(LoggingHandler));
    document.set_size(settings.document_size);
    document.set_history_limit(settings.history_limit);
    document
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.sync_settings();
        self.settings.save(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        self.file_window(ctx);
        self.text_prompt(ctx);
        central_panel(self, ctx);
    }
}
