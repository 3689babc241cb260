#![warn(clippy::all, rust_2018_idioms)]

use vector_paint::PaintApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Vector Paint"),
        ..Default::default()
    };

    eframe::run_native(
        "vector_paint",
        native_options,
        Box::new(|cc| Ok(Box::new(PaintApp::new(cc)))),
    )
}
