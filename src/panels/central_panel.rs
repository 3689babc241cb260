use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, mut painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            app.canvas_mut().set_viewport_size(canvas_rect.size());
            app.input_handler_mut().set_canvas_rect(canvas_rect);
            app.input_handler_mut().set_canvas_layer(response.layer_id);

            let events = app.input_handler_mut().process_input(ctx);
            for event in &events {
                app.canvas_mut().handle_input(event);
            }

            app.canvas().paint(&mut painter, canvas_rect);
        });
}
