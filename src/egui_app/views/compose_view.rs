use eframe::egui;

use crate::egui_app::controller::Controller;
use crate::egui_app::theme::colors;

pub fn render(ctx: &egui::Context, controller: &mut Controller) {
    egui::Window::new("Create New Post")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(420.0);
            let busy = controller.compose_pending();

            ui.label("Title");
            ui.add_enabled(
                !busy,
                egui::TextEdit::singleline(&mut controller.compose_form.title),
            );
            ui.add_space(8.0);

            ui.label("Content");
            ui.add_enabled(
                !busy,
                egui::TextEdit::multiline(&mut controller.compose_form.content).desired_rows(10),
            );
            ui.add_space(8.0);

            if let Some(error) = controller.compose_error.clone() {
                ui.colored_label(colors::ERROR, error);
                ui.add_space(8.0);
            }

            if busy {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Creating...");
                });
            } else {
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        controller.close_compose();
                    }
                    if ui.button("Create Post").clicked() {
                        controller.submit_compose();
                    }
                });
            }
        });
}
