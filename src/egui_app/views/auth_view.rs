use eframe::egui;

use crate::egui_app::controller::Controller;
use crate::egui_app::theme::colors;
use crate::egui_app::types::AuthMode;

pub fn render(ctx: &egui::Context, controller: &mut Controller) {
    let Some(mode) = controller.auth_modal else {
        return;
    };
    let title = match mode {
        AuthMode::Login => "Log In",
        AuthMode::Signup => "Sign Up",
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(300.0);
            let busy = controller.auth_pending();

            ui.horizontal(|ui| {
                ui.label("Username:");
                ui.add_enabled(
                    !busy,
                    egui::TextEdit::singleline(&mut controller.auth_form.username),
                );
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Password:");
                ui.add_enabled(
                    !busy,
                    egui::TextEdit::singleline(&mut controller.auth_form.password).password(true),
                );
            });
            ui.add_space(8.0);

            if let Some(error) = controller.auth_error.clone() {
                ui.colored_label(colors::ERROR, error);
                ui.add_space(8.0);
            }

            if busy {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Signing in...");
                });
            } else {
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        controller.close_auth_modal();
                    }
                    if ui.button(title).clicked() {
                        controller.submit_auth();
                    }
                });
                ui.add_space(4.0);
                let toggle_label = match mode {
                    AuthMode::Login => "Need an account? Sign up",
                    AuthMode::Signup => "Already have an account? Log in",
                };
                if ui.link(toggle_label).clicked() {
                    controller.toggle_auth_mode();
                }
            }
        });
}
