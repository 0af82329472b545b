use eframe::egui;

use crate::egui_app::controller::Controller;
use crate::egui_app::theme::colors;
use crate::egui_app::types::{AuthMode, View};

pub mod auth_view;
pub mod compose_view;
pub mod posts_view;

pub fn render_top_bar(ctx: &egui::Context, controller: &mut Controller) {
    let frame_style = egui::Frame::default().inner_margin(egui::Margin::symmetric(12, 8));

    egui::TopBottomPanel::top("top_panel")
        .frame(frame_style)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    colors::ACCENT,
                    egui::RichText::new("📝 Blogdesk").size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);

                    if controller.is_authenticated() {
                        if ui.button("Logout").clicked() {
                            controller.logout();
                        }
                        if ui.button("+ New Post").clicked() {
                            controller.open_compose();
                        }
                        if let Some(user) = controller.current_user() {
                            ui.colored_label(colors::TEXT_MUTED, format!("@{}", user.username));
                        }
                    } else {
                        if ui.button("Sign Up").clicked() {
                            controller.open_auth_modal(AuthMode::Signup);
                        }
                        if ui.button("Log In").clicked() {
                            controller.open_auth_modal(AuthMode::Login);
                        }
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, controller: &mut Controller) {
    egui::CentralPanel::default().show(ctx, |ui| match controller.view {
        View::List => posts_view::render_list(ui, controller),
        View::Detail => posts_view::render_detail(ui, controller),
    });
}

/// Modals overlay whichever main panel is active.
pub fn render_overlays(ctx: &egui::Context, controller: &mut Controller) {
    if controller.auth_modal.is_some() {
        auth_view::render(ctx, controller);
    }
    if controller.compose_open {
        compose_view::render(ctx, controller);
    }
    if controller.confirm_delete.is_some() {
        render_confirm_delete(ctx, controller);
    }
}

fn render_confirm_delete(ctx: &egui::Context, controller: &mut Controller) {
    let Some(id) = controller.confirm_delete else {
        return;
    };

    egui::Window::new("Delete post?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Are you sure you want to delete this post?");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    controller.confirm_delete = None;
                }
                let delete_button = egui::Button::new(
                    egui::RichText::new("Delete").color(egui::Color32::WHITE),
                )
                .fill(colors::DANGER);
                if ui.add(delete_button).clicked() {
                    controller.confirm_delete = None;
                    // The user just answered the dialog; the decision is
                    // handed to the controller as an already-made yes.
                    controller.delete_post(id, || true);
                }
            });
        });
}
