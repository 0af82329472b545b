use eframe::egui;

use crate::egui_app::controller::Controller;
use crate::egui_app::theme::colors;
use crate::shared::post::Post;

/// Row data cloned out of the repository up front, so the widgets below
/// are free to mutate the controller.
struct PostRow {
    id: i64,
    title: String,
    preview: String,
    byline: String,
    deletable: bool,
}

fn byline(post: &Post) -> String {
    format!(
        "By {} on {}",
        post.author_display(),
        post.created_at.format("%Y-%m-%d")
    )
}

fn preview_of(content: &str) -> String {
    const LIMIT: usize = 200;
    if content.chars().count() <= LIMIT {
        content.to_string()
    } else {
        let cut: String = content.chars().take(LIMIT).collect();
        format!("{cut}…")
    }
}

pub fn render_list(ui: &mut egui::Ui, controller: &mut Controller) {
    ui.heading("Recent Posts");
    ui.add_space(8.0);

    if let Some(error) = controller.list_error.clone() {
        ui.colored_label(colors::ERROR, error);
        ui.add_space(8.0);
    }

    if controller.fetch_pending() && controller.posts().is_empty() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading posts...");
        });
        return;
    }

    let rows: Vec<PostRow> = controller
        .posts()
        .iter()
        .map(|post| PostRow {
            id: post.id,
            title: post.title.clone(),
            preview: preview_of(&post.content),
            byline: byline(post),
            deletable: controller.can_delete(post),
        })
        .collect();

    if rows.is_empty() {
        ui.label("No posts available yet. Create your first post!");
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for row in rows {
            ui.group(|ui| {
                if ui
                    .link(egui::RichText::new(&row.title).size(18.0).strong())
                    .clicked()
                {
                    controller.select_post(row.id);
                }
                ui.label(&row.preview);
                ui.horizontal(|ui| {
                    ui.colored_label(colors::TEXT_MUTED, &row.byline);
                    if row.deletable {
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button("Delete").clicked() {
                                    controller.confirm_delete = Some(row.id);
                                }
                            },
                        );
                    }
                });
            });
            ui.add_space(8.0);
        }
    });
}

pub fn render_detail(ui: &mut egui::Ui, controller: &mut Controller) {
    if ui.button("← Back to posts").clicked() {
        controller.clear_selection();
        return;
    }
    ui.add_space(8.0);

    if let Some(error) = controller.list_error.clone() {
        ui.colored_label(colors::ERROR, error);
        ui.add_space(8.0);
    }

    let Some(post) = controller.selected_post().cloned() else {
        return;
    };
    let deletable = controller.can_delete(&post);

    ui.heading(&post.title);
    ui.colored_label(colors::TEXT_MUTED, byline(&post));
    ui.separator();
    ui.add_space(4.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.label(&post.content);
    });

    if deletable {
        ui.add_space(12.0);
        if controller.delete_pending() == Some(post.id) {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Deleting...");
            });
        } else if ui
            .button(egui::RichText::new("Delete post").color(colors::DANGER))
            .clicked()
        {
            controller.confirm_delete = Some(post.id);
        }
    }
}
