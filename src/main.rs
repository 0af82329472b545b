//! Native desktop app entry point.

use blogdesk::egui_app::{views, Config, Controller, SessionStore};
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blogdesk=info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Blogdesk",
        options,
        Box::new(|_cc| Ok(Box::new(BlogdeskApp::new()))),
    )
}

struct BlogdeskApp {
    controller: Controller,
}

impl BlogdeskApp {
    fn new() -> Self {
        let mut controller = Controller::new(Config::new(), SessionStore::open_default());
        controller.start();
        Self { controller }
    }
}

impl eframe::App for BlogdeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();

        views::render_top_bar(ctx, &mut self.controller);
        views::render_main_panel(ctx, &mut self.controller);
        views::render_overlays(ctx, &mut self.controller);

        // Worker results arrive between frames; keep polling.
        ctx.request_repaint();
    }
}
