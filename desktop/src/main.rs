#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod io;
mod model;

use app::NeuroVisionApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_title("NeuroVision AI - Brain Tumor Detection System"),
        ..Default::default()
    };
    eframe::run_native(
        "NeuroVision AI",
        options,
        Box::new(|cc| {
            let app = NeuroVisionApp::default();
            app.apply_theme(&cc.egui_ctx);
            Box::new(app)
        }),
    )
}
