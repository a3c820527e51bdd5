use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Color32, RichText, TextureHandle, Vec2};
use log::warn;

use neurovision_common::{
    annotate, pipeline, report, CommandDetector, Config, DetectionRecord, Outcome, ThemeKind,
    ThemeTable,
};

use crate::io::{color32, texture_from_image};
use crate::model::AppState;

const PANEL_SIZE: f32 = 400.0;

const HELP_TEXT: &str = "\
1. Click 'Upload MRI Scan' to select a brain MRI image
2. Click 'Detect Tumor' to analyze the image
3. View results in the right panel
4. Use 'Save Results' to save the detection image
5. Access previous scans in the History section

Tips:
- Use high-quality MRI scans for best results
- The system works with JPG, PNG, and DICOM formats
- Toggle between light/dark/high contrast themes";

pub struct NeuroVisionApp {
    state: AppState,
    config: Config,
    status: String,
    upload_title: String,
    detect_title: String,
    scan_rx: Option<Receiver<ScanMessage>>,
    upload_texture: Option<TextureHandle>,
    result_texture: Option<TextureHandle>,
    show_help: bool,
    warning: Option<String>,
}

enum ScanMessage {
    Done(Box<DetectionRecord>),
    Failed(String),
}

impl Default for NeuroVisionApp {
    fn default() -> Self {
        let config = Config::load().unwrap_or_else(|err| {
            warn!("config load failed, using defaults: {err}");
            Config::default()
        });
        Self {
            state: AppState::default(),
            config,
            status: "Ready".to_string(),
            upload_title: "Upload MRI Scan".to_string(),
            detect_title: "Detection Result".to_string(),
            scan_rx: None,
            upload_texture: None,
            result_texture: None,
            show_help: false,
            warning: None,
        }
    }
}

impl NeuroVisionApp {
    fn upload_image(&mut self, ctx: &egui::Context) {
        if self.state.busy {
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image Files", &["jpg", "jpeg", "png"])
            .add_filter("DICOM Files", &["dcm"])
            .pick_file()
        else {
            return;
        };

        self.state.image_path = Some(path);
        self.state.result_index = None;
        self.result_texture = None;
        self.detect_title = "Detection Result (Pending)".to_string();
        self.refresh_upload_texture(ctx);
    }

    fn refresh_upload_texture(&mut self, ctx: &egui::Context) {
        let Some(path) = self.state.image_path.clone() else {
            self.upload_texture = None;
            return;
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match annotate::load_display_image(&path) {
            Ok(img) => {
                let shown = annotate::apply_display_transform(&img, self.state.theme);
                self.upload_texture = Some(texture_from_image(ctx, "upload", &shown));
                self.upload_title = format!("Uploaded: {}", truncate(&name, 20));
                self.status = format!("Loaded: {name}");
            }
            Err(err) => {
                self.upload_texture = None;
                self.status = format!("Load failed: {err}");
            }
        }
    }

    fn run_detection(&mut self) {
        // A request while a run is in flight is a no-op.
        if self.state.busy {
            return;
        }
        let Some(path) = self.state.image_path.clone() else {
            self.warning = Some("Please upload an image first!".to_string());
            return;
        };
        if !self.state.begin_scan() {
            return;
        }

        self.detect_title = "Processing...".to_string();
        self.status = "Running detection...".to_string();

        let detector = CommandDetector::from_config(&self.config);
        let theme = self.state.theme;
        let (tx, rx) = mpsc::channel();
        self.scan_rx = Some(rx);

        thread::spawn(move || {
            let msg = match pipeline::run_scan(&detector, &path, theme.table()) {
                Ok(record) => ScanMessage::Done(Box::new(record)),
                Err(err) => ScanMessage::Failed(err.to_string()),
            };
            let _ = tx.send(msg);
        });
    }

    fn poll_messages(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.scan_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(ScanMessage::Done(record)) => {
                self.detect_title = match record.outcome {
                    Outcome::Positive => {
                        format!("Tumor Detected ({:.1}%)", record.confidence * 100.0)
                    }
                    Outcome::Negative => "No Tumor Detected".to_string(),
                };
                self.status = format!(
                    "Detection completed in {:.2}s - {}",
                    record.elapsed.as_secs_f64(),
                    match record.outcome {
                        Outcome::Positive => "Tumor found",
                        Outcome::Negative => "No tumor",
                    }
                );
                self.result_texture = Some(texture_from_image(ctx, "result", &record.image));
                self.state.ledger.append(*record);
                self.state.result_index = Some(self.state.ledger.len() - 1);
                self.state.finish_scan();
                self.scan_rx = None;
            }
            Ok(ScanMessage::Failed(message)) => {
                self.detect_title = "Detection Failed".to_string();
                self.status = format!("Error: {message}");
                self.state.finish_scan();
                self.scan_rx = None;
            }
            Err(_) => {}
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.state.theme = self.state.theme.next();
        self.apply_theme(ctx);

        // Re-upload displayed images with the new theme's transform.
        if self.state.image_path.is_some() {
            self.refresh_upload_texture(ctx);
        }
        if let Some(record) = self.state.result_index.and_then(|i| self.state.ledger.get(i)) {
            self.result_texture = Some(texture_from_image(ctx, "result", &record.image));
        }
    }

    pub fn apply_theme(&self, ctx: &egui::Context) {
        let table = self.state.theme.table();
        let mut visuals = if self.state.theme == ThemeKind::Light {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        visuals.panel_fill = color32(table.bg);
        visuals.window_fill = color32(table.card);
        visuals.window_stroke = egui::Stroke::new(1.0, color32(table.card_border));
        visuals.override_text_color = Some(color32(table.text_primary));
        visuals.hyperlink_color = color32(table.accent);
        visuals.widgets.hovered.weak_bg_fill = color32(table.button_primary.adjust(-20));
        ctx.set_visuals(visuals);
    }

    fn save_results(&mut self) {
        let Some(record) = self.state.result_index.and_then(|i| self.state.ledger.get(i)) else {
            self.warning = Some("Nothing to save. Please process an image first.".to_string());
            return;
        };
        match report::save_annotated(
            &self.config.results_dir,
            Path::new(&record.file_name),
            &record.image,
        ) {
            Ok(path) => self.status = format!("Results saved to {}", path.display()),
            Err(err) => self.warning = Some(format!("Failed to save results: {err}")),
        }
    }

    fn clear_images(&mut self) {
        if self.state.busy {
            return;
        }
        self.state.clear_image();
        self.upload_texture = None;
        self.result_texture = None;
        self.upload_title = "Upload MRI Scan".to_string();
        self.detect_title = "Detection Result".to_string();
        self.status = "Ready".to_string();
    }

    fn show_history_entry(&mut self, ctx: &egui::Context, index: usize) {
        let Some(record) = self.state.ledger.get(index) else {
            return;
        };
        self.result_texture = Some(texture_from_image(ctx, "result", &record.image));
        self.detect_title = format!(
            "Result: {} ({:.1}%)",
            record.outcome.as_str(),
            record.confidence * 100.0
        );
        self.status = format!("Showing history entry from {}", record.timestamp);
        self.state.result_index = Some(index);
    }

    fn image_panel(&self, ui: &mut egui::Ui, table: &ThemeTable, upload: bool) {
        let (title, texture) = if upload {
            (&self.upload_title, &self.upload_texture)
        } else {
            (&self.detect_title, &self.result_texture)
        };

        egui::Frame::none()
            .fill(color32(table.card))
            .stroke(egui::Stroke::new(1.0, color32(table.card_border)))
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(title)
                            .strong()
                            .size(16.0)
                            .color(color32(table.text_primary)),
                    );
                    ui.add_space(6.0);
                    let size = Vec2::splat(PANEL_SIZE);
                    match texture {
                        Some(tex) => {
                            ui.add(egui::Image::new(tex).fit_to_exact_size(size));
                        }
                        None => {
                            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                            ui.painter().rect_filled(rect, 8.0, color32(table.image_bg));
                        }
                    }
                });
            });
    }
}

impl eframe::App for NeuroVisionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.busy {
            ctx.request_repaint();
        }
        self.poll_messages(ctx);

        let table = self.state.theme.table();

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(color32(table.header))
                    .inner_margin(egui::Margin::symmetric(16.0, 10.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("NeuroVision AI")
                            .size(24.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        RichText::new("Advanced Brain Tumor Detection System")
                            .color(color32(table.text_secondary)),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Help").clicked() {
                            self.show_help = true;
                        }
                        let theme_button = egui::Button::new(
                            RichText::new(self.state.theme.label()).color(Color32::WHITE),
                        )
                        .fill(color32(table.accent));
                        if ui.add(theme_button).clicked() {
                            self.toggle_theme(ctx);
                        }
                        ui.label(
                            RichText::new(format!("Theme: {}", self.state.theme.label()))
                                .color(color32(table.accent)),
                        );
                    });
                });
            });

        egui::TopBottomPanel::bottom("status")
            .frame(
                egui::Frame::none()
                    .fill(color32(table.status_bar))
                    .inner_margin(egui::Margin::symmetric(16.0, 6.0)),
            )
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("Status: {}", self.status))
                        .size(11.0)
                        .color(color32(table.status_text)),
                );
            });

        egui::SidePanel::right("history")
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.heading("Scan History");
                ui.separator();

                let mut clicked = None;
                egui::ScrollArea::vertical()
                    .max_height(420.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        if self.state.ledger.is_empty() {
                            ui.label(
                                RichText::new("No scans yet.")
                                    .color(color32(table.text_secondary)),
                            );
                        }
                        for (index, record) in self.state.ledger.newest_first() {
                            let text = format!(
                                "{} - {} ({})",
                                record.timestamp,
                                truncate(&record.file_name, 15),
                                record.outcome.as_str()
                            );
                            let selected = self.state.result_index == Some(index);
                            if ui
                                .selectable_label(selected, RichText::new(text).size(10.0))
                                .clicked()
                            {
                                clicked = Some(index);
                            }
                        }
                    });
                if let Some(index) = clicked {
                    self.show_history_entry(ctx, index);
                }

                ui.separator();
                ui.heading("Detection Statistics");
                let stats = self.state.ledger.stats();
                ui.label(
                    RichText::new(format!("Positive: {}", stats.positive))
                        .color(color32(table.positive)),
                );
                ui.label(
                    RichText::new(format!("Negative: {}", stats.negative))
                        .color(color32(table.negative)),
                );
                ui.label(format!("Total Scans: {}", stats.total));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                self.image_panel(ui, table, true);
                ui.add_space(10.0);
                self.image_panel(ui, table, false);
            });
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                let busy = self.state.busy;
                let action = |text: &str, fill: Color32| {
                    egui::Button::new(RichText::new(text).strong().color(Color32::WHITE))
                        .fill(fill)
                        .min_size(Vec2::new(150.0, 36.0))
                };
                if ui
                    .add_enabled(!busy, action("Upload MRI Scan", color32(table.button_primary)))
                    .clicked()
                {
                    self.upload_image(ctx);
                }
                if ui
                    .add_enabled(!busy, action("Detect Tumor", color32(table.button_secondary)))
                    .clicked()
                {
                    self.run_detection();
                }
                if ui
                    .add_enabled(!busy, action("Clear", color32(table.warning)))
                    .clicked()
                {
                    self.clear_images();
                }
                if ui
                    .add_enabled(!busy, action("Save Results", color32(table.accent)))
                    .clicked()
                {
                    self.save_results();
                }
            });
        });

        if self.show_help {
            let mut open = self.show_help;
            egui::Window::new("Help & Instructions")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(HELP_TEXT);
                    ui.add_space(8.0);
                    ui.hyperlink_to(
                        "NeuroVision website",
                        "https://www.example.com/neurovision",
                    );
                });
            self.show_help = open;
        }

        if let Some(message) = self.warning.clone() {
            egui::Window::new("Warning")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.warning = None;
                    }
                });
        }
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let head: String = name.chars().take(max).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate_short_name_unchanged() {
        assert_eq!(truncate("scan.png", 15), "scan.png");
    }

    #[test]
    fn test_truncate_long_name() {
        assert_eq!(truncate("a_very_long_scan_name.png", 10), "a_very_lon...");
    }
}
