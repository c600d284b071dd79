//! Drop zone, preview and the submit control.

use super::UiApp;
use super::theme;
use eframe::egui;
use freshify_core::{IMAGE_EXTENSIONS, ImageSource};
use rfd::FileDialog;

const PREVIEW_MAX_HEIGHT: f32 = 384.0;

impl UiApp {
    pub(super) fn render_predict_panel(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                self.render_drop_zone(ui);
                ui.add_space(16.0);
                self.render_preview(ui);
                self.render_submit(ui);
            });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        let dragging = self.session.dragging();
        let inner = theme::drop_zone_frame(dragging).show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("⬆").size(40.0).color(theme::MUTED));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 4.0;
                    ui.label(egui::RichText::new("Drop your image here, or").size(17.0));
                    ui.label(
                        egui::RichText::new("browse")
                            .size(17.0)
                            .color(theme::BRAND),
                    );
                });
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Supports: JPG, PNG, GIF, WebP, BMP")
                        .small()
                        .color(theme::MUTED),
                );
            });
        });
        let response = ui
            .interact(
                inner.response.rect,
                ui.id().with("drop-zone"),
                egui::Sense::click(),
            )
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            self.pick_file();
        }
    }

    fn pick_file(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.start_selection(ImageSource::Path(path));
        }
    }

    fn render_preview(&mut self, ui: &mut egui::Ui) {
        if self.session.is_selecting() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Reading image...");
            });
            ui.add_space(12.0);
        }
        let Some(tex) = &self.preview_tex else {
            return;
        };
        let mut remove = false;
        ui.vertical_centered(|ui| {
            ui.add(
                egui::Image::from_texture(egui::load::SizedTexture::from_handle(tex))
                    .max_height(PREVIEW_MAX_HEIGHT)
                    .max_width(ui.available_width())
                    .maintain_aspect_ratio(true),
            );
            if let Some(loaded) = self.session.image() {
                ui.label(
                    egui::RichText::new(format!(
                        "{} · {}×{}",
                        loaded.image.file_name, loaded.preview.width, loaded.preview.height
                    ))
                    .small()
                    .color(theme::MUTED),
                );
            }
            if ui.button("✕ Remove image").clicked() {
                remove = true;
            }
        });
        if remove {
            self.session.clear_image();
            self.status.clear();
        }
        ui.add_space(16.0);
    }

    fn render_submit(&mut self, ui: &mut egui::Ui) {
        let loading = self.session.is_loading();
        let label = if loading {
            "Processing..."
        } else {
            "Predict Freshness"
        };
        let button = egui::Button::new(egui::RichText::new(label).size(17.0).strong())
            .min_size(egui::vec2(ui.available_width(), 44.0));
        if ui.add_enabled(self.session.can_submit(), button).clicked() {
            self.submit();
        }

        if loading {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Waiting for {}", self.config.endpoint));
                if ui.button("Cancel").clicked() {
                    self.session.cancel_submit();
                    self.status = "Request cancelled".to_string();
                }
            });
        }
    }

    fn submit(&mut self) {
        match self.session.begin_submit() {
            Ok((ticket, image)) => {
                self.status = "Processing...".to_string();
                self.worker.predict(ticket, image);
            }
            Err(e) => tracing::debug!("Submit refused: {e}"),
        }
    }
}
