//! Result modal and alert dialog.

use super::UiApp;
use super::theme;
use eframe::egui;
use freshify_core::Verdict;

const MODAL_WIDTH: f32 = 440.0;

impl UiApp {
    /// Shown after a successful prediction until the user closes it.
    pub(super) fn render_result_modal(&mut self, ctx: &egui::Context) {
        if !self.session.modal_open() {
            return;
        }
        let Some(prediction) = self.session.prediction().cloned() else {
            return;
        };
        let verdict = Verdict::classify(&prediction.label);
        let palette = verdict.theme();
        let mut close = false;
        let mut copy = false;

        let modal = egui::Modal::new(egui::Id::new("prediction-result")).show(ctx, |ui| {
            ui.set_width(MODAL_WIDTH);
            ui.vertical_centered(|ui| ui.heading("Prediction Result"));
            ui.separator();
            ui.add_space(8.0);

            theme::verdict_frame(palette).show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&prediction.label)
                            .size(22.0)
                            .strong()
                            .color(theme::color(palette.text)),
                    );
                    if let Some(advisory) = verdict.advisory() {
                        ui.add_space(6.0);
                        ui.label(egui::RichText::new(advisory).color(theme::color(palette.accent)));
                    }
                });
            });

            if let Some(tex) = &self.preview_tex {
                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    ui.add(
                        egui::Image::from_texture(egui::load::SizedTexture::from_handle(tex))
                            .max_height(320.0)
                            .maintain_aspect_ratio(true),
                    );
                });
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("Copy result").clicked() {
                    copy = true;
                }
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        });

        if copy {
            self.copy_to_clipboard(&prediction.label);
        }
        if close || modal.should_close() {
            self.session.close_modal();
        }
    }

    /// Blocking-style alert; the first pending message is shown until dismissed.
    pub(super) fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.session.alert().map(str::to_owned) else {
            return;
        };
        let mut dismiss = false;
        let modal = egui::Modal::new(egui::Id::new("alert")).show(ctx, |ui| {
            ui.set_width(340.0);
            ui.label(message);
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismiss = true;
                }
            });
        });
        if dismiss || modal.should_close() {
            self.session.take_alert();
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_owned())) {
            Ok(()) => self.status = "Result copied to clipboard".to_string(),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {e}");
                self.status = format!("Could not copy result: {e}");
            }
        }
    }
}
