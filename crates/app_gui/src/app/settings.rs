//! Settings panel rendering for the endpoint and request timeout.

use super::{Panel, UiApp};
use eframe::egui;
use freshify_core::config::validate_endpoint;
use freshify_core::{Config, HttpPredictor};
use std::sync::Arc;

impl UiApp {
    /// Renders the settings screen; changes apply to the next request.
    pub(super) fn render_settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Prediction endpoint");
            ui.add(
                egui::TextEdit::singleline(&mut self.endpoint_input)
                    .desired_width(ui.available_width()),
            );
        });
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.label("Request timeout");
            ui.add(
                egui::DragValue::new(&mut self.timeout_input)
                    .range(0..=600)
                    .speed(1)
                    .suffix(" s"),
            );
        });
        ui.label(
            egui::RichText::new("0 waits for the server indefinitely.")
                .small()
                .weak(),
        );

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                self.apply_settings();
            }
            if ui.button("Revert").clicked() {
                self.endpoint_input = self.config.endpoint.clone();
                self.timeout_input = self.config.request_timeout_secs;
            }
            if ui.button("Defaults").clicked() {
                let defaults = Config::default();
                self.endpoint_input = defaults.endpoint;
                self.timeout_input = defaults.request_timeout_secs;
            }
        });

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(6.0);
        ui.heading("About");
        ui.label(format!("App version: {}", crate::APP_VERSION));
        ui.label(format!("Endpoint in use: {}", self.config.endpoint));
        match &self.config_path {
            Some(path) => ui.label(format!("Config file: {}", path.display())),
            None => ui.label("No config directory available; settings last for this session."),
        };
    }

    fn apply_settings(&mut self) {
        let candidate = Config {
            endpoint: self.endpoint_input.trim().to_string(),
            request_timeout_secs: self.timeout_input,
            ..self.config.clone()
        };
        if let Err(e) = validate_endpoint(&candidate.endpoint) {
            self.status = format!("Settings not saved: {e}");
            return;
        }
        let predictor = match HttpPredictor::new(&candidate) {
            Ok(p) => p,
            Err(e) => {
                self.status = format!("Settings not saved: {e}");
                return;
            }
        };
        self.worker.set_predictor(Arc::new(predictor));
        self.config = candidate;
        tracing::info!(endpoint = %self.config.endpoint, "Settings applied");

        self.status = match &self.config_path {
            Some(path) => match self.config.save_to(path) {
                Ok(()) => "Settings saved".to_string(),
                Err(e) => {
                    tracing::warn!("Could not save settings: {e}");
                    format!("Settings applied but not saved: {e}")
                }
            },
            None => "Settings applied for this session".to_string(),
        };
        self.panel = Panel::Predict;
    }
}
