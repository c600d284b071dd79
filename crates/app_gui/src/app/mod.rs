//! eframe application: owns the session, the background worker and the
//! textures derived from the current selection.

mod result;
mod settings;
mod theme;
mod upload;

use anyhow::{Context, Result};
use eframe::{App, Frame, egui};
use freshify_core::{Config, HttpPredictor, ImageSource, Session, Worker};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Repaint interval while a read or request is outstanding.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Predict,
    Settings,
}

pub struct UiApp {
    session: Session,
    worker: Worker,
    config: Config,
    config_path: Option<PathBuf>,
    panel: Panel,
    status: String,
    preview_tex: Option<egui::TextureHandle>,
    /// Bytes the texture was built from, to notice a new selection.
    preview_source: Option<Arc<[u8]>>,
    endpoint_input: String,
    timeout_input: u64,
}

impl UiApp {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Result<Self> {
        let predictor = HttpPredictor::new(&config).context("could not build HTTP client")?;
        Ok(Self {
            session: Session::new(),
            worker: Worker::new(Arc::new(predictor)),
            endpoint_input: config.endpoint.clone(),
            timeout_input: config.request_timeout_secs,
            config,
            config_path,
            panel: Panel::Predict,
            status: String::new(),
            preview_tex: None,
            preview_source: None,
        })
    }

    fn start_selection(&mut self, source: ImageSource) {
        let ticket = self.session.begin_selection();
        self.status = format!("Loading {}...", source.display_name());
        self.worker.load_image(ticket, source);
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.first().cloned(),
            )
        });
        self.session.set_dragging(hovering);

        let Some(file) = dropped else {
            return;
        };
        let source = if let Some(path) = file.path {
            ImageSource::Path(path)
        } else if let Some(bytes) = file.bytes {
            ImageSource::Bytes {
                name: file.name,
                bytes,
            }
        } else {
            tracing::warn!("Dropped file {} carries neither a path nor bytes", file.name);
            return;
        };
        self.start_selection(source);
    }

    fn process_worker_events(&mut self, ctx: &egui::Context) {
        let was_loading = self.session.is_loading();
        let was_selecting = self.session.is_selecting();
        if self.worker.drain_into(&mut self.session) > 0 {
            if was_selecting && !self.session.is_selecting() {
                self.status = selection_status(&self.session);
            }
            if was_loading && !self.session.is_loading() {
                self.status = match self.session.prediction() {
                    Some(p) if self.session.modal_open() => format!("Prediction: {}", p.label),
                    _ => "Prediction failed".to_string(),
                };
            }
        }
        if self.worker.pending() > 0 {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }

    /// Keep the preview texture in step with the session's image.
    fn sync_preview_texture(&mut self, ctx: &egui::Context) {
        let Some(loaded) = self.session.image() else {
            self.preview_tex = None;
            self.preview_source = None;
            return;
        };
        let current = self
            .preview_source
            .as_ref()
            .is_some_and(|src| Arc::ptr_eq(src, &loaded.image.bytes));
        if current {
            return;
        }
        let size = [loaded.preview.width as usize, loaded.preview.height as usize];
        let color = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.preview.rgba);
        let name = format!("preview:{}", loaded.image.file_name);
        self.preview_tex = Some(ctx.load_texture(name, color, egui::TextureOptions::LINEAR));
        self.preview_source = Some(Arc::clone(&loaded.image.bytes));
    }
}

/// Status line after a read has been applied to the session.
fn selection_status(session: &Session) -> String {
    if session.last_selection_failed() {
        return match session.image() {
            Some(loaded) => format!(
                "Could not load image; keeping {}",
                loaded.image.file_name
            ),
            None => "Could not load image".to_string(),
        };
    }
    match session.image() {
        Some(loaded) => format!("Selected {}", loaded.image.file_name),
        None => String::new(),
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.process_worker_events(ctx);
        self.handle_dropped_files(ctx);
        self.sync_preview_texture(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("Freshify")
                        .strong()
                        .color(egui::Color32::from_rgb(0x4f, 0x46, 0xe5)),
                );
                ui.separator();
                ui.selectable_value(&mut self.panel, Panel::Predict, "Predict");
                ui.selectable_value(&mut self.panel, Panel::Settings, "Settings");
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.panel {
            Panel::Predict => self.render_predict_panel(ui),
            Panel::Settings => self.render_settings_panel(ui),
        });

        self.render_result_modal(ctx);
        self.render_alert(ctx);
    }
}
