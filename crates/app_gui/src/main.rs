mod app;
mod logging;

use app::UiApp;
use eframe::{NativeOptions, egui};
use freshify_core::{Config, ENDPOINT_ENV, Resolved};

pub(crate) const APP_VERSION: &str = env!("FRESHIFY_VERSION");
const BUILD_ENDPOINT: &str = env!("FRESHIFY_DEFAULT_ENDPOINT");

fn main() {
    let debug = std::env::args().skip(1).any(|a| a == "--debug");
    let config_path = Config::default_path();
    let Resolved { config, warnings } = Config::resolve(
        config_path.as_deref(),
        Some(BUILD_ENDPOINT),
        std::env::var(ENDPOINT_ENV).ok(),
    );
    logging::init(debug, &config.log_level);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    tracing::info!(
        version = APP_VERSION,
        endpoint = %config.endpoint,
        timeout_secs = config.request_timeout_secs,
        "Starting Freshify"
    );

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Freshify")
            .with_inner_size([760.0, 820.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    if let Err(e) = eframe::run_native(
        "Freshify",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            let app = UiApp::new(config, config_path)?;
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(app))
        }),
    ) {
        eprintln!("Freshify stopped with an error: {e}");
    }
}
