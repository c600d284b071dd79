use eframe::egui::{self, Color32, Stroke};
use freshify_core::{Rgb, Theme};

pub(super) const BRAND: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
pub(super) const MUTED: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
const ZONE_IDLE: Color32 = Color32::from_rgb(0xd1, 0xd5, 0xdb);
const ZONE_HOVER_FILL: Color32 = Color32::from_rgb(0xef, 0xf6, 0xff);

pub(super) fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Card behind the predicted label, tinted by verdict.
pub(super) fn verdict_frame(theme: Theme) -> egui::Frame {
    egui::Frame::new()
        .fill(color(theme.background))
        .stroke(Stroke::new(2.0, color(theme.border)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(20))
}

pub(super) fn drop_zone_frame(dragging: bool) -> egui::Frame {
    let (stroke, fill) = if dragging {
        (BRAND, ZONE_HOVER_FILL)
    } else {
        (ZONE_IDLE, Color32::TRANSPARENT)
    };
    egui::Frame::new()
        .fill(fill)
        .stroke(Stroke::new(2.0, stroke))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::same(32))
}
