use eframe::egui;
use shared::domain::Rgba;

pub const TABLE_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(12, 13, 18);
pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(22, 24, 31);
pub const CARD_TEXT: Rgba = Rgba::rgb(236, 238, 244);
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(255, 120, 120);

/// Engine color with the card's current opacity folded into alpha.
pub fn color32(rgba: Rgba, opacity: f32) -> egui::Color32 {
    let alpha = (f32::from(rgba.a) * opacity.clamp(0.0, 1.0)).round() as u8;
    egui::Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, alpha)
}

pub fn table_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(egui::Color32::from_rgb(210, 213, 222));
    visuals.window_fill = PANEL_BACKGROUND;
    visuals.panel_fill = PANEL_BACKGROUND;
    visuals.extreme_bg_color = TABLE_BACKGROUND;
    visuals.selection.bg_fill = egui::Color32::from_rgb(0x3d, 0x8b, 0xff);
    visuals.widgets.active.bg_fill = egui::Color32::from_rgb(0x3d, 0x8b, 0xff);
    visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(0x3d, 0x8b, 0xff).gamma_multiply(0.85);
    visuals
}
