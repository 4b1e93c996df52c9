use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

pub const OVERLAY_FILL: Color32 = Color32::from_rgba_premultiplied(245, 245, 248, 230);
pub const OVERLAY_BORDER: Color32 = Color32::from_rgb(200, 200, 206);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(30, 30, 34);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(110, 110, 118);

/// Light theme so the overlays sit naturally on the white plot background.
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let mut visuals = Visuals::light();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.window_fill = OVERLAY_FILL;
    visuals.window_stroke = Stroke::new(1.0, OVERLAY_BORDER);
    visuals.window_rounding = Rounding::same(6.0);
    visuals.panel_fill = OVERLAY_FILL;
    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.window_margin = egui::Margin::same(10.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
    ]
    .into();

    ctx.set_style(style);
}
