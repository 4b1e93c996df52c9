use egui::{Align2, Color32, Context, FontId, RichText};
use glam::{Vec2, Vec3};

use crate::mesh::BoundingBox;
use crate::renderer::Camera;
use crate::ui::state::ViewerSettings;
use crate::ui::theme::*;

/// Text of the in-scene dimensions label.
pub fn label_text(bbox: &BoundingBox) -> String {
    format!("Min: {}\nMax: {}", bbox.min, bbox.max)
}

/// World position the label is centered on.
pub fn label_anchor(bbox: &BoundingBox) -> Vec3 {
    bbox.center()
}

/// Paints the dimensions label at the projected box center, lines centered
/// horizontally and the block centered vertically on the anchor.
pub fn draw_bbox_label(ctx: &Context, camera: &Camera, bbox: &BoundingBox, settings: &ViewerSettings) {
    let screen = ctx.screen_rect();
    let Some(anchor) = camera.project_to_screen(
        label_anchor(bbox),
        Vec2::new(screen.width(), screen.height()),
    ) else {
        return;
    };

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("bbox_label"),
    ));
    let font = FontId::proportional(settings.label_size);

    let galleys: Vec<_> = label_text(bbox)
        .lines()
        .map(|line| painter.layout_no_wrap(line.to_owned(), font.clone(), settings.label_color))
        .collect();

    let total_height: f32 = galleys.iter().map(|g| g.size().y).sum();
    let mut y = screen.min.y + anchor.y - total_height / 2.0;

    for galley in galleys {
        let size = galley.size();
        let pos = egui::pos2(screen.min.x + anchor.x - size.x / 2.0, y);
        painter.galley(pos, galley, settings.label_color);
        y += size.y;
    }
}

pub fn draw_info_panel(ctx: &Context, file_name: &str, triangle_count: usize, bbox: &BoundingBox) {
    egui::Area::new(egui::Id::new("info_panel"))
        .anchor(Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .show(ctx, |ui| {
            overlay_frame().show(ui, |ui| {
                ui.label(RichText::new(file_name).strong());
                ui.add_space(4.0);

                egui::Grid::new("bbox_grid")
                    .num_columns(2)
                    .spacing(egui::vec2(12.0, 2.0))
                    .show(ui, |ui| {
                        ui.label(RichText::new("Triangles").color(TEXT_MUTED));
                        ui.monospace(triangle_count.to_string());
                        ui.end_row();

                        ui.label(RichText::new("Min").color(TEXT_MUTED));
                        ui.monospace(bbox.min.to_string());
                        ui.end_row();

                        ui.label(RichText::new("Max").color(TEXT_MUTED));
                        ui.monospace(bbox.max.to_string());
                        ui.end_row();

                        ui.label(RichText::new("Size").color(TEXT_MUTED));
                        ui.monospace(bbox.size().to_string());
                        ui.end_row();
                    });
            });
        });
}

pub fn draw_help_overlay(ctx: &Context, distance: f32) {
    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            overlay_frame().show(ui, |ui| {
                ui.style_mut().override_font_id = Some(FontId::monospace(11.0));
                ui.label(RichText::new("Drag - Rotate | Scroll - Zoom | R - Reset | Esc - Quit").color(TEXT_MUTED));
                ui.label(RichText::new(format!("Distance: {distance:.3}")).color(TEXT_MUTED));
            });
        });
}

fn overlay_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(OVERLAY_FILL)
        .stroke(egui::Stroke::new(1.0, OVERLAY_BORDER))
        .rounding(6.0)
        .inner_margin(10.0)
        .shadow(egui::epaint::Shadow {
            offset: egui::vec2(0.0, 2.0),
            blur: 8.0,
            spread: 0.0,
            color: Color32::from_black_alpha(40),
        })
}
