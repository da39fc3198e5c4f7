use egui::{Color32, Pos2, Rect, Sense, Stroke};

use crate::app::ConfiguratorApp;
use crate::design::Region;

/// Flat projection of the glove used in place of the out-of-scope 3D scene:
/// one rounded rect per region, painted from the bound surface materials.
pub fn preview_panel(app: &mut ConfiguratorApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Preview");

        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, Sense::click());
        let bounds = response.rect;

        // Clicking a region selects it through the same store operation the
        // side panel uses.
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                // Later regions draw on top, so hit-test them first.
                for region in Region::ALL.into_iter().rev() {
                    if region_rect(region, bounds).contains(pos) {
                        app.store.select_region(region);
                        break;
                    }
                }
            }
        }

        for region in Region::ALL {
            let Some(material) = app.scene.material(region) else {
                // Surface not installed yet; nothing to draw.
                continue;
            };
            let rect = region_rect(region, bounds);

            painter.rect_filled(rect, 6.0, material.base_color);

            if let Some(texture) = &material.embroidery {
                let patch = fit_texture(rect, texture.aspect_ratio());
                painter.image(
                    texture.id(),
                    patch,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }

            let stroke = if app.store.selected() == region {
                Stroke::new(2.5, ui.visuals().selection.bg_fill)
            } else {
                Stroke::new(1.0, Color32::from_black_alpha(64))
            };
            painter.rect_stroke(rect, 6.0, stroke);
        }
    });
}

/// Normalized placement of each region within the preview bounds.
fn region_rect(region: Region, bounds: Rect) -> Rect {
    let (min, max) = match region {
        Region::Webbing => ((0.35, 0.02), (0.65, 0.14)),
        Region::Palm => ((0.05, 0.16), (0.44, 0.76)),
        Region::Backhand => ((0.56, 0.16), (0.95, 0.76)),
        Region::Thumb => ((0.45, 0.25), (0.55, 0.65)),
        Region::WristStrap => ((0.05, 0.80), (0.55, 0.95)),
        Region::Patch => ((0.62, 0.80), (0.95, 0.95)),
    };
    let at = |(x, y): (f32, f32)| {
        Pos2::new(
            bounds.min.x + bounds.width() * x,
            bounds.min.y + bounds.height() * y,
        )
    };
    Rect::from_min_max(at(min), at(max))
}

/// Largest centered sub-rect of `rect` matching the texture's aspect ratio,
/// slightly inset so the stitching never touches the seam.
fn fit_texture(rect: Rect, aspect: f32) -> Rect {
    let inner = rect.shrink(rect.width().min(rect.height()) * 0.1);
    let mut size = inner.size();
    if size.x / size.y > aspect {
        size.x = size.y * aspect;
    } else {
        size.y = size.x / aspect;
    }
    Rect::from_center_size(inner.center(), size)
}
