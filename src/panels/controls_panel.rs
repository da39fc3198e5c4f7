use crate::app::ConfiguratorApp;
use crate::design::{EmbroideryFont, EmbroideryTarget, Material, Region};
use crate::scene::parse_color;

fn color_to_hex(color: egui::Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

pub fn controls_panel(app: &mut ConfiguratorApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading("Glove design");
            ui.separator();

            region_section(app, ui);
            ui.separator();
            embroidery_section(app, ui);
            ui.separator();
            actions_section(app, ui);

            if let Some(message) = app.status.message() {
                ui.separator();
                ui.label(message);
            }
        });
}

fn region_section(app: &mut ConfiguratorApp, ui: &mut egui::Ui) {
    ui.label("Region");
    for region in Region::ALL {
        if ui
            .selectable_label(app.store.selected() == region, region.label())
            .clicked()
        {
            app.store.select_region(region);
        }
    }
    ui.separator();

    let selected = app.store.selected();
    let appearance = app.store.model().appearance(selected).clone();

    egui::ComboBox::from_label("Material")
        .selected_text(appearance.material.label())
        .show_ui(ui, |ui| {
            for material in Material::ALL {
                if ui
                    .selectable_label(appearance.material == material, material.label())
                    .clicked()
                {
                    app.store.set_region_material(selected, material);
                }
            }
        });

    ui.horizontal(|ui| {
        ui.label("Color:");
        let mut color = parse_color(&appearance.color);
        if egui::color_picker::color_edit_button_srgba(
            ui,
            &mut color,
            egui::color_picker::Alpha::Opaque,
        )
        .changed()
        {
            app.store.set_region_color(selected, color_to_hex(color));
        }

        let mut color_text = appearance.color.clone();
        if ui.text_edit_singleline(&mut color_text).changed() {
            // Color strings are opaque; whatever the user types is stored
            // verbatim and only parsed at bind time.
            app.store.set_region_color(selected, color_text);
        }
    });

    ui.horizontal(|ui| {
        ui.label("Pattern:");
        let mut pattern = appearance.pattern.clone();
        if ui.text_edit_singleline(&mut pattern).changed() {
            app.store.set_region_pattern(selected, pattern);
        }
    });
}

fn embroidery_section(app: &mut ConfiguratorApp, ui: &mut egui::Ui) {
    ui.label("Embroidery");
    for target in EmbroideryTarget::ALL {
        let is_set = app.store.model().embroidery_spec(target).is_some();

        egui::CollapsingHeader::new(target.label())
            .default_open(is_set)
            .show(ui, |ui| {
                let mut enabled = is_set;
                if ui.checkbox(&mut enabled, "Stitch text").changed() {
                    if enabled {
                        let draft = app.drafts.get(&target).cloned().unwrap_or_default();
                        app.store.set_embroidery(target, Some(draft));
                    } else {
                        app.store.set_embroidery(target, None);
                    }
                    return;
                }
                if !enabled {
                    return;
                }

                let Some(draft) = app.drafts.get_mut(&target) else {
                    return;
                };
                let mut changed = false;

                ui.horizontal(|ui| {
                    ui.label("Text:");
                    changed |= ui.text_edit_singleline(&mut draft.text).changed();
                });
                egui::ComboBox::from_id_salt(("embroidery_font", target.key()))
                    .selected_text(draft.font.key())
                    .show_ui(ui, |ui| {
                        for font in EmbroideryFont::ALL {
                            if ui.selectable_label(draft.font == font, font.key()).clicked() {
                                draft.font = font;
                                changed = true;
                            }
                        }
                    });
                changed |= ui
                    .add(egui::Slider::new(&mut draft.size, 12.0..=96.0).text("Size"))
                    .changed();
                ui.horizontal(|ui| {
                    ui.label("Thread color:");
                    let mut color = parse_color(&draft.color);
                    if egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut color,
                        egui::color_picker::Alpha::Opaque,
                    )
                    .changed()
                    {
                        draft.color = color_to_hex(color);
                        changed = true;
                    }
                });

                if changed {
                    let next = draft.clone();
                    app.store.set_embroidery(target, Some(next));
                }
                if ui.button("Clear").clicked() {
                    app.store.set_embroidery(target, None);
                }
            });
    }
}

fn actions_section(app: &mut ConfiguratorApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if ui.button("Reset").clicked() {
            app.store.reset_design();
            app.refresh_drafts();
            app.status.info("Design reset to defaults");
        }
        if ui.button("Save").clicked() {
            app.save_design();
        }
        if ui.button("Load").clicked() {
            app.load_design();
        }
    });
    ui.horizontal(|ui| {
        if ui.button("Export JSON").clicked() {
            app.export_design();
        }
        if ui.button("Thumbnail").clicked() {
            app.request_thumbnail(ui.ctx());
        }
    });
}
