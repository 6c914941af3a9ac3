//! Cache directory and gold standard settings

use eframe::egui;
use serde_json::{Value, json};

use crate::document::codec::value_to_text;
use crate::document::{CACHE_DIR_KEY, ConfigMap, GOLD_STANDARD_KEY, ensure_section};
use crate::gui::constants::*;

const HEADER_OPTIONS: [&str; 2] = ["true", "false"];

/// Renders the general section and returns true if any value changed
pub fn ui(ui: &mut egui::Ui, config: &mut ConfigMap) -> bool {
    let mut changed = false;

    ui.group(|ui| {
        ui.label(egui::RichText::new("General").strong());
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label("Cache directory:");
            changed |= text_field(ui, config, &[CACHE_DIR_KEY]);
        });

        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label("Gold standard CSV:");
            changed |= text_field(ui, config, &[GOLD_STANDARD_KEY, "path"]);
        });

        ui.horizontal(|ui| {
            ui.label("Gold standard has header?");
            let Some(node) = ensure_section(config, &[GOLD_STANDARD_KEY, "hasHeader"], &json!("false")) else {
                return;
            };
            // Stored as the string "true"/"false", never a boolean
            let mut selected = if value_to_text(node).to_lowercase() == "true" { "true" } else { "false" };
            let before = selected;
            egui::ComboBox::from_id_salt("gold_has_header")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for option in HEADER_OPTIONS {
                        ui.selectable_value(&mut selected, option, option);
                    }
                });
            if *node != Value::String(selected.to_string()) {
                *node = Value::String(selected.to_string());
                changed |= selected != before;
            }
        });
    });

    changed
}

fn text_field(ui: &mut egui::Ui, config: &mut ConfigMap, path: &[&str]) -> bool {
    let Some(node) = ensure_section(config, path, &Value::String(String::new())) else {
        return false;
    };
    let mut text = value_to_text(node);
    let response = ui.add(egui::TextEdit::singleline(&mut text).desired_width(f32::INFINITY));
    if response.changed() {
        *node = Value::String(text);
        return true;
    }
    false
}
