//! Key/value table for a module's arguments

use eframe::egui;

use crate::args_table::{ArgsTable, RowField};
use crate::gui::constants::*;

/// Renders the args table and returns true if any row changed
pub fn ui(ui: &mut egui::Ui, id_salt: &str, label: &str, table: &mut ArgsTable) -> bool {
    let mut changed = false;
    let mut remove = None;

    ui.label(egui::RichText::new(label).italics());

    if table.is_empty() {
        ui.weak("No arguments");
    } else {
        egui::Grid::new(format!("{id_salt}_args"))
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Parameter");
                ui.label("Value");
                ui.end_row();

                let rows: Vec<(u64, String, String)> = table
                    .rows()
                    .iter()
                    .map(|row| (row.id, row.parameter.clone(), row.value.clone()))
                    .collect();
                for (id, mut parameter, mut value) in rows {
                    let name_edit = egui::TextEdit::singleline(&mut parameter)
                        .id_salt((id_salt, id, "parameter"))
                        .hint_text("name")
                        .desired_width(ARG_NAME_WIDTH);
                    if ui.add(name_edit).changed() {
                        table.edit(id, RowField::Parameter, &parameter);
                        changed = true;
                    }

                    let value_edit = egui::TextEdit::singleline(&mut value)
                        .id_salt((id_salt, id, "value"))
                        .desired_width(ARG_VALUE_WIDTH);
                    if ui
                        .add(value_edit)
                        .on_hover_text("JSON objects and lists are parsed; everything else stays text")
                        .changed()
                    {
                        table.edit(id, RowField::Value, &value);
                        changed = true;
                    }

                    if ui.small_button("🗑").on_hover_text("Remove argument").clicked() {
                        remove = Some(id);
                    }
                    ui.end_row();
                }
            });
    }

    if let Some(id) = remove {
        table.remove_row(id);
        changed = true;
    }

    if ui.button("➕ Add argument").clicked() {
        table.add_row();
        changed = true;
    }

    changed
}
