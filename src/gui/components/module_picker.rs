//! Module entry editor: name picker, catalog help and args table

use eframe::egui;
use serde_json::Value;

use crate::args_table::ArgsTable;
use crate::binding::{ModuleBinding, ModuleChoice};
use crate::catalog::help::module_help;
use crate::catalog::{Catalog, DescriptorMap, no_descriptors};
use crate::constants::modules::CUSTOM_OPTION;
use crate::document::{ConfigMap, ModuleSlot, module_args_mut, module_name};
use crate::gui::components::args_editor;
use crate::gui::constants::*;

/// Picker and row state for one module slot
pub struct ModuleEditorState {
    binding: ModuleBinding,
    args: ArgsTable,
}

impl ModuleEditorState {
    pub fn new() -> Self {
        Self {
            binding: ModuleBinding::from_name("", no_descriptors()),
            args: ArgsTable::new(),
        }
    }
}

impl Default for ModuleEditorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders one module entry and returns true if it changed
pub fn ui(
    ui: &mut egui::Ui,
    slot: &ModuleSlot,
    module: &mut ConfigMap,
    catalog: Option<&Catalog>,
    generation: u64,
    state: &mut ModuleEditorState,
) -> bool {
    let descriptors = catalog
        .map(|catalog| catalog.descriptors(slot.category))
        .unwrap_or(no_descriptors());
    state.binding.sync(generation, module_name(module), descriptors);
    state.args.sync(generation, module_args_mut(module));

    let mut changed = false;
    ui.group(|ui| {
        ui.label(egui::RichText::new(slot.label).strong());
        ui.add_space(ITEM_SPACING);

        changed |= name_picker(ui, slot.key, "Name", &mut state.binding, descriptors);
        let descriptor = state.binding.apply(module, descriptors);
        if let Some(text) = catalog.and_then(|catalog| module_help(catalog, descriptor, None)) {
            help_section(ui, slot.key, slot.label, &text);
        }

        ui.add_space(ITEM_SPACING);
        changed |= args_editor::ui(ui, slot.key, &format!("{} args", slot.label), &mut state.args);
        module.insert("args".to_string(), Value::Object(state.args.materialize()));
    });
    changed
}

/// Known-module combo box plus custom text, or plain text without a catalog
pub fn name_picker(
    ui: &mut egui::Ui,
    id_salt: &str,
    label: &str,
    binding: &mut ModuleBinding,
    descriptors: &DescriptorMap,
) -> bool {
    let mut changed = false;

    if descriptors.is_empty() {
        ui.horizontal(|ui| {
            ui.label(format!("{label}:"));
            changed |= ui.text_edit_singleline(binding.custom_name_mut()).changed();
        });
        return changed;
    }

    let mut choice = binding.choice().clone();
    let selected_text = match &choice {
        ModuleChoice::Custom => CUSTOM_OPTION.to_string(),
        ModuleChoice::Known(name) => name.clone(),
    };
    ui.horizontal(|ui| {
        ui.label(format!("{label}:"));
        egui::ComboBox::from_id_salt(format!("{id_salt}_name"))
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut choice, ModuleChoice::Custom, CUSTOM_OPTION);
                for name in ModuleBinding::options(descriptors) {
                    ui.selectable_value(&mut choice, ModuleChoice::Known(name.to_string()), name);
                }
            });
    });
    if &choice != binding.choice() {
        binding.select(choice);
        changed = true;
    }

    if matches!(binding.choice(), ModuleChoice::Custom) {
        ui.horizontal(|ui| {
            ui.label("Custom name:");
            changed |= ui.text_edit_singleline(binding.custom_name_mut()).changed();
        });
    }
    changed
}

/// Collapsible help text below a picker
pub fn help_section(ui: &mut egui::Ui, id_salt: &str, label: &str, text: &str) {
    egui::CollapsingHeader::new(format!("ℹ {label} help"))
        .id_salt(format!("{id_salt}_help"))
        .show(ui, |ui| {
            ui.label(text);
        });
}
