//! Classifier editor: mode and platform pickers, or a read-only pipeline view

use std::collections::BTreeMap;

use eframe::egui;
use serde_json::Value;

use crate::args_table::ArgsTable;
use crate::binding::{ClassifierBinding, PlatformChoice};
use crate::catalog::help::{classifier_help, module_help};
use crate::catalog::{Catalog, DescriptorMap, ModuleCategory, PlatformDescriptor, no_descriptors};
use crate::constants::modules::{CUSTOM_OPTION, NO_PLATFORM_OPTION};
use crate::document::{
    CLASSIFIER, CLASSIFIERS_KEY, ConfigMap, ensure_module, has_classifier_pipeline, module_args_mut,
    module_name,
};
use crate::gui::components::{args_editor, module_picker};
use crate::gui::constants::*;

pub struct ClassifierEditorState {
    binding: ClassifierBinding,
    args: ArgsTable,
}

impl ClassifierEditorState {
    pub fn new() -> Self {
        Self {
            binding: ClassifierBinding::from_name("", no_descriptors(), &BTreeMap::new()),
            args: ArgsTable::new(),
        }
    }
}

impl Default for ClassifierEditorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the classifier section and returns true if the entry changed
pub fn ui(
    ui: &mut egui::Ui,
    config: &mut ConfigMap,
    catalog: Option<&Catalog>,
    generation: u64,
    state: &mut ClassifierEditorState,
) -> bool {
    if has_classifier_pipeline(config) {
        pipeline_view(ui, config);
        return false;
    }

    let empty_platforms = BTreeMap::new();
    let modes = catalog
        .map(|catalog| catalog.descriptors(ModuleCategory::ClassifierMode))
        .unwrap_or(no_descriptors());
    let platforms = catalog.map(Catalog::platforms).unwrap_or(&empty_platforms);

    let classifier = ensure_module(config, &CLASSIFIER);
    state.binding.sync(generation, module_name(classifier), modes, platforms);
    state.args.sync(generation, module_args_mut(classifier));

    let mut changed = false;
    ui.group(|ui| {
        ui.label(egui::RichText::new(CLASSIFIER.label).strong());
        ui.add_space(ITEM_SPACING);

        changed |= module_picker::name_picker(ui, "classifier_mode", "Mode", state.binding.mode_mut(), modes);
        changed |= platform_picker(ui, &mut state.binding, modes, platforms);

        let mode = state.binding.apply(classifier, modes);
        if let Some(catalog) = catalog {
            let platform_text = classifier_help(catalog, module_name(classifier));
            if let Some(text) = module_help(catalog, mode, platform_text.as_deref()) {
                module_picker::help_section(ui, CLASSIFIER.key, CLASSIFIER.label, &text);
            }
        }

        ui.add_space(ITEM_SPACING);
        changed |= args_editor::ui(ui, CLASSIFIER.key, "Classifier args", &mut state.args);
        classifier.insert("args".to_string(), Value::Object(state.args.materialize()));
    });
    changed
}

fn platform_picker(
    ui: &mut egui::Ui,
    binding: &mut ClassifierBinding,
    modes: &DescriptorMap,
    platforms: &BTreeMap<String, PlatformDescriptor>,
) -> bool {
    let mut changed = false;
    let disabled = binding.platform_disabled(modes);

    let mut choice = binding.platform_choice().clone();
    let selected_text = match &choice {
        PlatformChoice::None => NO_PLATFORM_OPTION.to_string(),
        PlatformChoice::Custom => CUSTOM_OPTION.to_string(),
        PlatformChoice::Known(key) => key.clone(),
    };

    ui.add_enabled_ui(!disabled, |ui| {
        ui.horizontal(|ui| {
            ui.label("Platform:");
            egui::ComboBox::from_id_salt("classifier_platform")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut choice, PlatformChoice::None, NO_PLATFORM_OPTION);
                    ui.selectable_value(&mut choice, PlatformChoice::Custom, CUSTOM_OPTION);
                    for key in platforms.keys() {
                        ui.selectable_value(&mut choice, PlatformChoice::Known(key.clone()), key);
                    }
                });
            if disabled {
                ui.weak("(mock takes no platform)");
            }
        });
    });
    if &choice != binding.platform_choice() {
        binding.select_platform(choice);
        changed = true;
    }
    if !disabled
        && let Some(model) = binding
            .platform_descriptor(modes, platforms)
            .and_then(|platform| platform.default_model.as_deref())
    {
        ui.weak(format!("Default model: {model}"));
    }

    if !disabled && matches!(binding.platform_choice(), PlatformChoice::Custom) {
        ui.horizontal(|ui| {
            ui.label("Custom platform:");
            changed |= ui.text_edit_singleline(binding.custom_platform_mut()).changed();
        });
    }
    changed
}

fn pipeline_view(ui: &mut egui::Ui, config: &ConfigMap) {
    ui.group(|ui| {
        ui.label(egui::RichText::new("Classifier pipeline").strong());
        ui.colored_label(
            STATUS_INFO,
            "Detected a multi-stage classifier pipeline. It is read-only here; \
             edit it through the raw JSON overrides or convert it to a single `classifier` entry.",
        );
        let pipeline = config.get(CLASSIFIERS_KEY).cloned().unwrap_or(Value::Null);
        let text = serde_json::to_string_pretty(&pipeline).unwrap_or_default();
        egui::ScrollArea::vertical()
            .id_salt("classifier_pipeline")
            .max_height(PREVIEW_MAX_HEIGHT)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut text.as_str())
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
    });
}
