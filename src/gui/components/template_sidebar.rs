//! Sidebar: base templates, configuration import and reset

use eframe::egui;
use tracing::warn;

use crate::constants::paths::NO_TEMPLATES_LABEL;
use crate::document::export::resolve_destination;
use crate::gui::StatusMessage;
use crate::gui::constants::*;
use crate::session::EditorSession;

/// State for the sidebar UI
pub struct TemplateSidebarState {
    selected_template: String,
    import_path: String,
}

impl TemplateSidebarState {
    pub fn new(session: &EditorSession) -> Self {
        Self {
            selected_template: session.template_name().to_string(),
            import_path: String::new(),
        }
    }
}

pub fn ui(ui: &mut egui::Ui, session: &mut EditorSession, state: &mut TemplateSidebarState) -> Option<StatusMessage> {
    let mut status = None;
    let templates = session.template_names();

    ui.heading("Templates & imports");
    ui.add_space(SECTION_SPACING);

    ui.group(|ui| {
        ui.label(egui::RichText::new("Base template").strong());
        if templates.is_empty() {
            ui.colored_label(STATUS_WARNING, "No template files detected.");
            ui.weak(NO_TEMPLATES_LABEL);
            return;
        }
        if !templates.contains(&state.selected_template) {
            state.selected_template = templates[0].clone();
        }
        egui::ComboBox::from_id_salt("base_template")
            .selected_text(&state.selected_template)
            .width(SIDEBAR_WIDTH - 40.0)
            .show_ui(ui, |ui| {
                for name in &templates {
                    ui.selectable_value(&mut state.selected_template, name.clone(), name);
                }
            });
        ui.add_space(ITEM_SPACING);
        if ui.button("Load template").clicked() {
            status = Some(match session.load_template(&state.selected_template) {
                Ok(()) => StatusMessage::success(format!("Loaded {}", state.selected_template)),
                Err(err) => {
                    warn!(template = %state.selected_template, error = %err, "Could not load template");
                    StatusMessage::error(format!("Could not load template: {err}"))
                }
            });
        }
    });

    ui.add_space(ITEM_SPACING);

    ui.group(|ui| {
        ui.label(egui::RichText::new("Open JSON configuration").strong());
        ui.add(egui::TextEdit::singleline(&mut state.import_path).hint_text("path/to/config.json"));
        ui.horizontal(|ui| {
            let can_open = !state.import_path.trim().is_empty();
            if ui.add_enabled(can_open, egui::Button::new("📂 Open")).clicked() {
                let path = resolve_destination(&session.settings().app_root, &state.import_path);
                status = Some(match session.import_file(&path) {
                    Ok(()) => StatusMessage::success(format!("Loaded {}", session.display_path(&path))),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "Could not open configuration");
                        StatusMessage::error(format!("Could not open configuration: {err}"))
                    }
                });
            }
        });
        ui.weak("Or drop a .json file onto the window.");
    });

    ui.add_space(ITEM_SPACING);

    if ui.button("🔄 Reset to defaults").clicked() {
        status = Some(match session.reset() {
            Ok(()) => {
                state.selected_template = session.template_name().to_string();
                StatusMessage::success("Reset complete")
            }
            Err(err) => StatusMessage::error(format!("Reset failed: {err}")),
        });
    }

    ui.add_space(SECTION_SPACING);
    ui.separator();
    ui.add_space(SECTION_SPACING);

    ui.group(|ui| {
        ui.label(egui::RichText::new("Quick actions").strong());
        ui.label("• Use the forms to edit the structure.");
        ui.label("• Supply JSON in any args field to nest complex settings.");
        ui.label("• Download the JSON preview, or enable saving to disk.");
    });

    status
}
