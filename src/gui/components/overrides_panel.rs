//! Raw JSON overrides merged into the live document

use eframe::egui;
use tracing::warn;

use crate::gui::StatusMessage;
use crate::gui::constants::*;
use crate::session::EditorSession;

pub fn ui(ui: &mut egui::Ui, session: &mut EditorSession) -> Option<StatusMessage> {
    let mut status = None;

    ui.group(|ui| {
        ui.label(egui::RichText::new("Raw JSON overrides (optional)").strong());
        ui.label("Paste any JSON object to merge it into the current configuration.");
        ui.add_space(ITEM_SPACING);

        ui.add(
            egui::TextEdit::multiline(&mut session.override_text)
                .code_editor()
                .desired_rows(OVERRIDE_ROWS)
                .desired_width(f32::INFINITY)
                .hint_text(r#"{"target_store": {"args": {"max_results": "10"}}}"#),
        );

        ui.add_space(ITEM_SPACING);
        if ui.button("Apply overrides").clicked() {
            status = Some(if session.override_text.trim().is_empty() {
                StatusMessage::info("No overrides to apply")
            } else {
                match session.apply_overrides() {
                    Ok(()) => StatusMessage::success("Overrides applied"),
                    Err(err) => {
                        warn!(error = %err, "Could not apply overrides");
                        StatusMessage::error(format!("Could not apply overrides: {err}"))
                    }
                }
            });
        }
    });

    status
}
