//! Preview of the canonical JSON plus save, download and clipboard export

use eframe::egui;
use tracing::{error, warn};

use crate::constants::env::ENABLE_SAVE;
use crate::gui::StatusMessage;
use crate::gui::constants::*;
use crate::session::EditorSession;

pub fn ui(ui: &mut egui::Ui, session: &mut EditorSession) -> Option<StatusMessage> {
    let mut status = None;
    let preview = session.preview();

    ui.group(|ui| {
        ui.label(egui::RichText::new("Preview & export").strong());
        ui.add_space(ITEM_SPACING);

        egui::ScrollArea::vertical()
            .id_salt("preview")
            .max_height(PREVIEW_MAX_HEIGHT)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut preview.as_str())
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });

        ui.add_space(ITEM_SPACING);
        ui.horizontal(|ui| {
            ui.label("Destination path:");
            ui.text_edit_singleline(&mut session.output_path);
        });

        ui.add_space(ITEM_SPACING);
        ui.horizontal(|ui| {
            let save_enabled = session.settings().save_enabled;
            let save = ui.add_enabled(save_enabled, egui::Button::new("💾 Save to disk"));
            if save.clicked() {
                status = Some(match session.save() {
                    Ok(path) => StatusMessage::success(format!("Saved to {}", session.display_path(&path))),
                    Err(err) => {
                        error!(error = %err, "Failed to save configuration");
                        StatusMessage::error(format!("Failed to save file: {err}"))
                    }
                });
            }

            let download_label = format!("⬇ Download {}", session.download_filename());
            if ui.button(download_label).clicked() {
                status = Some(download(session));
            }

            if ui.button("📋 Copy JSON").clicked() {
                ui.ctx().copy_text(preview.clone());
                status = Some(StatusMessage::success("Configuration copied to clipboard"));
            }
        });

        if !session.settings().save_enabled {
            ui.weak(format!("Set {ENABLE_SAVE}=1 to enable saving to disk."));
        }
    });

    status
}

fn download(session: &EditorSession) -> StatusMessage {
    let (dir, fallback) = match dirs::download_dir() {
        Some(dir) => (dir, false),
        None => match dirs::home_dir() {
            Some(dir) => (dir, true),
            None => {
                warn!("No download directory available");
                return StatusMessage::error("No download directory available; use Copy JSON instead");
            }
        },
    };
    match session.download(&dir) {
        Ok(path) if fallback => {
            StatusMessage::warning(format!("No Downloads folder; saved to {}", path.display()))
        }
        Ok(path) => StatusMessage::success(format!("Downloaded to {}", path.display())),
        Err(err) => {
            error!(error = %err, "Failed to download configuration");
            StatusMessage::error(format!("Download failed: {err}"))
        }
    }
}
