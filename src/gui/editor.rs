//! Editor window implemented with egui/eframe

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{info, warn};

use super::StatusMessage;
use super::components::classifier_picker::{self, ClassifierEditorState};
use super::components::module_picker::{self, ModuleEditorState};
use super::components::template_sidebar::{self, TemplateSidebarState};
use super::components::{export_panel, general_settings, overrides_panel};
use super::constants::*;
use crate::catalog::{self, Catalog};
use crate::config::ToolSettings;
use crate::constants::modules::CUSTOM_STORE;
use crate::document::{
    CLASSIFIER, EMBEDDING_CREATOR, ModuleSlot, RESULT_AGGREGATOR, SOURCE_ARTIFACT_PROVIDER, SOURCE_PREPROCESSOR,
    TARGET_ARTIFACT_PROVIDER, TARGET_PREPROCESSOR, TARGET_STORE, TRACELINK_POSTPROCESSOR, ensure_module,
};
use crate::session::EditorSession;

struct EditorApp {
    session: EditorSession,
    catalog: Option<&'static Catalog>,
    catalog_error: Option<String>,
    sidebar: TemplateSidebarState,
    modules: HashMap<&'static str, ModuleEditorState>,
    classifier: ClassifierEditorState,
    status_message: Option<StatusMessage>,
    /// Form edits made since the document was last (re)loaded
    edited: bool,
    seen_generation: u64,
}

impl EditorApp {
    fn new(_cc: &CreationContext<'_>, settings: ToolSettings) -> Self {
        info!("Initializing configuration editor");

        let (catalog, catalog_error) = match catalog::load_shared(&settings.catalog_path) {
            Ok(catalog) => (Some(catalog), None),
            Err(err) => {
                warn!(error = %err, "Module catalog unavailable, falling back to manual text inputs");
                (None, Some(err.to_string()))
            }
        };

        let session = EditorSession::new(settings);
        Self {
            seen_generation: session.generation(),
            edited: false,
            sidebar: TemplateSidebarState::new(&session),
            session,
            catalog,
            catalog_error,
            modules: HashMap::new(),
            classifier: ClassifierEditorState::new(),
            status_message: None,
        }
    }

    fn module_section(&mut self, ui: &mut egui::Ui, slot: ModuleSlot) {
        let generation = self.session.section_generation(slot.key);
        let module = ensure_module(self.session.config_mut(), &slot);
        let state = self.modules.entry(slot.key).or_default();
        self.edited |= module_picker::ui(ui, &slot, module, self.catalog, generation, state);
    }

    fn module_pair(&mut self, ui: &mut egui::Ui, left: ModuleSlot, right: ModuleSlot) {
        ui.columns(2, |columns| {
            self.module_section(&mut columns[0], left);
            self.module_section(&mut columns[1], right);
        });
    }

    fn import_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        for file in dropped {
            let result = match (&file.path, &file.bytes) {
                (Some(path), _) => self.session.import_file(path),
                (None, Some(bytes)) => match std::str::from_utf8(bytes) {
                    Ok(text) => self.session.import_text(text),
                    Err(err) => Err(crate::error::ConfigToolError::Decode(err.to_string())),
                },
                (None, None) => continue,
            };
            self.status_message = Some(match result {
                Ok(()) => StatusMessage::success(format!("Loaded {}", file.name)),
                Err(err) => {
                    warn!(file = %file.name, error = %err, "Could not import dropped file");
                    StatusMessage::error(format!("Invalid configuration: {err}"))
                }
            });
        }
    }

    fn section_heading(ui: &mut egui::Ui, title: &str) {
        ui.add_space(SECTION_SPACING);
        ui.separator();
        ui.heading(title);
        ui.add_space(ITEM_SPACING);
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.import_dropped_files(ctx);
        if self.session.generation() != self.seen_generation {
            self.seen_generation = self.session.generation();
            self.edited = false;
        }

        egui::SidePanel::left("templates")
            .default_width(SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                if let Some(message) = template_sidebar::ui(ui, &mut self.session, &mut self.sidebar) {
                    self.status_message = Some(message);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("LiSSA Configuration Tool");
                    if self.edited {
                        ui.colored_label(STATUS_WARNING, "● edited since last load");
                    }
                });
                ui.label("Interactive editor for doc2code, req2code, and req2req configuration files.");

                if let Some(err) = &self.catalog_error {
                    ui.colored_label(
                        STATUS_WARNING,
                        format!("Module catalog missing: {err}. Falling back to manual text inputs."),
                    );
                }
                if let Some(message) = &self.status_message {
                    ui.colored_label(message.color, &message.text);
                }
                if !self.session.notes().is_empty() {
                    ui.colored_label(STATUS_INFO, "Store configuration normalized:");
                    for note in self.session.notes() {
                        ui.label(format!("• {note}"));
                    }
                }

                Self::section_heading(ui, "1. General");
                self.edited |= general_settings::ui(ui, self.session.config_mut());

                Self::section_heading(ui, "2. Artifact providers");
                self.module_pair(ui, SOURCE_ARTIFACT_PROVIDER, TARGET_ARTIFACT_PROVIDER);

                Self::section_heading(ui, "3. Preprocessors");
                self.module_pair(ui, SOURCE_PREPROCESSOR, TARGET_PREPROCESSOR);

                Self::section_heading(ui, "4. Embeddings");
                self.module_section(ui, EMBEDDING_CREATOR);

                Self::section_heading(ui, "5. Stores");
                ui.columns(2, |columns| {
                    columns[0].group(|ui| {
                        ui.label(egui::RichText::new("Source store").strong());
                        ui.label(format!("Fixed to `{CUSTOM_STORE}`, the plain element store; nothing to configure."));
                    });
                    self.module_section(&mut columns[1], TARGET_STORE);
                });

                Self::section_heading(ui, "6. Classifier & aggregation");
                let generation = self.session.section_generation(CLASSIFIER.key);
                self.edited |=
                    classifier_picker::ui(ui, self.session.config_mut(), self.catalog, generation, &mut self.classifier);
                ui.add_space(ITEM_SPACING);
                self.module_pair(ui, RESULT_AGGREGATOR, TRACELINK_POSTPROCESSOR);

                Self::section_heading(ui, "7. Raw JSON overrides");
                if let Some(message) = overrides_panel::ui(ui, &mut self.session) {
                    self.status_message = Some(message);
                }

                Self::section_heading(ui, "8. Preview & export");
                if let Some(message) = export_panel::ui(ui, &mut self.session) {
                    self.status_message = Some(message);
                }
                ui.add_space(SECTION_SPACING);
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Editor exiting");
    }
}

pub fn run_gui(settings: ToolSettings) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("LiSSA Configuration Tool")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "LiSSA Configuration Tool",
        options,
        Box::new(|cc| Ok(Box::new(EditorApp::new(cc, settings)))),
    )
    .map_err(|err| anyhow!("Failed to launch configuration editor: {err}"))
}
