//! One editing session: the live document and everything tied to its lifetime

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ToolSettings;
use crate::document::export::{self, download_filename, save_config_to_disk, to_pretty_json};
use crate::document::merge::apply_override_text;
use crate::document::normalize::normalize_store_config;
use crate::document::templates::{self, available_templates, default_template_label};
use crate::document::{ConfigMap, ensure_sections};
use crate::error::{ConfigToolError, ToolResult};

pub struct EditorSession {
    settings: ToolSettings,
    config: ConfigMap,
    template_name: String,
    /// Stamp of the last wholesale replacement; row and picker state rebuilds on change
    reload_generation: u64,
    /// Sections rewritten by overrides since the last replacement, with their stamp
    touched_sections: HashMap<String, u64>,
    /// Monotonic source for both kinds of stamp
    stamp: u64,
    pub override_text: String,
    pub output_path: String,
    notes: Vec<String>,
}

impl EditorSession {
    /// Start from the first template, or the built-in skeleton
    pub fn new(settings: ToolSettings) -> Self {
        let config = templates::initial_config(&settings.templates_dir).unwrap_or_else(|err| {
            warn!(error = %err, "Could not read default template, using built-in skeleton");
            templates::fallback_config()
        });
        let mut session = Self {
            template_name: default_template_label(&settings.templates_dir),
            output_path: settings.default_output_path.clone(),
            settings,
            config: ConfigMap::new(),
            reload_generation: 0,
            touched_sections: HashMap::new(),
            stamp: 0,
            override_text: String::new(),
            notes: Vec::new(),
        };
        session.replace(config);
        session
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigMap {
        &mut self.config
    }

    pub fn generation(&self) -> u64 {
        self.reload_generation
    }

    /// Generation for the editor state of one top-level section.
    ///
    /// Equals [`Self::generation`] unless an override rewrote the section since
    /// the last replacement; other sections keep their in-progress rows.
    pub fn section_generation(&self, key: &str) -> u64 {
        self.touched_sections
            .get(key)
            .copied()
            .unwrap_or_else(|| self.generation())
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// Notes from the most recent normalization pass
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn template_names(&self) -> Vec<String> {
        available_templates(&self.settings.templates_dir)
            .into_keys()
            .collect()
    }

    pub fn load_template(&mut self, name: &str) -> ToolResult<()> {
        let templates = available_templates(&self.settings.templates_dir);
        let path = templates
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.settings.templates_dir.join(name));
        let config = templates::load_json(&path)?;
        self.replace(config);
        self.template_name = name.to_string();
        info!(template = %name, "Loaded template");
        Ok(())
    }

    pub fn import_file(&mut self, path: &Path) -> ToolResult<()> {
        let config = templates::load_json(path)?;
        self.replace(config);
        info!(path = %path.display(), "Imported configuration");
        Ok(())
    }

    pub fn import_text(&mut self, text: &str) -> ToolResult<()> {
        let config = templates::parse_config(text)?;
        self.replace(config);
        info!("Imported configuration from text");
        Ok(())
    }

    pub fn reset(&mut self) -> ToolResult<()> {
        let config = templates::initial_config(&self.settings.templates_dir)?;
        self.replace(config);
        self.template_name = default_template_label(&self.settings.templates_dir);
        info!(template = %self.template_name, "Reset configuration to defaults");
        Ok(())
    }

    /// Merge the current override text; the document is untouched on error.
    ///
    /// This is an in-place edit: only sections whose value changed get a new
    /// section generation.
    pub fn apply_overrides(&mut self) -> ToolResult<()> {
        let mut merged = self.config.clone();
        apply_override_text(&mut merged, &self.override_text)?;
        ensure_sections(&mut merged);
        let notes = normalize_store_config(&mut merged);

        self.stamp += 1;
        let mut touched = Vec::new();
        for (key, value) in &merged {
            if self.config.get(key) != Some(value) {
                self.touched_sections.insert(key.clone(), self.stamp);
                touched.push(key.as_str());
            }
        }
        info!(sections = ?touched, "Applied overrides");
        self.config = merged;
        self.notes = notes;
        Ok(())
    }

    /// Canonical JSON text of the live document
    pub fn preview(&self) -> String {
        to_pretty_json(&self.config)
    }

    pub fn download_filename(&self) -> String {
        download_filename(&self.output_path)
    }

    /// Write to the destination path; refused unless saving is enabled
    pub fn save(&self) -> ToolResult<PathBuf> {
        self.save_to(&self.output_path)
    }

    /// Write to `destination`, under the same gate as [`Self::save`]
    pub fn save_to(&self, destination: &str) -> ToolResult<PathBuf> {
        if !self.settings.save_enabled {
            return Err(ConfigToolError::Validation(
                "saving to disk is disabled".to_string(),
            ));
        }
        save_config_to_disk(&self.settings.app_root, &self.config, destination)
    }

    /// Write a copy named after the destination into `dir`; not gated by the save flag
    pub fn download(&self, dir: &Path) -> ToolResult<PathBuf> {
        let path = dir.join(self.download_filename());
        export::write_text(&path, &self.preview())?;
        info!(path = %path.display(), "Downloaded configuration");
        Ok(path)
    }

    /// Path shown to the user, relative to the application root when possible
    pub fn display_path(&self, path: &Path) -> String {
        export::display_path(&self.settings.app_root, path)
    }

    fn replace(&mut self, mut config: ConfigMap) {
        ensure_sections(&mut config);
        self.notes = normalize_store_config(&mut config);
        self.config = config;
        self.stamp += 1;
        self.reload_generation = self.stamp;
        self.touched_sections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args_table::{ArgsTable, RowField};
    use crate::document::TARGET_STORE;
    use serde_json::{Value, json};
    use std::fs;

    fn module_args<'a>(session: &'a EditorSession, key: &str) -> &'a ConfigMap {
        session.config()[key]["args"].as_object().unwrap()
    }

    fn settings(root: &Path, save_enabled: bool) -> ToolSettings {
        ToolSettings {
            app_root: root.to_path_buf(),
            catalog_path: root.join("module_catalog.json"),
            templates_dir: root.join("templates"),
            save_enabled,
            default_output_path: "output/config.json".to_string(),
        }
    }

    fn write_template(root: &Path, name: &str, value: Value) {
        let dir = root.join("templates");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), value.to_string()).unwrap();
    }

    #[test]
    fn test_new_session_starts_from_first_template() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "b.json", json!({ "cache_dir": "./cache/b" }));
        write_template(dir.path(), "a.json", json!({ "cache_dir": "./cache/a" }));

        let session = EditorSession::new(settings(dir.path(), false));
        assert_eq!(session.template_name(), "a.json");
        assert_eq!(session.config()["cache_dir"], json!("./cache/a"));
        assert_eq!(session.config()["source_store"], json!({ "name": "custom", "args": {} }));
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_new_session_without_templates_uses_skeleton() {
        let dir = tempfile::tempdir().unwrap();
        let session = EditorSession::new(settings(dir.path(), false));
        assert_eq!(session.template_name(), "<no templates found>");
        assert_eq!(session.config()["classifier"]["name"], json!("reasoning_openai"));
        assert!(session.notes().is_empty());
    }

    #[test]
    fn test_import_text_normalizes_and_bumps_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new(settings(dir.path(), false));
        let before = session.generation();

        session
            .import_text(r#"{"source_store": {"name": "weird", "args": {"k": "v"}}}"#)
            .unwrap();
        assert_eq!(session.generation(), before + 1);
        assert_eq!(session.notes().len(), 2);
        assert_eq!(session.config()["source_store"], json!({ "name": "custom", "args": {} }));
    }

    #[test]
    fn test_failed_import_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new(settings(dir.path(), false));
        let snapshot = session.config().clone();
        let generation = session.generation();

        assert!(matches!(session.import_text("{ nope").unwrap_err(), ConfigToolError::Decode(_)));
        assert!(matches!(session.import_text("[]").unwrap_err(), ConfigToolError::Validation(_)));
        assert!(matches!(
            session.import_file(&dir.path().join("missing.json")).unwrap_err(),
            ConfigToolError::NotFound(_)
        ));
        assert_eq!(session.config(), &snapshot);
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn test_load_template_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "a.json", json!({ "cache_dir": "./cache/a" }));
        write_template(dir.path(), "req2req.json", json!({ "cache_dir": "./cache/r" }));
        let mut session = EditorSession::new(settings(dir.path(), false));

        session.load_template("req2req.json").unwrap();
        assert_eq!(session.template_name(), "req2req.json");
        assert_eq!(session.config()["cache_dir"], json!("./cache/r"));
        assert_eq!(session.template_names(), vec!["a.json", "req2req.json"]);

        assert!(session.load_template("missing.json").is_err());
        assert_eq!(session.template_name(), "req2req.json");
    }

    #[test]
    fn test_reset_returns_to_default_template() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "a.json", json!({ "cache_dir": "./cache/a" }));
        write_template(dir.path(), "b.json", json!({ "cache_dir": "./cache/b" }));
        let mut session = EditorSession::new(settings(dir.path(), false));
        session.load_template("b.json").unwrap();

        session.reset().unwrap();
        assert_eq!(session.template_name(), "a.json");
        assert_eq!(session.config()["cache_dir"], json!("./cache/a"));
    }

    #[test]
    fn test_apply_overrides_merges_and_renormalizes() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new(settings(dir.path(), false));
        let generation = session.generation();

        session.override_text = r#"{"target_store": {"name": "custom"}, "cache_dir": "./cache/x"}"#.to_string();
        session.apply_overrides().unwrap();
        assert_eq!(session.config()["target_store"]["name"], json!("cosine_similarity"));
        assert_eq!(session.config()["cache_dir"], json!("./cache/x"));
        assert_eq!(session.notes().len(), 1);
        assert_eq!(session.generation(), generation);
        assert_ne!(session.section_generation("target_store"), generation);
        assert_ne!(session.section_generation("cache_dir"), generation);
        assert_eq!(session.section_generation("embedding_creator"), generation);
    }

    #[test]
    fn test_unrelated_override_keeps_in_progress_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new(settings(dir.path(), false));
        session.override_text = r#"{"target_store": {"args": {"max_results": "5"}}}"#.to_string();
        session.apply_overrides().unwrap();

        let mut table = ArgsTable::new();
        let key = TARGET_STORE.key;
        assert!(table.sync(session.section_generation(key), module_args(&session, key)));
        let pending = table.add_row();
        table.edit(pending, RowField::Value, "only a value");
        assert_eq!(table.rows().len(), 2);

        session.override_text = r#"{"cache_dir": "./cache/other"}"#.to_string();
        session.apply_overrides().unwrap();
        assert!(!table.sync(session.section_generation(key), module_args(&session, key)));
        assert_eq!(table.rows().len(), 2);

        session.override_text = r#"{"target_store": {"args": {"max_results": "7"}}}"#.to_string();
        session.apply_overrides().unwrap();
        assert!(table.sync(session.section_generation(key), module_args(&session, key)));
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0].value, "7");
    }

    #[test]
    fn test_reload_after_overrides_resets_every_section() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new(settings(dir.path(), false));
        session.override_text = r#"{"cache_dir": "./cache/other"}"#.to_string();
        session.apply_overrides().unwrap();
        let touched = session.section_generation("cache_dir");

        session.import_text(r#"{"cache_dir": "./cache/imported"}"#).unwrap();
        let reloaded = session.generation();
        assert!(reloaded > touched);
        assert_eq!(session.section_generation("cache_dir"), reloaded);
        assert_eq!(session.section_generation("target_store"), reloaded);
    }

    #[test]
    fn test_failed_overrides_leave_document_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new(settings(dir.path(), false));
        let snapshot = session.config().clone();

        session.override_text = "[1, 2]".to_string();
        assert!(matches!(session.apply_overrides().unwrap_err(), ConfigToolError::Validation(_)));
        session.override_text = "{\"cache_dir\": ".to_string();
        assert!(matches!(session.apply_overrides().unwrap_err(), ConfigToolError::Decode(_)));
        assert_eq!(session.config(), &snapshot);
    }

    #[test]
    fn test_save_is_refused_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let session = EditorSession::new(settings(dir.path(), false));
        let err = session.save().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: saving to disk is disabled");
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn test_save_to_explicit_destination_is_gated() {
        let dir = tempfile::tempdir().unwrap();
        let session = EditorSession::new(settings(dir.path(), false));
        let err = session.save_to("out/written.json").unwrap_err();
        assert!(matches!(err, ConfigToolError::Validation(_)));
        assert!(!dir.path().join("out/written.json").exists());

        let session = EditorSession::new(settings(dir.path(), true));
        let saved = session.save_to("out/written.json").unwrap();
        assert_eq!(saved, dir.path().join("out/written.json"));
    }

    #[test]
    fn test_save_writes_preview_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new(settings(dir.path(), true));
        session.output_path = "out/req2req.json".to_string();

        let saved = session.save().unwrap();
        assert_eq!(session.display_path(&saved), "out/req2req.json");
        assert_eq!(fs::read_to_string(saved).unwrap(), session.preview());
    }

    #[test]
    fn test_download_uses_destination_basename() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new(settings(dir.path(), false));
        session.output_path = "output/doc2code.json".to_string();

        let path = session.download(downloads.path()).unwrap();
        assert_eq!(path, downloads.path().join("doc2code.json"));
        let written: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["source_store"]["name"], json!("custom"));
    }
}
