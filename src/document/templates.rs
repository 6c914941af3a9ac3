//! Base templates and the initial document of a session

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tracing::{debug, warn};

use super::ConfigMap;
use crate::constants::paths::NO_TEMPLATES_LABEL;
use crate::error::{ConfigToolError, ToolResult};

/// Every `*.json` file in `dir`, keyed and ordered by file name
pub fn available_templates(dir: &Path) -> BTreeMap<String, PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir = %dir.display(), error = %err, "Template directory not readable");
            return BTreeMap::new();
        }
    };
    entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            Some((name, path))
        })
        .collect()
}

/// Label of the template a fresh session starts from
pub fn default_template_label(dir: &Path) -> String {
    available_templates(dir)
        .into_keys()
        .next()
        .unwrap_or_else(|| NO_TEMPLATES_LABEL.to_string())
}

/// Read a configuration file; the top level must be a JSON object
pub fn load_json(path: &Path) -> ToolResult<ConfigMap> {
    if !path.exists() {
        return Err(ConfigToolError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse configuration text; the top level must be a JSON object
pub fn parse_config(text: &str) -> ToolResult<ConfigMap> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigToolError::Validation(
            "configuration must be a JSON object".to_string(),
        )),
    }
}

/// First template in `dir`, or the built-in skeleton when there is none
pub fn initial_config(dir: &Path) -> ToolResult<ConfigMap> {
    match available_templates(dir).into_values().next() {
        Some(first) => load_json(&first),
        None => {
            warn!(dir = %dir.display(), "No templates found, using built-in skeleton");
            Ok(fallback_config())
        }
    }
}

/// Built-in skeleton that keeps the editor usable without templates
pub fn fallback_config() -> ConfigMap {
    let skeleton = json!({
        "cache_dir": "./cache/example",
        "gold_standard_configuration": {
            "path": "./datasets/example/answer.csv",
            "hasHeader": "false"
        },
        "source_artifact_provider": { "name": "text", "args": {} },
        "target_artifact_provider": { "name": "text", "args": {} },
        "source_preprocessor": { "name": "artifact", "args": {} },
        "target_preprocessor": { "name": "artifact", "args": {} },
        "embedding_creator": { "name": "openai", "args": { "model": "text-embedding-3-large" } },
        "source_store": { "name": "custom", "args": {} },
        "target_store": { "name": "cosine_similarity", "args": { "max_results": "20" } },
        "classifier": { "name": "reasoning_openai", "args": { "model": "gpt-4o-mini-2024-07-18" } },
        "result_aggregator": { "name": "any_connection", "args": {} },
        "tracelinkid_postprocessor": { "name": "identity", "args": {} }
    });
    match skeleton {
        Value::Object(map) => map,
        _ => ConfigMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_templates_sorted_json_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_req2code.json"), "{}").unwrap();
        fs::write(dir.path().join("a_doc2code.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let templates = available_templates(dir.path());
        let names: Vec<&str> = templates.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a_doc2code.json", "b_req2code.json"]);
        assert_eq!(default_template_label(dir.path()), "a_doc2code.json");
    }

    #[test]
    fn test_missing_template_dir_uses_skeleton() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("templates");
        assert!(available_templates(&missing).is_empty());
        assert_eq!(default_template_label(&missing), "<no templates found>");
        assert_eq!(initial_config(&missing).unwrap(), fallback_config());
    }

    #[test]
    fn test_initial_config_reads_first_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"{"cache_dir": "./cache/a"}"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"{"cache_dir": "./cache/b"}"#).unwrap();
        let config = initial_config(dir.path()).unwrap();
        assert_eq!(config["cache_dir"], json!("./cache/a"));
    }

    #[test]
    fn test_load_json_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = load_json(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, ConfigToolError::NotFound(_)));

        let list = dir.path().join("list.json");
        fs::write(&list, "[1, 2]").unwrap();
        assert!(matches!(load_json(&list).unwrap_err(), ConfigToolError::Validation(_)));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{").unwrap();
        assert!(matches!(load_json(&broken).unwrap_err(), ConfigToolError::Decode(_)));
    }

    #[test]
    fn test_fallback_has_every_module_slot() {
        let config = fallback_config();
        for slot in crate::document::MODULE_SLOTS.iter() {
            assert!(config.contains_key(slot.key), "{} missing", slot.key);
        }
    }
}
