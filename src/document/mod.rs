//! Configuration document model
//!
//! A document is a plain JSON object. Sections are created on demand so
//! that every editor widget can read and write without precondition checks.

pub mod codec;
pub mod export;
pub mod merge;
pub mod normalize;
pub mod templates;

use serde_json::{Map, Value, json};

use crate::catalog::ModuleCategory;

/// Nested string-keyed JSON mapping (insertion order preserved)
pub type ConfigMap = Map<String, Value>;

/// A top-level module entry (`{"name": ..., "args": {...}}`) the editor knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSlot {
    pub key: &'static str,
    pub label: &'static str,
    pub default_name: &'static str,
    pub category: ModuleCategory,
}

pub const SOURCE_ARTIFACT_PROVIDER: ModuleSlot = ModuleSlot {
    key: "source_artifact_provider",
    label: "Source provider",
    default_name: "text",
    category: ModuleCategory::ArtifactProvider,
};
pub const TARGET_ARTIFACT_PROVIDER: ModuleSlot = ModuleSlot {
    key: "target_artifact_provider",
    label: "Target provider",
    default_name: "text",
    category: ModuleCategory::ArtifactProvider,
};
pub const SOURCE_PREPROCESSOR: ModuleSlot = ModuleSlot {
    key: "source_preprocessor",
    label: "Source preprocessor",
    default_name: "artifact",
    category: ModuleCategory::Preprocessor,
};
pub const TARGET_PREPROCESSOR: ModuleSlot = ModuleSlot {
    key: "target_preprocessor",
    label: "Target preprocessor",
    default_name: "artifact",
    category: ModuleCategory::Preprocessor,
};
pub const EMBEDDING_CREATOR: ModuleSlot = ModuleSlot {
    key: "embedding_creator",
    label: "Embedding creator",
    default_name: "openai",
    category: ModuleCategory::EmbeddingCreator,
};
pub const SOURCE_STORE: ModuleSlot = ModuleSlot {
    key: "source_store",
    label: "Source store",
    default_name: "custom",
    category: ModuleCategory::SourceStore,
};
pub const TARGET_STORE: ModuleSlot = ModuleSlot {
    key: "target_store",
    label: "Target store",
    default_name: "cosine_similarity",
    category: ModuleCategory::TargetStore,
};
pub const CLASSIFIER: ModuleSlot = ModuleSlot {
    key: "classifier",
    label: "Classifier",
    default_name: "reasoning_openai",
    category: ModuleCategory::ClassifierMode,
};
pub const RESULT_AGGREGATOR: ModuleSlot = ModuleSlot {
    key: "result_aggregator",
    label: "Result aggregator",
    default_name: "any_connection",
    category: ModuleCategory::ResultAggregator,
};
pub const TRACELINK_POSTPROCESSOR: ModuleSlot = ModuleSlot {
    key: "tracelinkid_postprocessor",
    label: "Trace link post-processor",
    default_name: "identity",
    category: ModuleCategory::Postprocessor,
};

/// Every module slot, in the order the editor shows them
pub const MODULE_SLOTS: [ModuleSlot; 10] = [
    SOURCE_ARTIFACT_PROVIDER,
    TARGET_ARTIFACT_PROVIDER,
    SOURCE_PREPROCESSOR,
    TARGET_PREPROCESSOR,
    EMBEDDING_CREATOR,
    SOURCE_STORE,
    TARGET_STORE,
    CLASSIFIER,
    RESULT_AGGREGATOR,
    TRACELINK_POSTPROCESSOR,
];

/// Key of the opaque multi-stage classifier pipeline
pub const CLASSIFIERS_KEY: &str = "classifiers";
pub const CACHE_DIR_KEY: &str = "cache_dir";
pub const GOLD_STANDARD_KEY: &str = "gold_standard_configuration";

/// Walk `path`, creating (or overwriting non-object) intermediates, and install
/// a copy of `default` at the terminal key if it is absent.
///
/// Returns `None` only for an empty path.
pub fn ensure_section<'a>(config: &'a mut ConfigMap, path: &[&str], default: &Value) -> Option<&'a mut Value> {
    let (leaf, parents) = path.split_last()?;
    let mut node = config;
    for key in parents {
        let entry = node
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        node = object_or_reset(entry);
    }
    Some(
        node.entry(leaf.to_string())
            .or_insert_with(|| default.clone()),
    )
}

/// Guarantee `config[slot.key]` is a well-formed module entry and return it
pub fn ensure_module<'a>(config: &'a mut ConfigMap, slot: &ModuleSlot) -> &'a mut ConfigMap {
    let entry = config
        .entry(slot.key.to_string())
        .or_insert_with(|| module_entry(slot.default_name));
    if !entry.is_object() {
        *entry = module_entry(slot.default_name);
    }
    let module = object_or_reset(entry);

    let name = module
        .entry("name".to_string())
        .or_insert_with(|| Value::String(String::new()));
    if !name.is_string() {
        *name = Value::String(String::new());
    }
    let args = module
        .entry("args".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !args.is_object() {
        *args = Value::Object(Map::new());
    }
    module
}

/// Make every editable section present before display.
///
/// The single `classifier` slot is skipped when a multi-stage `classifiers`
/// list is present; that pipeline is passed through untouched.
pub fn ensure_sections(config: &mut ConfigMap) {
    ensure_section(config, &[CACHE_DIR_KEY], &Value::String(String::new()));
    ensure_section(
        config,
        &[GOLD_STANDARD_KEY],
        &json!({ "path": "", "hasHeader": "false" }),
    );
    let multi_stage = has_classifier_pipeline(config);
    for slot in MODULE_SLOTS.iter() {
        if multi_stage && slot.key == CLASSIFIER.key {
            continue;
        }
        ensure_module(config, slot);
    }
}

/// True when the document uses the multi-stage `classifiers` list
pub fn has_classifier_pipeline(config: &ConfigMap) -> bool {
    matches!(config.get(CLASSIFIERS_KEY), Some(Value::Array(_)))
}

pub fn module_entry(name: &str) -> Value {
    json!({ "name": name, "args": {} })
}

/// Name of a module entry, empty when absent
pub fn module_name(module: &ConfigMap) -> &str {
    module.get("name").and_then(Value::as_str).unwrap_or("")
}

/// Args of a module entry; `ensure_module` guarantees the object exists
pub fn module_args_mut(module: &mut ConfigMap) -> &mut ConfigMap {
    let args = module
        .entry("args".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    object_or_reset(args)
}

/// Borrow `value` as an object, replacing any other kind with `{}` first
pub(crate) fn object_or_reset(value: &mut Value) -> &mut ConfigMap {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_map(value: Value) -> ConfigMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_ensure_section_creates_missing_path() {
        let mut config = ConfigMap::new();
        let leaf = ensure_section(&mut config, &["a", "b", "c"], &json!(5)).unwrap();
        assert_eq!(*leaf, json!(5));
        assert_eq!(Value::Object(config), json!({ "a": { "b": { "c": 5 } } }));
    }

    #[test]
    fn test_ensure_section_overwrites_non_object_intermediate() {
        let mut config = as_map(json!({ "a": "scalar" }));
        ensure_section(&mut config, &["a", "b"], &json!([])).unwrap();
        assert_eq!(Value::Object(config), json!({ "a": { "b": [] } }));
    }

    #[test]
    fn test_ensure_section_keeps_existing_terminal() {
        let mut config = as_map(json!({ "a": { "b": "kept" } }));
        let leaf = ensure_section(&mut config, &["a", "b"], &json!({ "fresh": true })).unwrap();
        assert_eq!(*leaf, json!("kept"));
    }

    #[test]
    fn test_ensure_section_is_idempotent() {
        let mut config = as_map(json!({ "x": 1 }));
        ensure_section(&mut config, &["gold", "path"], &json!("")).unwrap();
        let after_first = config.clone();
        ensure_section(&mut config, &["gold", "path"], &json!("")).unwrap();
        assert_eq!(config, after_first);
    }

    #[test]
    fn test_ensure_section_default_is_copied() {
        let mut config = ConfigMap::new();
        let default = json!({ "name": "text", "args": {} });
        let leaf = ensure_section(&mut config, &["provider"], &default).unwrap();
        leaf["name"] = json!("changed");
        assert_eq!(default["name"], json!("text"));
    }

    #[test]
    fn test_ensure_section_empty_path() {
        let mut config = ConfigMap::new();
        assert!(ensure_section(&mut config, &[], &json!(1)).is_none());
    }

    #[test]
    fn test_ensure_module_synthesizes_default() {
        let mut config = ConfigMap::new();
        let module = ensure_module(&mut config, &EMBEDDING_CREATOR);
        assert_eq!(module_name(module), "openai");
        assert_eq!(config["embedding_creator"], json!({ "name": "openai", "args": {} }));
    }

    #[test]
    fn test_ensure_module_repairs_malformed_entry() {
        let mut config = as_map(json!({
            "classifier": "reasoning_openai",
            "result_aggregator": { "name": 3, "args": "none" }
        }));
        ensure_module(&mut config, &CLASSIFIER);
        ensure_module(&mut config, &RESULT_AGGREGATOR);
        assert_eq!(config["classifier"], json!({ "name": "reasoning_openai", "args": {} }));
        assert_eq!(config["result_aggregator"], json!({ "name": "", "args": {} }));
    }

    #[test]
    fn test_ensure_sections_skips_classifier_for_pipeline() {
        let mut config = as_map(json!({ "classifiers": [[{ "name": "simple_openai" }]] }));
        ensure_sections(&mut config);
        assert!(!config.contains_key("classifier"));
        assert_eq!(config["classifiers"], json!([[{ "name": "simple_openai" }]]));
        assert_eq!(config["gold_standard_configuration"]["hasHeader"], json!("false"));
        for slot in MODULE_SLOTS.iter().filter(|slot| slot.key != "classifier") {
            assert!(config[slot.key].is_object(), "{} missing", slot.key);
        }
    }
}
