//! Store normalization applied whenever a document is (re)loaded
//!
//! The pipeline only supports the plain `custom` source store, and older
//! configurations used `custom` as the name of the cosine target store.

use serde_json::{Map, Value};
use tracing::info;

use super::{ConfigMap, SOURCE_STORE, TARGET_STORE, module_entry};
use crate::constants::modules::{COSINE_SIMILARITY_STORE, CUSTOM_STORE};

/// Repair the store sections in place, returning one note per change
pub fn normalize_store_config(config: &mut ConfigMap) -> Vec<String> {
    let mut notes = Vec::new();

    match config.get_mut(TARGET_STORE.key) {
        Some(Value::Object(target)) => {
            if target.get("name").and_then(Value::as_str) == Some(CUSTOM_STORE) {
                target.insert("name".to_string(), Value::String(COSINE_SIMILARITY_STORE.to_string()));
                notes.push(format!(
                    "target store renamed from legacy '{CUSTOM_STORE}' to '{COSINE_SIMILARITY_STORE}'"
                ));
            }
            if !matches!(target.get("args"), Some(Value::Object(_))) {
                target.insert("args".to_string(), Value::Object(Map::new()));
            }
        }
        _ => {
            config.insert(TARGET_STORE.key.to_string(), module_entry(COSINE_SIMILARITY_STORE));
            notes.push(format!("target store set to {COSINE_SIMILARITY_STORE} (missing section)"));
        }
    }

    match config.get_mut(SOURCE_STORE.key) {
        Some(Value::Object(source)) => {
            if source.get("name").and_then(Value::as_str) != Some(CUSTOM_STORE) {
                source.insert("name".to_string(), Value::String(CUSTOM_STORE.to_string()));
                notes.push(format!("source store forced to '{CUSTOM_STORE}' (only supported option)"));
            }
            match source.get("args") {
                Some(Value::Object(args)) if args.is_empty() => {}
                None => {
                    source.insert("args".to_string(), Value::Object(Map::new()));
                }
                Some(_) => {
                    source.insert("args".to_string(), Value::Object(Map::new()));
                    notes.push("source store args cleared (the source store accepts no arguments)".to_string());
                }
            }
        }
        _ => {
            config.insert(SOURCE_STORE.key.to_string(), module_entry(CUSTOM_STORE));
            notes.push(format!("source store reset to required '{CUSTOM_STORE}' store"));
        }
    }

    if !notes.is_empty() {
        info!(notes = ?notes, "Store configuration normalized");
    }
    notes
}
