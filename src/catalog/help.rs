//! Human-readable help built from catalog descriptors

use indexmap::IndexMap;
use serde_json::Value;

use super::{ArgSpec, Catalog, ModuleDescriptor};
use crate::binding::ClassifierName;
use crate::document::codec::value_to_text;

/// One bullet per argument, in declaration order
pub fn describe_args(catalog: &Catalog, args: &IndexMap<String, ArgSpec>) -> Vec<String> {
    args.iter()
        .map(|(key, meta)| {
            let required_part = if meta.required { " (required)" } else { "" };
            let default_part = meta
                .default
                .as_ref()
                .map(|default| format!(", default={}", value_to_text(default)))
                .unwrap_or_default();

            let values_part = match meta.values.as_ref() {
                Some(values) => match catalog.resolve_pointer(values) {
                    Some(resolved) => {
                        let preview = match resolved {
                            Value::Array(items) => items
                                .iter()
                                .map(value_to_text)
                                .collect::<Vec<_>>()
                                .join(", "),
                            other => value_to_text(other),
                        };
                        let source_hint = values
                            .as_str()
                            .filter(|text| text.starts_with('@'))
                            .map(|text| format!(" via {text}"))
                            .unwrap_or_default();
                        format!(", choices=[{preview}]{source_hint}")
                    }
                    None => String::new(),
                },
                None => String::new(),
            };

            format!(
                "- `{key}` [{}{required_part}{default_part}{values_part}]: {}",
                meta.kind(),
                meta.description
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

/// Full help text for a module; empty when the descriptor says nothing useful
pub fn module_help_text(catalog: &Catalog, descriptor: &ModuleDescriptor) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let Some(description) = descriptor.description.as_deref().filter(|text| !text.is_empty()) {
        sections.push(description.to_string());
    }
    if let Some(rule) = descriptor.naming_rule.as_deref().filter(|text| !text.is_empty()) {
        sections.push(format!("Naming rule: {rule}"));
    }
    if !descriptor.env.is_empty() {
        sections.push(format!("Environment variables: {}", descriptor.env.join(", ")));
    }
    if let Some(levels) = descriptor.granularity_levels.as_ref().filter(|levels| !levels.is_empty()) {
        let mut ordered: Vec<(&String, &Value)> = levels.iter().collect();
        ordered.sort_by(|(a, _), (b, _)| level_sort_key(a).cmp(&level_sort_key(b)));
        let lines: Vec<String> = ordered
            .into_iter()
            .map(|(level, text)| format!("- Level `{level}`: {}", value_to_text(text)))
            .collect();
        sections.push(format!("Granularity levels:\n{}", lines.join("\n")));
    }
    let arg_lines = describe_args(catalog, &descriptor.args);
    if !arg_lines.is_empty() {
        sections.push(format!("Arguments:\n{}", arg_lines.join("\n")));
    }

    sections.join("\n\n")
}

/// Help combining a module description with optional extra text
pub fn module_help(catalog: &Catalog, descriptor: Option<&ModuleDescriptor>, extra: Option<&str>) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(descriptor) = descriptor {
        let text = module_help_text(catalog, descriptor);
        if !text.is_empty() {
            parts.push(text);
        }
    }
    if let Some(extra) = extra.filter(|text| !text.is_empty()) {
        parts.push(extra.to_string());
    }
    (!parts.is_empty()).then(|| parts.join("\n\n"))
}

/// Platform summary for a composite classifier name such as `reasoning_openai`
pub fn classifier_help(catalog: &Catalog, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let parsed = ClassifierName::parse(name);
    if parsed.platform.is_empty() {
        return None;
    }
    let platform = catalog.platforms().get(&parsed.platform)?;

    let env_text = if platform.env.is_empty() {
        "No required env vars listed.".to_string()
    } else {
        platform.env.join(", ")
    };
    let threads = platform
        .threads
        .as_ref()
        .map(value_to_text)
        .unwrap_or_else(|| "?".to_string());
    Some(format!(
        "Platform {} -> default model {}, threads={}. Required env: {}.",
        parsed.platform,
        platform.default_model.as_deref().unwrap_or("n/a"),
        threads,
        env_text
    ))
}

/// Numeric levels first (in numeric order), then the rest alphabetically
fn level_sort_key(level: &str) -> (u8, u64, String) {
    match level.parse::<u64>() {
        Ok(number) => (0, number, String::new()),
        Err(_) => (1, 0, level.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::catalog::ModuleCategory;
    use serde_json::json;

    fn descriptor(raw: Value) -> ModuleDescriptor {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_describe_args_resolves_pointer_choices() {
        let catalog = sample_catalog();
        let text = &catalog.descriptors(ModuleCategory::ArtifactProvider)["text"];
        let lines = describe_args(&catalog, &text.args);

        assert_eq!(
            lines[0],
            "- `artifact_type` [string (required), choices=[requirement, source code, software architecture documentation] via @shared.artifact_types]: Kind of artifact"
        );
        assert_eq!(lines[1], "- `path` [path (required)]: Directory to read");
    }

    #[test]
    fn test_describe_args_defaults_and_literal_values() {
        let catalog = sample_catalog();
        let module = descriptor(json!({
            "name": "cosine_similarity",
            "args": {
                "max_results": { "default": "10" },
                "mode": { "values": ["fast", "exact"], "description": "" }
            }
        }));
        let lines = describe_args(&catalog, &module.args);
        assert_eq!(lines[0], "- `max_results` [string, default=10]:");
        assert_eq!(lines[1], "- `mode` [string, choices=[fast, exact]]:");
    }

    #[test]
    fn test_unresolved_pointer_omits_choices() {
        let catalog = sample_catalog();
        let module = descriptor(json!({
            "name": "x",
            "args": { "kind": { "values": "@shared.missing", "description": "d" } }
        }));
        assert_eq!(describe_args(&catalog, &module.args), vec!["- `kind` [string]: d"]);
    }

    #[test]
    fn test_module_help_text_sections_and_level_order() {
        let catalog = sample_catalog();
        let module = descriptor(json!({
            "name": "code_chunking",
            "description": "Splits code into chunks.",
            "naming_rule": "code_<strategy>",
            "env": ["A", "B"],
            "granularity_levels": { "10": "ten", "2": "two", "file": "whole file" },
            "args": { "language": { "description": "Source language" } }
        }));

        let help = module_help_text(&catalog, &module);
        assert_eq!(
            help,
            "Splits code into chunks.\n\n\
             Naming rule: code_<strategy>\n\n\
             Environment variables: A, B\n\n\
             Granularity levels:\n- Level `2`: two\n- Level `10`: ten\n- Level `file`: whole file\n\n\
             Arguments:\n- `language` [string]: Source language"
        );
    }

    #[test]
    fn test_module_help_is_none_without_content() {
        let catalog = sample_catalog();
        let bare = descriptor(json!({ "name": "artifact" }));
        assert_eq!(module_help(&catalog, Some(&bare), None), None);
        assert_eq!(module_help(&catalog, None, Some("extra")), Some("extra".to_string()));
    }

    #[test]
    fn test_classifier_help_for_known_platform() {
        let catalog = sample_catalog();
        assert_eq!(
            classifier_help(&catalog, "reasoning_openai").as_deref(),
            Some("Platform OPENAI -> default model gpt-4o-mini, threads=100. Required env: OPENAI_API_KEY.")
        );
    }

    #[test]
    fn test_classifier_help_without_platform() {
        let catalog = sample_catalog();
        assert_eq!(classifier_help(&catalog, "mock"), None);
        assert_eq!(classifier_help(&catalog, "simple"), None);
        assert_eq!(classifier_help(&catalog, "simple_unknown"), None);
        assert_eq!(classifier_help(&catalog, ""), None);
    }
}
