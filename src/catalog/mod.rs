//! Module catalog: the static registry of known module names and their arguments
//!
//! The catalog is read once per process and never mutated afterwards, so a
//! `&'static Catalog` can be handed to every editing session.

mod descriptor;
pub mod help;

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ConfigToolError, ToolResult};

pub use descriptor::{ArgSpec, ModuleCategory, ModuleDescriptor, PlatformDescriptor};

/// Descriptors of one category, ordered by name
pub type DescriptorMap = BTreeMap<String, ModuleDescriptor>;

static SHARED: OnceLock<Catalog> = OnceLock::new();
static EMPTY_DESCRIPTORS: DescriptorMap = BTreeMap::new();

/// Parsed catalog document plus per-category indexes
#[derive(Debug, Clone)]
pub struct Catalog {
    document: Value,
    sections: HashMap<ModuleCategory, DescriptorMap>,
    platforms: BTreeMap<String, PlatformDescriptor>,
}

impl Catalog {
    /// Read and index the catalog at `path`
    pub fn load(path: &Path) -> ToolResult<Self> {
        if !path.exists() {
            return Err(ConfigToolError::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&contents)?;
        let catalog = Self::from_document(document);
        info!(
            path = %path.display(),
            categories = catalog.sections.len(),
            platforms = catalog.platforms.len(),
            "Loaded module catalog"
        );
        Ok(catalog)
    }

    pub fn from_document(document: Value) -> Self {
        let sections = ModuleCategory::ALL
            .into_iter()
            .map(|category| (category, index_by_name(category, lookup(&document, category.catalog_path()))))
            .collect();

        let platforms = match lookup(&document, &["classifiers", "platforms"]) {
            Some(Value::Object(entries)) => entries
                .iter()
                .filter_map(|(key, raw)| match serde_json::from_value(raw.clone()) {
                    Ok(platform) => Some((key.clone(), platform)),
                    Err(err) => {
                        warn!(platform = %key, error = %err, "Skipping malformed platform entry");
                        None
                    }
                })
                .collect(),
            _ => BTreeMap::new(),
        };

        Self { document, sections, platforms }
    }

    /// Known modules of a category; empty when the catalog has no such section
    pub fn descriptors(&self, category: ModuleCategory) -> &DescriptorMap {
        self.sections.get(&category).unwrap_or(&EMPTY_DESCRIPTORS)
    }

    /// Classifier platforms keyed by their upper-case name
    pub fn platforms(&self) -> &BTreeMap<String, PlatformDescriptor> {
        &self.platforms
    }

    /// Resolve an `@a.b.c` pointer against the catalog document.
    ///
    /// Values that are not pointers are returned unchanged. A missing segment
    /// (or a `null` node) leaves the pointer unresolved.
    pub fn resolve_pointer<'a>(&'a self, value: &'a Value) -> Option<&'a Value> {
        let Some(target) = value.as_str().and_then(|text| text.strip_prefix('@')) else {
            return Some(value);
        };
        let segments: Vec<&str> = target.split('.').collect();
        let resolved = lookup(&self.document, &segments);
        if resolved.is_none() {
            debug!(pointer = %target, "Catalog pointer did not resolve");
        }
        resolved
    }
}

/// Load the catalog once for the whole process.
///
/// Only a successful load is cached; a missing file can be retried.
pub fn load_shared(path: &Path) -> ToolResult<&'static Catalog> {
    if let Some(catalog) = SHARED.get() {
        return Ok(catalog);
    }
    let catalog = Catalog::load(path)?;
    Ok(SHARED.get_or_init(|| catalog))
}

/// Empty descriptor map used when no catalog is available
pub fn no_descriptors() -> &'static DescriptorMap {
    &EMPTY_DESCRIPTORS
}

fn lookup<'a>(document: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut node = document;
    for segment in path {
        node = node.as_object()?.get(*segment)?;
        if node.is_null() {
            return None;
        }
    }
    Some(node)
}

fn index_by_name(category: ModuleCategory, entries: Option<&Value>) -> DescriptorMap {
    let Some(Value::Array(entries)) = entries else {
        return DescriptorMap::new();
    };
    let mut indexed = DescriptorMap::new();
    for entry in entries {
        match serde_json::from_value::<ModuleDescriptor>(entry.clone()) {
            Ok(descriptor) => {
                indexed.insert(descriptor.name.clone(), descriptor);
            }
            Err(err) => {
                warn!(category = ?category, error = %err, "Skipping malformed catalog entry");
            }
        }
    }
    indexed
}
