//! Descriptor types read from the module catalog

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata for one argument of a module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgSpec {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub default: Option<Value>,
    pub required: bool,
    pub description: String,
    /// Literal list of allowed values or an `@path.to.list` pointer into the catalog
    pub values: Option<Value>,
}

impl ArgSpec {
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("string")
    }
}

/// A named, pluggable module as described by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub naming_rule: Option<String>,
    /// Environment variables the module reads at runtime
    #[serde(default)]
    pub env: Vec<String>,
    #[serde(default)]
    pub granularity_levels: Option<Map<String, Value>>,
    /// Argument metadata in declaration order
    #[serde(default)]
    pub args: IndexMap<String, ArgSpec>,
}

/// Chat model platform usable as a classifier suffix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformDescriptor {
    pub env: Vec<String>,
    pub default_model: Option<String>,
    pub threads: Option<Value>,
    pub description: Option<String>,
}

/// Catalog section a module slot draws its choices from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleCategory {
    ArtifactProvider,
    Preprocessor,
    EmbeddingCreator,
    SourceStore,
    TargetStore,
    ResultAggregator,
    Postprocessor,
    ClassifierMode,
}

impl ModuleCategory {
    pub const ALL: [ModuleCategory; 8] = [
        ModuleCategory::ArtifactProvider,
        ModuleCategory::Preprocessor,
        ModuleCategory::EmbeddingCreator,
        ModuleCategory::SourceStore,
        ModuleCategory::TargetStore,
        ModuleCategory::ResultAggregator,
        ModuleCategory::Postprocessor,
        ModuleCategory::ClassifierMode,
    ];

    /// Path of the entry list inside the catalog document
    pub fn catalog_path(self) -> &'static [&'static str] {
        match self {
            ModuleCategory::ArtifactProvider => &["artifact_providers"],
            ModuleCategory::Preprocessor => &["preprocessors"],
            ModuleCategory::EmbeddingCreator => &["embedding_creators"],
            ModuleCategory::SourceStore => &["stores", "source_store"],
            ModuleCategory::TargetStore => &["stores", "target_store"],
            ModuleCategory::ResultAggregator => &["result_aggregators"],
            ModuleCategory::Postprocessor => &["tracelink_postprocessors"],
            ModuleCategory::ClassifierMode => &["classifiers", "modes"],
        }
    }

    /// Name accepted on the command line
    pub fn slug(self) -> &'static str {
        match self {
            ModuleCategory::ArtifactProvider => "artifact-providers",
            ModuleCategory::Preprocessor => "preprocessors",
            ModuleCategory::EmbeddingCreator => "embedding-creators",
            ModuleCategory::SourceStore => "source-stores",
            ModuleCategory::TargetStore => "target-stores",
            ModuleCategory::ResultAggregator => "result-aggregators",
            ModuleCategory::Postprocessor => "postprocessors",
            ModuleCategory::ClassifierMode => "classifier-modes",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.slug() == slug)
    }
}
