//! Application-wide constants
//!
//! File names, environment variables and the module names the pipeline
//! treats specially, kept in one place.

/// Files and directories under the application root
pub mod paths {
    /// Module catalog describing every known module
    pub const CATALOG_FILENAME: &str = "module_catalog.json";

    /// Directory scanned for `*.json` base templates
    pub const TEMPLATE_DIR: &str = "templates";

    /// Destination shown in the export panel on startup
    pub const DEFAULT_OUTPUT_PATH: &str = "output/config.json";

    /// Download name used when the destination has no file name
    pub const DEFAULT_DOWNLOAD_NAME: &str = "config.json";

    /// Label shown when the template directory is empty
    pub const NO_TEMPLATES_LABEL: &str = "<no templates found>";
}

/// Environment variables read at startup
pub mod env {
    /// Enables writing exports to disk (1/true/yes/on)
    pub const ENABLE_SAVE: &str = "CONFIG_TOOL_ENABLE_SAVE";

    /// Overrides the application root (defaults to the working directory)
    pub const ROOT: &str = "CONFIG_TOOL_ROOT";

    /// Overrides the catalog location
    pub const CATALOG: &str = "CONFIG_TOOL_CATALOG";

    /// Log verbosity (trace, debug, info, warn, error)
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}

/// Module names with fixed meaning in the configuration format
pub mod modules {
    /// Only source store the pipeline supports; also the legacy target store alias
    pub const CUSTOM_STORE: &str = "custom";

    /// Replacement for the legacy `custom` target store
    pub const COSINE_SIMILARITY_STORE: &str = "cosine_similarity";

    /// Classifier mode that takes no platform suffix
    pub const MOCK_CLASSIFIER: &str = "mock";

    /// Picker entry for a free-form module name
    pub const CUSTOM_OPTION: &str = "<custom>";

    /// Picker entry for "no classifier platform"
    pub const NO_PLATFORM_OPTION: &str = "<none>";
}
