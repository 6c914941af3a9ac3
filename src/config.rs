//! Tool settings resolved from CLI flags and environment variables

use std::env;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::constants::{env as env_vars, paths};

/// Runtime settings shared by the CLI and the editor window
#[derive(Debug, Clone)]
pub struct ToolSettings {
    /// Fixed root that relative destinations and the templates directory hang off
    pub app_root: PathBuf,
    pub catalog_path: PathBuf,
    pub templates_dir: PathBuf,
    /// Gate for writing exports to disk; download/clipboard export stays available
    pub save_enabled: bool,
    pub default_output_path: String,
}

impl ToolSettings {
    /// Build settings, letting explicit flags win over environment variables
    pub fn resolve(
        root: Option<PathBuf>,
        catalog: Option<PathBuf>,
        enable_save: bool,
    ) -> Self {
        let root = root
            .or_else(|| env::var(env_vars::ROOT).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let app_root = absolute_root(&root);

        let catalog_path = catalog
            .or_else(|| env::var(env_vars::CATALOG).ok().map(PathBuf::from))
            .map(|path| if path.is_absolute() { path } else { app_root.join(path) })
            .unwrap_or_else(|| app_root.join(paths::CATALOG_FILENAME));

        let save_enabled = enable_save
            || env::var(env_vars::ENABLE_SAVE)
                .map(|raw| is_truthy(&raw))
                .unwrap_or(false);

        let settings = Self {
            templates_dir: app_root.join(paths::TEMPLATE_DIR),
            app_root,
            catalog_path,
            save_enabled,
            default_output_path: paths::DEFAULT_OUTPUT_PATH.to_string(),
        };
        info!(
            root = %settings.app_root.display(),
            catalog = %settings.catalog_path.display(),
            save_enabled = settings.save_enabled,
            "Resolved tool settings"
        );
        settings
    }
}

/// Recognized truthy spellings for on/off environment switches
pub fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn absolute_root(root: &Path) -> PathBuf {
    match root.canonicalize() {
        Ok(path) => path,
        Err(err) => {
            warn!(root = %root.display(), error = %err, "Could not canonicalize application root");
            env::current_dir()
                .map(|cwd| cwd.join(root))
                .unwrap_or_else(|_| root.to_path_buf())
        }
    }
}
