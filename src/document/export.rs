//! Canonical JSON output and destination handling

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::info;

use super::ConfigMap;
use crate::constants::paths::DEFAULT_DOWNLOAD_NAME;
use crate::error::{ConfigToolError, ToolResult};

/// Pretty-printed JSON with 2-space indentation and a trailing newline
pub fn to_pretty_json(config: &ConfigMap) -> String {
    let mut text = serde_json::to_string_pretty(config).unwrap_or_else(|_| "{}".to_string());
    text.push('\n');
    text
}

/// Resolve a user-entered destination.
///
/// `~` expands to the home directory; relative paths hang off `root`.
/// `.` and `..` segments are folded lexically, so the file need not exist yet.
pub fn resolve_destination(root: &Path, path_text: &str) -> PathBuf {
    let trimmed = path_text.trim();
    let candidate = match trimmed.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(trimmed),
        },
        _ => PathBuf::from(trimmed),
    };
    let joined = if candidate.is_absolute() { candidate } else { root.join(candidate) };
    fold_dot_segments(&joined)
}

fn fold_dot_segments(path: &Path) -> PathBuf {
    let mut folded = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match folded.components().next_back() {
                Some(Component::Normal(_)) => {
                    folded.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => folded.push(component),
            },
            other => folded.push(other),
        }
    }
    folded
}

/// Write the document to `path_text`, creating parent directories as needed
pub fn save_config_to_disk(root: &Path, config: &ConfigMap, path_text: &str) -> ToolResult<PathBuf> {
    if path_text.trim().is_empty() {
        return Err(ConfigToolError::Validation("destination path is empty".to_string()));
    }
    let path = resolve_destination(root, path_text);
    write_text(&path, &to_pretty_json(config))?;
    info!(path = %path.display(), "Saved configuration");
    Ok(path)
}

/// File name offered for downloads: basename of the destination or `config.json`
pub fn download_filename(path_text: &str) -> String {
    Path::new(path_text.trim())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
}

/// Path shown to the user: relative to `root` when inside it
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

pub(crate) fn write_text(path: &Path, text: &str) -> ToolResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigToolError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| ConfigToolError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn sample() -> ConfigMap {
        match json!({ "cache_dir": "./cache/x", "classifier": { "name": "mock", "args": {} } }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_to_pretty_json_format() {
        let text = to_pretty_json(&sample());
        assert_eq!(
            text,
            "{\n  \"cache_dir\": \"./cache/x\",\n  \"classifier\": {\n    \"name\": \"mock\",\n    \"args\": {}\n  }\n}\n"
        );
    }

    #[test]
    fn test_resolve_destination_relative_and_absolute() {
        let root = Path::new("/srv/tool");
        assert_eq!(resolve_destination(root, "output/a.json"), PathBuf::from("/srv/tool/output/a.json"));
        assert_eq!(resolve_destination(root, "/tmp/b.json"), PathBuf::from("/tmp/b.json"));
    }

    #[test]
    fn test_resolve_destination_folds_dot_segments() {
        let root = Path::new("/srv/tool");
        assert_eq!(resolve_destination(root, "../shared/a.json"), PathBuf::from("/srv/shared/a.json"));
        assert_eq!(resolve_destination(root, "./out/./b.json"), PathBuf::from("/srv/tool/out/b.json"));
        assert_eq!(resolve_destination(root, "/tmp/x/../c.json"), PathBuf::from("/tmp/c.json"));
        assert_eq!(resolve_destination(root, "/../d.json"), PathBuf::from("/d.json"));
    }

    #[test]
    fn test_resolve_destination_expands_home() {
        let Some(home) = dirs::home_dir() else { return };
        assert_eq!(resolve_destination(Path::new("/srv"), "~/c.json"), home.join("c.json"));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_config_to_disk(dir.path(), &sample(), "nested/deeper/config.json").unwrap();

        assert_eq!(saved, dir.path().join("nested/deeper/config.json"));
        let written = fs::read_to_string(&saved).unwrap();
        assert_eq!(written, to_pretty_json(&sample()));
    }

    #[test]
    fn test_save_reports_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let err = save_config_to_disk(dir.path(), &sample(), "blocker/config.json").unwrap_err();
        assert!(matches!(err, ConfigToolError::Write { .. }));
    }

    #[test]
    fn test_save_rejects_empty_destination() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_config_to_disk(dir.path(), &sample(), "  ").unwrap_err();
        assert!(matches!(err, ConfigToolError::Validation(_)));
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(download_filename("output/req2req.json"), "req2req.json");
        assert_eq!(download_filename(""), "config.json");
        assert_eq!(download_filename("/"), "config.json");
    }

    #[test]
    fn test_display_path_relative_to_root() {
        let root = Path::new("/srv/tool");
        assert_eq!(display_path(root, Path::new("/srv/tool/output/a.json")), "output/a.json");
        assert_eq!(display_path(root, Path::new("/tmp/a.json")), "/tmp/a.json");
    }
}
