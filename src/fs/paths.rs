//! Path resolution utilities for fieldcheck

use std::path::{Path, PathBuf};

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .fieldcheck directory.
pub fn get_fieldcheck_dir(root: &Path) -> PathBuf {
    root.join(".fieldcheck")
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_fieldcheck_dir(root).join("config.json")
}

/// Resolve `path` against `root` unless it is already absolute.
pub fn resolve_input(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
