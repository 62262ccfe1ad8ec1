//! File system utilities for fieldcheck
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_config, read_json, write_json};
pub use paths::{get_config_path, get_fieldcheck_dir, resolve_cwd, resolve_input};
