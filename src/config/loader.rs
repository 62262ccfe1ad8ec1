//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{FieldcheckError, Result};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the working directory, falling back to defaults.
///
/// If `.fieldcheck/config.json` exists, it will be read and merged with defaults.
/// A config file that does not parse is a configuration error.
pub fn load_config(root: &Path) -> Result<Config> {
    fs::read_config(root).map_err(|e| match e {
        FieldcheckError::InvalidJson(msg) => FieldcheckError::ConfigError(msg),
        other => other,
    })
}
