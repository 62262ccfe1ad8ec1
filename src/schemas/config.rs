//! Config schema - Runtime settings for fieldcheck

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration for fieldcheck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How long the completed screen stays up before the session resets
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,

    /// Default tracing filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_reset_delay_ms() -> u64 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: default_schema_version(),
            reset_delay_ms: default_reset_delay_ms(),
            log_level: default_log_level(),
        }
    }
}
