//! Configuration module.
//!
//! Precedence: defaults → TOML file → environment → CLI flags.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    RejectedEnvVar, ResolvedConfig,
};

use std::time::Duration;

use crate::ingest::IngestSettings;
use crate::source::Source;

impl ResolvedConfig {
    /// Pipeline settings for `source` using the resolved tuning values.
    pub fn ingest_settings(&self, source: Source) -> IngestSettings {
        IngestSettings {
            source,
            immediate_limit: self.immediate_limit,
            flush_period: Duration::from_millis(self.flush_period_ms),
        }
    }
}
