//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::ingest::{DEFAULT_FLUSH_PERIOD_MS, DEFAULT_IMMEDIATE_LIMIT};
use crate::state::DEFAULT_PLACEHOLDER_COUNT;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "NDJVIEW_CONFIG";
/// Environment variable overriding the source URL or path.
pub const ENV_SOURCE: &str = "NDJVIEW_SOURCE";
/// Environment variable overriding the immediate-delivery limit.
pub const ENV_IMMEDIATE_LIMIT: &str = "NDJVIEW_IMMEDIATE_LIMIT";
/// Environment variable overriding the flush period in milliseconds.
pub const ENV_FLUSH_PERIOD_MS: &str = "NDJVIEW_FLUSH_PERIOD_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/ndjview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// NDJSON source: `http(s)://` URL, `file://` URL or local path.
    #[serde(default)]
    pub source: Option<String>,

    /// Records delivered one by one before batching starts.
    #[serde(default)]
    pub immediate_limit: Option<usize>,

    /// Interval between batched deliveries.
    #[serde(default)]
    pub flush_period_ms: Option<u64>,

    /// Height of a collapsed row in terminal lines.
    #[serde(default)]
    pub default_item_height: Option<u32>,

    /// Skeleton rows shown while nothing has arrived.
    #[serde(default)]
    pub placeholder_count: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// NDJSON source, if any layer provided one.
    pub source: Option<String>,
    /// Records delivered one by one before batching starts.
    pub immediate_limit: usize,
    /// Interval between batched deliveries.
    pub flush_period_ms: u64,
    /// Height of a collapsed row.
    pub default_item_height: u32,
    /// Skeleton rows shown while nothing has arrived.
    pub placeholder_count: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            source: None,
            immediate_limit: DEFAULT_IMMEDIATE_LIMIT,
            flush_period_ms: DEFAULT_FLUSH_PERIOD_MS,
            default_item_height: 1,
            placeholder_count: DEFAULT_PLACEHOLDER_COUNT,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/ndjview/ndjview.log` on Linux, or the platform's
/// state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("ndjview").join("ndjview.log")
    } else {
        PathBuf::from("ndjview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/ndjview/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ndjview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `NDJVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/ndjview/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// An environment override whose value did not parse and was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEnvVar {
    /// Variable name.
    pub name: &'static str,
    /// Raw value as found in the environment.
    pub value: String,
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `NDJVIEW_SOURCE`, `NDJVIEW_IMMEDIATE_LIMIT` and
/// `NDJVIEW_FLUSH_PERIOD_MS`. Numeric values that do not parse are ignored
/// and returned so the caller can report them once logging is installed.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> (ResolvedConfig, Vec<RejectedEnvVar>) {
    let mut rejected = Vec::new();

    if let Ok(source) = std::env::var(ENV_SOURCE) {
        if !source.trim().is_empty() {
            config.source = Some(source);
        }
    }

    if let Some(limit) = parsed_env(ENV_IMMEDIATE_LIMIT, &mut rejected) {
        config.immediate_limit = limit;
    }

    if let Some(period) = parsed_env(ENV_FLUSH_PERIOD_MS, &mut rejected) {
        config.flush_period_ms = period;
    }

    (config, rejected)
}

fn parsed_env<T: FromStr>(
    name: &'static str,
    rejected: &mut Vec<RejectedEnvVar>,
) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            rejected.push(RejectedEnvVar { name, value: raw });
            None
        }
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        source: config.source.or(defaults.source),
        immediate_limit: config.immediate_limit.unwrap_or(defaults.immediate_limit),
        flush_period_ms: config.flush_period_ms.unwrap_or(defaults.flush_period_ms),
        default_item_height: config
            .default_item_height
            .unwrap_or(defaults.default_item_height),
        placeholder_count: config
            .placeholder_count
            .unwrap_or(defaults.placeholder_count),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    source_override: Option<String>,
    immediate_limit_override: Option<usize>,
    flush_period_override: Option<u64>,
    item_height_override: Option<u32>,
) -> ResolvedConfig {
    if let Some(source) = source_override {
        config.source = Some(source);
    }

    if let Some(limit) = immediate_limit_override {
        config.immediate_limit = limit;
    }

    if let Some(period) = flush_period_override {
        config.flush_period_ms = period;
    }

    if let Some(height) = item_height_override {
        config.default_item_height = height;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
