//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("ndjview_{}_{name}.toml", std::process::id()));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_contains_ndjview_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("ndjview") && path_str.ends_with("config.toml"),
        "Path should contain 'ndjview' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_ndjview_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("ndjview.log"),
        "Default log path should end with 'ndjview.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = temp_config(
        "valid",
        r#"
source = "https://logs.example.com/stream.ndjson"
immediate_limit = 5
flush_period_ms = 250
default_item_height = 2
placeholder_count = 8
log_file_path = "/tmp/ndjview-test.log"
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should parse valid TOML")
        .expect("Should return Some for existing file");

    assert_eq!(
        config.source.as_deref(),
        Some("https://logs.example.com/stream.ndjson")
    );
    assert_eq!(config.immediate_limit, Some(5));
    assert_eq!(config.flush_period_ms, Some(250));
    assert_eq!(config.default_item_height, Some(2));
    assert_eq!(config.placeholder_count, Some(8));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/ndjview-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = temp_config("invalid", "immediate_limit = [unclosed");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a parse error, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let config_path = temp_config("unknown", "theme = \"monokai\"\n");

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn empty_config_file_is_all_none() {
    let config_path = temp_config("empty", "");

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config, ConfigFile::default());

    fs::remove_file(config_path).ok();
}

#[test]
fn merge_config_without_file_returns_defaults() {
    let resolved = merge_config(None);
    assert_eq!(resolved, ResolvedConfig::default());
    assert_eq!(resolved.immediate_limit, 20);
    assert_eq!(resolved.flush_period_ms, 1000);
    assert_eq!(resolved.default_item_height, 1);
    assert_eq!(resolved.placeholder_count, 20);
    assert_eq!(resolved.source, None);
}

#[test]
fn merge_config_takes_set_fields_only() {
    let file = ConfigFile {
        immediate_limit: Some(3),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    assert_eq!(resolved.immediate_limit, 3);
    assert_eq!(resolved.flush_period_ms, DEFAULT_FLUSH_PERIOD_MS);
    assert_eq!(resolved.log_file_path, default_log_path());
}

#[test]
#[serial(ndjview_env)]
fn apply_env_overrides_reads_all_variables() {
    env::set_var(ENV_SOURCE, "/var/log/app.ndjson");
    env::set_var(ENV_IMMEDIATE_LIMIT, "7");
    env::set_var(ENV_FLUSH_PERIOD_MS, "50");

    let (resolved, rejected) = apply_env_overrides(ResolvedConfig::default());

    env::remove_var(ENV_SOURCE);
    env::remove_var(ENV_IMMEDIATE_LIMIT);
    env::remove_var(ENV_FLUSH_PERIOD_MS);

    assert_eq!(resolved.source.as_deref(), Some("/var/log/app.ndjson"));
    assert_eq!(resolved.immediate_limit, 7);
    assert_eq!(resolved.flush_period_ms, 50);
    assert!(rejected.is_empty());
}

#[test]
#[serial(ndjview_env)]
fn apply_env_overrides_ignores_unparseable_numbers() {
    env::set_var(ENV_IMMEDIATE_LIMIT, "lots");

    let (resolved, rejected) = apply_env_overrides(ResolvedConfig::default());

    env::remove_var(ENV_IMMEDIATE_LIMIT);

    assert_eq!(resolved.immediate_limit, DEFAULT_IMMEDIATE_LIMIT);
    assert_eq!(
        rejected,
        vec![RejectedEnvVar {
            name: ENV_IMMEDIATE_LIMIT,
            value: "lots".to_string(),
        }]
    );
}

#[test]
#[serial(ndjview_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    env::remove_var(ENV_SOURCE);
    env::remove_var(ENV_IMMEDIATE_LIMIT);
    env::remove_var(ENV_FLUSH_PERIOD_MS);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), (base, Vec::new()));
}

#[test]
#[serial(ndjview_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let explicit = temp_config("explicit", "immediate_limit = 1\n");
    let from_env = temp_config("from_env", "immediate_limit = 2\n");
    env::set_var(ENV_CONFIG, &from_env);

    let loaded = load_config_with_precedence(Some(explicit.clone())).unwrap();

    env::remove_var(ENV_CONFIG);
    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();

    assert_eq!(loaded.and_then(|c| c.immediate_limit), Some(1));
}

#[test]
#[serial(ndjview_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let from_env = temp_config("env_only", "flush_period_ms = 9\n");
    env::set_var(ENV_CONFIG, &from_env);

    let loaded = load_config_with_precedence(None).unwrap();

    env::remove_var(ENV_CONFIG);
    fs::remove_file(from_env).ok();

    assert_eq!(loaded.and_then(|c| c.flush_period_ms), Some(9));
}

#[test]
fn apply_cli_overrides_only_touches_given_flags() {
    let base = ResolvedConfig {
        source: Some("from-file.ndjson".to_string()),
        ..ResolvedConfig::default()
    };

    let resolved = apply_cli_overrides(base, None, Some(4), None, Some(3));

    assert_eq!(resolved.source.as_deref(), Some("from-file.ndjson"));
    assert_eq!(resolved.immediate_limit, 4);
    assert_eq!(resolved.flush_period_ms, DEFAULT_FLUSH_PERIOD_MS);
    assert_eq!(resolved.default_item_height, 3);
}

#[test]
#[serial(ndjview_env)]
fn precedence_chain_file_then_env_then_cli() {
    let file = ConfigFile {
        source: Some("file.ndjson".to_string()),
        immediate_limit: Some(1),
        flush_period_ms: Some(10),
        ..ConfigFile::default()
    };
    env::set_var(ENV_IMMEDIATE_LIMIT, "2");
    env::set_var(ENV_FLUSH_PERIOD_MS, "20");

    let resolved = apply_cli_overrides(
        apply_env_overrides(merge_config(Some(file))).0,
        Some("cli.ndjson".to_string()),
        None,
        Some(30),
        None,
    );

    env::remove_var(ENV_IMMEDIATE_LIMIT);
    env::remove_var(ENV_FLUSH_PERIOD_MS);

    assert_eq!(resolved.source.as_deref(), Some("cli.ndjson"));
    assert_eq!(resolved.immediate_limit, 2);
    assert_eq!(resolved.flush_period_ms, 30);
}
