//! NDJSON stream viewer - Entry Point

use clap::Parser;
use ndjview::model::AppError;
use ndjview::source::Source;
use std::path::PathBuf;
use tracing::{info, warn};

/// ndjview - stream NDJSON logs into a terminal list
#[derive(Parser, Debug)]
#[command(name = "ndjview")]
#[command(version)]
#[command(about = "Stream newline-delimited JSON from a URL or file into a scrollable terminal view")]
pub struct Args {
    /// NDJSON source: http(s):// URL, file:// URL or local path
    pub source: Option<String>,

    /// Records delivered one by one before batching starts
    #[arg(long)]
    pub immediate_limit: Option<usize>,

    /// Interval between batched deliveries, in milliseconds
    #[arg(long)]
    pub flush_period_ms: Option<u64>,

    /// Height of a collapsed row in terminal lines (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub item_height: Option<u32>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let (config, rejected_env) = {
        let config_file = ndjview::config::load_config_with_precedence(args.config.clone())?;
        let merged = ndjview::config::merge_config(config_file);
        let (with_env, rejected_env) = ndjview::config::apply_env_overrides(merged);
        let config = ndjview::config::apply_cli_overrides(
            with_env,
            args.source.clone(),
            args.immediate_limit,
            args.flush_period_ms,
            args.item_height,
        );
        (config, rejected_env)
    };

    ndjview::logging::init(&config.log_file_path)?;

    for rejected in &rejected_env {
        warn!(
            variable = rejected.name,
            value = %rejected.value,
            "Ignoring unparseable environment override"
        );
    }

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let source = config
        .source
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(Source::parse)
        .ok_or(AppError::NoSource)?;

    ndjview::view::run(source, &config)?;

    Ok(())
}
