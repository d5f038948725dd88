//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::Parser;

use crate::settings::{Settings, load_settings};

/// pagesift - drive a debounced, paginated search session from stdin commands
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(version)]
#[command(about = "Drive a debounced, paginated search session from stdin commands", long_about = None)]
pub struct Args {
    /// Settings file (default: ~/.config/pagesift/settings.conf)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Search endpoint URL (overrides the settings file)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Debounce window for new searches in milliseconds (overrides the settings file)
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What: Resolve the effective settings from the settings file and CLI overrides.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Settings with `--endpoint`/`--debounce-ms` applied on top of the file values.
#[must_use]
pub fn resolve_settings(args: &Args) -> Settings {
    let mut settings = load_settings(args.settings.as_deref());
    if let Some(endpoint) = args.endpoint.as_ref().filter(|e| !e.trim().is_empty()) {
        settings.endpoint.clone_from(endpoint);
    }
    if let Some(ms) = args.debounce_ms {
        settings.debounce_ms = ms;
    }
    settings
}
