use std::env;
use std::path::{Path, PathBuf};

/// Application directory name under the XDG base directories.
const APP_DIR: &str = "pagesift";

/// Determine the settings file path, searching `$XDG_CONFIG_HOME` then `$HOME/.config`.
/// Returns the first candidate that exists.
pub(crate) fn resolve_settings_config_path() -> Option<PathBuf> {
    let home = env::var("HOME").ok();
    let xdg_config = env::var("XDG_CONFIG_HOME").ok();
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(xdg) = xdg_config.as_deref() {
        candidates.push(Path::new(xdg).join(APP_DIR).join("settings.conf"));
    }
    if let Some(h) = home.as_deref() {
        candidates.push(
            Path::new(h)
                .join(".config")
                .join(APP_DIR)
                .join("settings.conf"),
        );
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// Directory for log files: `$XDG_STATE_HOME/pagesift/logs` or
/// `~/.local/state/pagesift/logs`, falling back to the temp dir.
/// The directory is created if missing.
#[must_use]
pub fn logs_dir() -> PathBuf {
    let base = env::var("XDG_STATE_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            env::var("HOME")
                .ok()
                .map(|h| Path::new(&h).join(".local").join("state"))
        })
        .unwrap_or_else(env::temp_dir);
    let dir = base.join(APP_DIR).join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}
