//! # Settings Loader
//!
//! Centralized settings loading for the expense panel binaries. Settings live in
//! a JSON file (`settings.json` by default); every section and field is optional
//! and falls back to the defaults in [`models::Settings`]. Environment variables
//! override whatever the file says:
//!
//! | variable | field |
//! |---|---|
//! | `HOST` | `server.host` |
//! | `PORT` | `server.port` |
//! | `EXPENSES_PATH` | `data.expenses_path` |
//! | `PINNED_DATE` | `data.pinned_date` (`YYYY-MM-DD`) |
//! | `DASHBOARD_BASE_URL` | `dashboard.base_url` |
//! | `CHART_OUTPUT_DIR` | `dashboard.output_dir` |
//!
//! ```rust,no_run
//! let settings = settings_loader::load_with_env(None)?;
//! println!("listening on {}:{}", settings.server.host, settings.server.port);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::Settings;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads the given file if provided, otherwise `settings.json` when it exists,
/// otherwise defaults. An explicitly provided path must exist and parse.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings_path) = path {
        return load_settings(settings_path);
    }

    if settings_file_exists(DEFAULT_SETTINGS_FILE) {
        return load_settings(DEFAULT_SETTINGS_FILE);
    }

    tracing::debug!("No {} found, using default settings", DEFAULT_SETTINGS_FILE);
    Ok(Settings::default())
}

/// [`load_settings_with_fallback`] followed by process environment overrides.
pub fn load_with_env(path: Option<&PathBuf>) -> Result<Settings> {
    let settings = load_settings_with_fallback(path)?;
    apply_overrides(settings, |key| std::env::var(key).ok())
}

/// Applies overrides looked up by variable name. Invalid numeric or date values
/// are errors rather than silently ignored.
pub fn apply_overrides<F>(mut settings: Settings, lookup: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("HOST") {
        settings.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        settings.server.port = port
            .parse()
            .with_context(|| format!("PORT is not a valid port number: {port}"))?;
    }
    if let Some(path) = lookup("EXPENSES_PATH") {
        settings.data.expenses_path = path;
    }
    if let Some(date) = lookup("PINNED_DATE") {
        let parsed = date
            .parse()
            .with_context(|| format!("PINNED_DATE is not a YYYY-MM-DD date: {date}"))?;
        settings.data.pinned_date = Some(parsed);
    }
    if let Some(url) = lookup("DASHBOARD_BASE_URL") {
        settings.dashboard.base_url = url;
    }
    if let Some(dir) = lookup("CHART_OUTPUT_DIR") {
        settings.dashboard.output_dir = dir;
    }
    Ok(settings)
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}
