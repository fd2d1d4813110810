use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::OutputFormat;

/// Environment variable that overrides the store location.
pub const DB_ENV_VAR: &str = "TCCREPORT_DB";

/// Settings loaded from ~/.config/tccreport/config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Permission store to read when no path is given on the command line.
    pub db_path: Option<PathBuf>,

    /// Default output format.
    pub format: Option<OutputFormat>,
}

/// Get the config file path.
pub fn config_path() -> PathBuf {
    crate::platform::config_dir()
        .map(|dir| dir.join("tccreport").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Load the config from the default path.
pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

/// Load the config from `path`. Missing or broken files yield defaults.
pub fn load_config_from(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Failed to parse config at {}: {e}", path.display());
            AppConfig::default()
        }),
        Err(e) => {
            log::warn!("Failed to read config at {}: {e}", path.display());
            AppConfig::default()
        }
    }
}

/// Pick the store path: explicit argument, then `TCCREPORT_DB`, then the
/// config file, then the per-user default.
pub fn resolve_store_path(explicit: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    explicit
        .or_else(|| {
            std::env::var_os(DB_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(crate::platform::default_store_path)
}
