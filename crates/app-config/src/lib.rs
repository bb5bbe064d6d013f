// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, DashboardSettings, ProviderSettings, ServerSettings, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `config/base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
///
/// Every section has defaults, so a missing base file yields the stock dashboard.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Same as [`load_settings`], reading the TOML files from `config_dir`.
pub fn load_settings_from(config_dir: &Path) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name(&config_dir.join("base").to_string_lossy()).required(false))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&config_dir.join(&environment).to_string_lossy()).required(false))
        // 3. Load settings from environment variables (e.g., `APP_SERVER__PORT=...`).
        // The prefix is `APP`, separator is `__`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    validate(&settings)?;

    Ok(settings)
}

/// Rejects settings that would make every dashboard run fail.
pub fn validate(settings: &Settings) -> Result<()> {
    if settings.dashboard.symbol.trim().is_empty() {
        return Err(Error::Invalid("dashboard.symbol must not be empty".into()));
    }
    if settings.dashboard.intervals.is_empty() {
        return Err(Error::Invalid("dashboard.intervals must list at least one interval".into()));
    }
    if settings.dashboard.table_rows == 0 {
        return Err(Error::Invalid("dashboard.table_rows must be greater than 0".into()));
    }
    if settings.dashboard.utc_offset_minutes.abs() >= 24 * 60 {
        return Err(Error::Invalid("dashboard.utc_offset_minutes must be within one day".into()));
    }
    if settings.backtest.horizon == 0 {
        return Err(Error::Invalid("backtest.horizon must be greater than 0".into()));
    }
    settings
        .indicators
        .validate()
        .map_err(|e| Error::Invalid(e.to_string()))?;
    Ok(())
}
