mod schema;

pub use schema::{ColorMode, Config};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Session lifetime when `session_ttl` is not configured.
pub const DEFAULT_SESSION_TTL: &str = "30d";

/// Get the config directory path (~/.config/golf-league/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("golf-league")
}

/// Get the default config file path (~/.config/golf-league/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/golf-league/config.yaml)
///
/// A missing file at the default path yields the default configuration; a
/// missing file at an explicitly given path is an error.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

impl Config {
    /// Path of the league data file
    pub fn data_path(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| get_config_dir().join(format!("{}.json", crate::league::LEAGUE_KEY)))
    }

    /// Parsed session lifetime
    pub fn session_ttl(&self) -> Result<Duration> {
        let raw = self.session_ttl.as_deref().unwrap_or(DEFAULT_SESSION_TTL);
        humantime::parse_duration(raw.trim())
            .with_context(|| format!("Invalid session_ttl '{}'", raw))
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref ttl) = config.session_ttl {
        match humantime::parse_duration(ttl.trim()) {
            Ok(d) if d.is_zero() => errors.push("session_ttl: must be longer than zero".to_string()),
            Ok(_) => {}
            Err(e) => errors.push(format!("session_ttl: invalid duration '{}' - {}", ttl, e)),
        }
    }

    if let Some(ref path) = config.data_file {
        if path.as_os_str().is_empty() {
            errors.push("data_file: must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
