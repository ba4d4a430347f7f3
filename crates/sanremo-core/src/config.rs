// Configuration loading and parsing (config/fantasanremo.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Location of the config file relative to the base directory.
pub const CONFIG_FILE: &str = "config/fantasanremo.toml";

const DEFAULT_LEAGUE_NAME: &str = "FantaSanremo";
const DEFAULT_DB_FILE: &str = "fantasanremo.db";
const DEFAULT_LOG_FILTER: &str = "sanremo_core=info,sanremo_tui=info,warn";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub league_name: String,
    pub db_path: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            league_name: DEFAULT_LEAGUE_NAME.to_string(),
            db_path: default_db_path(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Raw deserialization target for the whole file. Every section and key
/// is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    league: LeagueSection,
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LeagueSection {
    name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LoggingSection {
    filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/fantasanremo.toml` under `base_dir`.
///
/// A missing file is not an error: the built-in defaults are used.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }

    let text = read_file(&path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let defaults = Config::default();
    let config = Config {
        league_name: file.league.name.unwrap_or(defaults.league_name),
        db_path: file.database.path.unwrap_or(defaults.db_path),
        log_filter: file.logging.filter.unwrap_or(defaults.log_filter),
    };

    validate(&config)?;

    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

/// Default database location: the platform data directory when one can be
/// determined, otherwise the working directory.
pub fn default_db_path() -> String {
    directories::ProjectDirs::from("", "", "fantasanremo")
        .map(|dirs| dirs.data_dir().join(DEFAULT_DB_FILE))
        .and_then(|path| path.to_str().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_DB_FILE.to_string())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league_name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.name".into(),
            message: "must not be empty".into(),
        });
    }

    if config.db_path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "database.path".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
