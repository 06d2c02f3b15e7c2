//! Configuration file loading and setting resolution.
//!
//! Settings come from three layers: command-line flags, an optional TOML
//! file, and built-in defaults. The `INVENTARIO_DB` environment variable sits
//! between the flag and the file for the database path.

use std::fs;
use std::path::{Path, PathBuf};

use inv_model::{LOCALE_YEAR_RANGE, ManualEditPolicy, NormalizationOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// File read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "inventario.toml";
pub const DEFAULT_DATABASE: &str = "inventario.db";
/// Spreadsheet used to populate a new database.
pub const DEFAULT_SOURCE: &str = "sistema crud.xlsx";
/// Environment variable overriding the database path.
pub const DATABASE_ENV: &str = "INVENTARIO_DB";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config file {path}: locale_year {year} is outside 1..=9999")]
    LocaleYear { path: PathBuf, year: i32 },
}

/// Contents of `inventario.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub database: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub normalization: NormalizationOptions,
}

impl FileConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let year = config.normalization.locale_year;
        if !LOCALE_YEAR_RANGE.contains(&year) {
            return Err(ConfigError::LocaleYear {
                path: path.to_path_buf(),
                year,
            });
        }
        Ok(config)
    }
}

/// Load the config file.
///
/// An explicit path must exist. Without one, `./inventario.toml` is used when
/// present and defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(content) => {
            let config = FileConfig::parse(&content, path)?;
            info!(path = %path.display(), "loaded config");
            Ok(config)
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(FileConfig::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Values given on the command line or in the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub env_database: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub locale_year: Option<i32>,
    pub manual_edits: Option<ManualEditPolicy>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database: PathBuf,
    pub source: PathBuf,
    pub normalization: NormalizationOptions,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let database = overrides
            .database
            .or(overrides.env_database)
            .or(file.database)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));
        let source = overrides
            .source
            .or(file.source)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));
        let mut normalization = file.normalization;
        if let Some(year) = overrides.locale_year {
            normalization.locale_year = year;
        }
        if let Some(policy) = overrides.manual_edits {
            normalization.manual_edits = policy;
        }
        Self {
            database,
            source,
            normalization,
        }
    }
}
