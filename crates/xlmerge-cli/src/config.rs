//! User settings.
//!
//! Settings are read from `settings.toml` in the platform config folder, or
//! from the file given with `--config`:
//! - macOS: ~/Library/Application Support/com.xlmerge.xlmerge/
//! - Windows: %APPDATA%/xlmerge/xlmerge/config/
//! - Linux: ~/.config/xlmerge/
//!
//! ```toml
//! [database]
//! path = "/srv/data/sales.db"
//!
//! [preview]
//! rows = 20
//!
//! [charts]
//! width = 1000
//! height = 600
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use xlmerge_chart::{ChartSize, MIN_CHART_SIDE};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "xlmerge";
const APP_NAME: &str = "xlmerge";
const CONFIG_FILENAME: &str = "settings.toml";
const DATABASE_FILENAME: &str = "xlmerge.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid settings in {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub preview: PreviewSettings,
    pub charts: ChartSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite database file receiving uploads.
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Rows shown in the cleaned data preview.
    pub rows: usize,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self { rows: 20 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        let size = ChartSize::default();
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl ChartSettings {
    fn validate(&self) -> Result<(), String> {
        for (key, value) in [("width", self.width), ("height", self.height)] {
            if value < MIN_CHART_SIDE {
                return Err(format!(
                    "charts.{key} = {value} is below the {MIN_CHART_SIDE}px minimum"
                ));
            }
        }
        Ok(())
    }

    pub fn size(&self) -> ChartSize {
        ChartSize {
            width: self.width,
            height: self.height,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Path of the default settings file, if the platform has a config folder.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Database file in the platform data folder, or the working directory.
pub fn default_database_path() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from(DATABASE_FILENAME),
        |dirs| dirs.data_dir().join(DATABASE_FILENAME),
    )
}

/// Loads settings.
///
/// An explicit path must exist. Without one, the default settings file is
/// used when present and built-in defaults otherwise.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    if let Some(path) = explicit {
        return read_settings(path);
    }
    let Some(path) = settings_path() else {
        debug!("no platform config folder, using default settings");
        return Ok(Settings::default());
    };
    if !path.is_file() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    read_settings(&path)
}

fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings(&content, path)?;
    info!(path = %path.display(), "settings loaded");
    Ok(settings)
}

/// Parses settings from TOML text; `path` is only used in errors.
pub fn parse_settings(content: &str, path: &Path) -> Result<Settings, ConfigError> {
    let settings: Settings = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    settings.charts.validate().map_err(|message| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    })?;
    Ok(settings)
}
