use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use tunnelconf_core::{Dialect, UnknownDialect};

use crate::report::ReportFormat;

/// CLI defaults read from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub convert: ConvertSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertSettings {
    out_format: String,
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub format: ReportFormat,
    pub color: bool,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            out_format: Dialect::Yaml.as_str().to_string(),
            strict: false,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            color: true,
        }
    }
}

impl ConvertSettings {
    /// Output dialect. Checked when the file is loaded.
    pub fn out_format(&self) -> Dialect {
        self.out_format.parse().unwrap_or(Dialect::Yaml)
    }
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsLoadError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid out_format in settings file {path}: {source}")]
    OutFormat {
        path: String,
        source: UnknownDialect,
    },
}

/// Load settings from a TOML file. Missing keys take built-in defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_settings(&raw, path.display().to_string())
}

/// Settings compiled into the binary.
pub fn default_settings() -> Settings {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/settings/defaults.toml"
    ));
    parse_settings(embedded, "embedded settings".to_string()).unwrap_or_default()
}

/// Settings from `path` if given and readable, built-in defaults otherwise.
pub fn resolve_settings(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        return default_settings();
    };
    match load_settings(path) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(error = %err, "using built-in settings");
            default_settings()
        }
    }
}

fn parse_settings(raw: &str, path: String) -> Result<Settings, SettingsLoadError> {
    let settings: Settings = toml::from_str(raw).map_err(|source| SettingsLoadError::Parse {
        path: path.clone(),
        source,
    })?;
    settings
        .convert
        .out_format
        .parse::<Dialect>()
        .map_err(|source| SettingsLoadError::OutFormat { path, source })?;
    Ok(settings)
}
