//! [`TunnelConfig`] to dialect text.
//!
//! Generators never validate; they render whatever the config holds.

use std::fs;
use std::path::Path;

use crate::dialect::Dialect;
use crate::error::GenerateError;
use crate::model::TunnelConfig;

pub mod ini;
pub mod properties;
pub mod yaml;

/// Serialize `config` into `dialect` bytes.
pub fn generate(config: &TunnelConfig, dialect: Dialect) -> Result<Vec<u8>, GenerateError> {
    let text = match dialect {
        Dialect::Properties => properties::generate(config)?,
        Dialect::Ini => ini::generate(config)?,
        Dialect::Yaml => yaml::generate(config)?,
    };
    Ok(text.into_bytes())
}

/// Serialize `config` and write it to `path`.
pub fn write_file(config: &TunnelConfig, dialect: Dialect, path: &Path) -> std::io::Result<()> {
    let bytes = generate(config, dialect).map_err(std::io::Error::other)?;
    fs::write(path, bytes)
}
