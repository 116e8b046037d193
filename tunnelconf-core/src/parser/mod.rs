//! Dialect text to [`TunnelConfig`].

use std::fs;
use std::path::Path;

use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::model::TunnelConfig;

pub mod ini;
pub mod properties;
pub mod yaml;

/// Parse `input` written in `dialect`.
pub fn parse(input: &[u8], dialect: Dialect) -> Result<TunnelConfig, ParseError> {
    match dialect {
        Dialect::Properties => Ok(properties::parse(input)),
        Dialect::Ini => ini::parse(input),
        Dialect::Yaml => yaml::parse(input),
    }
}

/// Read and parse a config file.
pub fn parse_file(path: &Path, dialect: Dialect) -> Result<TunnelConfig, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes, dialect)
}
