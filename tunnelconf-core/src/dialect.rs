use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Textual configuration dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Flat `key=value` properties used by the Java router.
    Properties,
    /// Section-based INI used by i2pd.
    Ini,
    /// Nested `tunnels:` YAML document.
    Yaml,
}

/// Returned when a dialect cannot be determined from a name or file extension.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownDialect {
    #[error("unsupported file extension: {0:?}")]
    Extension(String),
    #[error("unsupported format: {0} (expected properties, ini or yaml)")]
    Name(String),
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Properties => "properties",
            Dialect::Ini => "ini",
            Dialect::Yaml => "yaml",
        }
    }

    /// Extension written by default for this dialect, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Dialect::Properties => "properties",
            Dialect::Ini => "conf",
            Dialect::Yaml => "yaml",
        }
    }

    /// Detect a dialect from a file name extension.
    pub fn detect(path: &Path) -> Result<Self, UnknownDialect> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "config" | "properties" | "prop" => Ok(Dialect::Properties),
            "conf" | "ini" => Ok(Dialect::Ini),
            "yaml" | "yml" => Ok(Dialect::Yaml),
            _ => Err(UnknownDialect::Extension(ext)),
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "properties" | "prop" | "config" => Ok(Dialect::Properties),
            "ini" | "conf" => Ok(Dialect::Ini),
            "yaml" | "yml" => Ok(Dialect::Yaml),
            other => Err(UnknownDialect::Name(other.to_string())),
        }
    }
}
