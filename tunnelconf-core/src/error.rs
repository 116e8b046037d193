use thiserror::Error;

use crate::dialect::Dialect;
use crate::fault::ParseFault;
use crate::model::TunnelConfig;

/// Errors that can occur while parsing a dialect into a [`TunnelConfig`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Malformed grammar located at a specific line.
    #[error(transparent)]
    Fault(#[from] ParseFault),
    /// YAML library error that carried no recoverable line number.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),
    #[error("no tunnels found")]
    NoTunnels,
    /// More than one entry under `tunnels:`; only single-tunnel documents are accepted.
    #[error("found {} tunnels ({}); exactly one tunnel per document is supported", names.len(), names.join(", "))]
    MultipleTunnels { names: Vec<String> },
    /// Option value of a shape that has no canonical representation (e.g. a nested mapping).
    #[error("unsupported value for option '{group}.{key}': {found}")]
    UnsupportedValue {
        group: &'static str,
        key: String,
        found: String,
    },
    /// Failed to read input file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while generating dialect text.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to format output: {0}")]
    Fmt(#[from] std::fmt::Error),
    /// Option key that the dialect's parser would route to another field.
    #[error("option '{key}' cannot be written in {dialect} format: it would be read back as a different setting")]
    KeyCollision { key: String, dialect: Dialect },
    /// Line break in a key or value of a line-based dialect without escapes.
    #[error("'{key}' cannot be written in {dialect} format: line breaks are not representable")]
    LineBreak { key: String, dialect: Dialect },
}

/// Specific rule violation found by the validation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("tunnel name is required")]
    MissingName,
    #[error("tunnel type is required")]
    MissingType,
    #[error("tunnel name '{0}' contains invalid characters (spaces, tabs, newlines, equals, or brackets)")]
    InvalidName(String),
    #[error("unknown tunnel type: {0}")]
    UnknownType(String),
    /// A type-specific rule failed; `reason` comes from the rule's check.
    #[error("{description}: {reason}")]
    Rule {
        description: &'static str,
        reason: String,
    },
    /// Name is legal in general but unsafe in the named dialect.
    #[error("tunnel name '{name}' {problem} in {dialect} format")]
    Dialect {
        name: String,
        dialect: &'static str,
        problem: &'static str,
    },
}

/// A validation failure together with the config that caused it.
#[derive(Debug, Clone, Error)]
#[error("validation: {failure}")]
pub struct ValidationError {
    pub config: Box<TunnelConfig>,
    #[source]
    pub failure: ValidationFailure,
}

/// Error tagged with the pipeline stage that produced it.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("parse: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("generate: {0}")]
    Generate(#[from] GenerateError),
}

impl ConvertError {
    /// Short stage name: `parse`, `validate` or `generate`.
    pub fn stage(&self) -> &'static str {
        match self {
            ConvertError::Parse(_) => "parse",
            ConvertError::Validation(_) => "validate",
            ConvertError::Generate(_) => "generate",
        }
    }
}
