//! Parse → validate → generate pipeline.
//!
//! The pipeline is pure: bytes in, bytes out. Callers own all file I/O and
//! decide how to report a [`ConvertError`], whose [`stage`](ConvertError::stage)
//! tells which step failed.

use std::path::Path;

use tracing::debug;

use crate::dialect::{Dialect, UnknownDialect};
use crate::error::{ConvertError, GenerateError, ParseError, ValidationError};
use crate::model::TunnelConfig;
use crate::{parser, validate, writer};

/// Runs conversions with a fixed strictness.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    pub strict: bool,
}

impl Converter {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn parse_input(&self, input: &[u8], dialect: Dialect) -> Result<TunnelConfig, ParseError> {
        parser::parse(input, dialect)
    }

    /// Validate using this converter's strictness.
    pub fn validate(
        &self,
        config: &TunnelConfig,
        dialect: Option<Dialect>,
    ) -> Result<(), ValidationError> {
        validate::validate(config, self.strict, dialect)
    }

    pub fn generate_output(
        &self,
        config: &TunnelConfig,
        dialect: Dialect,
    ) -> Result<Vec<u8>, GenerateError> {
        writer::generate(config, dialect)
    }

    /// Full pipeline. Dialect-specific name checks use the input dialect.
    pub fn convert(&self, input: &[u8], from: Dialect, to: Dialect) -> Result<Vec<u8>, ConvertError> {
        let config = self.parse_input(input, from)?;
        debug!(name = %config.name, kind = %config.kind, %from, "parsed tunnel");

        self.validate(&config, Some(from))?;
        debug!(strict = self.strict, %to, "validation passed");

        Ok(self.generate_output(&config, to)?)
    }
}

/// Dialect for `path`, from its extension.
pub fn detect_dialect(path: &Path) -> Result<Dialect, UnknownDialect> {
    Dialect::detect(path)
}
