//! Semantic validation of a parsed [`TunnelConfig`].
//!
//! Three tiers, stopping at the first failure:
//!
//! 1. Basic fields: name and type present, name free of whitespace, `=`, `[`, `]`.
//! 2. Type rules from [`rules::TUNNEL_SPECS`]. Unknown types fail only in strict mode.
//! 3. Dialect constraints on the name, strict mode only.

use tracing::debug;

use crate::dialect::Dialect;
use crate::error::{ValidationError, ValidationFailure};
use crate::model::TunnelConfig;

pub mod rules;

pub use rules::{lookup, Check, Field, Rule, TunnelKind, TunnelSpec, TUNNEL_SPECS};

/// Validate `config`; `dialect` enables the dialect tier when `strict` is set.
pub fn validate(
    config: &TunnelConfig,
    strict: bool,
    dialect: Option<Dialect>,
) -> Result<(), ValidationError> {
    check(config, strict, dialect).map_err(|failure| ValidationError {
        config: Box::new(config.clone()),
        failure,
    })
}

fn check(
    config: &TunnelConfig,
    strict: bool,
    dialect: Option<Dialect>,
) -> Result<(), ValidationFailure> {
    check_basic_fields(config)?;

    let Some(spec) = lookup(&config.kind) else {
        if strict {
            return Err(ValidationFailure::UnknownType(config.kind.clone()));
        }
        debug!(kind = %config.kind, "unknown tunnel type, basic checks only");
        return Ok(());
    };

    for rule in spec.rules {
        rule.check
            .evaluate(config, strict)
            .map_err(|reason| ValidationFailure::Rule {
                description: rule.description,
                reason,
            })?;
    }

    match dialect {
        Some(dialect) if strict => check_dialect(config, dialect),
        _ => Ok(()),
    }
}

fn check_basic_fields(config: &TunnelConfig) -> Result<(), ValidationFailure> {
    if config.name.is_empty() {
        return Err(ValidationFailure::MissingName);
    }
    if config.kind.is_empty() {
        return Err(ValidationFailure::MissingType);
    }
    if config
        .name
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '=' | '[' | ']'))
    {
        return Err(ValidationFailure::InvalidName(config.name.clone()));
    }
    Ok(())
}

fn check_dialect(config: &TunnelConfig, dialect: Dialect) -> Result<(), ValidationFailure> {
    let name = &config.name;
    let problem = match dialect {
        Dialect::Properties if name.contains(['.', '=']) => {
            Some("contains characters that may cause issues")
        }
        Dialect::Ini if name.contains(['[', ']']) => {
            Some("contains characters that may cause issues")
        }
        Dialect::Yaml if name.trim() != name => {
            Some("has leading or trailing spaces that may cause issues")
        }
        _ => None,
    };

    match problem {
        Some(problem) => Err(ValidationFailure::Dialect {
            name: name.clone(),
            dialect: dialect.as_str(),
            problem,
        }),
        None => Ok(()),
    }
}
