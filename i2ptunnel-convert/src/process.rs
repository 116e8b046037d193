//! One input file through parse, validate and (optionally) generate.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use tunnelconf_core::{detect_dialect, Converter, Dialect, TunnelConfig};

use crate::path_guard::ensure_output_not_input;

/// What to do with a file once it validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Write the converted document next to the input (or to `--output`).
    Convert,
    /// Stop after validation.
    Validate,
    /// Generate but return the document instead of writing it.
    DryRun,
}

#[derive(Debug, Clone, Copy)]
pub struct Job {
    /// Forced input dialect; detected from the extension when `None`.
    pub in_format: Option<Dialect>,
    pub out_format: Dialect,
    pub strict: bool,
    pub mode: Mode,
}

/// Result of a successful [`process_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub in_format: Dialect,
    /// Written file, [`Mode::Convert`] only.
    pub output: Option<PathBuf>,
    /// Generated text, [`Mode::DryRun`] only.
    pub document: Option<String>,
}

/// Default output path: the input with its extension replaced for `dialect`.
pub fn default_output_path(input: &Path, dialect: Dialect) -> PathBuf {
    input.with_extension(dialect.extension())
}

/// Read, parse and validate `input`.
pub fn load_config(
    input: &Path,
    in_format: Option<Dialect>,
    strict: bool,
) -> Result<(TunnelConfig, Dialect)> {
    let bytes = fs::read(input)
        .with_context(|| format!("failed to read input file '{}'", input.display()))?;

    let dialect = match in_format {
        Some(dialect) => dialect,
        None => detect_dialect(input).with_context(|| {
            format!(
                "failed to detect input format for '{}' (try specifying --in-format)",
                input.display()
            )
        })?,
    };

    let converter = Converter::new(strict);
    let config = converter
        .parse_input(&bytes, dialect)
        .with_context(|| format!("failed to parse {dialect} input from '{}'", input.display()))?;
    info!(file = %input.display(), %dialect, name = %config.name, "parsed");

    converter
        .validate(&config, Some(dialect))
        .with_context(|| format!("validation error in '{}'", input.display()))?;
    info!(file = %input.display(), strict, "validated");

    Ok((config, dialect))
}

/// Run `job` on one file. `output` overrides the default output path.
pub fn process_file(input: &Path, output: Option<&Path>, job: &Job) -> Result<Processed> {
    let (config, in_format) = load_config(input, job.in_format, job.strict)?;

    if job.mode == Mode::Validate {
        return Ok(Processed {
            in_format,
            output: None,
            document: None,
        });
    }

    let bytes = Converter::new(job.strict)
        .generate_output(&config, job.out_format)
        .with_context(|| format!("failed to generate {} output", job.out_format))?;

    if job.mode == Mode::DryRun {
        return Ok(Processed {
            in_format,
            output: None,
            document: Some(String::from_utf8_lossy(&bytes).into_owned()),
        });
    }

    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, job.out_format));
    ensure_output_not_input(&target, input)?;
    fs::write(&target, bytes)
        .with_context(|| format!("failed to write output file '{}'", target.display()))?;
    info!(from = %input.display(), to = %target.display(), "wrote");

    Ok(Processed {
        in_format,
        output: Some(target),
        document: None,
    })
}
