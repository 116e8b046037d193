use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{info, warn};
use tunnelconf_core::Dialect;

use crate::process::{default_output_path, process_file, Job, Processed};

/// Outcome for one file. Failures never stop the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub input: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_format: Option<Dialect>,
    pub out_format: Dialect,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl BatchResult {
    pub fn from_outcome(input: &Path, job: &Job, outcome: Result<Processed>) -> Self {
        match outcome {
            Ok(processed) => Self {
                input: input.to_path_buf(),
                output: processed.output,
                in_format: Some(processed.in_format),
                out_format: job.out_format,
                success: true,
                error: None,
                document: processed.document,
            },
            Err(err) => Self {
                input: input.to_path_buf(),
                output: None,
                in_format: None,
                out_format: job.out_format,
                success: false,
                error: Some(format!("{err:#}")),
                document: None,
            },
        }
    }

    /// Path the file was (or would be) written to.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input, self.out_format))
    }
}

/// Expand a glob pattern into regular files, sorted.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries =
        glob::glob(pattern).with_context(|| format!("invalid glob pattern '{pattern}'"))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => info!(path = %path.display(), "skipping non-file match"),
            Err(err) => warn!(error = %err, "unreadable glob match"),
        }
    }

    if files.is_empty() {
        bail!("no files match pattern '{pattern}'");
    }
    files.sort();
    Ok(files)
}

/// Process every file independently, in order.
pub fn run_batch(files: &[PathBuf], job: &Job) -> Vec<BatchResult> {
    files
        .iter()
        .map(|input| {
            let outcome = process_file(input, None, job);
            if let Err(err) = &outcome {
                warn!(file = %input.display(), error = %err, "failed");
            }
            BatchResult::from_outcome(input, job, outcome)
        })
        .collect()
}
