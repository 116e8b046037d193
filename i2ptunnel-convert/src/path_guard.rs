use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Fail if writing `output` would clobber `input`.
pub fn ensure_output_not_input(output: &Path, input: &Path) -> Result<()> {
    let out_norm = comparable(output)
        .with_context(|| format!("failed to normalize output path {}", output.display()))?;
    let in_norm = comparable(input)
        .with_context(|| format!("failed to normalize input path {}", input.display()))?;

    if out_norm == in_norm {
        bail!(
            "refusing to overwrite input file: output '{}' is the same file as '{}'",
            output.display(),
            input.display()
        );
    }
    Ok(())
}

fn comparable(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().context("current_dir")?.join(path)
    };

    // Output files usually don't exist yet; resolve through the parent instead.
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) if parent.exists() => Ok(parent
            .canonicalize()
            .with_context(|| format!("canonicalize {}", parent.display()))?
            .join(name)),
        _ => Ok(absolute),
    }
}
