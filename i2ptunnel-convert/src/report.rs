use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tunnelconf_core::{Dialect, TunnelSpec};

use crate::batch::BatchResult;
use crate::process::Mode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct BatchReport<'a> {
    mode: Mode,
    total: usize,
    succeeded: usize,
    failed: usize,
    results: &'a [BatchResult],
}

fn format_name(dialect: Option<Dialect>) -> &'static str {
    dialect.map(Dialect::as_str).unwrap_or("unknown")
}

/// One `✓`/`✗` line for a processed file.
pub fn render_result(result: &BatchResult, mode: Mode) -> String {
    if !result.success {
        return format!(
            "{} Failed to process '{}': {}",
            "✗".red().bold(),
            result.input.display(),
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    let tick = "✓".green().bold();
    let input = result.input.display();
    let from = format_name(result.in_format);
    let to = result.out_format.as_str();
    match mode {
        Mode::Validate => format!("{tick} Configuration in '{input}' is valid ({from} format)"),
        Mode::DryRun => format!("{tick} Dry-run conversion '{input}' ({from} -> {to})"),
        Mode::Convert => format!(
            "{tick} Converted '{input}' ({from}) -> '{}' ({to})",
            result.output_path().display()
        ),
    }
}

pub fn render_summary(results: &[BatchResult], mode: Mode) -> String {
    let total = results.len();
    let ok = results.iter().filter(|r| r.success).count();
    let failed = total - ok;
    let line = match mode {
        Mode::Validate => format!("Validation summary: {ok}/{total} files valid, {failed} failed"),
        Mode::DryRun => format!("Dry-run summary: {ok}/{total} files processed, {failed} failed"),
        Mode::Convert => {
            format!("Batch conversion summary: {ok}/{total} files converted, {failed} failed")
        }
    };
    if failed > 0 {
        line.yellow().to_string()
    } else {
        line
    }
}

/// Per-file lines, a blank line, then the summary.
pub fn render_batch_text(results: &[BatchResult], mode: Mode) -> String {
    let mut out: Vec<String> = results.iter().map(|r| render_result(r, mode)).collect();
    out.push(String::new());
    out.push(render_summary(results, mode));
    out.join("\n")
}

pub fn render_batch_json(results: &[BatchResult], mode: Mode) -> serde_json::Result<String> {
    let succeeded = results.iter().filter(|r| r.success).count();
    serde_json::to_string_pretty(&BatchReport {
        mode,
        total: results.len(),
        succeeded,
        failed: results.len() - succeeded,
        results,
    })
}

/// Header printed before a dry-run document.
pub fn dry_run_header(result: &BatchResult) -> String {
    format!(
        "# Converted '{}' from {} to {} format:",
        result.input.display(),
        format_name(result.in_format),
        result.out_format
    )
}

/// Supported tunnel types, one per line.
pub fn render_types(specs: &[TunnelSpec]) -> String {
    let mut out = Vec::new();
    out.push(format!("{}", "Supported tunnel types:".bold()));
    for spec in specs {
        let required: Vec<&str> = spec
            .rules
            .iter()
            .filter(|rule| rule.check.required())
            .map(|rule| rule.check.field().as_str())
            .collect();
        let mut line = format!("  {:<16} {}", spec.type_name, spec.description);
        if !required.is_empty() {
            line.push_str(&format!(" (requires {})", required.join(", ")));
        }
        out.push(line);
    }
    out.join("\n")
}
