use std::path::Path;

use anyhow::{bail, Context, Result};
use i2ptunnel_convert::batch::{expand_pattern, run_batch, BatchResult};
use i2ptunnel_convert::process::{load_config, process_file, Job, Mode};
use i2ptunnel_convert::report::{
    dry_run_header, render_batch_json, render_batch_text, render_result, render_types,
    ReportFormat,
};
use i2ptunnel_convert::settings::Settings;
use tunnelconf_core::{session_options, Dialect, TUNNEL_SPECS};

use crate::cli::Cli;

/// Resolved command-line plus settings.
struct Run {
    job: Job,
    report: ReportFormat,
}

impl Run {
    fn new(cli: &Cli, settings: &Settings) -> Self {
        let mode = if cli.validate {
            Mode::Validate
        } else if cli.dry_run {
            Mode::DryRun
        } else {
            Mode::Convert
        };
        Self {
            job: Job {
                in_format: cli.in_format.map(Dialect::from),
                out_format: cli
                    .out_format
                    .map(Dialect::from)
                    .unwrap_or_else(|| settings.convert.out_format()),
                strict: cli.strict || settings.convert.strict,
                mode,
            },
            report: cli.report.unwrap_or(settings.report.format),
        }
    }
}

pub fn run(cli: Cli, settings: &Settings) -> Result<()> {
    if cli.list_types {
        return list_types(cli.report.unwrap_or(settings.report.format));
    }

    let Some(input) = cli.input.as_deref() else {
        bail!("input file is required");
    };
    let output = cli.output.as_deref().or(cli.output_file.as_deref());
    let run = Run::new(&cli, settings);

    if cli.session_options {
        return print_session_options(Path::new(input), &run.job);
    }
    if cli.batch {
        if output.is_some() {
            bail!("cannot specify output file in batch mode - files are auto-generated");
        }
        return run_batch_mode(input, &run);
    }
    run_single(Path::new(input), output, &run)
}

fn run_single(input: &Path, output: Option<&Path>, run: &Run) -> Result<()> {
    let processed = process_file(input, output, &run.job)?;
    let result = BatchResult::from_outcome(input, &run.job, Ok(processed));

    match run.report {
        ReportFormat::Json => println!("{}", render_batch_json(&[result], run.job.mode)?),
        ReportFormat::Text => match (&result.document, run.job.mode) {
            (Some(document), Mode::DryRun) => {
                println!("{}", dry_run_header(&result));
                println!("{document}");
            }
            _ => println!("{}", render_result(&result, run.job.mode)),
        },
    }
    Ok(())
}

fn run_batch_mode(pattern: &str, run: &Run) -> Result<()> {
    let files = expand_pattern(pattern).context("batch processing failed")?;
    let results = run_batch(&files, &run.job);

    match run.report {
        ReportFormat::Json => println!("{}", render_batch_json(&results, run.job.mode)?),
        ReportFormat::Text => {
            for result in &results {
                if let Some(document) = &result.document {
                    println!("{}", dry_run_header(result));
                    println!("{document}");
                }
            }
            println!("{}", render_batch_text(&results, run.job.mode));
        }
    }

    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        bail!("{failed} of {} files failed processing", results.len());
    }
    Ok(())
}

fn print_session_options(input: &Path, job: &Job) -> Result<()> {
    let (config, _) = load_config(input, job.in_format, job.strict)?;
    for option in session_options(&config) {
        println!("{option}");
    }
    Ok(())
}

fn list_types(report: ReportFormat) -> Result<()> {
    match report {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(TUNNEL_SPECS)?),
        ReportFormat::Text => println!("{}", render_types(TUNNEL_SPECS)),
    }
    Ok(())
}
