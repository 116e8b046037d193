use anyhow::Result;
use clap::Parser;
use i2ptunnel_convert::settings::resolve_settings;
use tracing_subscriber::EnvFilter;

mod cli;
mod convert;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = resolve_settings(cli.config.as_deref());
    if cli.no_color || !settings.report.color {
        colored::control::set_override(false);
    }

    convert::run(cli, &settings)
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
