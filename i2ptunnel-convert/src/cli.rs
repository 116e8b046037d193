use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use i2ptunnel_convert::report::ReportFormat;
use tunnelconf_core::Dialect;

#[derive(Parser, Debug)]
#[command(name = "i2ptunnel-convert", version)]
#[command(about = "Convert I2P tunnel configurations between Java I2P, i2pd and go-i2p formats")]
#[command(after_help = "Formats are detected from the input extension: \
.config/.properties/.prop (Java I2P), .conf/.ini (i2pd), .yaml/.yml (go-i2p).")]
pub struct Cli {
    /// Input file, or a glob pattern with --batch.
    #[arg(required_unless_present = "list_types")]
    pub input: Option<String>,
    /// Output file; same as --output.
    pub output_file: Option<PathBuf>,
    /// Override input format detection.
    #[arg(long, visible_alias = "if", value_enum)]
    pub in_format: Option<FormatArg>,
    /// Output format [default from settings: yaml].
    #[arg(long, visible_alias = "of", value_enum)]
    pub out_format: Option<FormatArg>,
    /// Output file path; takes precedence over the positional output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Validate without converting.
    #[arg(long)]
    pub validate: bool,
    /// Strict validation: privileged ports, interface and name checks, unknown types.
    #[arg(long)]
    pub strict: bool,
    /// Print the converted document instead of writing it.
    #[arg(long)]
    pub dry_run: bool,
    /// Treat the input as a glob pattern and process every match.
    #[arg(long)]
    pub batch: bool,
    /// Print the SAM session option list for the input instead of converting.
    #[arg(long, conflicts_with_all = ["batch", "validate", "dry_run"])]
    pub session_options: bool,
    /// List supported tunnel types and exit.
    #[arg(long)]
    pub list_types: bool,
    /// Report format [default from settings: text].
    #[arg(long, value_enum)]
    pub report: Option<ReportFormat>,
    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
    /// Settings file overriding the built-in defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// More logging on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Java I2P properties.
    Properties,
    /// i2pd INI.
    Ini,
    /// go-i2p YAML.
    Yaml,
}

impl From<FormatArg> for Dialect {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Properties => Dialect::Properties,
            FormatArg::Ini => Dialect::Ini,
            FormatArg::Yaml => Dialect::Yaml,
        }
    }
}
