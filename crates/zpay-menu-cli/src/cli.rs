//! Argument parsing and command dispatch.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use zpay_telemetry::{LogFormat, LoggingConfig, init_logging};

use crate::commands::{markup, replay};
use crate::error::CliResult;

#[derive(Debug, Parser)]
#[command(
    name = "zpay-menu",
    about = "Replay dashboard menu clicks against document snapshots"
)]
pub(crate) struct Cli {
    #[arg(long, global = true, help = "Log level or filter directive [default: info]")]
    log_level: Option<String>,
    #[arg(
        long,
        global = true,
        value_parser = parse_log_format,
        help = "Log output format: pretty or json [default: pretty in debug builds, json otherwise]"
    )]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply clicks to a snapshot and print the resulting snapshot.
    Replay(ReplayArgs),
    /// Validate markup conventions and print the effective values.
    CheckMarkup(MarkupArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ReplayArgs {
    /// JSON document snapshot to load.
    #[arg(long)]
    pub(crate) document: PathBuf,
    /// Optional JSON markup conventions; defaults match the dashboard templates.
    #[arg(long)]
    pub(crate) markup: Option<PathBuf>,
    /// Write the resulting snapshot here instead of stdout.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Steps applied in order: `click <selector>` or
    /// `toggle-menu <panel-id> <button-selector>`.
    #[arg(required = true, value_parser = replay::parse_step)]
    pub(crate) steps: Vec<replay::Step>,
}

#[derive(Debug, Args)]
pub(crate) struct MarkupArgs {
    /// JSON markup conventions to validate.
    #[arg(long)]
    pub(crate) markup: Option<PathBuf>,
}

/// Parse process arguments, install logging, and run the command. Returns
/// the process exit code.
#[must_use]
pub fn run() -> i32 {
    let cli = Cli::parse();
    let config = cli.logging_config();
    match init_logging(&config) {
        Ok(()) => debug!(level = config.level, format = %config.format, "logging initialised"),
        Err(err) => eprintln!("warning: {err}"),
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)
}

/// Run the CLI with explicit arguments and output sink. Logging is left to
/// the caller.
pub fn run_with_args<I, T>(args: I, out: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => execute(cli, out),
        Err(err) => {
            let _ = err.print();
            err.exit_code()
        }
    }
}

impl Cli {
    fn logging_config(&self) -> LoggingConfig<'_> {
        let defaults = LoggingConfig::default();
        LoggingConfig {
            level: self.log_level.as_deref().unwrap_or(defaults.level),
            format: self.log_format.unwrap_or(defaults.format),
        }
    }
}

fn execute(cli: Cli, out: &mut dyn Write) -> i32 {
    match dispatch(cli, out) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn dispatch(cli: Cli, out: &mut dyn Write) -> CliResult<()> {
    match cli.command {
        Command::Replay(args) => replay::handle(&args, out),
        Command::CheckMarkup(args) => markup::handle(&args, out),
    }
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}
