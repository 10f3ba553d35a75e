//! `recur` — expand repeating calendar events from the command line.
//!
//! Reads one seed event in the backend's JSON format and prints either the
//! expanded series or its RFC 5545 rendering.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use recurrence_engine::{calendar::format_date, expand_event, to_rrule, EventInstance};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recur", version, about = "Expand repeating calendar events")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand a seed event into every dated instance of its series
    Expand {
        #[command(flatten)]
        input: InputArgs,

        /// Print only the instance dates
        #[arg(long)]
        dates_only: bool,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Print the seed event's repeat rule as DTSTART/RRULE lines
    Rrule {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Seed event JSON file (reads stdin if omitted)
    #[arg(short, long, env = "RECUR_INPUT")]
    input: Option<PathBuf>,
}

impl InputArgs {
    fn read_event(&self) -> Result<EventInstance> {
        let json = match &self.input {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                buf
            }
        };
        serde_json::from_str(&json).context("invalid seed event")
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match cli.command {
        Command::Expand {
            input,
            dates_only,
            compact,
        } => {
            let seed = input.read_event()?;
            let series = expand_event(&seed).context("cannot expand seed event")?;
            tracing::info!(instances = series.len(), "expanded");

            let value = if dates_only {
                serde_json::Value::from(
                    series
                        .iter()
                        .map(|e| format_date(e.date))
                        .collect::<Vec<_>>(),
                )
            } else {
                serde_json::to_value(&series)?
            };
            if compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            }
        }
        Command::Rrule { input } => {
            let seed = input.read_event()?;
            let Some(rrule) = to_rrule(seed.date, &seed.repeat) else {
                bail!("event does not repeat");
            };
            rrule
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
